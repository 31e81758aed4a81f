//! Traversals over `Depends` edges.

use std::collections::{BTreeSet, HashSet, VecDeque};

use petgraph::visit::EdgeFiltered;

use super::*;

impl PackageGraph {
	/// Every package reachable from `name` through dependencies.
	///
	/// `name` itself is only part of the result when a dependency cycle leads back to it.
	/// # Errors
	/// - [`NotFound`](ToggleError::NotFound) when `name` isn't in the catalog.
	pub fn build_closure(&self, name: &str) -> Result<BTreeSet<String>, ToggleError> {
		let node = self.node(name)?;
		Ok(self.closure_indices(node).into_iter().map(|i| self.graph[i].name.clone()).collect())
	}

	/// Breadth first search from `start`, visiting each package once.
	pub(super) fn closure_indices(&self, start: NodeIndex) -> Vec<NodeIndex> {
		let mut visited = HashSet::<NodeIndex>::new();
		let mut closure = Vec::<NodeIndex>::new();
		let mut queue: VecDeque<NodeIndex> = self.dependencies_of(start).collect();

		while let Some(i) = queue.pop_front() {
			if !visited.insert(i) { continue; }
			closure.push(i);
			queue.extend(self.dependencies_of(i));
		}

		closure
	}

	fn dependencies_of(&self, src: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
		self.graph.edges_directed(src, Outgoing)
			.filter(|e| *e.weight() == EdgeData::Depends)
			.map(|e| e.target())
	}

	/// Orders `names` so that dependencies come before the packages needing them.
	///
	/// Dependencies outside of `names` are walked through but not returned.
	/// Packages in a cycle are returned in the order the walk finishes them.
	/// # Errors
	/// - [`NotFound`](ToggleError::NotFound) for the first name not in the catalog.
	pub fn install_order(&self, names: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Vec<String>, ToggleError> {
		let mut wanted = Vec::<NodeIndex>::new();
		for name in names {
			wanted.push(self.node(name.as_ref())?);
		}
		wanted.sort();
		wanted.dedup();

		let depends = EdgeFiltered::from_fn(&self.graph, |e| *e.weight() == EdgeData::Depends);
		let mut dfs = DfsPostOrder::empty(&depends);
		let mut order = Vec::<String>::with_capacity(wanted.len());

		for &start in &wanted {
			dfs.move_to(start);
			while let Some(i) = dfs.next(&depends) {
				if wanted.binary_search(&i).is_ok() {
					order.push(self.graph[i].name.clone());
				}
			}
		}

		Ok(order)
	}
}
