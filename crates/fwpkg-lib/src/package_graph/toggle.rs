//! Selecting and deselecting packages.

use super::*;

/// Why a toggle was refused. The catalog is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
	/// The name isn't in the catalog. Names taken from the catalog never cause this.
	#[error("package `{0}` not found")]
	NotFound(String),
	#[error(transparent)]
	Conflict(#[from] ConflictError),
	#[error(transparent)]
	Dependency(#[from] DependencyError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
	/// `package_a` would be newly selected but can't coexist with `package_b`.
	#[error("`{package_a}` and `{package_b}` are mutually exclusive")]
	MutualExclusion {
		package_a: String,
		package_b: String,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyError {
	#[error("`{package}` is required and can't be deselected")]
	Required {
		package: String,
	},
	#[error("`{package}` can't be deselected because `{dependent}` depends on it")]
	DependedUpon {
		package: String,
		dependent: String,
	},
}

impl PackageGraph {
	/// Selects `name` along with its whole dependency closure.
	///
	/// `name` and every package in its closure are checked for exclusions against the packages already selected
	/// and against each other before anything changes, even when some of them are selected already.
	/// # Errors
	/// - [`NotFound`](ToggleError::NotFound) when `name` isn't in the catalog.
	/// - [`MutualExclusion`](ConflictError::MutualExclusion) naming the first conflicting pair found.
	/// The toggled package is checked first so a direct conflict is reported against it.
	/// A stale exclusive pair restored by [`reload()`](PackageGraph::reload()) blocks any selection whose closure reaches it.
	pub fn try_select(&mut self, name: &str) -> Result<(), ToggleError> {
		let node = self.node(name)?;

		let mut candidates = vec![node];
		candidates.extend(self.closure_indices(node).into_iter().filter(|&i| i != node));

		let selected: Vec<NodeIndex> = self.selected_indices().collect();
		for (n, &candidate) in candidates.iter().enumerate() {
			for &other in selected.iter().chain(&candidates[n + 1..]) {
				/* A selected candidate meets itself in `selected`, nodes_conflict ignores that pair */
				if self.nodes_conflict(candidate, other) {
					log::trace!("Refusing to select {}: {} excludes {}", name, self.graph[candidate].name, self.graph[other].name);
					return Err(ConflictError::MutualExclusion {
						package_a: self.graph[candidate].name.clone(),
						package_b: self.graph[other].name.clone(),
					}.into());
				}
			}
		}

		for i in candidates {
			if !self.graph[i].selected {
				log::trace!("Selecting {}", self.graph[i].name);
				self.graph[i].selected = true;
			}
		}
		Ok(())
	}

	/// Deselects `name` only. Its dependencies stay selected even if nothing else needs them.
	/// # Errors
	/// - [`NotFound`](ToggleError::NotFound) when `name` isn't in the catalog.
	/// - [`Required`](DependencyError::Required) when the package is required.
	/// - [`DependedUpon`](DependencyError::DependedUpon) when a selected package directly depends on it.
	pub fn try_deselect(&mut self, name: &str) -> Result<(), ToggleError> {
		let node = self.node(name)?;

		if self.graph[node].required {
			return Err(DependencyError::Required { package: name.to_string() }.into());
		}

		/* Direct dependents are enough: anything depending on it transitively also has a selected direct dependent.
		   A package depending on itself counts as its own dependent. */
		let dependent = self.graph.edges_directed(node, Incoming)
			.filter(|e| *e.weight() == EdgeData::Depends)
			.map(|e| e.source())
			.filter(|&i| self.graph[i].selected)
			.min();

		if let Some(dependent) = dependent {
			return Err(DependencyError::DependedUpon {
				package: name.to_string(),
				dependent: self.graph[dependent].name.clone(),
			}.into());
		}

		log::trace!("Deselecting {}", name);
		self.graph[node].selected = false;
		Ok(())
	}

	/// Checks whether either package declares an exclusion of the other.
	/// # Errors
	/// - [`NotFound`](ToggleError::NotFound) when either name isn't in the catalog.
	pub fn conflicts(&self, a: &str, b: &str) -> Result<bool, ToggleError> {
		Ok(self.nodes_conflict(self.node(a)?, self.node(b)?))
	}

	fn nodes_conflict(&self, a: NodeIndex, b: NodeIndex) -> bool {
		a != b && self.graph.edges_connecting(a, b)
			.chain(self.graph.edges_connecting(b, a))
			.any(|e| *e.weight() == EdgeData::Excludes)
	}
}
