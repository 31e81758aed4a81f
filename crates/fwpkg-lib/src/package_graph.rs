//! The package resolution engine.
//!
//! A [`PackageGraph`] owns the catalog loaded from a [`ManifestSource`] and keeps the selected set consistent:
//! - a selected package always has its full dependency closure selected,
//! - a selection never pulls in a package excluded by, or excluding, a selected one,
//! - required packages are always selected.
//!
//! # Usage
//! 1. [`PackageGraph::load()`] with a manifest source and the last saved selection.
//! 1. [`PackageGraph::try_select()`] / [`PackageGraph::try_deselect()`] as the user toggles packages.
//! A failed toggle changes nothing and the returned [`ToggleError`] says why.
//! 1. [`PackageGraph::selection_records()`] to persist through a [`SelectionStore`](crate::SelectionStore).
//!
//! Dependency cycles are allowed in the manifest, every traversal tracks what it has visited.

use std::collections::{HashMap, HashSet};

use petgraph::prelude::*;
use serde::{Serialize, Deserialize};

use crate::manifest::{ManifestSource, PackageDef};
use crate::package::Package;
use crate::selection::{SelectionChanges, SelectionRecord};

mod closure;

mod toggle;
pub use toggle::ToggleError;
pub use toggle::ConflictError;
pub use toggle::DependencyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeData {
	/// The source package needs the target package.
	Depends,
	/// The source package declares it can't be selected together with the target.
	Excludes,
}

/// Which list a manifest reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
	Dependency,
	Exclusion,
}

impl std::fmt::Display for Relation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Relation::Dependency => write!(f, "dependency"),
			Relation::Exclusion => write!(f, "exclusion"),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageGraph {
	/// Nodes are inserted in manifest order so node indices double as display order.
	graph: DiGraph<Package, EdgeData>,
	index: HashMap<String, NodeIndex>,
}

impl PackageGraph {
	/// Creates a graph and [`reload()`](PackageGraph::reload())s it.
	pub fn load(source: &impl ManifestSource, persisted: &[SelectionRecord]) -> crate::Result<Self> {
		let mut graph = Self::default();
		graph.reload(source, persisted)?;
		Ok(graph)
	}

	/// Rebuilds the catalog from `source` and restores `persisted` on top of the manifest defaults.
	///
	/// Persisted selections are repaired so every selected package has its dependencies selected.
	/// Exclusions are not re-checked, a persisted pair that has since become exclusive stays selected.
	///
	/// On error the current catalog is left as it was.
	/// # Errors
	/// - Any error from the `source`.
	/// - [`DuplicatePackage`](crate::Error::DuplicatePackage) when two packages share a name.
	/// - [`DanglingReference`](crate::Error::DanglingReference) when a dependency or exclusion names an unknown package.
	/// - [`Parse`](crate::Error::Parse) when a package has an empty name.
	pub fn reload(&mut self, source: &impl ManifestSource, persisted: &[SelectionRecord]) -> crate::Result<()> {
		let manifest = source.load_manifest()?;
		let mut next = Self::from_definitions(manifest.packages)?;
		next.apply_persisted_selection(persisted);
		next.repair_selection();

		log::debug!("Loaded {} packages, {} selected", next.len(), next.selected_indices().count());
		*self = next;
		Ok(())
	}

	fn from_definitions(definitions: Vec<PackageDef>) -> crate::Result<Self> {
		let mut graph = DiGraph::<Package, EdgeData>::with_capacity(definitions.len(), 0);
		let mut index = HashMap::with_capacity(definitions.len());

		for def in definitions {
			if def.name.is_empty() {
				return Err(crate::Error::Parse("package definition without a name".to_string()));
			}
			if index.contains_key(&def.name) {
				return Err(crate::Error::DuplicatePackage(def.name));
			}
			let name = def.name.clone();
			let i = graph.add_node(Package::from(def));
			index.insert(name, i);
		}

		/* Edges need every node to exist first so forward references resolve */
		let mut edges = Vec::<(NodeIndex, NodeIndex, EdgeData)>::new();
		for i in graph.node_indices() {
			let package = &graph[i];
			let relations = [
				(&package.dependencies, Relation::Dependency, EdgeData::Depends),
				(&package.exclusions, Relation::Exclusion, EdgeData::Excludes),
			];
			for (names, relation, edge) in relations {
				for name in names {
					let target = index.get(name).ok_or_else(|| crate::Error::DanglingReference {
						package: package.name.clone(),
						reference: name.clone(),
						relation,
					})?;
					edges.push((i, *target, edge));
				}
			}
		}
		for (a, b, edge) in edges {
			graph.add_edge(a, b, edge);
		}

		for i in graph.node_indices().collect::<Vec<_>>() {
			let mut dependents: Vec<NodeIndex> = graph.edges_directed(i, Incoming)
				.filter(|e| *e.weight() == EdgeData::Depends)
				.map(|e| e.source())
				.collect();
			dependents.sort();
			dependents.dedup();
			let names = dependents.into_iter().map(|d| graph[d].name.clone()).collect();
			graph[i].reverse_dependencies = names;
		}

		Ok(Self { graph, index })
	}

	fn apply_persisted_selection(&mut self, persisted: &[SelectionRecord]) {
		for record in persisted {
			let Some(&i) = self.index.get(&record.name) else {
				log::debug!("Ignoring saved selection for unknown package {}", record.name);
				continue;
			};
			let package = &mut self.graph[i];
			if package.required && !record.selected {
				log::warn!("Package {} is required, ignoring saved deselection", package.name);
				continue;
			}
			package.selected = record.selected;
		}
	}

	/// Selects the dependency closure of every selected package.
	fn repair_selection(&mut self) {
		let selected: Vec<NodeIndex> = self.selected_indices().collect();
		for i in selected {
			for dep in self.closure_indices(i) {
				if !self.graph[dep].selected {
					log::info!("Selecting {} as it is needed by {}", self.graph[dep].name, self.graph[i].name);
					self.graph[dep].selected = true;
				}
			}
		}
	}

	/* Queries */

	pub fn len(&self) -> usize {
		self.graph.node_count()
	}

	pub fn is_empty(&self) -> bool {
		self.graph.node_count() == 0
	}

	pub fn get_package(&self, name: &str) -> Option<&Package> {
		self.index.get(name).map(|&i| &self.graph[i])
	}

	/// Every package in manifest order.
	pub fn packages(&self) -> impl Iterator<Item = &Package> + '_ {
		self.graph.node_indices().map(move |i| &self.graph[i])
	}

	/// Snapshot of the selected packages in manifest order.
	pub fn get_selected(&self) -> Vec<Package> {
		self.selected_indices().map(|i| self.graph[i].clone()).collect()
	}

	pub fn is_selected(&self, name: &str) -> Result<bool, ToggleError> {
		Ok(self.graph[self.node(name)?].selected)
	}

	/// Packages whose display name, name or description contain `filter`, ignoring case.
	pub fn filter_packages(&self, filter: &str) -> Vec<&Package> {
		self.packages().filter(|p| p.matches_filter(filter)).collect()
	}

	/// The selection state of every package, for saving.
	pub fn selection_records(&self) -> Vec<SelectionRecord> {
		self.packages()
			.map(|p| SelectionRecord { name: p.name.clone(), selected: p.selected })
			.collect()
	}

	/// Compares the current selection with a saved one.
	///
	/// `added` follows manifest order, `removed` follows the order of `persisted`.
	pub fn changes_since(&self, persisted: &[SelectionRecord]) -> SelectionChanges {
		let previous: HashSet<&str> = persisted.iter()
			.filter(|r| r.selected)
			.map(|r| r.name.as_str())
			.collect();

		let added = self.packages()
			.filter(|p| p.selected && !previous.contains(p.name.as_str()))
			.map(|p| p.name.clone())
			.collect();

		let mut seen = HashSet::<&str>::new();
		let removed = persisted.iter()
			.filter(|r| r.selected && seen.insert(r.name.as_str()))
			.filter(|r| !self.get_package(&r.name).is_some_and(|p| p.selected))
			.map(|r| r.name.clone())
			.collect();

		SelectionChanges { added, removed }
	}

	pub(crate) fn node(&self, name: &str) -> Result<NodeIndex, ToggleError> {
		self.index.get(name).copied().ok_or_else(|| ToggleError::NotFound(name.to_string()))
	}

	fn selected_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
		self.graph.node_indices().filter(move |&i| self.graph[i].selected)
	}
}
