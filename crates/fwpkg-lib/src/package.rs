//! A package in the loaded catalog.

use serde::{Serialize, Deserialize};

use crate::manifest::{AssemblyDefinition, PackageDef};

/// A unit of optional framework functionality.
///
/// Everything except `selected` is fixed once the catalog is loaded.
/// Selection is changed only through [`PackageGraph`](crate::PackageGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
	pub name: String,
	pub required: bool,
	pub selected: bool,
	/// Declared dependencies in manifest order.
	pub dependencies: Vec<String>,
	/// Exclusions as declared on this package. The relation is symmetric in effect,
	/// see [`PackageGraph::conflicts()`](crate::PackageGraph::conflicts()).
	pub exclusions: Vec<String>,
	/// Packages that list this one as a dependency.
	pub reverse_dependencies: Vec<String>,

	pub display_name: String,
	pub title: String,
	pub description: String,
	pub git_url: Option<String>,
	pub assembly_definition: Option<AssemblyDefinition>,
	pub assets_path: Option<String>,
}

impl std::hash::Hash for Package {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}

impl std::fmt::Display for Package {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}

impl AsRef<str> for Package {
	fn as_ref(&self) -> &str {
		&self.name
	}
}

impl From<PackageDef> for Package {
	fn from(def: PackageDef) -> Self {
		let title = def.title.unwrap_or_default();
		Self {
			display_name: def.display_name.unwrap_or_else(|| def.name.clone()),
			/* Description falls back to the title */
			description: def.description.unwrap_or_else(|| title.clone()),
			title,
			selected: def.required,
			name: def.name,
			required: def.required,
			dependencies: def.dependencies,
			exclusions: def.exclusions,
			reverse_dependencies: Vec::new(),
			git_url: def.git_url,
			assembly_definition: def.assembly_definition,
			assets_path: def.assets_path,
		}
	}
}

impl Package {
	/// Case-insensitive match against display name, name and description.
	pub fn matches_filter(&self, filter: &str) -> bool {
		if filter.is_empty() {
			return true;
		}
		let filter = filter.to_lowercase();
		self.display_name.to_lowercase().contains(&filter)
			|| self.name.to_lowercase().contains(&filter)
			|| self.description.to_lowercase().contains(&filter)
	}
}
