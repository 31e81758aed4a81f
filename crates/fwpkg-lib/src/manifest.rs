//! # Framework manifest
//!
//! The manifest lists every optional package of the framework together with its
//! relationships to other packages. It is read once per [`PackageGraph::reload()`](crate::PackageGraph::reload())
//! through a [`ManifestSource`].
//!
//! On disk the manifest is a JSON document:
//! ```json
//! {
//!   "environment_variables": { "HOST": "https://git.example.com" },
//!   "system_paths": [ { "name": "Root", "default_value": "Assets/Framework", "required": true } ],
//!   "packages": [
//!     { "name": "Core", "required": true, "git_url": "%HOST%/core.git" },
//!     { "name": "UI", "dependencies": ["Core"] },
//!     { "name": "Hotfix", "exclusions": ["Legacy"] },
//!     { "name": "Legacy" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

mod variables;
pub use variables::expand_variables;

/// Supplies the package catalog.
pub trait ManifestSource {
	fn load_manifest(&self) -> crate::Result<Manifest>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
	/// Substituted for `%NAME%` in package urls, asset paths and system path defaults.
	pub environment_variables: BTreeMap<String, String>,
	pub system_paths: Vec<SystemPath>,
	pub packages: Vec<PackageDef>,
}

/// A package as declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageDef {
	pub name: String,
	pub required: bool,
	pub dependencies: Vec<String>,
	/// Packages that can't be selected together with this one. Only needs declaring on one side.
	pub exclusions: Vec<String>,

	pub display_name: Option<String>,
	pub title: Option<String>,
	pub description: Option<String>,
	pub git_url: Option<String>,
	pub assembly_definition: Option<AssemblyDefinition>,
	pub assets_path: Option<String>,
}

impl PackageDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn depends_on(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.dependencies.extend(names.into_iter().map(Into::into));
		self
	}

	pub fn excludes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.exclusions.extend(names.into_iter().map(Into::into));
		self
	}
}

/// Assembly load ordering for a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyDefinition {
	pub name: String,
	pub order: i32,
	pub loadable_strategies: Vec<String>,
}

/// A directory the host project has to provide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPath {
	pub name: String,
	pub default_value: String,
	pub title: String,
	pub required: bool,
}

impl Manifest {
	pub fn from_packages(packages: impl IntoIterator<Item = PackageDef>) -> Self {
		Self {
			packages: packages.into_iter().collect(),
			..Default::default()
		}
	}

	/// Parses a manifest and expands its environment variables.
	pub fn from_json(json: &str) -> crate::Result<Self> {
		let mut manifest: Manifest = serde_json::from_str(json)?;
		manifest.expand_environment_variables();
		Ok(manifest)
	}

	/// Replaces `%NAME%` references with values from `environment_variables`.
	pub fn expand_environment_variables(&mut self) {
		let vars = &self.environment_variables;
		for package in &mut self.packages {
			for field in [&mut package.git_url, &mut package.assets_path].into_iter().flatten() {
				*field = expand_variables(field, vars);
			}
		}
		for path in &mut self.system_paths {
			path.default_value = expand_variables(&path.default_value, vars);
		}
	}
}

/// An in-memory manifest is its own source.
impl ManifestSource for Manifest {
	fn load_manifest(&self) -> crate::Result<Manifest> {
		Ok(self.clone())
	}
}

/// A JSON manifest file.
#[derive(Debug, Clone)]
pub struct ManifestFile {
	path: PathBuf,
}

impl ManifestFile {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ManifestSource for ManifestFile {
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the file can't be read.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when the contents aren't a valid manifest.
	fn load_manifest(&self) -> crate::Result<Manifest> {
		log::debug!("Reading manifest from {}", self.path.display());
		let json = std::fs::read_to_string(&self.path)?;
		Manifest::from_json(&json)
	}
}
