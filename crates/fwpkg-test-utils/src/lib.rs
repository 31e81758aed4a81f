//! Various helper functions for testing
//!
//! functions in this module should use results and not use any panics to avoid confusion in callers

use std::path::{Path, PathBuf};

use fwpkg::manifest::{Manifest, PackageDef};
use fwpkg::{Package, SelectionRecord, SelectionStore};
use fwpkg::installer::PackageInstaller;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
}

/// `Core` (required), `UI` depending on `Core`, `Hotfix` excluding `Legacy`, and `Legacy`.
pub fn scenario_manifest() -> Manifest {
	Manifest::from_packages([
		PackageDef::new("Core").required(true),
		PackageDef::new("UI").depends_on(["Core"]),
		PackageDef::new("Hotfix").excludes(["Legacy"]),
		PackageDef::new("Legacy"),
	])
}

/// Packages named by `names` where each one depends on the next.
pub fn chain_manifest(names: &[&str]) -> Manifest {
	Manifest::from_packages(names.iter().enumerate().map(|(i, name)| {
		PackageDef::new(*name).depends_on(names.get(i + 1).copied())
	}))
}

/// Selection records with every name selected.
pub fn selected_records(names: &[&str]) -> Vec<SelectionRecord> {
	names.iter().map(|n| SelectionRecord::selected(*n)).collect()
}

/// Names of the selected packages in manifest order.
pub fn selected_names(graph: &fwpkg::PackageGraph) -> Vec<String> {
	graph.get_selected().into_iter().map(|p| p.name).collect()
}

/// A [`SelectionStore`] held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySelectionStore {
	pub records: Vec<SelectionRecord>,
	pub saves: usize,
}

impl SelectionStore for MemorySelectionStore {
	fn load_selection(&self) -> fwpkg::Result<Vec<SelectionRecord>> {
		Ok(self.records.clone())
	}

	fn save_selection(&mut self, records: &[SelectionRecord]) -> fwpkg::Result<()> {
		self.records = records.to_vec();
		self.saves += 1;
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallCall {
	Install(String),
	Uninstall(String),
}

/// Records every call and optionally fails on one package.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
	pub calls: Vec<InstallCall>,
	pub fail_on: Option<String>,
}

impl RecordingInstaller {
	fn check(&self, package: &Package) -> fwpkg::Result<()> {
		if self.fail_on.as_deref() == Some(package.name.as_str()) {
			return Err(fwpkg::Error::Install { package: package.name.clone(), reason: "requested failure".to_string() });
		}
		Ok(())
	}
}

impl PackageInstaller for RecordingInstaller {
	fn install(&mut self, package: &Package) -> fwpkg::Result<()> {
		self.check(package)?;
		self.calls.push(InstallCall::Install(package.name.clone()));
		Ok(())
	}

	fn uninstall(&mut self, package: &Package) -> fwpkg::Result<()> {
		self.check(package)?;
		self.calls.push(InstallCall::Uninstall(package.name.clone()));
		Ok(())
	}
}

/// A temporary directory removed when dropped.
pub struct TempWorkspace {
	dir: tempfile::TempDir,
}

impl TempWorkspace {
	pub fn new() -> Result<Self, Error> {
		Ok(Self { dir: tempfile::tempdir()? })
	}

	pub fn path(&self) -> &Path {
		self.dir.path()
	}

	/// Writes `manifest` as JSON and returns its path.
	pub fn write_manifest(&self, manifest: &Manifest) -> Result<PathBuf, Error> {
		let path = self.dir.path().join("fwpkg-manifest.json");
		std::fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
		Ok(path)
	}

	/// Writes raw text to `name` inside the workspace.
	pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, Error> {
		let path = self.dir.path().join(name);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, contents)?;
		Ok(path)
	}
}
