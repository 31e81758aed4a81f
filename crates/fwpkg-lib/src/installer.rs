//! Hand-off from a committed selection to whatever installs packages.
//!
//! Fetching sources, patching the host project and scaffolding live behind [`PackageInstaller`].
//! [`apply_changes()`] only decides what to call and in which order.

use crate::package::Package;
use crate::package_graph::PackageGraph;
use crate::selection::SelectionChanges;

pub trait PackageInstaller {
	fn install(&mut self, package: &Package) -> crate::Result<()>;
	fn uninstall(&mut self, package: &Package) -> crate::Result<()>;
}

/// Runs `installer` over `changes`.
///
/// Removals go first with dependents before their dependencies, then additions with dependencies first.
/// Names the catalog no longer knows are skipped.
/// # Errors
/// The first error from `installer`, nothing after it is attempted.
pub fn apply_changes(graph: &PackageGraph, changes: &SelectionChanges, installer: &mut impl PackageInstaller) -> crate::Result<()> {
	let known = |names: &[String]| -> Vec<String> {
		names.iter()
			.filter(|name| {
				let exists = graph.get_package(name).is_some();
				if !exists { log::warn!("Skipping {}, it is no longer in the manifest", name); }
				exists
			})
			.cloned()
			.collect()
	};

	let mut removals = graph.install_order(known(&changes.removed))?;
	removals.reverse();
	for name in removals {
		if let Some(package) = graph.get_package(&name) {
			log::info!("Uninstalling {}", name);
			installer.uninstall(package)?;
		}
	}

	for name in graph.install_order(known(&changes.added))? {
		if let Some(package) = graph.get_package(&name) {
			log::info!("Installing {}", name);
			installer.install(package)?;
		}
	}

	Ok(())
}
