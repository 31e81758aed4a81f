//! Persisting the user's package selection between sessions.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

/// The saved selection state of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
	pub name: String,
	pub selected: bool,
}

impl SelectionRecord {
	pub fn selected(name: impl Into<String>) -> Self {
		Self { name: name.into(), selected: true }
	}
}

/// Where selections are saved to.
///
/// The graph never saves by itself, callers decide when a batch of toggles is committed.
pub trait SelectionStore {
	fn load_selection(&self) -> crate::Result<Vec<SelectionRecord>>;
	fn save_selection(&mut self, records: &[SelectionRecord]) -> crate::Result<()>;
}

/// What changed between a saved selection and the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChanges {
	pub added: Vec<String>,
	pub removed: Vec<String>,
}

impl SelectionChanges {
	pub fn is_empty(&self) -> bool {
		self.added.is_empty() && self.removed.is_empty()
	}
}

/// Selection saved as a JSON array of [`SelectionRecord`].
#[derive(Debug, Clone)]
pub struct SelectionFile {
	path: PathBuf,
}

impl SelectionFile {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn from_config(config: &crate::Config) -> Self {
		Self::new(config.selection_path())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl SelectionStore for SelectionFile {
	/// A missing file is an empty selection.
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when the file exists but can't be read.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when deserializing the file.
	fn load_selection(&self) -> crate::Result<Vec<SelectionRecord>> {
		let file = match std::fs::File::open(&self.path) {
			Ok(f) => f,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				log::debug!("No saved selection at {}", self.path.display());
				return Ok(Vec::new());
			},
			Err(e) => return Err(e.into()),
		};
		Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
	}

	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when creating the parent directories or the file.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when serializing.
	fn save_selection(&mut self, records: &[SelectionRecord]) -> crate::Result<()> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(&self.path)?;
		serde_json::to_writer_pretty(file, records)?;
		log::info!("Saved selection of {} packages to {}", records.iter().filter(|r| r.selected).count(), self.path.display());
		Ok(())
	}
}
