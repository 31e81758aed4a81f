//! Where fwpkg keeps its files.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	data_dir: PathBuf,
	manifest_path: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: base_dir("XDG_DATA_HOME", ".local/share").join("fwpkg"),
			manifest_path: PathBuf::from("fwpkg-manifest.json"),
		}
	}
}

/// Resolves an XDG style base directory, falling back to `$HOME/<home_relative>`.
///
/// The working directory is used when neither variable is set.
fn base_dir(xdg_var: &str, home_relative: &str) -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		let _ = (xdg_var, home_relative);
		std::env::var("APPDATA").map(PathBuf::from).unwrap_or_default()
	}

	#[cfg(not(target_os = "windows"))]
	{
		if let Ok(e) = std::env::var(xdg_var) {
			PathBuf::from(e)
		} else if let Ok(home) = std::env::var("HOME") {
			PathBuf::from(home).join(home_relative)
		} else {
			PathBuf::default()
		}
	}
}

impl Config {
	/// Path of the config file itself.
	pub fn config_path() -> PathBuf {
		base_dir("XDG_CONFIG_HOME", ".config").join("fwpkg").join("config.json")
	}

	/// Loads the config from [`config_path()`](Config::config_path()).
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when opening or reading from the file.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when deserializing the file.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::config_path())
	}

	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path.as_ref())?;
		let config = serde_json::from_reader(std::io::BufReader::new(file))?;
		log::debug!("Loaded config from {}", path.as_ref().display());
		Ok(config)
	}

	/// Saves the config to [`config_path()`](Config::config_path()), creating parent directories as needed.
	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::config_path())
	}

	pub fn save_to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}
	pub fn set_data_dir(&mut self, data_dir: PathBuf) {
		self.data_dir = data_dir;
	}

	pub fn manifest_path(&self) -> &Path {
		&self.manifest_path
	}
	pub fn set_manifest_path(&mut self, manifest_path: PathBuf) {
		self.manifest_path = manifest_path;
	}

	/// Where the last saved selection lives.
	pub fn selection_path(&self) -> PathBuf {
		self.data_dir.join("selection.json")
	}
}
