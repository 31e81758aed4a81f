//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("package `{0}` is defined more than once")]
	DuplicatePackage(String),
	/// A dependency or exclusion names a package the manifest never defines.
	#[error("package `{package}` lists unknown {relation} `{reference}`")]
	DanglingReference {
		package: String,
		reference: String,
		relation: crate::package_graph::Relation,
	},
	#[error(transparent)]
	Toggle(#[from] crate::package_graph::ToggleError),
	#[error("installer failed on `{package}`: {reason}")]
	Install {
		package: String,
		reason: String,
	},
}
