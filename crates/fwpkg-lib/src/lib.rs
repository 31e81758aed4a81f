pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod manifest;
pub use manifest::Manifest;
pub use manifest::ManifestSource;

pub mod package;
pub use package::Package;

pub mod package_graph;
pub use package_graph::PackageGraph;

pub mod selection;
pub use selection::SelectionRecord;
pub use selection::SelectionStore;

pub mod installer;
