use std::io::{BufRead, Write};

use fwpkg::{PackageGraph, SelectionStore};
use fwpkg::installer::PackageInstaller;
use fwpkg::manifest::{ManifestFile, ManifestSource};
use fwpkg::selection::SelectionFile;

fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optflag( "v", "verbose",    "Print package details in listings");
		opts.optflag( "y", "yes",        "Commit changes without asking");
		opts.optopt(  "m", "manifest",   "Manifest file to read packages from", "FILE");
		opts.optopt(  "s", "selection",  "File the selection is saved to", "FILE");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let mut config = fwpkg::Config::load_from_disk().unwrap_or_else(|e| {
		log::debug!("Failed to read config file: {}", e);
		log::debug!("Using default config.");
		fwpkg::Config::default()
	});
	if let Some(path) = parsed_options.opt_str("m") {
		config.set_manifest_path(path.into());
	}

	let manifest = ManifestFile::new(config.manifest_path());
	let mut store = match parsed_options.opt_str("s") {
		Some(path) => SelectionFile::new(path),
		None => SelectionFile::from_config(&config),
	};

	let session = Session {
		verbose: parsed_options.opt_present("v"),
		assume_yes: parsed_options.opt_present("y"),
	};

	let command = parsed_options.free[0].as_str();
	let args = &parsed_options.free[1..];

	let result = match command {
		"list" => load_graph(&manifest, &store).map(|graph| {
			session.print_packages(graph.packages());
		}),
		"selected" => load_graph(&manifest, &store).map(|graph| {
			session.print_packages(graph.get_selected().iter());
		}),
		"search" => match args.first() {
			Some(filter) => load_graph(&manifest, &store).map(|graph| {
				session.print_packages(graph.filter_packages(filter).into_iter());
			}),
			None => Err(Error::MissingArgument("search filter")),
		},
		"closure" => match args.first() {
			Some(name) => show_closure(&manifest, &store, name),
			None => Err(Error::MissingArgument("package name")),
		},
		"paths" => show_system_paths(&manifest),
		"select" | "deselect" => {
			if args.is_empty() {
				Err(Error::MissingArgument("package name"))
			} else {
				alter_selection(&session, &manifest, &mut store, command == "select", args)
			}
		},
		other => Err(Error::UnknownCommand(other.to_string())),
	};

	if let Err(e) = result {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

const USAGE: &str = "Usage: fwpkg-terminal [options] COMMAND [ARGS]

Commands:
    list                 List every package
    selected             List selected packages
    search FILTER        List packages matching FILTER
    closure NAME         Show every package NAME depends on
    paths                Show the system paths the manifest defines
    select NAME...       Select packages and their dependencies
    deselect NAME...     Deselect packages";

struct Session {
	verbose: bool,
	assume_yes: bool,
}

impl Session {
	fn print_packages<'p>(&self, packages: impl Iterator<Item = &'p fwpkg::Package>) {
		for package in packages {
			let marker = if package.selected { "x" } else { " " };
			let required = if package.required { " (required)" } else { "" };
			println!("[{}] {}{}", marker, package.name, required);

			if self.verbose {
				if package.display_name != package.name {
					println!("\tdisplay name: {}", package.display_name);
				}
				if !package.description.is_empty() {
					println!("\tdescription: {}", package.description);
				}
				if !package.dependencies.is_empty() {
					println!("\tdepends on: {}", package.dependencies.join(", "));
				}
				if !package.exclusions.is_empty() {
					println!("\texcludes: {}", package.exclusions.join(", "));
				}
				if let Some(url) = &package.git_url {
					println!("\tgit: {}", url);
				}
			}
		}
	}

	fn confirm(&self) -> Result<(), Error> {
		self.confirm_from(&mut std::io::stdin().lock())
	}

	fn confirm_from(&self, input: &mut impl BufRead) -> Result<(), Error> {
		if self.assume_yes {
			return Ok(());
		}

		print!("Commit changes? [(y)/n] ");
		let _ = std::io::stdout().flush();
		loop {
			let mut line = String::new();
			/* Closed or unreadable stdin must not count as the default answer */
			match input.read_line(&mut line) {
				Ok(0) | Err(_) => { println!(); return Err(Error::UserCancelled) }
				Ok(_) => {}
			}
			let line = line.trim().to_lowercase();
			if line == "y" || line.is_empty() {
				return Ok(());
			} else if line == "n" {
				return Err(Error::UserCancelled);
			} else {
				println!("\nInput invalid.")
			}
		}
	}
}

fn load_graph(manifest: &ManifestFile, store: &SelectionFile) -> Result<PackageGraph, Error> {
	let persisted = store.load_selection()?;
	log::trace!("Loading manifest {}", manifest.path().display());
	Ok(PackageGraph::load(manifest, &persisted)?)
}

fn show_closure(manifest: &ManifestFile, store: &SelectionFile, name: &str) -> Result<(), Error> {
	let graph = load_graph(manifest, store)?;
	let closure = graph.build_closure(name).map_err(fwpkg::Error::from)?;
	if closure.is_empty() {
		println!("{} has no dependencies.", name);
	}
	for dep in closure {
		println!("{}", dep);
	}
	Ok(())
}

fn show_system_paths(manifest: &ManifestFile) -> Result<(), Error> {
	for path in manifest.load_manifest()?.system_paths {
		let required = if path.required { " (required)" } else { "" };
		println!("{} = {}{}", path.name, path.default_value, required);
		if !path.title.is_empty() {
			println!("\t{}", path.title);
		}
	}
	Ok(())
}

fn alter_selection(session: &Session, manifest: &ManifestFile, store: &mut SelectionFile, select: bool, names: &[String]) -> Result<(), Error> {
	let persisted = store.load_selection()?;
	let mut graph = PackageGraph::load(manifest, &persisted)?;

	for name in names {
		let toggled = if select { graph.try_select(name) } else { graph.try_deselect(name) };
		if let Err(e) = toggled {
			log::error!("Unable to {} {}: {}", if select { "select" } else { "deselect" }, name, e);
			return Err(Error::Rejected);
		}
	}

	let changes = graph.changes_since(&persisted);
	if changes.is_empty() {
		println!("Nothing to change.");
		return Ok(());
	}

	println!("Removing packages:");
	for name in &changes.removed {
		println!("\t{}", name);
	}
	println!("Adding packages:");
	for name in &changes.added {
		println!("\t{}", name);
	}

	session.confirm()?;

	store.save_selection(&graph.selection_records())?;
	fwpkg::installer::apply_changes(&graph, &changes, &mut DryRunInstaller)?;

	Ok(())
}

/// Prints what a real installer would do.
struct DryRunInstaller;

impl PackageInstaller for DryRunInstaller {
	fn install(&mut self, package: &fwpkg::Package) -> fwpkg::Result<()> {
		match &package.git_url {
			Some(url) => println!("install {} from {}", package.name, url),
			None => println!("install {}", package.name),
		}
		Ok(())
	}

	fn uninstall(&mut self, package: &fwpkg::Package) -> fwpkg::Result<()> {
		println!("uninstall {}", package.name);
		Ok(())
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("fwpkg error: {0}")]
	Fwpkg(#[from] fwpkg::Error),
	#[error("missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("unknown command `{0}`")]
	UnknownCommand(String),
	#[error("selection change rejected")]
	Rejected,
	#[error("user cancelled an action")]
	UserCancelled,
}
