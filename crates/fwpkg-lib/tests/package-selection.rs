use fwpkg::PackageGraph;
use fwpkg::manifest::{Manifest, PackageDef};
use fwpkg::package_graph::{ConflictError, DependencyError, ToggleError};
use fwpkg_test_utils::*;

fn load(manifest: Manifest) -> PackageGraph {
	PackageGraph::load(&manifest, &[]).expect("manifest should load")
}

fn set(names: &[&str]) -> std::collections::BTreeSet<String> {
	names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn closure_contains_transitive_dependencies() {
	let graph = load(chain_manifest(&["A", "B", "C"]));
	assert_eq!(graph.build_closure("A").unwrap(), set(&["B", "C"]));
	assert_eq!(graph.build_closure("C").unwrap(), set(&[]));
}

#[test]
fn closure_terminates_on_cycles() {
	let graph = load(Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").depends_on(["A"]),
	]));
	assert_eq!(graph.build_closure("A").unwrap(), set(&["A", "B"]));
}

#[test]
fn closure_of_unknown_package_is_not_found() {
	let graph = load(scenario_manifest());
	assert_eq!(graph.build_closure("Missing"), Err(ToggleError::NotFound("Missing".to_string())));
}

#[test]
fn select_propagates_to_dependencies() {
	let mut graph = load(chain_manifest(&["A", "B"]));
	graph.try_select("A").unwrap();
	assert_eq!(selected_names(&graph), vec!["A", "B"]);
}

#[test]
fn select_through_a_cycle_selects_every_member() {
	let mut graph = load(Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").depends_on(["C"]),
		PackageDef::new("C").depends_on(["A"]),
	]));
	graph.try_select("B").unwrap();
	assert_eq!(selected_names(&graph), vec!["A", "B", "C"]);
}

#[test]
fn exclusion_blocks_transitively_without_mutation() {
	let mut graph = load(Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").excludes(["C"]),
		PackageDef::new("C"),
	]));
	graph.try_select("C").unwrap();

	let err = graph.try_select("A").unwrap_err();
	assert_eq!(err, ToggleError::Conflict(ConflictError::MutualExclusion { package_a: "B".into(), package_b: "C".into() }));
	assert_eq!(selected_names(&graph), vec!["C"]);
}

#[test]
fn restored_exclusive_pair_blocks_selecting_into_it() {
	let manifest = Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").excludes(["C"]),
		PackageDef::new("C"),
	]);
	let mut graph = PackageGraph::load(&manifest, &selected_records(&["B", "C"])).unwrap();
	assert_eq!(selected_names(&graph), vec!["B", "C"]);

	let err = graph.try_select("A").unwrap_err();
	assert_eq!(err, ToggleError::Conflict(ConflictError::MutualExclusion { package_a: "B".into(), package_b: "C".into() }));
	assert_eq!(selected_names(&graph), vec!["B", "C"]);
}

#[test]
fn required_package_can_never_be_deselected() {
	let mut graph = load(Manifest::from_packages([
		PackageDef::new("Core").required(true),
		PackageDef::new("Tools"),
	]));
	let expected = Err(ToggleError::Dependency(DependencyError::Required { package: "Core".into() }));
	assert_eq!(graph.try_deselect("Core"), expected);
	graph.try_select("Tools").unwrap();
	graph.try_select("Core").unwrap();
	assert_eq!(graph.try_deselect("Core"), expected);
	assert!(graph.is_selected("Core").unwrap());
}

#[test]
fn dependency_blocks_deselect() {
	let mut graph = load(chain_manifest(&["A", "B"]));
	graph.try_select("A").unwrap();
	assert_eq!(
		graph.try_deselect("B"),
		Err(ToggleError::Dependency(DependencyError::DependedUpon { package: "B".into(), dependent: "A".into() }))
	);
	assert_eq!(selected_names(&graph), vec!["A", "B"]);
}

#[test]
fn deselect_only_changes_the_target() {
	let mut graph = load(chain_manifest(&["A", "B"]));
	graph.try_select("B").unwrap();
	graph.try_select("A").unwrap();
	graph.try_deselect("A").unwrap();
	assert_eq!(selected_names(&graph), vec!["B"]);

	/* B no longer has a selected dependent */
	graph.try_deselect("B").unwrap();
	assert!(graph.get_selected().is_empty());
}

#[test]
fn deselect_leaves_orphaned_dependencies_selected() {
	let mut graph = load(Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").depends_on(["C"]),
		PackageDef::new("C"),
	]));
	graph.try_select("A").unwrap();
	graph.try_deselect("A").unwrap();
	assert_eq!(selected_names(&graph), vec!["B", "C"]);
}

#[test]
fn editor_session_scenario() {
	let mut graph = load(scenario_manifest());
	assert_eq!(selected_names(&graph), vec!["Core"]);

	graph.try_select("UI").unwrap();
	assert_eq!(selected_names(&graph), vec!["Core", "UI"]);

	graph.try_select("Legacy").unwrap();
	assert_eq!(selected_names(&graph), vec!["Core", "UI", "Legacy"]);

	assert_eq!(
		graph.try_select("Hotfix"),
		Err(ToggleError::Conflict(ConflictError::MutualExclusion { package_a: "Hotfix".into(), package_b: "Legacy".into() }))
	);
	assert_eq!(selected_names(&graph), vec!["Core", "UI", "Legacy"]);

	graph.try_deselect("Legacy").unwrap();
	assert_eq!(selected_names(&graph), vec!["Core", "UI"]);

	graph.try_select("Hotfix").unwrap();
	assert_eq!(selected_names(&graph), vec!["Core", "UI", "Hotfix"]);
}

#[test]
fn get_selected_is_a_snapshot() {
	let mut graph = load(scenario_manifest());
	let mut snapshot = graph.get_selected();
	snapshot[0].selected = false;
	graph.try_select("UI").unwrap();
	assert_eq!(snapshot.len(), 1);
	assert!(graph.is_selected("Core").unwrap());
}

#[test]
fn filter_matches_name_and_description() {
	let graph = load(Manifest::from_packages([
		PackageDef { description: Some("Patches shipped builds".into()), ..PackageDef::new("Hotfix") },
		PackageDef::new("Legacy"),
	]));
	let names = |filter: &str| graph.filter_packages(filter).into_iter().map(|p| p.name.clone()).collect::<Vec<_>>();
	assert_eq!(names("patches"), vec!["Hotfix"]);
	assert_eq!(names("LEG"), vec!["Legacy"]);
	assert_eq!(names(""), vec!["Hotfix", "Legacy"]);
	assert!(names("none").is_empty());
}

#[test]
fn install_order_puts_dependencies_first() {
	let graph = load(Manifest::from_packages([
		PackageDef::new("Game").depends_on(["UI", "Net"]),
		PackageDef::new("UI").depends_on(["Core"]),
		PackageDef::new("Net").depends_on(["Core"]),
		PackageDef::new("Core"),
	]));
	let order = graph.install_order(["Game", "UI", "Net", "Core"]).unwrap();
	let position = |name: &str| order.iter().position(|n| n == name).unwrap();
	assert_eq!(order.len(), 4);
	assert!(position("Core") < position("UI"));
	assert!(position("Core") < position("Net"));
	assert!(position("UI") < position("Game"));
	assert!(position("Net") < position("Game"));
}

#[test]
fn install_order_terminates_on_cycles() {
	let graph = load(Manifest::from_packages([
		PackageDef::new("A").depends_on(["B"]),
		PackageDef::new("B").depends_on(["A"]),
	]));
	let mut order = graph.install_order(["A", "B"]).unwrap();
	order.sort();
	assert_eq!(order, vec!["A", "B"]);
}
