use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn variable_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"%([A-Za-z0-9_]+)%").expect("variable pattern should be a valid regex."))
}

/// Replaces every `%NAME%` in `input` whose `NAME` is in `vars`.
///
/// Unknown names are left untouched.
pub fn expand_variables(input: &str, vars: &BTreeMap<String, String>) -> String {
	if vars.is_empty() {
		return input.to_string();
	}
	variable_pattern()
		.replace_all(input, |caps: &Captures| {
			match vars.get(&caps[1]) {
				Some(value) => value.clone(),
				None => caps[0].to_string(),
			}
		})
		.into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn vars() -> BTreeMap<String, String> {
		BTreeMap::from([("HOST".to_string(), "example.com".to_string())])
	}

	#[test] fn known_variable_is_replaced() { assert_eq!(expand_variables("git@%HOST%:core", &vars()), "git@example.com:core") }
	#[test] fn unknown_variable_is_kept() { assert_eq!(expand_variables("%OTHER%/x", &vars()), "%OTHER%/x") }
	#[test] fn repeated_variable_is_replaced_everywhere() { assert_eq!(expand_variables("%HOST%%HOST%", &vars()), "example.comexample.com") }
	#[test] fn lone_percent_is_kept() { assert_eq!(expand_variables("100% done", &vars()), "100% done") }
}
