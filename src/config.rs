//! TOML configuration that reduces the rule catalog.

use std::{
	collections::{BTreeMap, HashMap, HashSet},
	fs,
	path::Path,
};

use serde::Deserialize;

use crate::{
	analysis::{RuleId, Severity},
	error::{ConfigError, UnknownRuleError},
};

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Rule selection.
	pub rules: RulesConfig,
}

/// `[rules]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
	/// Rule ids removed from the catalog.
	pub disabled: Vec<String>,
	/// Per-rule severity overrides.
	pub severity: BTreeMap<String, Severity>,
}

impl Config {
	/// Reads and parses `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = fs::read_to_string(path)
			.map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
		let config = Self::parse(&text)?;

		tracing::debug!(path = %path.display(), disabled = config.rules.disabled.len(), "Loaded configuration.");

		Ok(config)
	}

	/// Parses configuration text and validates every rule id it names.
	pub fn parse(text: &str) -> Result<Self, ConfigError> {
		let config = toml::from_str::<Self>(text)?;

		config.disabled_rules()?;
		config.severity_overrides()?;

		Ok(config)
	}

	/// Typed ids of the disabled rules.
	pub fn disabled_rules(&self) -> Result<HashSet<RuleId>, UnknownRuleError> {
		self.rules.disabled.iter().map(|id| id.parse()).collect()
	}

	/// Typed severity overrides.
	pub fn severity_overrides(&self) -> Result<HashMap<RuleId, Severity>, UnknownRuleError> {
		self.rules
			.severity
			.iter()
			.map(|(id, severity)| Ok((id.parse()?, *severity)))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_disabled_rules_and_overrides() {
		let config = Config::parse(
			r#"
[rules]
disabled = ["prefer_class_over_struct"]

[rules.severity]
blank_block_code = "info"
"#,
		)
		.expect("config should parse");

		assert_eq!(
			config.disabled_rules().expect("known ids"),
			HashSet::from([RuleId::PreferClassOverStruct])
		);
		assert_eq!(
			config.severity_overrides().expect("known ids").get(&RuleId::BlankBlock),
			Some(&Severity::Info)
		);
	}

	#[test]
	fn empty_text_is_the_default_config() {
		assert_eq!(Config::parse("").expect("empty config should parse"), Config::default());
	}

	#[test]
	fn unknown_rule_ids_are_rejected() {
		let err = Config::parse("[rules]\ndisabled = [\"nope\"]\n").expect_err("unknown id");

		assert!(matches!(err, ConfigError::UnknownRule(UnknownRuleError(id)) if id == "nope"));
	}

	#[test]
	fn unknown_severities_are_parse_errors() {
		let err = Config::parse("[rules.severity]\nblank_block_code = \"fatal\"\n")
			.expect_err("bad severity");

		assert!(matches!(err, ConfigError::Parse(_)));
	}
}
