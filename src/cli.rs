// crates.io
use clap::{
	Parser, Subcommand,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use serde::Serialize;

// std
use std::{path::PathBuf, process::ExitCode};

// self
use crate::prelude::*;
use vibe_analyzer::{Config, RuleCatalog, RuleDescriptor};

/// Command-line interface for the design-smell analyzer.
#[derive(Debug, Parser)]
#[command(
	version = concat!(
		env!("CARGO_PKG_VERSION"),
		"-",
		env!("VERGEN_GIT_SHA"),
		"-",
		env!("VERGEN_CARGO_TARGET_TRIPLE"),
		" (",
		env!("VERGEN_BUILD_DATE"),
		")",
	),
	rename_all = "kebab",
	styles = styles(),
)]
pub(crate) struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// List the rules of the effective catalog.
	Rules {
		/// Optional TOML configuration that disables rules or overrides severities.
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
		/// Print the catalog as JSON.
		#[arg(long)]
		json: bool,
	},
	/// Print one rule of the effective catalog.
	Describe {
		/// Stable rule id, e.g. `blank_block_code`.
		rule_id: String,
		/// Optional TOML configuration that disables rules or overrides severities.
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}

impl Cli {
	pub(crate) fn run(&self) -> Result<ExitCode> {
		match &self.command {
			Command::Rules { config, json } => {
				let catalog = load_catalog(config.as_ref())?;

				if *json {
					let rules = catalog.all().iter().map(RuleSummary::from).collect::<Vec<_>>();

					println!("{}", serde_json::to_string_pretty(&rules)?);
				} else {
					for rule in catalog.all() {
						println!("{}", rule_line(rule));
					}

					println!("\n{} rule(s) enabled.", catalog.len());
				}
			},
			Command::Describe { rule_id, config } => {
				let catalog = load_catalog(config.as_ref())?;
				let Ok(rule) = catalog.describe(rule_id) else {
					eprintln!("Unknown or disabled rule `{rule_id}`.");

					return Ok(ExitCode::FAILURE);
				};

				print_descriptor(rule);
			},
		}

		Ok(ExitCode::SUCCESS)
	}
}

/// JSON view of a rule descriptor.
#[derive(Debug, Serialize)]
struct RuleSummary {
	id: &'static str,
	category: &'static str,
	severity: String,
	title: &'static str,
	message: &'static str,
	fixable: bool,
	semantic: bool,
}
impl From<&RuleDescriptor> for RuleSummary {
	fn from(rule: &RuleDescriptor) -> Self {
		Self {
			id: rule.id.as_str(),
			category: rule.category,
			severity: rule.severity.to_string(),
			title: rule.title,
			message: rule.message,
			fixable: rule.fixable,
			semantic: rule.semantic,
		}
	}
}

fn load_catalog(config: Option<&PathBuf>) -> Result<RuleCatalog> {
	let Some(path) = config else {
		return Ok(RuleCatalog::builtin());
	};
	let config = Config::load(path)?;

	Ok(RuleCatalog::configured(&config)?)
}

fn rule_line(rule: &RuleDescriptor) -> String {
	let fixable = if rule.fixable { " (fixable)" } else { "" };

	format!("{:<8} {:<44} {}{fixable}", rule.severity.to_string(), rule.id.as_str(), rule.title)
}

fn print_descriptor(rule: &RuleDescriptor) {
	println!("id:       {}", rule.id);
	println!("title:    {}", rule.title);
	println!("category: {}", rule.category);
	println!("severity: {}", rule.severity);
	println!("fixable:  {}", rule.fixable);
	println!("semantic: {}", rule.semantic);
	println!("message:  {}", rule.message);
}

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use vibe_analyzer::RuleId;

	#[test]
	fn parses_rules_subcommand() {
		let cli = Cli::parse_from(["app", "rules", "--json"]);

		assert!(matches!(cli.command, Command::Rules { json: true, config: None }));
	}

	#[test]
	fn parses_describe_with_config() {
		let cli = Cli::parse_from(["app", "describe", "blank_block_code", "--config", "rules.toml"]);

		assert!(matches!(
			cli.command,
			Command::Describe { ref rule_id, config: Some(_) } if rule_id == "blank_block_code"
		));
	}

	#[test]
	fn rule_lines_mark_fixable_rules() {
		let catalog = RuleCatalog::builtin();
		let line = rule_line(catalog.get(RuleId::EncapsulateField).expect("builtin rule"));

		assert!(line.starts_with("warning"));
		assert!(line.contains("encapsulate_public_protected_field"));
		assert!(line.ends_with("(fixable)"));
	}
}
