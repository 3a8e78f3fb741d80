use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::TextRange;

/// A rule id that is not registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule id `{0}`")]
pub struct UnknownRuleError(pub String);

/// Errors surfaced to the host by the detection and fix engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
	/// The requested rule is not part of the catalog in use.
	#[error(transparent)]
	UnknownRule(#[from] UnknownRuleError),
	/// The rule exists but has no automated fix.
	#[error("rule `{0}` has no automated fix")]
	NotFixable(&'static str),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("failed to read config {path}: {source}")]
	Read {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
	/// The file is not valid TOML for [`crate::config::Config`].
	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	/// The file names a rule that does not exist.
	#[error(transparent)]
	UnknownRule(#[from] UnknownRuleError),
}

/// Edits an [`crate::fixes::EditSession`] refuses to plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// The target already has an edit, or lies inside (or contains) a node that is
	/// being replaced or removed.
	#[error("edit at {0:?} overlaps an edit already planned")]
	Overlap(TextRange),
	/// The target does not belong to the session's tree.
	#[error("node at {0:?} belongs to another tree")]
	ForeignNode(TextRange),
	/// The session root itself cannot be edited; fix its children instead.
	#[error("the root node cannot be edited")]
	RootEdit,
}
