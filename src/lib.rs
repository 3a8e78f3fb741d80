//! Design-smell detectors and automated fixes for C#-shaped syntax trees.
//!
//! The host builds or parses a tree into a [`syntax::Document`], walks it with an
//! [`analysis::DetectionEngine`], and hands diagnosed nodes to a [`fixes::FixEngine`],
//! which returns a rewritten document. Semantic rules query symbols through
//! [`semantic::SemanticContext`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod fixes;
pub mod ident;
pub mod semantic;
pub mod syntax;

pub use analysis::{
	AnalysisContext, DetectionEngine, Diagnostic, RuleCatalog, RuleDescriptor, RuleId, Severity,
};
pub use config::Config;
pub use error::{AnalyzerError, ConfigError, EditError, UnknownRuleError};
pub use fixes::{EditSession, FixEngine};
pub use semantic::{ScopeResolver, SemanticContext};
pub use syntax::{Document, SyntaxKind, SyntaxNode};
