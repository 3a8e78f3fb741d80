//! Fix synthesis.
//!
//! Every fixer plans its edits into an [`EditSession`] and applies them once. A fixer
//! that finds nothing to rewrite returns `None` and the engine hands back the input
//! document unchanged.

mod encapsulate;
mod lambda;
mod magic_values;
mod mocking;
mod session;

pub use session::{EditError, EditSession};

use std::sync::Arc;

use crate::{
	analysis::{RuleCatalog, RuleId},
	error::AnalyzerError,
	syntax::{Document, SyntaxKind, SyntaxNode},
};

/// Fixer entry point: the diagnosed node in, the rewritten document out.
pub type Fixer = fn(&SyntaxNode) -> Option<Document>;

/// Fixer for `id`, if the rule has one.
pub fn fixer(id: RuleId) -> Option<Fixer> {
	match id {
		RuleId::EncapsulateField => Some(encapsulate::encapsulate_field),
		RuleId::ReplaceMagicValues => Some(magic_values::replace_magic_values),
		RuleId::UseLambdaExpression => Some(lambda::inline_trivial_lambda_bodies),
		RuleId::UnnecessaryShimsContext => Some(mocking::remove_guard_contexts),
		RuleId::SimplifyFakes => Some(mocking::simplify_mock_chain),
		RuleId::RemoveFakes => Some(mocking::remove_mock_chain),
		RuleId::SimplifyFakesObject
		| RuleId::DuplicateShims
		| RuleId::SimplifyShims
		| RuleId::ContextualKeyword
		| RuleId::ClassNameIsNoun
		| RuleId::BlankBlock
		| RuleId::LiskovSubstitution
		| RuleId::ToArrayToListInForeach
		| RuleId::SwitchWithoutDefault
		| RuleId::AggregateException
		| RuleId::ExceptionWithoutContext
		| RuleId::EnumWithoutDefaultValue
		| RuleId::TooManyParameters
		| RuleId::BoolParameter
		| RuleId::PreferClassOverStruct
		| RuleId::InappropriateUsageOfProperty
		| RuleId::NonPrivateConstants
		| RuleId::SingleAssertInUnitOfWork
		| RuleId::TestCaseArguments
		| RuleId::MissingParameterNullValidation
		| RuleId::MissingConstructorParameterNullValidation
		| RuleId::ParameterReassigned
		| RuleId::ParameterUnused => None,
	}
}

/// Applies the fixer of a catalog rule to a diagnosed node.
#[derive(Debug, Clone)]
pub struct FixEngine {
	catalog: Arc<RuleCatalog>,
}
impl FixEngine {
	/// Engine fixing the rules of `catalog`.
	pub fn new(catalog: Arc<RuleCatalog>) -> Self {
		Self { catalog }
	}

	/// Rewrites the document `node` belongs to.
	///
	/// Unknown ids and rules outside the catalog fail with
	/// [`AnalyzerError::UnknownRule`], rules without a fixer with
	/// [`AnalyzerError::NotFixable`]. A node the fixer cannot handle yields the input
	/// document unchanged.
	pub fn fix(&self, rule_id: &str, node: &SyntaxNode) -> Result<Document, AnalyzerError> {
		let rule = self.catalog.describe(rule_id)?;
		let fix = fixer(rule.id).ok_or(AnalyzerError::NotFixable(rule.id.as_str()))?;

		match fix(node) {
			Some(document) => {
				tracing::debug!(rule = %rule.id, "Applied fix.");

				Ok(document)
			},
			None => {
				tracing::debug!(rule = %rule.id, kind = ?node.kind(), "Fix found nothing to rewrite.");

				Ok(Document::of(node))
			},
		}
	}
}

/// Enclosing class of `node` (itself included), or the tree root.
pub(crate) fn class_scope(node: &SyntaxNode) -> SyntaxNode {
	node.ancestors()
		.find(|ancestor| ancestor.kind() == SyntaxKind::ClassDecl)
		.or_else(|| node.ancestors().last())
		.unwrap_or_else(|| node.clone())
}

/// Plans one edit, logging and skipping it when it conflicts with an earlier one.
pub(crate) fn plan_or_skip(rule: RuleId, result: Result<(), EditError>) {
	if let Err(err) = result {
		tracing::debug!(rule = %rule, error = %err, "Skipped conflicting edit.");
	}
}
