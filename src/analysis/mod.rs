//! Rule catalog and detection engine.

pub mod catalog;

mod collections;
mod declarations;
mod exceptions;
mod mocking;
mod naming;
mod parameters;
mod shared;
mod signatures;
mod statements;
mod testing;

pub use catalog::{RuleCatalog, RuleDescriptor, RuleId, Severity, builtin_descriptor};
pub use shared::{Diagnostic, Finding};
pub use testing::shared_argument_position;

pub(crate) use declarations::{constant_fields, declarators, is_encapsulation_candidate};
pub(crate) use mocking::is_redundant_guard;

use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;

use crate::{
	error::AnalyzerError,
	semantic::{ScopeResolver, SemanticContext},
	syntax::{Document, SyntaxKind, SyntaxNode},
};

const DOCUMENT_BATCH_SIZE: usize = 64;

/// Detector entry point: one node in, zero or one finding out.
pub type Detector = fn(&SyntaxNode, &AnalysisContext<'_>) -> Option<Finding>;

/// Read-only services available to detectors.
#[derive(Clone, Copy, Default)]
pub struct AnalysisContext<'a> {
	/// Symbol queries; semantic rules stay silent without them.
	pub semantic: Option<&'a dyn SemanticContext>,
}
impl<'a> AnalysisContext<'a> {
	/// Context for purely syntactic analysis.
	pub fn syntactic() -> Self {
		Self { semantic: None }
	}

	/// Context backed by `semantic`.
	pub fn with_semantic(semantic: &'a dyn SemanticContext) -> Self {
		Self { semantic: Some(semantic) }
	}
}

/// Detector for `id`.
pub fn detector(id: RuleId) -> Detector {
	match id {
		RuleId::EncapsulateField => declarations::encapsulate_field,
		RuleId::ReplaceMagicValues => declarations::replace_magic_values,
		RuleId::UseLambdaExpression => declarations::use_lambda_expression,
		RuleId::UnnecessaryShimsContext => mocking::unnecessary_shims_context,
		RuleId::SimplifyFakes | RuleId::RemoveFakes => mocking::assigned_fake,
		RuleId::SimplifyFakesObject => mocking::simplify_fakes_object,
		RuleId::DuplicateShims => mocking::duplicate_shims,
		RuleId::SimplifyShims => mocking::simplify_shims,
		RuleId::ContextualKeyword => naming::contextual_keyword,
		RuleId::ClassNameIsNoun => naming::class_name_is_noun,
		RuleId::BlankBlock => statements::blank_block,
		RuleId::LiskovSubstitution => collections::liskov_substitution,
		RuleId::ToArrayToListInForeach => statements::materialized_foreach_source,
		RuleId::SwitchWithoutDefault => statements::switch_without_default,
		RuleId::AggregateException => exceptions::overly_general_exception,
		RuleId::ExceptionWithoutContext => exceptions::exception_without_context,
		RuleId::EnumWithoutDefaultValue => declarations::enum_without_zero,
		RuleId::TooManyParameters => signatures::too_many_parameters,
		RuleId::BoolParameter => signatures::bool_parameter,
		RuleId::PreferClassOverStruct => declarations::prefer_class_over_struct,
		RuleId::InappropriateUsageOfProperty => declarations::inappropriate_property,
		RuleId::NonPrivateConstants => declarations::non_private_constant,
		RuleId::SingleAssertInUnitOfWork => testing::single_assert_in_unit_of_work,
		RuleId::TestCaseArguments => testing::test_case_arguments,
		RuleId::MissingParameterNullValidation => parameters::missing_null_validation,
		RuleId::MissingConstructorParameterNullValidation =>
			parameters::missing_constructor_null_validation,
		RuleId::ParameterReassigned => parameters::parameter_reassigned,
		RuleId::ParameterUnused => parameters::parameter_unused,
	}
}

/// Runs the catalog's detectors over nodes.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
	catalog: Arc<RuleCatalog>,
	dispatch: HashMap<SyntaxKind, Vec<RuleId>>,
}
impl DetectionEngine {
	/// Builds the kind-to-rule dispatch table for `catalog`.
	pub fn new(catalog: Arc<RuleCatalog>) -> Self {
		let mut dispatch = HashMap::<SyntaxKind, Vec<RuleId>>::new();

		for rule in catalog.all() {
			for kind in rule.triggers {
				dispatch.entry(*kind).or_default().push(rule.id);
			}
		}

		Self { catalog, dispatch }
	}

	/// Catalog the engine reports against.
	pub fn catalog(&self) -> &RuleCatalog {
		&self.catalog
	}

	/// Every diagnostic the catalog's rules report for `node`, in catalog order.
	pub fn detect(&self, node: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Vec<Diagnostic> {
		let Some(rules) = self.dispatch.get(&node.kind()) else {
			return Vec::new();
		};

		rules.iter().filter_map(|rule| self.run(*rule, node, ctx)).collect()
	}

	/// Runs one rule by id. Unknown ids and rules outside the catalog are errors; a
	/// node of a kind the rule does not trigger on yields `None`.
	pub fn detect_rule(
		&self,
		id: &str,
		node: &SyntaxNode,
		ctx: &AnalysisContext<'_>,
	) -> Result<Option<Diagnostic>, AnalyzerError> {
		let rule = self.catalog.describe(id)?;

		if !rule.triggers.contains(&node.kind()) {
			return Ok(None);
		}

		Ok(self.run(rule.id, node, ctx))
	}

	/// Walks `root` in preorder and collects every diagnostic.
	pub fn analyze(&self, root: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Vec<Diagnostic> {
		root.descendants().flat_map(|node| self.detect(&node, ctx)).collect()
	}

	/// Analyzes documents in parallel batches, each with its own [`ScopeResolver`].
	///
	/// Results keep the input order.
	pub fn analyze_documents(&self, documents: &[Document]) -> Vec<Vec<Diagnostic>> {
		let mut results = Vec::with_capacity(documents.len());

		for batch in documents.chunks(DOCUMENT_BATCH_SIZE) {
			let batch_results = batch
				.par_iter()
				.map(|document| {
					let root = document.syntax();
					let resolver = ScopeResolver::new(&root);

					self.analyze(&root, &AnalysisContext::with_semantic(&resolver))
				})
				.collect::<Vec<_>>();

			results.extend(batch_results);
		}

		tracing::debug!(documents = documents.len(), "Analyzed documents.");

		results
	}

	fn run(&self, id: RuleId, node: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Option<Diagnostic> {
		let descriptor = self.catalog.get(id)?;
		let finding = detector(id)(node, ctx)?;

		Some(Diagnostic {
			rule: id,
			severity: descriptor.severity,
			kind: node.kind(),
			range: finding.range,
			message: finding.message.unwrap_or_else(|| descriptor.message.to_owned()),
		})
	}
}
