//! Unit-test hygiene rules.

use crate::{
	analysis::{AnalysisContext, Finding, shared::nearest_ancestor},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const SATISFY_ALL_CONDITIONS: &str = "ShouldSatisfyAllConditions";
const TEST_CASE_ATTRIBUTE: &str = "TestCase";
const TEST_CASE_DATA: &str = "TestCaseData";
const SINGLE_CASE_MESSAGE: &str = "Simplify Test Code by removing single Test Case";
const SHARED_ARGUMENT_MESSAGE: &str =
	"Simplify Test Code by removing same arguments across all test cases";

/// `ShouldSatisfyAllConditions` wrapping a single assertion.
pub(crate) fn single_assert_in_unit_of_work(
	node: &SyntaxNode,
	_: &AnalysisContext<'_>,
) -> Option<Finding> {
	if node.name_text().as_deref() != Some(SATISFY_ALL_CONDITIONS) {
		return None;
	}

	let invocation = nearest_ancestor(node, &[SyntaxKind::Invocation])?;
	let arguments = invocation.child_of_kind(SyntaxKind::ArgumentList)?;

	(arguments.children_of_kind(SyntaxKind::Argument).count() <= 1).then(|| Finding::at(node))
}

/// Redundant `[TestCase]` attributes on a method, or redundant `new TestCaseData(...)`
/// entries in an initializer.
pub(crate) fn test_case_arguments(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let (anchor, cases) = match node.kind() {
		SyntaxKind::MethodDecl => attribute_cases(node)?,
		SyntaxKind::ArrayInitializer | SyntaxKind::CollectionInitializer => (node.clone(), data_cases(node)?),
		_ => return None,
	};

	if cases.len() == 1 {
		return Some(Finding::with_message(&anchor, SINGLE_CASE_MESSAGE));
	}

	let position = shared_argument_position(&cases)?;

	Some(Finding::with_message(
		&anchor,
		format!("{SHARED_ARGUMENT_MESSAGE} (argument {})", position + 1),
	))
}

/// First zero-based argument position whose text is identical across every case.
///
/// Needs at least two cases. A case that lacks the position never matches.
pub fn shared_argument_position(cases: &[Vec<String>]) -> Option<usize> {
	let (first, rest) = cases.split_first()?;

	if rest.is_empty() {
		return None;
	}

	(0..first.len()).find(|&idx| rest.iter().all(|case| case.get(idx) == first.get(idx)))
}

/// Argument texts of every `TestCase` attribute, anchored on the first one.
fn attribute_cases(method: &SyntaxNode) -> Option<(SyntaxNode, Vec<Vec<String>>)> {
	let attributes = method
		.children_of_kind(SyntaxKind::AttributeList)
		.flat_map(|list| list.children_of_kind(SyntaxKind::Attribute).collect::<Vec<_>>())
		.filter(|attribute| {
			attribute.first_child().is_some_and(|name| name.text_string().trim() == TEST_CASE_ATTRIBUTE)
		})
		.collect::<Vec<_>>();
	let anchor = attributes.first()?.clone();
	let cases = attributes
		.iter()
		.map(|attribute| {
			attribute
				.child_of_kind(SyntaxKind::AttributeArgList)
				.map(|list| argument_texts(&list, SyntaxKind::AttributeArg))
				.unwrap_or_default()
		})
		.collect();

	Some((anchor, cases))
}

/// Argument texts of an initializer made only of `new TestCaseData(...)` entries.
fn data_cases(initializer: &SyntaxNode) -> Option<Vec<Vec<String>>> {
	let entries = initializer.children().collect::<Vec<_>>();
	let uniform = entries.iter().all(|entry| {
		entry.kind() == SyntaxKind::ObjectCreation
			&& entry.first_child().is_some_and(|ty| ty.text_string().trim() == TEST_CASE_DATA)
	});

	if entries.is_empty() || !uniform {
		return None;
	}

	Some(
		entries
			.iter()
			.map(|entry| {
				entry
					.child_of_kind(SyntaxKind::ArgumentList)
					.map(|list| argument_texts(&list, SyntaxKind::Argument))
					.unwrap_or_default()
			})
			.collect(),
	)
}

fn argument_texts(list: &SyntaxNode, kind: SyntaxKind) -> Vec<String> {
	list.children_of_kind(kind).map(|argument| argument.text_string().trim().to_owned()).collect()
}
