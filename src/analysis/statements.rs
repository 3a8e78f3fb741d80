use crate::{
	analysis::{AnalysisContext, Finding},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const EMPTY_IF_MESSAGE: &str = "This method contains an unnecessary empty if statement";
const SWALLOWED_EXCEPTION_MESSAGE: &str = r#"The exception is ignored ("swallowed") by the try-catch block."#;
const MATERIALIZING_CALLS: [&str; 2] = [".ToArray()", ".ToList()"];

pub(crate) fn blank_block(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if node.first_child().is_some() || node.parent_kind().is_some_and(SyntaxKind::is_lambda) {
		return None;
	}

	match node.parent_kind() {
		Some(SyntaxKind::IfStmt) => Some(Finding::with_message(node, EMPTY_IF_MESSAGE)),
		Some(SyntaxKind::CatchClause) => Some(Finding::with_message(node, SWALLOWED_EXCEPTION_MESSAGE)),
		_ => Some(Finding::at(node)),
	}
}

pub(crate) fn switch_without_default(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if node.descendants_of_kind(SyntaxKind::DefaultLabel).next().is_some() {
		return None;
	}

	Some(Finding::at(node))
}

/// `foreach` over a `.ToArray()` or `.ToList()` result; reported on the iterated
/// expression.
pub(crate) fn materialized_foreach_source(
	node: &SyntaxNode,
	_: &AnalysisContext<'_>,
) -> Option<Finding> {
	// Children are the loop variable type, the iterated expression and the body.
	let expression = node.nth_child(1)?;
	let text = expression.text_string();

	MATERIALIZING_CALLS.iter().any(|call| text.contains(call)).then(|| Finding::at(&expression))
}
