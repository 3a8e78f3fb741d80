use crate::{
	analysis::{AnalysisContext, Finding},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const OVERLY_GENERAL_EXCEPTIONS: [&str; 7] = [
	"Exception",
	"ApplicationException",
	"SystemException",
	"ExecutionEngineException",
	"IndexOutOfRangeException",
	"NullReferenceException",
	"OutOfMemoryException",
];

/// `throw new Exception(...)` and the other reserved or catch-all types.
pub(crate) fn overly_general_exception(
	node: &SyntaxNode,
	_: &AnalysisContext<'_>,
) -> Option<Finding> {
	let name = node.name_text()?;

	if !OVERLY_GENERAL_EXCEPTIONS.contains(&name.as_str())
		|| node.parent_kind() != Some(SyntaxKind::ObjectCreation)
		|| node.grandparent_kind() != Some(SyntaxKind::ThrowStmt)
	{
		return None;
	}

	Some(Finding::at(node))
}

/// `throw new T();` with an empty argument list.
pub(crate) fn exception_without_context(
	node: &SyntaxNode,
	_: &AnalysisContext<'_>,
) -> Option<Finding> {
	if node.parent_kind() != Some(SyntaxKind::ThrowStmt) {
		return None;
	}

	let arguments = node.child_of_kind(SyntaxKind::ArgumentList)?;

	arguments.first_child().is_none().then(|| Finding::at(node))
}
