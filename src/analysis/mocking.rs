//! Rules for Microsoft Fakes shims and their `ShimsContext` guard scopes.

use crate::{
	analysis::{AnalysisContext, Finding, shared::nearest_ancestor},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const GUARD_FACTORY: &str = "ShimsContext.Create()";
const SHIM_MARKER: &str = "Shim";
const ALL_INSTANCES: &str = "AllInstances";

/// `using (ShimsContext.Create())` whose body never touches a shim.
pub(crate) fn is_redundant_guard(node: &SyntaxNode) -> bool {
	if node.kind() != SyntaxKind::UsingStmt {
		return false;
	}

	let (Some(resource), Some(body)) = (node.first_child(), node.last_child()) else {
		return false;
	};

	resource != body
		&& resource.text_string().contains(GUARD_FACTORY)
		&& !body.text_string().contains(SHIM_MARKER)
}

pub(crate) fn unnecessary_shims_context(
	node: &SyntaxNode,
	_: &AnalysisContext<'_>,
) -> Option<Finding> {
	if !is_redundant_guard(node) || node.ancestors_of_kind(SyntaxKind::UsingStmt).any(|outer| is_redundant_guard(&outer)) {
		return None;
	}

	Some(Finding::at(node))
}

/// Member access assigned in an expression statement, e.g. `ShimFoo.AllInstances.Bar = ...;`.
pub(crate) fn assigned_fake(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	(node.parent_kind() == Some(SyntaxKind::Assignment)
		&& node.grandparent_kind() == Some(SyntaxKind::ExprStmt))
	.then(|| Finding::at(node))
}

pub(crate) fn simplify_fakes_object(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let ty = node.first_child()?;

	ty.text_string().trim().starts_with(SHIM_MARKER).then(|| Finding::at(node))
}

/// The same `.AllInstances.` member shimmed more than once in one method.
pub(crate) fn duplicate_shims(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let text = node.text_string();

	if !text.contains(&format!(".{ALL_INSTANCES}.")) {
		return None;
	}

	let method = nearest_ancestor(node, &[SyntaxKind::MethodDecl])?;
	let occurrences = method
		.descendants_of_kind(SyntaxKind::MemberAccess)
		.filter(|access| access.text_string() == text)
		.count();

	(occurrences > 1).then(|| Finding::at(node))
}

/// `ShimFoo.AllInstances` in a method that already constructs a `ShimFoo`.
pub(crate) fn simplify_shims(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let text = node.text_string();

	if !text.ends_with(ALL_INSTANCES) {
		return None;
	}

	let method = nearest_ancestor(node, &[SyntaxKind::MethodDecl])?;
	let constructs_instance = method.descendants_of_kind(SyntaxKind::ObjectCreation).any(|creation| {
		creation
			.first_child()
			.is_some_and(|ty| format!("{}.{ALL_INSTANCES}", ty.text_string().trim()) == text)
	});

	constructs_instance.then(|| Finding::at(node))
}
