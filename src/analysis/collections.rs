use crate::{
	analysis::{
		AnalysisContext, Finding,
		shared::{last_segment, nearest_ancestor},
	},
	syntax::{NodeExt, SyntaxKind, SyntaxNode, is_externally_visible},
};

const CONCRETE_COLLECTION_PREFIXES: [&str; 6] =
	["Enumerable", "ReadOnlyCollection", "Collection", "ReadOnlyList", "Dictionary", "List"];
/// Positions where a type names a value being built or tested rather than a member's
/// contract.
const NON_CONTRACT_PARENTS: [SyntaxKind; 5] = [
	SyntaxKind::ObjectCreation,
	SyntaxKind::TypeOfExpr,
	SyntaxKind::CastExpr,
	SyntaxKind::BinaryExpr,
	SyntaxKind::TypeArgList,
];
const MEMBER_KINDS: [SyntaxKind; 3] =
	[SyntaxKind::FieldDecl, SyntaxKind::MethodDecl, SyntaxKind::PropertyDecl];

/// Concrete collection types exposed through a visible member's signature.
pub(crate) fn liskov_substitution(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let type_text = match node.kind() {
		SyntaxKind::Parameter => {
			if node.parent_kind() == Some(SyntaxKind::TypeOfExpr) || !is_externally_visible(node) {
				return None;
			}

			node.declared_type()?.text_string()
		},
		SyntaxKind::GenericName | SyntaxKind::PredefinedType => {
			if node.parent_kind().is_some_and(|kind| NON_CONTRACT_PARENTS.contains(&kind))
				|| node.grandparent_kind() == Some(SyntaxKind::Argument)
				|| !in_visible_member(node)
			{
				return None;
			}

			let text = if node.kind() == SyntaxKind::GenericName {
				node.name_text()?
			} else {
				node.text_string()
			};

			if text == "var" {
				return None;
			}

			text
		},
		_ => return None,
	};
	let ty = last_segment(type_text.trim());

	CONCRETE_COLLECTION_PREFIXES.iter().any(|prefix| ty.starts_with(prefix)).then(|| Finding::at(node))
}

/// Whether every enclosing field, method and property is public or protected.
fn in_visible_member(node: &SyntaxNode) -> bool {
	MEMBER_KINDS.iter().all(|kind| {
		nearest_ancestor(node, std::slice::from_ref(kind)).is_none_or(|member| is_externally_visible(&member))
	})
}
