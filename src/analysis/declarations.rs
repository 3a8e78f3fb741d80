//! Type and member declaration rules.

use crate::{
	analysis::{AnalysisContext, Finding},
	syntax::{NodeExt, SyntaxKind, SyntaxNode, is_externally_visible},
};

const ENCAPSULATION_EXCLUDED_MODIFIERS: [&str; 4] = ["private", "internal", "const", "static"];
const ARROW_CLAUSE_THRESHOLD: usize = 4;

/// Declarators of a field or local declaration.
pub(crate) fn declarators(declaration: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
	declaration
		.child_of_kind(SyntaxKind::VariableDecl)
		.into_iter()
		.flat_map(|decl| decl.children_of_kind(SyntaxKind::VariableDeclarator).collect::<Vec<_>>())
}

/// `const` field declarations under `scope`, in document order.
pub(crate) fn constant_fields(scope: &SyntaxNode) -> Vec<SyntaxNode> {
	scope
		.descendants()
		.filter(|node| node.kind() == SyntaxKind::FieldDecl && node.has_modifier("const"))
		.collect()
}

/// Single-declarator field that is public or protected and neither private, internal,
/// const nor static.
pub(crate) fn is_encapsulation_candidate(field: &SyntaxNode) -> bool {
	let modifiers = field.modifiers();

	field.kind() == SyntaxKind::FieldDecl
		&& modifiers.iter().any(|m| m == "public" || m == "protected")
		&& !modifiers.iter().any(|m| ENCAPSULATION_EXCLUDED_MODIFIERS.contains(&m.as_str()))
		&& declarators(field).count() == 1
}

pub(crate) fn encapsulate_field(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	is_encapsulation_candidate(node).then(|| Finding::at(node))
}

pub(crate) fn non_private_constant(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	(is_externally_visible(node) && node.has_modifier("const")).then(|| Finding::at(node))
}

pub(crate) fn replace_magic_values(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	Some(Finding::at(node))
}

pub(crate) fn use_lambda_expression(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	Some(Finding::at(node))
}

pub(crate) fn prefer_class_over_struct(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	Some(Finding::at(node))
}

/// Enums whose members all carry explicit values, none of them `0`. Enums with an
/// implicit member already have a zero value or are empty.
pub(crate) fn enum_without_zero(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let values = node
		.children_of_kind(SyntaxKind::EnumMember)
		.map(|member| {
			member
				.child_of_kind(SyntaxKind::EqualsValue)
				.and_then(|equals| equals.first_child())
				.map(|value| value.text_string().trim().to_owned())
		})
		.collect::<Option<Vec<_>>>()?;

	if values.is_empty() || values.iter().any(|value| value == "0") {
		return None;
	}

	Some(Finding::at(node))
}

pub(crate) fn inappropriate_property(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if node.descendants_of_kind(SyntaxKind::ArrowClause).count() < ARROW_CLAUSE_THRESHOLD {
		return None;
	}

	let computes = node.descendants().any(|descendant| {
		matches!(descendant.kind(), SyntaxKind::Invocation | SyntaxKind::ObjectCreation)
	});

	computes.then(|| Finding::at(node))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::{Document, make};

	fn ctx() -> AnalysisContext<'static> {
		AnalysisContext::syntactic()
	}

	fn field(modifiers: &[&str], names: &[&str]) -> SyntaxNode {
		let declaration = make::variable_declaration(
			make::predefined_type("int"),
			names.iter().map(|name| make::variable_declarator(name, None)).collect(),
		);
		let modifiers = if modifiers.is_empty() { None } else { Some(make::modifier_list(modifiers)) };

		Document::new(make::field(vec![], modifiers, declaration)).syntax()
	}

	#[test]
	fn only_visible_single_fields_are_encapsulated() {
		assert!(encapsulate_field(&field(&["public"], &["count"]), &ctx()).is_some());
		assert!(encapsulate_field(&field(&["protected", "readonly"], &["count"]), &ctx()).is_some());
		assert!(encapsulate_field(&field(&["public"], &["a", "b"]), &ctx()).is_none());
		assert!(encapsulate_field(&field(&["public", "static"], &["count"]), &ctx()).is_none());
		assert!(encapsulate_field(&field(&["protected", "internal"], &["count"]), &ctx()).is_none());
		assert!(encapsulate_field(&field(&[], &["count"]), &ctx()).is_none());
	}

	#[test]
	fn public_constants_are_flagged() {
		assert!(non_private_constant(&field(&["public", "const"], &["Max"]), &ctx()).is_some());
		assert!(non_private_constant(&field(&["private", "const"], &["Max"]), &ctx()).is_none());
		assert!(non_private_constant(&field(&["public"], &["Max"]), &ctx()).is_none());
	}

	#[test]
	fn enums_need_every_value_explicit_and_none_zero() {
		let enumeration = |members: Vec<(&str, Option<&str>)>| {
			let members = members
				.into_iter()
				.map(|(name, value)| make::enum_member(name, value.map(make::number_literal)))
				.collect();

			Document::new(make::enum_decl(&["public"], "Status", members)).syntax()
		};

		assert!(enum_without_zero(&enumeration(vec![("A", Some("1")), ("B", Some("2"))]), &ctx()).is_some());
		assert!(enum_without_zero(&enumeration(vec![("A", Some("0")), ("B", Some("2"))]), &ctx()).is_none());
		assert!(enum_without_zero(&enumeration(vec![("A", None), ("B", Some("2"))]), &ctx()).is_none());
		assert!(enum_without_zero(&enumeration(vec![]), &ctx()).is_none());
	}

	#[test]
	fn properties_with_many_computed_arrows_are_flagged() {
		let property = |arrows: usize| {
			let accessors = (0..arrows)
				.map(|_| {
					make::accessor(
						"get",
						Some(make::arrow_clause(make::invocation(make::identifier_name("Load"), vec![]))),
					)
				})
				.collect();

			Document::new(make::property(
				vec![],
				Some(make::modifier_list(&["public"])),
				make::predefined_type("int"),
				"Value",
				make::accessor_list(accessors),
			))
			.syntax()
		};

		assert!(inappropriate_property(&property(3), &ctx()).is_none());
		assert!(inappropriate_property(&property(4), &ctx()).is_some());
	}
}
