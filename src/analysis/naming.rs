use crate::{
	analysis::{AnalysisContext, Finding},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const CONTEXTUAL_KEYWORDS: [&str; 28] = [
	"add",
	"alias",
	"ascending",
	"async",
	"await",
	"by",
	"descending",
	"dynamic",
	"equals",
	"from",
	"get",
	"global",
	"group",
	"into",
	"join",
	"let",
	"nameof",
	"on",
	"orderby",
	"partial",
	"remove",
	"select",
	"set",
	"value",
	"var",
	"when",
	"where",
	"yield",
];
/// Positions where a contextual keyword is legitimate syntax rather than a chosen name.
const KEYWORD_POSITIONS: [SyntaxKind; 10] = [
	SyntaxKind::Invocation,
	SyntaxKind::VariableDecl,
	SyntaxKind::ForEachStmt,
	SyntaxKind::ForStmt,
	SyntaxKind::WhileStmt,
	SyntaxKind::SwitchStmt,
	SyntaxKind::DeclarationExpr,
	SyntaxKind::TypeOfExpr,
	SyntaxKind::MethodDecl,
	SyntaxKind::Parameter,
];
const NON_NOUN_SUFFIXES: [&str; 4] = ["Manager", "Processor", "Data", "Info"];

pub(crate) fn contextual_keyword(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if !matches!(node.kind(), SyntaxKind::IdentifierName | SyntaxKind::Parameter) {
		return None;
	}

	let name = node.name_text()?;

	if !CONTEXTUAL_KEYWORDS.contains(&name.as_str())
		|| node.parent_kind().is_some_and(|kind| KEYWORD_POSITIONS.contains(&kind))
		|| node.grandparent_kind() == Some(SyntaxKind::GenericName)
	{
		return None;
	}
	if node.kind() == SyntaxKind::IdentifierName
		&& name == "value"
		&& node.ancestors_of_kind(SyntaxKind::SetAccessor).next().is_some()
	{
		return None;
	}

	Some(Finding::at(node))
}

pub(crate) fn class_name_is_noun(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	let name = node.name_text()?;

	NON_NOUN_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)).then(|| Finding::at(node))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::{Document, make};

	fn identifiers(root: &SyntaxNode, name: &str) -> Vec<SyntaxNode> {
		root.descendants()
			.filter(|node| node.kind() == SyntaxKind::IdentifierName)
			.filter(|node| node.name_text().as_deref() == Some(name))
			.collect()
	}

	#[test]
	fn value_inside_a_setter_is_allowed() {
		let setter = make::accessor(
			"set",
			Some(make::block(vec![make::expr_stmt(make::assignment(
				make::identifier_name("_value"),
				make::identifier_name("value"),
			))])),
		);
		let property = make::property(
			vec![],
			Some(make::modifier_list(&["public"])),
			make::predefined_type("int"),
			"Amount",
			make::accessor_list(vec![make::accessor("get", None), setter]),
		);
		let root = Document::new(property).syntax();
		let ctx = AnalysisContext::syntactic();

		assert_eq!(identifiers(&root, "value").len(), 1);
		assert!(identifiers(&root, "value").iter().all(|node| contextual_keyword(node, &ctx).is_none()));
	}

	#[test]
	fn keywords_used_as_names_are_flagged() {
		let body = make::block(vec![make::return_stmt(Some(make::identifier_name("value")))]);
		let method = make::method(
			vec![],
			&["public"],
			make::predefined_type("int"),
			"Get",
			make::parameter_list(vec![make::parameter(make::predefined_type("int"), "value")]),
			body,
		);
		let root = Document::new(method).syntax();
		let ctx = AnalysisContext::syntactic();
		let parameter = root.descendants().find(|node| node.kind() == SyntaxKind::Parameter).expect("parameter");

		assert!(contextual_keyword(&parameter, &ctx).is_some());
		assert!(identifiers(&root, "value").iter().all(|node| contextual_keyword(node, &ctx).is_some()));
	}

	#[test]
	fn keyword_positions_are_exempt() {
		let declaration = make::local_decl(make::variable_declaration(
			make::identifier_name("var"),
			vec![make::variable_declarator("total", Some(make::number_literal("1")))],
		));
		let root = Document::new(make::block(vec![declaration])).syntax();
		let ctx = AnalysisContext::syntactic();

		assert!(identifiers(&root, "var").iter().all(|node| contextual_keyword(node, &ctx).is_none()));
	}

	#[test]
	fn type_arguments_and_statement_heads_are_exempt() {
		let body = make::block(vec![
			make::while_stmt(make::identifier_name("value"), make::block(vec![])),
			make::expr_stmt(make::invocation(make::identifier_name("TryParse"), vec![make::declaration_expr(
				make::identifier_name("var"),
				"parsed",
			)])),
		]);
		let method = make::method(
			vec![],
			&["public"],
			make::generic_name("Task", vec![make::identifier_name("dynamic")]),
			"Poll",
			make::parameter_list(vec![]),
			body,
		);
		let root = Document::new(method).syntax();
		let ctx = AnalysisContext::syntactic();

		for name in ["dynamic", "value", "var"] {
			let nodes = identifiers(&root, name);

			assert_eq!(nodes.len(), 1);
			assert!(contextual_keyword(&nodes[0], &ctx).is_none());
		}
	}

	#[test]
	fn class_suffixes_are_case_sensitive() {
		let ctx = AnalysisContext::syntactic();
		let class = |name: &str| Document::new(make::class(&["public"], name, vec![])).syntax();

		assert!(class_name_is_noun(&class("OrderManager"), &ctx).is_some());
		assert!(class_name_is_noun(&class("UserInfo"), &ctx).is_some());
		assert!(class_name_is_noun(&class("Ordermanager"), &ctx).is_none());
		assert!(class_name_is_noun(&class("Order"), &ctx).is_none());
	}
}
