use crate::{
	analysis::{
		AnalysisContext, Finding,
		shared::{is_lambda_parameter_list, nearest_ancestor},
	},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const MAX_PARAMETERS: usize = 7;
const BOOL_TYPES: [&str; 2] = ["bool", "Boolean"];

pub(crate) fn too_many_parameters(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if is_lambda_parameter_list(node) {
		return None;
	}

	(node.children_of_kind(SyntaxKind::Parameter).count() > MAX_PARAMETERS).then(|| Finding::at(node))
}

/// Flag parameters split a method's behavior in two. Attributed methods (test cases,
/// framework entry points) are exempt.
pub(crate) fn bool_parameter(node: &SyntaxNode, _: &AnalysisContext<'_>) -> Option<Finding> {
	if is_lambda_parameter_list(node) {
		return None;
	}

	let has_flag = node.children_of_kind(SyntaxKind::Parameter).any(|parameter| {
		parameter
			.declared_type()
			.is_some_and(|ty| BOOL_TYPES.contains(&ty.text_string().trim()))
	});

	if !has_flag {
		return None;
	}
	if nearest_ancestor(node, &[SyntaxKind::MethodDecl])
		.is_some_and(|method| method.child_of_kind(SyntaxKind::AttributeList).is_some())
	{
		return None;
	}

	Some(Finding::at(node))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::{Document, make};

	fn parameter_list(root: &SyntaxNode) -> SyntaxNode {
		root.descendants().find(|node| node.kind() == SyntaxKind::ParameterList).expect("parameter list")
	}

	fn method(attributes: Vec<rowan::GreenNode>, types: &[&str]) -> SyntaxNode {
		let parameters = types
			.iter()
			.enumerate()
			.map(|(idx, ty)| make::parameter(make::predefined_type(ty), &format!("p{idx}")))
			.collect();

		Document::new(make::method(
			attributes,
			&["public"],
			make::predefined_type("void"),
			"Run",
			make::parameter_list(parameters),
			make::block(vec![]),
		))
		.syntax()
	}

	#[test]
	fn eight_parameters_fire_and_seven_pass() {
		let ctx = AnalysisContext::syntactic();

		assert!(too_many_parameters(&parameter_list(&method(vec![], &["int"; 7])), &ctx).is_none());
		assert!(too_many_parameters(&parameter_list(&method(vec![], &["int"; 8])), &ctx).is_some());
	}

	#[test]
	fn lambda_parameter_lists_are_ignored() {
		let parameters = (0..8).map(|idx| make::parameter(make::predefined_type("bool"), &format!("p{idx}"))).collect();
		let lambda = make::paren_lambda(make::parameter_list(parameters), make::block(vec![]));
		let root = Document::new(lambda).syntax();
		let ctx = AnalysisContext::syntactic();

		assert!(too_many_parameters(&parameter_list(&root), &ctx).is_none());
		assert!(bool_parameter(&parameter_list(&root), &ctx).is_none());
	}

	#[test]
	fn bool_parameters_are_flagged_unless_the_method_is_attributed() {
		let ctx = AnalysisContext::syntactic();
		let attributed = method(vec![make::single_attribute("Test", None)], &["int", "bool"]);

		assert!(bool_parameter(&parameter_list(&method(vec![], &["int", "bool"])), &ctx).is_some());
		assert!(bool_parameter(&parameter_list(&method(vec![], &["int"])), &ctx).is_none());
		assert!(bool_parameter(&parameter_list(&attributed), &ctx).is_none());
	}
}
