use rowan::GreenNode;

use crate::{
	analysis::RuleId,
	fixes::{EditSession, class_scope, plan_or_skip},
	syntax::{Document, NodeExt, NodeOrToken, SyntaxKind, SyntaxNode, green_node, green_token},
};

/// Rewrites `x => { return expr; }` as `x => expr` for every lambda in the class.
pub(crate) fn inline_trivial_lambda_bodies(node: &SyntaxNode) -> Option<Document> {
	let scope = class_scope(node);
	let mut session = EditSession::new(&scope);

	for body in scope.descendants() {
		let Some(expression) = returned_expression(&body) else {
			continue;
		};

		// Nested bodies are inlined into the replacement of the outermost one.
		if body.ancestors().skip(1).any(|ancestor| returned_expression(&ancestor).is_some()) {
			continue;
		}

		plan_or_skip(RuleId::UseLambdaExpression, session.replace(&body, vec![inlined(&expression)]));
	}

	(!session.is_empty()).then(|| session.apply())
}

/// Expression of a lambda block whose only statement is `return expr;`.
fn returned_expression(block: &SyntaxNode) -> Option<SyntaxNode> {
	if block.kind() != SyntaxKind::Block
		|| !block.parent_kind().is_some_and(SyntaxKind::is_lambda)
		|| block.children().count() != 1
	{
		return None;
	}

	block.first_child().filter(|ret| ret.kind() == SyntaxKind::ReturnStmt)?.first_child()
}

/// Green copy of `node` with every trivial lambda body inside it inlined.
fn inlined(node: &SyntaxNode) -> GreenNode {
	if !node.descendants().any(|descendant| returned_expression(&descendant).is_some()) {
		return green_node(node);
	}

	let children = node
		.children_with_tokens()
		.map(|element| match element {
			NodeOrToken::Token(token) => green_token(&token),
			NodeOrToken::Node(child) => match returned_expression(&child) {
				Some(expression) => NodeOrToken::Node(inlined(&expression)),
				None => NodeOrToken::Node(inlined(&child)),
			},
		})
		.collect::<Vec<_>>();

	GreenNode::new(node.kind().into(), children)
}
