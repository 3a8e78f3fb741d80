//! Rewrites for Microsoft Fakes test setup.

use rowan::GreenNode;

use crate::{
	analysis::{RuleId, is_redundant_guard},
	fixes::{EditSession, class_scope, plan_or_skip},
	syntax::{
		Document, GreenElement, NodeExt, NodeOrToken, SyntaxElement, SyntaxKind, SyntaxNode, green_node,
		green_token, make,
	},
};

const INSTANCE: &str = "instance";
const DISCARD: &str = "_";

/// Replaces every redundant `using (ShimsContext.Create())` in the class with the
/// statements it wraps, comments included.
pub(crate) fn remove_guard_contexts(node: &SyntaxNode) -> Option<Document> {
	if !is_redundant_guard(node) {
		return None;
	}

	let scope = class_scope(node);
	let mut session = EditSession::new(&scope);

	// Preorder: a guard nested in a planned one is rejected as an overlap.
	for guard in scope.descendants().filter(is_redundant_guard) {
		let Some(body) = guard.last_child() else {
			continue;
		};
		let contents = if body.kind() == SyntaxKind::Block {
			block_contents(&body)
		} else {
			vec![NodeOrToken::Node(green_node(&body))]
		};

		plan_or_skip(RuleId::UnnecessaryShimsContext, session.splice(&guard, contents));
	}

	(!session.is_empty()).then(|| session.apply())
}

/// Folds every shim assignment on the diagnosed receiver into one constructor shim
/// that replaces the diagnosed statement. The other assignments are left in place.
pub(crate) fn simplify_mock_chain(node: &SyntaxNode) -> Option<Document> {
	let chain = MockChain::find(node)?;
	let mut entries = Vec::<(String, GreenNode)>::new();

	for link in &chain.links {
		let value_text = link.value.text_string();

		if entries.iter().any(|(text, _)| *text == value_text) {
			continue;
		}

		let member = link.target.nth_child(1)?.text_string();

		let entry = make::assignment(make::identifier_name(member.trim()), without_receiver(&link.value)?);

		entries.push((value_text, entry));
	}

	let root_type = chain.receiver.split('.').next()?.trim().to_owned();
	let creation = make::object_creation(
		make::identifier_name(&root_type),
		Some(vec![make::identifier_name(DISCARD)]),
		Some(make::initializer(
			SyntaxKind::ObjectInitializer,
			entries.into_iter().map(|(_, entry)| entry).collect(),
		)),
	);
	let body = make::block(vec![
		make::var_local(INSTANCE, creation),
		make::expr_stmt(make::invocation(make::dotted(&format!("{INSTANCE}.BehaveAsDefaultValue")), vec![])),
	]);
	let replacement = make::expr_stmt(make::assignment(
		make::dotted(&format!("{root_type}.Constructor")),
		make::simple_lambda(DISCARD, body),
	));
	let mut session = EditSession::new(&chain.diagnosed);

	session.replace(&chain.diagnosed, vec![replacement]).ok()?;

	Some(session.apply())
}

/// Removes every shim assignment on the diagnosed receiver.
pub(crate) fn remove_mock_chain(node: &SyntaxNode) -> Option<Document> {
	let chain = MockChain::find(node)?;
	let mut session = EditSession::new(&chain.diagnosed);

	for link in &chain.links {
		plan_or_skip(RuleId::RemoveFakes, session.remove(&link.statement));
	}

	Some(session.apply())
}

/// `receiver.Member = lambda;` statement.
#[derive(Debug)]
struct ChainLink {
	statement: SyntaxNode,
	target: SyntaxNode,
	value: SyntaxNode,
}

/// Lambda assignments in one class that share the diagnosed receiver.
#[derive(Debug)]
struct MockChain {
	receiver: String,
	diagnosed: SyntaxNode,
	links: Vec<ChainLink>,
}
impl MockChain {
	fn find(node: &SyntaxNode) -> Option<Self> {
		let diagnosed = ChainLink::of(node)?;
		let receiver = node.first_child()?.text_string().trim().to_owned();
		let links = class_scope(node)
			.descendants_of_kind(SyntaxKind::MemberAccess)
			.filter(|access| {
				access.first_child().is_some_and(|first| first.text_string().trim() == receiver)
			})
			.filter_map(|access| ChainLink::of(&access))
			.collect();

		Some(Self { receiver, diagnosed: diagnosed.statement, links })
	}
}
impl ChainLink {
	fn of(target: &SyntaxNode) -> Option<Self> {
		let assignment = target.parent().filter(|parent| parent.kind() == SyntaxKind::Assignment)?;

		if assignment.first_child().as_ref() != Some(target) {
			return None;
		}

		let value = assignment.nth_child(1).filter(|value| value.kind().is_lambda())?;
		let statement = assignment.parent().filter(|parent| parent.kind() == SyntaxKind::ExprStmt)?;

		Some(Self { statement, target: target.clone(), value })
	}
}

/// Elements between the braces of `block` without the outer whitespace.
fn block_contents(block: &SyntaxNode) -> Vec<GreenElement> {
	let elements = block.children_with_tokens().collect::<Vec<_>>();
	let inner = match elements.as_slice() {
		[_, inner @ .., _] => inner,
		_ => &[],
	};
	let start = inner.iter().position(|element| element.kind() != SyntaxKind::Whitespace).unwrap_or(inner.len());
	let end = inner.iter().rposition(|element| element.kind() != SyntaxKind::Whitespace).map_or(start, |idx| idx + 1);

	inner[start..end]
		.iter()
		.map(|element| match element {
			SyntaxElement::Node(node) => NodeOrToken::Node(green_node(node)),
			SyntaxElement::Token(token) => green_token(token),
		})
		.collect()
}

/// The lambda without its first parameter, which bound the shimmed instance.
fn without_receiver(lambda: &SyntaxNode) -> Option<GreenNode> {
	let body = green_node(&lambda.last_child()?);
	let parameters = match lambda.kind() {
		SyntaxKind::ParenLambda => lambda
			.child_of_kind(SyntaxKind::ParameterList)?
			.children_of_kind(SyntaxKind::Parameter)
			.skip(1)
			.map(|parameter| green_node(&parameter))
			.collect(),
		_ => Vec::new(),
	};

	Some(make::paren_lambda(make::parameter_list(parameters), body))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_class(statements: Vec<GreenNode>) -> SyntaxNode {
		let method = make::method(
			vec![],
			&["public"],
			make::predefined_type("void"),
			"Arrange",
			make::parameter_list(vec![]),
			make::block(statements),
		);

		Document::new(make::class(&["public"], "OrderTests", vec![method])).syntax()
	}

	fn run(name: &str) -> GreenNode {
		make::expr_stmt(make::invocation(make::identifier_name(name), vec![]))
	}

	fn guard(body: GreenNode) -> GreenNode {
		make::using_stmt(make::invocation(make::dotted("ShimsContext.Create"), vec![]), body)
	}

	fn first_using(root: &SyntaxNode) -> SyntaxNode {
		root.descendants_of_kind(SyntaxKind::UsingStmt).next().expect("using")
	}

	fn shim(target: &str, value: GreenNode) -> GreenNode {
		make::expr_stmt(make::assignment(make::dotted(target), value))
	}

	fn instance_lambda(extra: &[&str], body: GreenNode) -> GreenNode {
		let mut parameters = vec![make::parameter(make::identifier_name("Order"), "@this")];

		parameters.extend(extra.iter().map(|name| make::parameter(make::predefined_type("int"), name)));

		make::paren_lambda(make::parameter_list(parameters), body)
	}

	fn target(root: &SyntaxNode, text: &str) -> SyntaxNode {
		root.descendants()
			.filter(|node| node.kind() == SyntaxKind::MemberAccess)
			.find(|node| node.text_string() == text)
			.expect("member access")
	}

	#[test]
	fn redundant_guards_are_unwrapped() {
		let root = test_class(vec![guard(make::block(vec![run("Load"), run("Save")]))]);
		let fixed = remove_guard_contexts(&first_using(&root)).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class OrderTests { public void Arrange() { Load(); Save(); } }"
		);
	}

	#[test]
	fn unwrapped_guards_keep_their_comments() {
		let token = |kind: SyntaxKind, text: &str| NodeOrToken::Token(rowan::GreenToken::new(kind.into(), text));
		let body = GreenNode::new(SyntaxKind::Block.into(), vec![
			token(SyntaxKind::Punct, "{"),
			token(SyntaxKind::Whitespace, " "),
			NodeOrToken::Node(run("Load")),
			token(SyntaxKind::Whitespace, " "),
			token(SyntaxKind::Comment, "// keep me"),
			token(SyntaxKind::Whitespace, "\n "),
			NodeOrToken::Node(run("Save")),
			token(SyntaxKind::Whitespace, " "),
			token(SyntaxKind::Punct, "}"),
		]);
		let root = test_class(vec![guard(body)]);
		let fixed = remove_guard_contexts(&first_using(&root)).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class OrderTests { public void Arrange() { Load(); // keep me\n Save(); } }"
		);
	}

	#[test]
	fn empty_guards_are_removed_and_inner_guards_go_first() {
		let empty = test_class(vec![run("Load"), guard(make::block(vec![]))]);
		let nested = test_class(vec![guard(make::block(vec![guard(make::block(vec![run("Load")]))]))]);
		let used = test_class(vec![guard(make::block(vec![shim("ShimOrder.AllInstances.Total", make::number_literal("1"))]))]);

		assert_eq!(
			remove_guard_contexts(&first_using(&empty)).map(|document| document.text()).as_deref(),
			Some("public class OrderTests { public void Arrange() { Load(); } }")
		);

		let inner = nested.descendants_of_kind(SyntaxKind::UsingStmt).nth(1).expect("inner using");

		assert_eq!(remove_guard_contexts(&first_using(&nested)), None);
		assert_eq!(
			remove_guard_contexts(&inner).map(|document| document.text()).as_deref(),
			Some("public class OrderTests { public void Arrange() { using (ShimsContext.Create()) { Load(); } } }")
		);
		assert_eq!(remove_guard_contexts(&first_using(&used)), None);
	}

	#[test]
	fn mock_chains_fold_into_a_constructor_shim() {
		let root = test_class(vec![
			shim("ShimOrder.AllInstances.Total", instance_lambda(&[], make::number_literal("10"))),
			run("Load"),
			shim("ShimOrder.AllInstances.Discount", instance_lambda(&["rate"], make::identifier_name("rate"))),
			shim("ShimOrder.AllInstances.Total", instance_lambda(&[], make::number_literal("10"))),
		]);
		let fixed = simplify_mock_chain(&target(&root, "ShimOrder.AllInstances.Total")).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class OrderTests { public void Arrange() { ShimOrder.Constructor = _ => { var instance = new \
			 ShimOrder(_) { Total = () => 10, Discount = (int rate) => rate }; instance.BehaveAsDefaultValue(); }; \
			 Load(); ShimOrder.AllInstances.Discount = (Order @this, int rate) => rate; \
			 ShimOrder.AllInstances.Total = (Order @this) => 10; } }"
		);
	}

	#[test]
	fn folding_leaves_shims_outside_the_diagnosed_statement() {
		let method = |name: &str, statements: Vec<GreenNode>| {
			make::method(
				vec![],
				&["public"],
				make::predefined_type("void"),
				name,
				make::parameter_list(vec![]),
				make::block(statements),
			)
		};
		let root = Document::new(make::class(&["public"], "OrderTests", vec![
			method("First", vec![shim("ShimOrder.AllInstances.Total", make::simple_lambda("o", make::number_literal("1")))]),
			method("Second", vec![
				shim("ShimOrder.AllInstances.Paid", make::simple_lambda("o", make::number_literal("1"))),
				run("Run"),
			]),
		]))
		.syntax();
		let fixed = simplify_mock_chain(&target(&root, "ShimOrder.AllInstances.Total")).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class OrderTests { public void First() { ShimOrder.Constructor = _ => { var instance = new \
			 ShimOrder(_) { Total = () => 1 }; instance.BehaveAsDefaultValue(); }; } public void Second() { \
			 ShimOrder.AllInstances.Paid = o => 1; Run(); } }"
		);
	}

	#[test]
	fn mock_chains_can_be_removed() {
		let root = test_class(vec![
			shim("ShimOrder.AllInstances.Total", make::simple_lambda("order", make::number_literal("10"))),
			run("Load"),
			shim("ShimOrder.AllInstances.Discount", make::number_literal("5")),
		]);
		let fixed = remove_mock_chain(&target(&root, "ShimOrder.AllInstances.Total")).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class OrderTests { public void Arrange() { Load(); ShimOrder.AllInstances.Discount = 5; } }"
		);
		assert!(remove_mock_chain(&target(&root, "ShimOrder.AllInstances")).is_none());
	}
}
