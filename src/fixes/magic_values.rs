//! Replace literals in method bodies with named constants.
//!
//! Literals whose text equals an existing constant's initializer are rewritten to
//! reference that constant. When the class already declares constants, every other
//! string literal is promoted to a new constant inserted after the last one.

use rowan::GreenNode;

use crate::{
	analysis::{RuleId, constant_fields, declarators},
	fixes::{EditSession, class_scope, plan_or_skip},
	ident::{constant_name_for_literal, is_valid_identifier},
	syntax::{Document, NodeExt, NodeOrToken, SyntaxKind, SyntaxNode, green_node, make},
};

/// A literal and the constant that replaces it.
struct ConstantMapping {
	name: String,
	literal: SyntaxNode,
}

pub(crate) fn replace_magic_values(node: &SyntaxNode) -> Option<Document> {
	let scope = class_scope(node);
	let constant_fields = constant_fields(&scope);
	let constants = constant_fields
		.iter()
		.flat_map(declarators)
		.filter_map(|declarator| {
			let value = declarator.child_of_kind(SyntaxKind::EqualsValue)?.first_child()?;

			Some((declarator.name_text()?, value.text_string().trim().to_owned()))
		})
		.collect::<Vec<_>>();
	let mut pool = scope
		.descendants()
		.filter(|node| node.kind() == SyntaxKind::Literal)
		.filter(|literal| literal.ancestors_of_kind(SyntaxKind::MethodDecl).next().is_some())
		.collect::<Vec<_>>();
	let mut mappings = Vec::new();

	pool.retain(|literal| {
		let text = literal.text_string();
		let Some((name, _)) = constants.iter().find(|(_, value)| *value == text.trim()) else {
			return true;
		};

		mappings.push(ConstantMapping { name: name.clone(), literal: literal.clone() });

		false
	});

	let mut generated = Vec::<(String, GreenNode)>::new();

	if !constant_fields.is_empty() {
		for (text, literals) in group_string_literals(&pool) {
			let name = constant_name_for_literal(&text);
			let taken = mappings.iter().any(|mapping| mapping.name == name)
				|| constants.iter().any(|(existing, _)| *existing == name)
				|| generated.iter().any(|(existing, _)| *existing == name);

			if !is_valid_identifier(&name) || taken {
				tracing::debug!(literal = %text, name = %name, "Skipped literal without a usable constant name.");

				continue;
			}

			generated.push((name.clone(), green_node(&literals[0])));
			mappings.extend(literals.into_iter().map(|literal| ConstantMapping { name: name.clone(), literal }));
		}
	}

	if mappings.is_empty() {
		return None;
	}

	let mut session = EditSession::new(&scope);

	match constant_fields.last() {
		Some(last) if !generated.is_empty() => {
			let fields = generated
				.into_iter()
				.map(|(name, literal)| constant_field_like(last, &name, literal))
				.collect();

			plan_or_skip(RuleId::ReplaceMagicValues, session.insert_after(last, fields));
		},
		_ => {},
	}

	for mapping in &mappings {
		plan_or_skip(
			RuleId::ReplaceMagicValues,
			session.replace(&mapping.literal, vec![make::identifier_name(&mapping.name)]),
		);
	}

	tracing::debug!(replaced = mappings.len(), "Planned magic value replacements.");

	Some(session.apply())
}

/// String literals grouped by text, in first-seen order.
fn group_string_literals(literals: &[SyntaxNode]) -> Vec<(String, Vec<SyntaxNode>)> {
	let mut groups = Vec::<(String, Vec<SyntaxNode>)>::new();

	for literal in literals.iter().filter(|literal| is_string_literal(literal)) {
		let text = literal.text_string().trim().to_owned();

		match groups.iter_mut().find(|(existing, _)| *existing == text) {
			Some((_, members)) => members.push(literal.clone()),
			None => groups.push((text, vec![literal.clone()])),
		}
	}

	groups
}

fn is_string_literal(literal: &SyntaxNode) -> bool {
	literal
		.children_with_tokens()
		.filter_map(NodeOrToken::into_token)
		.next()
		.is_some_and(|token| token.kind() == SyntaxKind::StringLit)
}

/// `string Name = literal;` carrying the attributes and modifiers of `template`.
fn constant_field_like(template: &SyntaxNode, name: &str, literal: GreenNode) -> GreenNode {
	make::field(
		template.children_of_kind(SyntaxKind::AttributeList).map(|list| green_node(&list)).collect(),
		template.child_of_kind(SyntaxKind::ModifierList).map(|list| green_node(&list)),
		make::variable_declaration(
			make::predefined_type("string"),
			vec![make::variable_declarator(name, Some(literal))],
		),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn greeter(constants: Vec<GreenNode>, statements: Vec<GreenNode>) -> SyntaxNode {
		let method = make::method(
			vec![],
			&["public"],
			make::predefined_type("void"),
			"Greet",
			make::parameter_list(vec![]),
			make::block(statements),
		);
		let mut members = constants;

		members.push(method);

		Document::new(make::class(&["public"], "Greeter", members)).syntax()
	}

	fn say(literal: GreenNode) -> GreenNode {
		make::expr_stmt(make::invocation(make::identifier_name("Say"), vec![literal]))
	}

	fn constant(name: &str, literal: GreenNode) -> GreenNode {
		make::simple_field(&["private", "const"], make::predefined_type("string"), name, Some(literal))
	}

	#[test]
	fn literals_matching_a_constant_reference_it() {
		let root = greeter(
			vec![constant("Greeting", make::string_literal("hi"))],
			vec![say(make::string_literal("hi")), say(make::number_literal("3"))],
		);
		let fixed = replace_magic_values(&root).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class Greeter { private const string Greeting = \"hi\"; public void Greet() { Say(Greeting); Say(3); } }"
		);
		assert_eq!(replace_magic_values(&fixed.syntax()), None);
	}

	#[test]
	fn remaining_strings_become_new_constants() {
		let root = greeter(
			vec![constant("Greeting", make::string_literal("hi"))],
			vec![
				say(make::string_literal("user_id")),
				say(make::string_literal("user_id")),
				say(make::string_literal("hi")),
			],
		);
		let fixed = replace_magic_values(&root).expect("fix");

		assert_eq!(
			fixed.text(),
			"public class Greeter { private const string Greeting = \"hi\"; private const string UserId = \"user_id\"; \
			 public void Greet() { Say(UserId); Say(UserId); Say(Greeting); } }"
		);
	}

	#[test]
	fn strings_stay_put_without_existing_constants() {
		let root = greeter(vec![], vec![say(make::string_literal("user_id"))]);

		assert_eq!(replace_magic_values(&root), None);
	}

	#[test]
	fn colliding_or_invalid_names_are_skipped() {
		let root = greeter(
			vec![constant("Hello", make::string_literal("hi"))],
			vec![say(make::string_literal("hello")), say(make::string_literal("two words"))],
		);

		assert_eq!(replace_magic_values(&root), None);
	}
}
