use crate::{
	analysis::{declarators, is_encapsulation_candidate},
	fixes::EditSession,
	ident::pascal_case_field_name,
	syntax::{Document, NodeExt, SyntaxKind, SyntaxNode, green_node, make},
};

/// Turns a visible single-variable field into an auto-property with the same
/// attributes, modifiers and type.
pub(crate) fn encapsulate_field(node: &SyntaxNode) -> Option<Document> {
	if !is_encapsulation_candidate(node) {
		return None;
	}

	let name = pascal_case_field_name(&declarators(node).next()?.name_text()?)?;
	let ty = node.child_of_kind(SyntaxKind::VariableDecl)?.first_child()?;
	let attributes = node.children_of_kind(SyntaxKind::AttributeList).map(|list| green_node(&list)).collect();
	let modifiers = node.child_of_kind(SyntaxKind::ModifierList).map(|list| green_node(&list));
	let property = make::property(attributes, modifiers, green_node(&ty), &name, make::auto_accessors());
	let mut session = EditSession::new(node);

	session.replace(node, vec![property]).ok()?;

	Some(session.apply())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fix_first_field(class: rowan::GreenNode) -> Option<String> {
		let root = Document::new(class).syntax();
		let field = root.descendants_of_kind(SyntaxKind::FieldDecl).next().expect("field");

		encapsulate_field(&field).map(|document| document.text())
	}

	#[test]
	fn public_fields_become_auto_properties() {
		let field = make::field(
			vec![make::single_attribute("JsonProperty", None)],
			Some(make::modifier_list(&["public"])),
			make::variable_declaration(
				make::generic_name("List", vec![make::predefined_type("string")]),
				vec![make::variable_declarator("_orderLines", None)],
			),
		);

		assert_eq!(
			fix_first_field(make::class(&["public"], "Order", vec![field])).as_deref(),
			Some("public class Order { [JsonProperty] public List<string> OrderLines { get; set; } }")
		);
	}

	#[test]
	fn private_and_multi_variable_fields_are_left_alone() {
		let private = make::simple_field(&["private"], make::predefined_type("int"), "_count", None);
		let pair = make::field(
			vec![],
			Some(make::modifier_list(&["public"])),
			make::variable_declaration(
				make::predefined_type("int"),
				vec![make::variable_declarator("x", None), make::variable_declarator("y", None)],
			),
		);
		let underscores = make::simple_field(&["public"], make::predefined_type("int"), "__", None);

		assert_eq!(fix_first_field(make::class(&[], "A", vec![private])), None);
		assert_eq!(fix_first_field(make::class(&[], "B", vec![pair])), None);
		assert_eq!(fix_first_field(make::class(&[], "C", vec![underscores])), None);
	}
}
