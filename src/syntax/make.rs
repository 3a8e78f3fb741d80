//! Node factory.
//!
//! Builds green subtrees with canonical single-space trivia. Fixes use it to
//! synthesize replacement nodes; hosts and tests use it to assemble trees without a
//! parser.
//!
//! Rendering rules: tokens inside a construct are separated by one space where C#
//! style puts one, lists use `, `, and braced bodies render as `{ a b }` (or `{ }` when
//! empty).

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::{GreenElement, SyntaxKind};

struct Builder {
	kind: SyntaxKind,
	children: Vec<GreenElement>,
}
impl Builder {
	fn new(kind: SyntaxKind) -> Self {
		Self { kind, children: Vec::new() }
	}

	fn token(mut self, kind: SyntaxKind, text: &str) -> Self {
		self.children.push(token(kind, text));

		self
	}

	fn keyword(self, text: &str) -> Self {
		self.token(SyntaxKind::Keyword, text)
	}

	fn punct(self, text: &str) -> Self {
		self.token(SyntaxKind::Punct, text)
	}

	fn ident(self, text: &str) -> Self {
		self.token(SyntaxKind::Ident, text)
	}

	fn space(self) -> Self {
		self.token(SyntaxKind::Whitespace, " ")
	}

	fn node(mut self, node: GreenNode) -> Self {
		self.children.push(NodeOrToken::Node(node));

		self
	}

	fn maybe(self, node: Option<GreenNode>) -> Self {
		match node {
			Some(node) => self.node(node),
			None => self,
		}
	}

	/// Each node followed by one space.
	fn prefixed(mut self, nodes: Vec<GreenNode>) -> Self {
		for node in nodes {
			self = self.node(node).space();
		}

		self
	}

	/// Nodes separated by `, `.
	fn comma_separated(mut self, nodes: Vec<GreenNode>) -> Self {
		for (idx, node) in nodes.into_iter().enumerate() {
			if idx > 0 {
				self = self.punct(",").space();
			}

			self = self.node(node);
		}

		self
	}

	/// `{ a b }`, or `{ }` when empty.
	fn braced(mut self, nodes: Vec<GreenNode>) -> Self {
		self = self.punct("{");

		for node in nodes {
			self = self.space().node(node);
		}

		self.space().punct("}")
	}

	/// `{ a, b }`, or `{ }` when empty.
	fn braced_list(mut self, nodes: Vec<GreenNode>) -> Self {
		self = self.punct("{").space();

		if !nodes.is_empty() {
			self = self.comma_separated(nodes).space();
		}

		self.punct("}")
	}

	fn build(self) -> GreenNode {
		GreenNode::new(self.kind.into(), self.children)
	}
}

fn token(kind: SyntaxKind, text: &str) -> GreenElement {
	NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

/// Single whitespace token.
pub fn whitespace(text: &str) -> GreenElement {
	token(SyntaxKind::Whitespace, text)
}

/// Root of a document.
pub fn compilation_unit(members: Vec<GreenNode>) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::CompilationUnit);

	for (idx, member) in members.into_iter().enumerate() {
		if idx > 0 {
			builder = builder.token(SyntaxKind::Whitespace, "\n");
		}

		builder = builder.node(member);
	}

	builder.build()
}

/// `namespace Name { ... }`.
pub fn namespace(name: &str, members: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::NamespaceDecl)
		.keyword("namespace")
		.space()
		.ident(name)
		.space()
		.braced(members)
		.build()
}

/// `public enum` style modifier list.
pub fn modifier_list(modifiers: &[&str]) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::ModifierList);

	for (idx, modifier) in modifiers.iter().enumerate() {
		if idx > 0 {
			builder = builder.space();
		}

		builder = builder.keyword(modifier);
	}

	builder.build()
}

fn modifiers_or_none(modifiers: &[&str]) -> Option<GreenNode> {
	if modifiers.is_empty() { None } else { Some(modifier_list(modifiers)) }
}

fn type_decl(
	kind: SyntaxKind,
	keyword: &str,
	attributes: Vec<GreenNode>,
	modifiers: &[&str],
	name: &str,
	members: Vec<GreenNode>,
) -> GreenNode {
	let mut builder = Builder::new(kind).prefixed(attributes);

	if let Some(modifiers) = modifiers_or_none(modifiers) {
		builder = builder.node(modifiers).space();
	}

	builder.keyword(keyword).space().ident(name).space().braced(members).build()
}

/// `public class Name { ... }`.
pub fn class(modifiers: &[&str], name: &str, members: Vec<GreenNode>) -> GreenNode {
	type_decl(SyntaxKind::ClassDecl, "class", Vec::new(), modifiers, name, members)
}

/// Class declaration with attribute lists.
pub fn class_with_attributes(
	attributes: Vec<GreenNode>,
	modifiers: &[&str],
	name: &str,
	members: Vec<GreenNode>,
) -> GreenNode {
	type_decl(SyntaxKind::ClassDecl, "class", attributes, modifiers, name, members)
}

/// `public struct Name { ... }`.
pub fn struct_decl(modifiers: &[&str], name: &str, members: Vec<GreenNode>) -> GreenNode {
	type_decl(SyntaxKind::StructDecl, "struct", Vec::new(), modifiers, name, members)
}

/// `public enum Name { A = 1, B }`.
pub fn enum_decl(modifiers: &[&str], name: &str, members: Vec<GreenNode>) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::EnumDecl);

	if let Some(modifiers) = modifiers_or_none(modifiers) {
		builder = builder.node(modifiers).space();
	}

	builder.keyword("enum").space().ident(name).space().braced_list(members).build()
}

/// `Name` or `Name = value`.
pub fn enum_member(name: &str, value: Option<GreenNode>) -> GreenNode {
	let builder = Builder::new(SyntaxKind::EnumMember).ident(name);

	match value {
		Some(value) => builder.space().node(equals_value(value)).build(),
		None => builder.build(),
	}
}

/// `= value`.
pub fn equals_value(value: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::EqualsValue).punct("=").space().node(value).build()
}

/// `[A, B(1)]`.
pub fn attribute_list(attributes: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::AttributeList).punct("[").comma_separated(attributes).punct("]").build()
}

/// `Name` or `Name(args)`.
pub fn attribute(name: &str, arguments: Option<Vec<GreenNode>>) -> GreenNode {
	let builder = Builder::new(SyntaxKind::Attribute).node(identifier_name(name));
	let Some(arguments) = arguments else {
		return builder.build();
	};
	let arguments = arguments
		.into_iter()
		.map(|argument| Builder::new(SyntaxKind::AttributeArg).node(argument).build())
		.collect();
	let list = Builder::new(SyntaxKind::AttributeArgList)
		.punct("(")
		.comma_separated(arguments)
		.punct(")")
		.build();

	builder.node(list).build()
}

/// Attribute list holding a single attribute.
pub fn single_attribute(name: &str, arguments: Option<Vec<GreenNode>>) -> GreenNode {
	attribute_list(vec![attribute(name, arguments)])
}

/// Field declaration from already-built parts; attribute and modifier nodes are reused
/// verbatim.
pub fn field(
	attributes: Vec<GreenNode>,
	modifiers: Option<GreenNode>,
	declaration: GreenNode,
) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::FieldDecl).prefixed(attributes);

	if let Some(modifiers) = modifiers {
		builder = builder.node(modifiers).space();
	}

	builder.node(declaration).punct(";").build()
}

/// `public int Name = init;`.
pub fn simple_field(
	modifiers: &[&str],
	ty: GreenNode,
	name: &str,
	initializer: Option<GreenNode>,
) -> GreenNode {
	field(
		Vec::new(),
		modifiers_or_none(modifiers),
		variable_declaration(ty, vec![variable_declarator(name, initializer)]),
	)
}

/// `Type a = 1, b`.
pub fn variable_declaration(ty: GreenNode, declarators: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::VariableDecl).node(ty).space().comma_separated(declarators).build()
}

/// `name` or `name = init`.
pub fn variable_declarator(name: &str, initializer: Option<GreenNode>) -> GreenNode {
	let builder = Builder::new(SyntaxKind::VariableDeclarator).ident(name);

	match initializer {
		Some(value) => builder.space().node(equals_value(value)).build(),
		None => builder.build(),
	}
}

/// Property declaration from already-built parts; `body` is an accessor list or an
/// arrow clause.
pub fn property(
	attributes: Vec<GreenNode>,
	modifiers: Option<GreenNode>,
	ty: GreenNode,
	name: &str,
	body: GreenNode,
) -> GreenNode {
	let is_arrow = SyntaxKind::from_raw(body.kind().0) == SyntaxKind::ArrowClause;
	let mut builder = Builder::new(SyntaxKind::PropertyDecl).prefixed(attributes);

	if let Some(modifiers) = modifiers {
		builder = builder.node(modifiers).space();
	}

	builder = builder.node(ty).space().ident(name).space().node(body);

	if is_arrow { builder.punct(";").build() } else { builder.build() }
}

/// `public Type Name { get; set; }`.
pub fn auto_property(modifiers: &[&str], ty: GreenNode, name: &str) -> GreenNode {
	property(Vec::new(), modifiers_or_none(modifiers), ty, name, auto_accessors())
}

/// `{ get; set; }`.
pub fn auto_accessors() -> GreenNode {
	accessor_list(vec![accessor("get", None), accessor("set", None)])
}

/// `{ get; set { ... } }`.
pub fn accessor_list(accessors: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::AccessorList).braced(accessors).build()
}

/// `get;`, `set { ... }` or `get => expr;` depending on `body`.
pub fn accessor(keyword: &str, body: Option<GreenNode>) -> GreenNode {
	let kind = if keyword == "set" { SyntaxKind::SetAccessor } else { SyntaxKind::GetAccessor };
	let builder = Builder::new(kind).keyword(keyword);
	let Some(body) = body else {
		return builder.punct(";").build();
	};

	if SyntaxKind::from_raw(body.kind().0) == SyntaxKind::ArrowClause {
		builder.space().node(body).punct(";").build()
	} else {
		builder.space().node(body).build()
	}
}

/// `=> expr`.
pub fn arrow_clause(expression: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ArrowClause).punct("=>").space().node(expression).build()
}

/// `[attrs] modifiers ReturnType Name(params) body`; `body` is a block or an arrow
/// clause.
pub fn method(
	attributes: Vec<GreenNode>,
	modifiers: &[&str],
	return_type: GreenNode,
	name: &str,
	parameters: GreenNode,
	body: GreenNode,
) -> GreenNode {
	let is_arrow = SyntaxKind::from_raw(body.kind().0) == SyntaxKind::ArrowClause;
	let mut builder = Builder::new(SyntaxKind::MethodDecl).prefixed(attributes);

	if let Some(modifiers) = modifiers_or_none(modifiers) {
		builder = builder.node(modifiers).space();
	}

	builder = builder.node(return_type).space().ident(name).node(parameters).space().node(body);

	if is_arrow { builder.punct(";").build() } else { builder.build() }
}

/// `modifiers Name(params) { ... }`.
pub fn constructor(
	modifiers: &[&str],
	name: &str,
	parameters: GreenNode,
	body: GreenNode,
) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::ConstructorDecl);

	if let Some(modifiers) = modifiers_or_none(modifiers) {
		builder = builder.node(modifiers).space();
	}

	builder.ident(name).node(parameters).space().node(body).build()
}

/// `(a, b)`.
pub fn parameter_list(parameters: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::ParameterList).punct("(").comma_separated(parameters).punct(")").build()
}

/// `Type name`.
pub fn parameter(ty: GreenNode, name: &str) -> GreenNode {
	parameter_with(Vec::new(), &[], Some(ty), name)
}

/// `[attrs] ref Type name`; `ty` is absent for implicitly typed lambda parameters.
pub fn parameter_with(
	attributes: Vec<GreenNode>,
	modifiers: &[&str],
	ty: Option<GreenNode>,
	name: &str,
) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::Parameter).prefixed(attributes);

	if let Some(modifiers) = modifiers_or_none(modifiers) {
		builder = builder.node(modifiers).space();
	}
	if let Some(ty) = ty {
		builder = builder.node(ty).space();
	}

	builder.ident(name).build()
}

/// `int`, `string`, `bool` and the other keyword types.
pub fn predefined_type(keyword: &str) -> GreenNode {
	Builder::new(SyntaxKind::PredefinedType).keyword(keyword).build()
}

/// `name`.
pub fn identifier_name(name: &str) -> GreenNode {
	Builder::new(SyntaxKind::IdentifierName).ident(name).build()
}

/// `Name<A, B>`.
pub fn generic_name(name: &str, arguments: Vec<GreenNode>) -> GreenNode {
	let arguments = Builder::new(SyntaxKind::TypeArgList)
		.punct("<")
		.comma_separated(arguments)
		.punct(">")
		.build();

	Builder::new(SyntaxKind::GenericName).ident(name).node(arguments).build()
}

/// `Left.Right` in a type position.
pub fn qualified_name(left: GreenNode, right: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::QualifiedName).node(left).punct(".").node(right).build()
}

/// `"value"`; `value` is written between quotes verbatim.
pub fn string_literal(value: &str) -> GreenNode {
	literal(SyntaxKind::StringLit, &format!("\"{value}\""))
}

/// Numeric literal with verbatim text, e.g. `0`, `1.5m`.
pub fn number_literal(text: &str) -> GreenNode {
	literal(SyntaxKind::NumberLit, text)
}

/// `true`, `false` or `null`.
pub fn keyword_literal(keyword: &str) -> GreenNode {
	literal(SyntaxKind::Keyword, keyword)
}

/// Literal node holding one token of `kind` with verbatim `text`.
pub fn literal(kind: SyntaxKind, text: &str) -> GreenNode {
	Builder::new(SyntaxKind::Literal).token(kind, text).build()
}

/// `{ a b }`.
pub fn block(statements: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::Block).braced(statements).build()
}

/// `expr;`.
pub fn expr_stmt(expression: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ExprStmt).node(expression).punct(";").build()
}

/// `Type a = 1;`.
pub fn local_decl(declaration: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::LocalDeclStmt).node(declaration).punct(";").build()
}

/// `var name = init;`.
pub fn var_local(name: &str, initializer: GreenNode) -> GreenNode {
	local_decl(variable_declaration(
		identifier_name("var"),
		vec![variable_declarator(name, Some(initializer))],
	))
}

/// `return expr;` or `return;`.
pub fn return_stmt(expression: Option<GreenNode>) -> GreenNode {
	let builder = Builder::new(SyntaxKind::ReturnStmt).keyword("return");

	match expression {
		Some(expression) => builder.space().node(expression).punct(";").build(),
		None => builder.punct(";").build(),
	}
}

/// `throw expr;` or `throw;`.
pub fn throw_stmt(expression: Option<GreenNode>) -> GreenNode {
	let builder = Builder::new(SyntaxKind::ThrowStmt).keyword("throw");

	match expression {
		Some(expression) => builder.space().node(expression).punct(";").build(),
		None => builder.punct(";").build(),
	}
}

/// `if (cond) stmt` with an optional `else stmt`.
pub fn if_stmt(
	condition: GreenNode,
	then_branch: GreenNode,
	else_branch: Option<GreenNode>,
) -> GreenNode {
	let builder = Builder::new(SyntaxKind::IfStmt)
		.keyword("if")
		.space()
		.punct("(")
		.node(condition)
		.punct(")")
		.space()
		.node(then_branch);
	let Some(else_branch) = else_branch else {
		return builder.build();
	};
	let else_clause =
		Builder::new(SyntaxKind::ElseClause).keyword("else").space().node(else_branch).build();

	builder.space().node(else_clause).build()
}

/// `foreach (Type name in expr) body`.
pub fn foreach_stmt(ty: GreenNode, name: &str, expression: GreenNode, body: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ForEachStmt)
		.keyword("foreach")
		.space()
		.punct("(")
		.node(ty)
		.space()
		.ident(name)
		.space()
		.keyword("in")
		.space()
		.node(expression)
		.punct(")")
		.space()
		.node(body)
		.build()
}

/// `while (cond) body`.
pub fn while_stmt(condition: GreenNode, body: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::WhileStmt)
		.keyword("while")
		.space()
		.punct("(")
		.node(condition)
		.punct(")")
		.space()
		.node(body)
		.build()
}

/// `switch (expr) { sections }`.
pub fn switch_stmt(expression: GreenNode, sections: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::SwitchStmt)
		.keyword("switch")
		.space()
		.punct("(")
		.node(expression)
		.punct(")")
		.space()
		.braced(sections)
		.build()
}

/// `case 1: default: stmt stmt`.
pub fn switch_section(labels: Vec<GreenNode>, statements: Vec<GreenNode>) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::SwitchSection);

	for (idx, node) in labels.into_iter().chain(statements).enumerate() {
		if idx > 0 {
			builder = builder.space();
		}

		builder = builder.node(node);
	}

	builder.build()
}

/// `case value:`.
pub fn case_label(value: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::CaseLabel).keyword("case").space().node(value).punct(":").build()
}

/// `default:`.
pub fn default_label() -> GreenNode {
	Builder::new(SyntaxKind::DefaultLabel).keyword("default").punct(":").build()
}

/// `break;`.
pub fn break_stmt() -> GreenNode {
	Builder::new(SyntaxKind::BreakStmt).keyword("break").punct(";").build()
}

/// `using (resource) body`; `resource` is an expression or a variable declaration.
pub fn using_stmt(resource: GreenNode, body: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::UsingStmt)
		.keyword("using")
		.space()
		.punct("(")
		.node(resource)
		.punct(")")
		.space()
		.node(body)
		.build()
}

/// `try { } catch ... finally { }`.
pub fn try_stmt(body: GreenNode, catches: Vec<GreenNode>, finally: Option<GreenNode>) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::TryStmt).keyword("try").space().node(body);

	for catch in catches {
		builder = builder.space().node(catch);
	}
	if let Some(finally) = finally {
		let clause =
			Builder::new(SyntaxKind::FinallyClause).keyword("finally").space().node(finally).build();

		builder = builder.space().node(clause);
	}

	builder.build()
}

/// `catch { }`, `catch (Type) { }` or `catch (Type name) { }`.
pub fn catch_clause(ty: Option<GreenNode>, name: Option<&str>, body: GreenNode) -> GreenNode {
	let mut builder = Builder::new(SyntaxKind::CatchClause).keyword("catch").space();

	if let Some(ty) = ty {
		builder = builder.punct("(").node(ty);

		if let Some(name) = name {
			builder = builder.space().ident(name);
		}

		builder = builder.punct(")").space();
	}

	builder.node(body).build()
}

/// `receiver.name`.
pub fn member_access(receiver: GreenNode, name: &str) -> GreenNode {
	Builder::new(SyntaxKind::MemberAccess).node(receiver).punct(".").node(identifier_name(name)).build()
}

/// `A.B.C` built from dotted text, left-nested like a parser would.
pub fn dotted(path: &str) -> GreenNode {
	let mut segments = path.split('.');
	let first = segments.next().unwrap_or_default();

	segments.fold(identifier_name(first), |receiver, segment| member_access(receiver, segment))
}

/// `target(args)`.
pub fn invocation(target: GreenNode, arguments: Vec<GreenNode>) -> GreenNode {
	Builder::new(SyntaxKind::Invocation).node(target).node(argument_list(arguments)).build()
}

/// `(a, b)` in a call position.
pub fn argument_list(arguments: Vec<GreenNode>) -> GreenNode {
	let arguments = arguments
		.into_iter()
		.map(|argument| Builder::new(SyntaxKind::Argument).node(argument).build())
		.collect();

	Builder::new(SyntaxKind::ArgumentList).punct("(").comma_separated(arguments).punct(")").build()
}

/// `new Type(args) { init }`; a missing argument list renders as `new Type { init }`.
pub fn object_creation(
	ty: GreenNode,
	arguments: Option<Vec<GreenNode>>,
	initializer: Option<GreenNode>,
) -> GreenNode {
	let mut builder =
		Builder::new(SyntaxKind::ObjectCreation).keyword("new").space().node(ty);

	if let Some(arguments) = arguments {
		builder = builder.node(argument_list(arguments));
	}
	if let Some(initializer) = initializer {
		builder = builder.space().node(initializer);
	}

	builder.build()
}

/// `{ a, b }` of the given initializer kind.
pub fn initializer(kind: SyntaxKind, expressions: Vec<GreenNode>) -> GreenNode {
	Builder::new(kind).braced_list(expressions).build()
}

/// `left = right`.
pub fn assignment(left: GreenNode, right: GreenNode) -> GreenNode {
	compound_assignment(left, "=", right)
}

/// `left op right` for `=`, `+=` and friends.
pub fn compound_assignment(left: GreenNode, operator: &str, right: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::Assignment)
		.node(left)
		.space()
		.punct(operator)
		.space()
		.node(right)
		.build()
}

/// `name => body`.
pub fn simple_lambda(parameter: &str, body: GreenNode) -> GreenNode {
	simple_lambda_from(parameter_with(Vec::new(), &[], None, parameter), body)
}

/// `parameter => body` reusing an existing parameter node.
pub fn simple_lambda_from(parameter: GreenNode, body: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::SimpleLambda)
		.node(parameter)
		.space()
		.punct("=>")
		.space()
		.node(body)
		.build()
}

/// `(a, b) => body`.
pub fn paren_lambda(parameters: GreenNode, body: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ParenLambda)
		.node(parameters)
		.space()
		.punct("=>")
		.space()
		.node(body)
		.build()
}

/// `left op right`.
pub fn binary(left: GreenNode, operator: &str, right: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::BinaryExpr)
		.node(left)
		.space()
		.punct(operator)
		.space()
		.node(right)
		.build()
}

/// `(Type)expr`.
pub fn cast(ty: GreenNode, expression: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::CastExpr).punct("(").node(ty).punct(")").node(expression).build()
}

/// `typeof(Type)`.
pub fn type_of(ty: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::TypeOfExpr).keyword("typeof").punct("(").node(ty).punct(")").build()
}

/// `throw expr` in expression position.
pub fn throw_expr(expression: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ThrowExpr).keyword("throw").space().node(expression).build()
}

/// `(expr)`.
pub fn paren(expression: GreenNode) -> GreenNode {
	Builder::new(SyntaxKind::ParenExpr).punct("(").node(expression).punct(")").build()
}

/// `Type name` in expression position, e.g. an `out var` argument.
pub fn declaration_expr(ty: GreenNode, name: &str) -> GreenNode {
	Builder::new(SyntaxKind::DeclarationExpr).node(ty).space().ident(name).build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::Document;

	fn render(green: GreenNode) -> String {
		Document::new(green).text()
	}

	#[test]
	fn declarations_render_with_canonical_spacing() {
		let field = simple_field(
			&["public", "const"],
			predefined_type("string"),
			"Greeting",
			Some(string_literal("hi")),
		);
		let method = method(
			vec![single_attribute("TestCase", Some(vec![number_literal("1")]))],
			&["public"],
			predefined_type("void"),
			"Run",
			parameter_list(vec![parameter(predefined_type("int"), "a"), parameter(predefined_type("bool"), "b")]),
			block(vec![]),
		);

		assert_eq!(render(field), r#"public const string Greeting = "hi";"#);
		assert_eq!(render(method), "[TestCase(1)] public void Run(int a, bool b) { }");
	}

	#[test]
	fn expressions_render_left_nested() {
		let call = invocation(dotted("ShimsContext.Create"), vec![]);
		let creation = object_creation(
			identifier_name("ShimFoo"),
			Some(vec![identifier_name("_")]),
			Some(initializer(
				SyntaxKind::ObjectInitializer,
				vec![assignment(identifier_name("Bar"), number_literal("1"))],
			)),
		);

		assert_eq!(render(call), "ShimsContext.Create()");
		assert_eq!(render(creation), "new ShimFoo(_) { Bar = 1 }");
		assert_eq!(render(simple_lambda("x", identifier_name("x"))), "x => x");
	}

	#[test]
	fn statements_render_braced_bodies() {
		let statement = using_stmt(
			invocation(dotted("ShimsContext.Create"), vec![]),
			block(vec![expr_stmt(invocation(identifier_name("Run"), vec![]))]),
		);

		assert_eq!(render(statement), "using (ShimsContext.Create()) { Run(); }");
		assert_eq!(render(block(vec![])), "{ }");
		assert_eq!(render(auto_property(&["public"], predefined_type("string"), "Name")), "public string Name { get; set; }");
	}
}
