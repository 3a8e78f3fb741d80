//! Symbol queries used by the semantic rules.
//!
//! Detectors only see the [`SemanticContext`] trait. [`ScopeResolver`] is a name-based
//! implementation that walks lexical scopes of one tree; hosts with a real compiler
//! front end can plug in their own.

use std::collections::HashSet;

use crate::syntax::{NodeExt, NodeOrToken, SyntaxKind, SyntaxNode, TextRange};

const VALUE_TYPE_KEYWORDS: [&str; 15] = [
	"bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "long", "ulong",
	"short", "ushort", "nint", "nuint",
];
const WELL_KNOWN_STRUCTS: [&str; 19] = [
	"Boolean",
	"Byte",
	"SByte",
	"Char",
	"Decimal",
	"Double",
	"Single",
	"Int16",
	"UInt16",
	"Int32",
	"UInt32",
	"Int64",
	"UInt64",
	"Guid",
	"DateTime",
	"DateTimeOffset",
	"TimeSpan",
	"CancellationToken",
	"Nullable",
];
const WELL_KNOWN_TYPES: [(&str, &str); 9] = [
	("ArgumentNullException", "System.ArgumentNullException"),
	("ArgumentException", "System.ArgumentException"),
	("ArgumentOutOfRangeException", "System.ArgumentOutOfRangeException"),
	("InvalidOperationException", "System.InvalidOperationException"),
	("NullReferenceException", "System.NullReferenceException"),
	("Exception", "System.Exception"),
	("Guid", "System.Guid"),
	("DateTime", "System.DateTime"),
	("TimeSpan", "System.TimeSpan"),
];

/// What a symbol names.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
	Parameter,
	Local,
	Field,
	Property,
	Method,
	Type,
}

/// How a parameter is passed.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
	None,
	Ref,
	Out,
	In,
}

/// Resolved declaration.
///
/// Two symbols are the same when name, kind and declaration span agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
	/// Declared name.
	pub name: String,
	/// Kind of declaration.
	pub kind: SymbolKind,
	/// Passing mode; `None` for everything but `ref`/`out`/`in` parameters.
	pub ref_kind: RefKind,
	/// Declared type text, or the qualified name for type symbols.
	pub type_name: Option<String>,
	/// Span of the declaring node; absent for synthetic and library symbols.
	pub declaration: Option<TextRange>,
}
impl Symbol {
	fn synthetic_this(type_name: Option<String>) -> Self {
		Self {
			name: "this".to_owned(),
			kind: SymbolKind::Parameter,
			ref_kind: RefKind::None,
			type_name,
			declaration: None,
		}
	}
}

/// Coarse type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClassification {
	/// Value type with struct semantics.
	Struct,
	/// Class, interface, array, delegate or string.
	Reference,
	/// Enums and anything that could not be classified.
	Other,
}

/// Type of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
	/// Type text as written.
	pub name: String,
	/// Category of the type.
	pub classification: TypeClassification,
}

/// Data-flow summary of one body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFlow {
	/// Symbols that receive a value before the body runs: parameters and the implicit
	/// `this`.
	pub written_outside: Vec<Symbol>,
	/// Parameters and locals read inside the body.
	pub read_inside: Vec<Symbol>,
}

/// Symbol queries over one tree.
pub trait SemanticContext {
	/// Symbol declared by `node` (parameter, declarator, member or type declaration).
	fn declared_symbol(&self, node: &SyntaxNode) -> Option<Symbol>;

	/// Symbol an identifier or `this.member` access refers to.
	fn referenced_symbol(&self, node: &SyntaxNode) -> Option<Symbol>;

	/// Type of a symbol.
	fn type_of(&self, symbol: &Symbol) -> Option<TypeInfo>;

	/// Method, constructor or lambda that declares a parameter or local.
	fn containing_method(&self, symbol: &Symbol) -> Option<SyntaxNode>;

	/// Data flow of a method or lambda body.
	fn data_flow(&self, body: &SyntaxNode) -> Option<DataFlow>;
}

/// Name-based resolver over the lexical scopes of one tree.
///
/// Names are looked up from the innermost scope outwards: lambda, method and
/// constructor parameters and locals, then the members of the enclosing types, then
/// the types declared anywhere in the tree and a small table of library types.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
	root: SyntaxNode,
	structs: HashSet<String>,
	enums: HashSet<String>,
	types: HashSet<String>,
}
impl ScopeResolver {
	/// Indexes the type declarations of the tree `node` belongs to.
	pub fn new(node: &SyntaxNode) -> Self {
		let root = node.ancestors().last().unwrap_or_else(|| node.clone());
		let names_of = |kind: SyntaxKind| {
			root.descendants().filter(|n| n.kind() == kind).filter_map(|n| n.name_text()).collect::<HashSet<_>>()
		};
		let structs = names_of(SyntaxKind::StructDecl);
		let enums = names_of(SyntaxKind::EnumDecl);
		let mut types = names_of(SyntaxKind::ClassDecl);

		types.extend(structs.iter().cloned());
		types.extend(enums.iter().cloned());

		Self { root, structs, enums, types }
	}

	fn lookup(&self, from: &SyntaxNode, name: &str) -> Option<Symbol> {
		for scope in from.ancestors() {
			let found = match scope.kind() {
				kind if kind.is_lambda() || kind.is_method_like() => self
					.parameters_of(&scope)
					.into_iter()
					.chain(self.locals_of(&scope))
					.find(|symbol| symbol.name == name),
				SyntaxKind::ClassDecl | SyntaxKind::StructDecl => self.member_of(&scope, name),
				_ => None,
			};

			if found.is_some() {
				return found;
			}
		}

		self.type_symbol(name)
	}

	fn parameters_of(&self, owner: &SyntaxNode) -> Vec<Symbol> {
		let parameters = match owner.kind() {
			SyntaxKind::SimpleLambda => owner.children_of_kind(SyntaxKind::Parameter).collect::<Vec<_>>(),
			_ => owner
				.child_of_kind(SyntaxKind::ParameterList)
				.map(|list| list.children_of_kind(SyntaxKind::Parameter).collect())
				.unwrap_or_default(),
		};

		parameters.iter().filter_map(|parameter| self.declared_symbol(parameter)).collect()
	}

	fn locals_of(&self, owner: &SyntaxNode) -> Vec<Symbol> {
		owner
			.descendants()
			.filter(|node| {
				matches!(
					node.kind(),
					SyntaxKind::VariableDeclarator
						| SyntaxKind::ForEachStmt
						| SyntaxKind::DeclarationExpr
						| SyntaxKind::CatchClause
				)
			})
			.filter(|node| body_owner(node).as_ref() == Some(owner))
			.filter_map(|node| self.declared_symbol(&node))
			.collect()
	}

	fn member_of(&self, ty: &SyntaxNode, name: &str) -> Option<Symbol> {
		for member in ty.children() {
			let candidates = match member.kind() {
				SyntaxKind::FieldDecl => member
					.descendants_of_kind(SyntaxKind::VariableDeclarator)
					.collect::<Vec<_>>(),
				SyntaxKind::PropertyDecl | SyntaxKind::MethodDecl => vec![member.clone()],
				_ => continue,
			};

			if let Some(symbol) = candidates
				.iter()
				.filter(|node| node.name_text().as_deref() == Some(name))
				.find_map(|node| self.declared_symbol(node))
			{
				return Some(symbol);
			}
		}

		None
	}

	fn type_symbol(&self, name: &str) -> Option<Symbol> {
		let type_name = if self.types.contains(name) {
			name.to_owned()
		} else {
			WELL_KNOWN_TYPES.iter().find(|(short, _)| *short == name).map(|(_, full)| (*full).to_owned())?
		};

		Some(Symbol {
			name: name.to_owned(),
			kind: SymbolKind::Type,
			ref_kind: RefKind::None,
			type_name: Some(type_name),
			declaration: None,
		})
	}

	fn classify(&self, type_text: &str) -> TypeClassification {
		if let Some(inner) = type_text.strip_suffix('?') {
			return match self.classify(inner) {
				TypeClassification::Reference => TypeClassification::Reference,
				_ => TypeClassification::Struct,
			};
		}
		if type_text.ends_with(']') {
			return TypeClassification::Reference;
		}

		let base = type_text.split('<').next().unwrap_or(type_text).trim();
		let short = base.rsplit('.').next().unwrap_or(base);

		if VALUE_TYPE_KEYWORDS.contains(&short)
			|| WELL_KNOWN_STRUCTS.contains(&short)
			|| self.structs.contains(short)
		{
			TypeClassification::Struct
		} else if self.enums.contains(short) {
			TypeClassification::Other
		} else {
			TypeClassification::Reference
		}
	}

	fn declaration_node(&self, range: TextRange) -> Option<SyntaxNode> {
		if !self.root.text_range().contains_range(range) {
			return None;
		}

		let start = match self.root.covering_element(range) {
			NodeOrToken::Node(node) => node,
			NodeOrToken::Token(token) => token.parent()?,
		};

		start.ancestors().find(|node| node.text_range() == range)
	}

	fn reads_in(&self, body: &SyntaxNode) -> Vec<Symbol> {
		let mut reads = Vec::new();

		for identifier in body.descendants().filter(|node| node.kind() == SyntaxKind::IdentifierName) {
			if is_member_name(&identifier) || is_assignment_target(&identifier) {
				continue;
			}

			let symbol = if identifier.text_string() == "this" {
				Some(Symbol::synthetic_this(enclosing_type_name(body)))
			} else {
				self.referenced_symbol(&identifier)
					.filter(|symbol| matches!(symbol.kind, SymbolKind::Parameter | SymbolKind::Local))
			};

			match symbol {
				Some(symbol) if !reads.contains(&symbol) => reads.push(symbol),
				_ => {},
			}
		}

		reads
	}
}
impl SemanticContext for ScopeResolver {
	fn declared_symbol(&self, node: &SyntaxNode) -> Option<Symbol> {
		let (kind, type_name) = match node.kind() {
			SyntaxKind::Parameter => (SymbolKind::Parameter, node.declared_type().map(|ty| ty.text_string())),
			SyntaxKind::VariableDeclarator => {
				let declaration = node.parent()?;
				let kind = if declaration.parent_kind() == Some(SyntaxKind::FieldDecl) {
					SymbolKind::Field
				} else {
					SymbolKind::Local
				};

				(kind, declaration.first_child().map(|ty| ty.text_string()))
			},
			SyntaxKind::ForEachStmt | SyntaxKind::DeclarationExpr =>
				(SymbolKind::Local, node.first_child().map(|ty| ty.text_string())),
			SyntaxKind::CatchClause => {
				node.name_text()?;

				(SymbolKind::Local, node.first_child().map(|ty| ty.text_string()))
			},
			SyntaxKind::PropertyDecl => (SymbolKind::Property, node.declared_type().map(|ty| ty.text_string())),
			SyntaxKind::MethodDecl => (SymbolKind::Method, node.declared_type().map(|ty| ty.text_string())),
			SyntaxKind::ClassDecl | SyntaxKind::StructDecl | SyntaxKind::EnumDecl =>
				(SymbolKind::Type, node.name_text()),
			_ => return None,
		};
		let ref_kind = if kind == SymbolKind::Parameter {
			match node.modifiers().iter().map(String::as_str).find(|m| matches!(*m, "ref" | "out" | "in")) {
				Some("ref") => RefKind::Ref,
				Some("out") => RefKind::Out,
				Some("in") => RefKind::In,
				_ => RefKind::None,
			}
		} else {
			RefKind::None
		};

		Some(Symbol {
			name: node.name_text()?,
			kind,
			ref_kind,
			type_name,
			declaration: Some(node.text_range()),
		})
	}

	fn referenced_symbol(&self, node: &SyntaxNode) -> Option<Symbol> {
		match node.kind() {
			SyntaxKind::IdentifierName => {
				if is_member_name(node) {
					let access = node.parent()?;

					return self.referenced_symbol(&access);
				}

				self.lookup(node, &node.text_string())
			},
			SyntaxKind::MemberAccess => {
				let receiver = node.first_child()?;
				let name = node.children().nth(1)?;

				if receiver.text_string() != "this" {
					return None;
				}

				let ty = node
					.ancestors()
					.find(|ancestor| matches!(ancestor.kind(), SyntaxKind::ClassDecl | SyntaxKind::StructDecl))?;

				self.member_of(&ty, &name.text_string())
			},
			SyntaxKind::ParenExpr => self.referenced_symbol(&node.first_child()?),
			_ => None,
		}
	}

	fn type_of(&self, symbol: &Symbol) -> Option<TypeInfo> {
		let name = symbol.type_name.clone()?;

		if symbol.kind == SymbolKind::Type {
			let classification = self.classify(&symbol.name);

			return Some(TypeInfo { name, classification });
		}

		Some(TypeInfo { classification: self.classify(&name), name })
	}

	fn containing_method(&self, symbol: &Symbol) -> Option<SyntaxNode> {
		if !matches!(symbol.kind, SymbolKind::Parameter | SymbolKind::Local) {
			return None;
		}

		let declaration = self.declaration_node(symbol.declaration?)?;

		body_owner(&declaration)
	}

	fn data_flow(&self, body: &SyntaxNode) -> Option<DataFlow> {
		let owner = body.parent().filter(|parent| parent.kind().is_lambda() || parent.kind().is_method_like())?;
		let mut written_outside = self.parameters_of(&owner);

		if owner.kind().is_method_like() && !owner.has_modifier("static") {
			written_outside.push(Symbol::synthetic_this(enclosing_type_name(&owner)));
		}

		Some(DataFlow { written_outside, read_inside: self.reads_in(body) })
	}
}

/// Nearest method, constructor or lambda strictly above `node`; type declarations stop
/// the search.
fn body_owner(node: &SyntaxNode) -> Option<SyntaxNode> {
	node.ancestors()
		.skip(1)
		.take_while(|ancestor| !matches!(ancestor.kind(), SyntaxKind::ClassDecl | SyntaxKind::StructDecl))
		.find(|ancestor| ancestor.kind().is_lambda() || ancestor.kind().is_method_like())
}

fn enclosing_type_name(node: &SyntaxNode) -> Option<String> {
	node.ancestors()
		.find(|ancestor| matches!(ancestor.kind(), SyntaxKind::ClassDecl | SyntaxKind::StructDecl))
		.and_then(|ty| ty.name_text())
}

/// Whether `node` is the member name of `receiver.name`.
fn is_member_name(node: &SyntaxNode) -> bool {
	node.parent()
		.filter(|parent| parent.kind() == SyntaxKind::MemberAccess)
		.and_then(|parent| parent.children().nth(1))
		.is_some_and(|name| &name == node)
}

/// Whether `node` is the whole left side of a plain `=` assignment.
fn is_assignment_target(node: &SyntaxNode) -> bool {
	let Some(assignment) = node.parent().filter(|parent| parent.kind() == SyntaxKind::Assignment) else {
		return false;
	};
	let is_left = assignment.first_child().is_some_and(|left| &left == node);
	let is_plain = assignment
		.children_with_tokens()
		.filter_map(NodeOrToken::into_token)
		.any(|token| token.kind() == SyntaxKind::Punct && token.text() == "=");

	is_left && is_plain
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::{Document, make};

	fn sample() -> SyntaxNode {
		let body = make::block(vec![
			make::expr_stmt(make::assignment(
				make::identifier_name("count"),
				make::binary(make::identifier_name("count"), "+", make::number_literal("1")),
			)),
			make::expr_stmt(make::assignment(make::identifier_name("_total"), make::identifier_name("count"))),
		]);
		let method = make::method(
			vec![],
			&["public"],
			make::predefined_type("void"),
			"Add",
			make::parameter_list(vec![
				make::parameter(make::predefined_type("int"), "count"),
				make::parameter_with(vec![], &["ref"], Some(make::identifier_name("Order")), "order"),
				make::parameter(make::identifier_name("Point"), "origin"),
			]),
			body,
		);
		let field = make::simple_field(&["private"], make::predefined_type("int"), "_total", None);
		let class = make::class(&["public"], "Counter", vec![field, method]);
		let point = make::struct_decl(&["public"], "Point", vec![]);

		Document::new(make::compilation_unit(vec![class, point])).syntax()
	}

	fn parameter(root: &SyntaxNode, name: &str) -> SyntaxNode {
		root.descendants()
			.filter(|node| node.kind() == SyntaxKind::Parameter)
			.find(|node| node.name_text().as_deref() == Some(name))
			.expect("parameter should exist")
	}

	#[test]
	fn identifiers_resolve_to_parameters_and_fields() {
		let root = sample();
		let resolver = ScopeResolver::new(&root);
		let count = resolver.declared_symbol(&parameter(&root, "count")).expect("declared");
		let resolved = root
			.descendants()
			.filter(|node| node.kind() == SyntaxKind::IdentifierName)
			.filter_map(|node| resolver.referenced_symbol(&node))
			.collect::<Vec<_>>();

		assert!(resolved.contains(&count));
		assert!(resolved.iter().any(|symbol| symbol.kind == SymbolKind::Field && symbol.name == "_total"));
	}

	#[test]
	fn parameters_carry_ref_kind_and_classification() {
		let root = sample();
		let resolver = ScopeResolver::new(&root);
		let order = resolver.declared_symbol(&parameter(&root, "order")).expect("declared");
		let origin = resolver.declared_symbol(&parameter(&root, "origin")).expect("declared");
		let count = resolver.declared_symbol(&parameter(&root, "count")).expect("declared");

		assert_eq!(order.ref_kind, RefKind::Ref);
		assert_eq!(
			resolver.type_of(&origin).map(|ty| ty.classification),
			Some(TypeClassification::Struct)
		);
		assert_eq!(
			resolver.type_of(&count).map(|ty| ty.classification),
			Some(TypeClassification::Struct)
		);
		assert_eq!(
			resolver.type_of(&order).map(|ty| ty.classification),
			Some(TypeClassification::Reference)
		);
		assert_eq!(
			resolver.containing_method(&count).and_then(|method| method.name_text()),
			Some("Add".to_owned())
		);
	}

	#[test]
	fn data_flow_tracks_reads_and_the_implicit_receiver() {
		let root = sample();
		let resolver = ScopeResolver::new(&root);
		let body = root.descendants().find(|node| node.kind() == SyntaxKind::Block).expect("body");
		let flow = resolver.data_flow(&body).expect("method body");
		let written = flow.written_outside.iter().map(|symbol| symbol.name.as_str()).collect::<Vec<_>>();
		let read = flow.read_inside.iter().map(|symbol| symbol.name.as_str()).collect::<Vec<_>>();

		assert_eq!(written, vec!["count", "order", "origin", "this"]);
		assert_eq!(read, vec!["count"]);
	}

	#[test]
	fn library_exceptions_resolve_to_qualified_types() {
		let root = Document::new(make::identifier_name("ArgumentNullException")).syntax();
		let resolver = ScopeResolver::new(&root);
		let symbol = resolver.referenced_symbol(&root).expect("library type");

		assert_eq!(symbol.kind, SymbolKind::Type);
		assert_eq!(symbol.type_name.as_deref(), Some("System.ArgumentNullException"));
	}
}
