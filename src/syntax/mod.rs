//! Persistent C#-shaped syntax tree.
//!
//! Trees are `rowan` green trees: every node carries its kind, its ordered children
//! (trivia included) and a verbatim text projection. Editing never mutates a tree; it
//! derives a new root that shares every untouched subtree with the old one.

pub mod make;

pub use rowan::{NodeOrToken, TextRange, TextSize};

use rowan::{GreenNode, GreenToken};

macro_rules! syntax_kinds {
	($($kind:ident),* $(,)?) => {
		/// Closed set of token and node kinds.
		#[allow(missing_docs)]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		#[repr(u16)]
		pub enum SyntaxKind {
			$($kind),*
		}
		impl SyntaxKind {
			/// Every kind, ordered by discriminant.
			pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind),*];
		}
	};
}

syntax_kinds! {
	// tokens
	Whitespace,
	Comment,
	Ident,
	Keyword,
	Punct,
	StringLit,
	NumberLit,
	CharLit,
	Error,
	// declarations
	CompilationUnit,
	NamespaceDecl,
	ClassDecl,
	StructDecl,
	EnumDecl,
	EnumMember,
	FieldDecl,
	PropertyDecl,
	AccessorList,
	GetAccessor,
	SetAccessor,
	MethodDecl,
	ConstructorDecl,
	ModifierList,
	AttributeList,
	Attribute,
	AttributeArgList,
	AttributeArg,
	ParameterList,
	Parameter,
	VariableDecl,
	VariableDeclarator,
	EqualsValue,
	ArrowClause,
	// types
	PredefinedType,
	IdentifierName,
	GenericName,
	QualifiedName,
	TypeArgList,
	// statements
	Block,
	LocalDeclStmt,
	ExprStmt,
	ReturnStmt,
	ThrowStmt,
	IfStmt,
	ElseClause,
	ForEachStmt,
	ForStmt,
	WhileStmt,
	SwitchStmt,
	SwitchSection,
	CaseLabel,
	DefaultLabel,
	BreakStmt,
	UsingStmt,
	TryStmt,
	CatchClause,
	FinallyClause,
	// expressions
	Literal,
	MemberAccess,
	Invocation,
	ArgumentList,
	Argument,
	ObjectCreation,
	ObjectInitializer,
	CollectionInitializer,
	ArrayInitializer,
	Assignment,
	SimpleLambda,
	ParenLambda,
	BinaryExpr,
	CastExpr,
	TypeOfExpr,
	ThrowExpr,
	ParenExpr,
	DeclarationExpr,
}
impl SyntaxKind {
	/// Maps a raw rowan kind back onto the closed enum; out-of-range values become
	/// [`SyntaxKind::Error`].
	pub fn from_raw(raw: u16) -> Self {
		Self::ALL.get(usize::from(raw)).copied().unwrap_or(Self::Error)
	}

	/// Whether this kind is a token kind rather than a node kind.
	pub fn is_token(self) -> bool {
		self <= Self::Error
	}

	/// Whether nodes of this kind can stand in a type position.
	pub fn is_type(self) -> bool {
		matches!(self, Self::PredefinedType | Self::IdentifierName | Self::GenericName | Self::QualifiedName)
	}

	/// Whether nodes of this kind are lambda expressions.
	pub fn is_lambda(self) -> bool {
		matches!(self, Self::SimpleLambda | Self::ParenLambda)
	}

	/// Whether nodes of this kind declare a method-like body owner.
	pub fn is_method_like(self) -> bool {
		matches!(self, Self::MethodDecl | Self::ConstructorDecl)
	}
}
impl From<SyntaxKind> for rowan::SyntaxKind {
	fn from(kind: SyntaxKind) -> Self {
		Self(kind as u16)
	}
}

/// rowan language tag for the C#-shaped grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharp {}
impl rowan::Language for CSharp {
	type Kind = SyntaxKind;

	fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
		SyntaxKind::from_raw(raw.0)
	}

	fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
		kind.into()
	}
}

/// Navigable node (red tree view with parent links).
pub type SyntaxNode = rowan::SyntaxNode<CSharp>;
/// Navigable token.
pub type SyntaxToken = rowan::SyntaxToken<CSharp>;
/// Node or token.
pub type SyntaxElement = rowan::SyntaxElement<CSharp>;
/// Owned, immutable subtree used to build and splice trees.
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Owned snapshot of one syntax tree.
///
/// Unlike [`SyntaxNode`], a document is `Send + Sync` and can cross thread boundaries;
/// call [`Document::syntax`] on the thread that inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
	green: GreenNode,
}
impl Document {
	/// Wraps a green root.
	pub fn new(green: GreenNode) -> Self {
		Self { green }
	}

	/// Snapshot of the tree `node` belongs to.
	pub fn of(node: &SyntaxNode) -> Self {
		let root = node.ancestors().last().unwrap_or_else(|| node.clone());

		Self { green: root.green().into_owned() }
	}

	/// Root node of the snapshot.
	pub fn syntax(&self) -> SyntaxNode {
		SyntaxNode::new_root(self.green.clone())
	}

	/// Green root of the snapshot.
	pub fn green(&self) -> &GreenNode {
		&self.green
	}

	/// Verbatim source text of the snapshot.
	pub fn text(&self) -> String {
		self.syntax().text().to_string()
	}
}

/// Read-only navigation used by detectors and fixers.
pub trait NodeExt {
	/// Strict ancestors of `kind`, nearest first.
	fn ancestors_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode>;

	/// Strict descendants of `kind`, in preorder.
	fn descendants_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode>;

	/// Direct child nodes of `kind`.
	fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode>;

	/// First direct child node of `kind`.
	fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode>;

	/// Kind of the parent node.
	fn parent_kind(&self) -> Option<SyntaxKind>;

	/// Kind of the grandparent node.
	fn grandparent_kind(&self) -> Option<SyntaxKind>;

	/// Text of the first direct identifier token.
	fn name_text(&self) -> Option<String>;

	/// Keyword texts of the direct modifier list.
	fn modifiers(&self) -> Vec<String>;

	/// Whether the direct modifier list contains `modifier`.
	fn has_modifier(&self, modifier: &str) -> bool;

	/// Verbatim text as an owned string.
	fn text_string(&self) -> String;

	/// First direct child node that is neither an attribute list nor a modifier list.
	fn declared_type(&self) -> Option<SyntaxNode>;

	/// The `nth` direct child node.
	fn nth_child(&self, nth: usize) -> Option<SyntaxNode>;
}
impl NodeExt for SyntaxNode {
	fn ancestors_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
		self.ancestors().skip(1).filter(move |node| node.kind() == kind)
	}

	fn descendants_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
		self.descendants().skip(1).filter(move |node| node.kind() == kind)
	}

	fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
		self.children().filter(move |node| node.kind() == kind)
	}

	fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
		self.children().find(|node| node.kind() == kind)
	}

	fn parent_kind(&self) -> Option<SyntaxKind> {
		self.parent().map(|parent| parent.kind())
	}

	fn grandparent_kind(&self) -> Option<SyntaxKind> {
		self.parent().and_then(|parent| parent.parent()).map(|node| node.kind())
	}

	fn name_text(&self) -> Option<String> {
		self.children_with_tokens()
			.filter_map(NodeOrToken::into_token)
			.find(|token| token.kind() == SyntaxKind::Ident)
			.map(|token| token.text().to_owned())
	}

	fn modifiers(&self) -> Vec<String> {
		let Some(list) = self.child_of_kind(SyntaxKind::ModifierList) else {
			return Vec::new();
		};

		list.children_with_tokens()
			.filter_map(NodeOrToken::into_token)
			.filter(|token| token.kind() == SyntaxKind::Keyword)
			.map(|token| token.text().to_owned())
			.collect()
	}

	fn has_modifier(&self, modifier: &str) -> bool {
		self.modifiers().iter().any(|text| text == modifier)
	}

	fn text_string(&self) -> String {
		self.text().to_string()
	}

	fn declared_type(&self) -> Option<SyntaxNode> {
		self.children().find(|node| {
			!matches!(node.kind(), SyntaxKind::AttributeList | SyntaxKind::ModifierList)
		})
	}

	fn nth_child(&self, nth: usize) -> Option<SyntaxNode> {
		self.children().nth(nth)
	}
}

/// Whether any direct modifier of `node` is `public` or `protected`.
pub fn is_externally_visible(node: &SyntaxNode) -> bool {
	node.has_modifier("public") || node.has_modifier("protected")
}

/// Whether `element` is a whitespace or comment token.
pub fn is_trivia(element: &SyntaxElement) -> bool {
	matches!(element.kind(), SyntaxKind::Whitespace | SyntaxKind::Comment)
}

/// Owned copy of a green token for reuse in another tree.
pub fn green_token(token: &SyntaxToken) -> GreenElement {
	NodeOrToken::Token(token.green().to_owned())
}

/// Owned copy of a node's green subtree for reuse in another tree.
pub fn green_node(node: &SyntaxNode) -> GreenNode {
	node.green().into_owned()
}
