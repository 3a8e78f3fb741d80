//! Atomic tree edits.
//!
//! A session collects edits against one snapshot, keyed by node identity, and turns
//! them into a new snapshot in a single rebuild. Untouched subtrees are shared with the
//! input snapshot.

use std::collections::{HashMap, HashSet};

use rowan::GreenNode;

pub use crate::error::EditError;

use crate::syntax::{
	Document, GreenElement, NodeOrToken, SyntaxElement, SyntaxKind, SyntaxNode, green_node,
	green_token, make,
};

const DEFAULT_SEPARATOR: &str = " ";

#[derive(Debug, Clone)]
enum Edit {
	Replace(Vec<GreenNode>),
	Splice(Vec<GreenElement>),
	InsertBefore(Vec<GreenNode>),
	InsertAfter(Vec<GreenNode>),
	Remove,
}
impl Edit {
	/// Whether the edit discards the target subtree.
	fn is_destructive(&self) -> bool {
		matches!(self, Self::Replace(_) | Self::Splice(_) | Self::Remove)
	}
}

/// Pending edits against one tree snapshot.
#[derive(Debug, Clone)]
pub struct EditSession {
	root: SyntaxNode,
	edits: HashMap<SyntaxNode, Edit>,
}
impl EditSession {
	/// Starts a session on the tree `node` belongs to.
	pub fn new(node: &SyntaxNode) -> Self {
		let root = node.ancestors().last().unwrap_or_else(|| node.clone());

		Self { root, edits: HashMap::new() }
	}

	/// Root of the snapshot being edited.
	pub fn root(&self) -> &SyntaxNode {
		&self.root
	}

	/// Number of planned edits.
	pub fn len(&self) -> usize {
		self.edits.len()
	}

	/// Whether nothing has been planned.
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}

	/// Replaces `target` with `nodes`; an empty list removes it.
	pub fn replace(&mut self, target: &SyntaxNode, nodes: Vec<GreenNode>) -> Result<(), EditError> {
		let edit = if nodes.is_empty() { Edit::Remove } else { Edit::Replace(nodes) };

		self.plan(target, edit)
	}

	/// Replaces `target` with `elements` verbatim, trivia included; an empty list
	/// removes it.
	pub fn splice(&mut self, target: &SyntaxNode, elements: Vec<GreenElement>) -> Result<(), EditError> {
		let edit = if elements.is_empty() { Edit::Remove } else { Edit::Splice(elements) };

		self.plan(target, edit)
	}

	/// Inserts `nodes` as siblings in front of `anchor`.
	pub fn insert_before(&mut self, anchor: &SyntaxNode, nodes: Vec<GreenNode>) -> Result<(), EditError> {
		self.plan(anchor, Edit::InsertBefore(nodes))
	}

	/// Inserts `nodes` as siblings right after `anchor`.
	pub fn insert_after(&mut self, anchor: &SyntaxNode, nodes: Vec<GreenNode>) -> Result<(), EditError> {
		self.plan(anchor, Edit::InsertAfter(nodes))
	}

	/// Removes `target` together with the whitespace in front of it.
	pub fn remove(&mut self, target: &SyntaxNode) -> Result<(), EditError> {
		self.plan(target, Edit::Remove)
	}

	/// Builds the edited snapshot.
	pub fn apply(self) -> Document {
		let mut touched = HashSet::new();

		for node in self.edits.keys() {
			touched.extend(node.ancestors().skip(1));
		}

		tracing::debug!(edits = self.edits.len(), "Applying edit session.");

		Document::new(self.rebuild(&self.root, &touched))
	}

	fn plan(&mut self, target: &SyntaxNode, edit: Edit) -> Result<(), EditError> {
		if target.ancestors().last().as_ref() != Some(&self.root) {
			return Err(EditError::ForeignNode(target.text_range()));
		}
		if target == &self.root {
			return Err(EditError::RootEdit);
		}

		let overlaps = self.edits.iter().any(|(planned, planned_edit)| {
			planned == target
				|| (planned_edit.is_destructive() && target.ancestors().any(|node| &node == planned))
				|| (edit.is_destructive() && planned.ancestors().any(|node| &node == target))
		});

		if overlaps {
			return Err(EditError::Overlap(target.text_range()));
		}

		self.edits.insert(target.clone(), edit);

		Ok(())
	}

	fn rebuild(&self, node: &SyntaxNode, touched: &HashSet<SyntaxNode>) -> GreenNode {
		if !touched.contains(node) {
			return green_node(node);
		}

		let mut children = Vec::<GreenElement>::new();
		let mut skip_whitespace = false;

		for element in node.children_with_tokens() {
			let child = match element {
				NodeOrToken::Token(token) => {
					if skip_whitespace && token.kind() == SyntaxKind::Whitespace {
						skip_whitespace = false;

						continue;
					}

					skip_whitespace = false;

					children.push(green_token(&token));

					continue;
				},
				NodeOrToken::Node(child) => child,
			};

			skip_whitespace = false;

			let separator = separator_before(&child);

			match self.edits.get(&child) {
				None => children.push(NodeOrToken::Node(self.rebuild(&child, touched))),
				Some(Edit::Replace(nodes)) => push_separated(&mut children, nodes, &separator),
				Some(Edit::Splice(elements)) => children.extend(elements.iter().cloned()),
				Some(Edit::InsertBefore(nodes)) => {
					for inserted in nodes {
						children.push(NodeOrToken::Node(inserted.clone()));
						children.push(make::whitespace(&separator));
					}

					children.push(NodeOrToken::Node(self.rebuild(&child, touched)));
				},
				Some(Edit::InsertAfter(nodes)) => {
					children.push(NodeOrToken::Node(self.rebuild(&child, touched)));

					for inserted in nodes {
						children.push(make::whitespace(&separator));
						children.push(NodeOrToken::Node(inserted.clone()));
					}
				},
				Some(Edit::Remove) => {
					let popped = matches!(
						children.last(),
						Some(NodeOrToken::Token(token))
							if SyntaxKind::from_raw(token.kind().0) == SyntaxKind::Whitespace
					);

					if popped {
						children.pop();
					} else {
						skip_whitespace = true;
					}
				},
			}
		}

		GreenNode::new(node.kind().into(), children)
	}
}

/// Whitespace token right before `node`, or a single space.
fn separator_before(node: &SyntaxNode) -> String {
	match node.prev_sibling_or_token() {
		Some(SyntaxElement::Token(token)) if token.kind() == SyntaxKind::Whitespace =>
			token.text().to_owned(),
		_ => DEFAULT_SEPARATOR.to_owned(),
	}
}

fn push_separated(children: &mut Vec<GreenElement>, nodes: &[GreenNode], separator: &str) {
	for (idx, node) in nodes.iter().enumerate() {
		if idx > 0 {
			children.push(make::whitespace(separator));
		}

		children.push(NodeOrToken::Node(node.clone()));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::NodeExt;

	fn statement(name: &str) -> GreenNode {
		make::expr_stmt(make::invocation(make::identifier_name(name), vec![]))
	}

	fn body(names: &[&str]) -> SyntaxNode {
		Document::new(make::block(names.iter().map(|name| statement(name)).collect())).syntax()
	}

	fn statements(root: &SyntaxNode) -> Vec<SyntaxNode> {
		root.children_of_kind(SyntaxKind::ExprStmt).collect()
	}

	#[test]
	fn edits_apply_in_one_rebuild() {
		let root = body(&["A", "B", "C"]);
		let [a, b, c] = <[SyntaxNode; 3]>::try_from(statements(&root)).expect("three statements");
		let mut session = EditSession::new(&root);

		session.replace(&a, vec![statement("X"), statement("Y")]).expect("replace");
		session.remove(&b).expect("remove");
		session.insert_after(&c, vec![statement("D")]).expect("insert");

		assert_eq!(session.len(), 3);
		assert_eq!(session.apply().text(), "{ X(); Y(); C(); D(); }");
		assert_eq!(root.text_string(), "{ A(); B(); C(); }");
	}

	#[test]
	fn removing_every_child_leaves_an_empty_scope() {
		let root = body(&["A", "B"]);
		let mut session = EditSession::new(&root);

		for statement in statements(&root) {
			session.replace(&statement, Vec::new()).expect("remove");
		}

		assert_eq!(session.apply().text(), "{ }");
	}

	#[test]
	fn spliced_elements_keep_their_trivia() {
		let root = body(&["A", "B"]);
		let [a, _] = <[SyntaxNode; 2]>::try_from(statements(&root)).expect("two statements");
		let mut session = EditSession::new(&root);

		session
			.splice(&a, vec![
				NodeOrToken::Node(statement("X")),
				make::whitespace("\n  "),
				NodeOrToken::Node(statement("Y")),
			])
			.expect("splice");

		assert_eq!(session.apply().text(), "{ X();\n  Y(); B(); }");
	}

	#[test]
	fn overlapping_edits_are_rejected() {
		let root = body(&["A", "B"]);
		let [a, b] = <[SyntaxNode; 2]>::try_from(statements(&root)).expect("two statements");
		let inner = a.first_child().expect("invocation");
		let mut session = EditSession::new(&root);

		session.remove(&a).expect("remove");
		session.insert_before(&b, vec![statement("Z")]).expect("insert");

		assert_eq!(session.replace(&inner, vec![statement("X")]), Err(EditError::Overlap(inner.text_range())));
		assert_eq!(session.remove(&a), Err(EditError::Overlap(a.text_range())));
		assert_eq!(session.remove(&b), Err(EditError::Overlap(b.text_range())));
		assert_eq!(session.remove(&root), Err(EditError::RootEdit));
		assert_eq!(session.apply().text(), "{ Z(); B(); }");
	}

	#[test]
	fn nodes_from_other_trees_are_foreign() {
		let root = body(&["A"]);
		let other = body(&["B", "C"]);
		let mut session = EditSession::new(&root);
		let foreign = statements(&other).pop().expect("statement");

		assert_eq!(session.remove(&foreign), Err(EditError::ForeignNode(foreign.text_range())));
		assert!(session.is_empty());
	}
}
