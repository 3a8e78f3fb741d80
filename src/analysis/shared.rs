use std::fmt;

use crate::{
	analysis::catalog::{RuleId, Severity},
	syntax::{NodeExt, SyntaxKind, SyntaxNode, TextRange},
};

/// Raw detector output: where the problem is and, optionally, a message that replaces
/// the rule's default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
	/// Reported span.
	pub range: TextRange,
	/// Specific message; `None` uses the catalog message.
	pub message: Option<String>,
}
impl Finding {
	pub(crate) fn at(node: &SyntaxNode) -> Self {
		Self { range: node.text_range(), message: None }
	}

	pub(crate) fn with_message(node: &SyntaxNode, message: impl Into<String>) -> Self {
		Self { range: node.text_range(), message: Some(message.into()) }
	}
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Rule that fired.
	pub rule: RuleId,
	/// Severity from the catalog in use.
	pub severity: Severity,
	/// Kind of the node the detector ran on.
	pub kind: SyntaxKind,
	/// Reported span.
	pub range: TextRange,
	/// Human message.
	pub message: String,
}
impl Diagnostic {
	/// Single-line rendering: `start..end: severity[rule] message`.
	pub fn format(&self) -> String {
		format!(
			"{}..{}: {}[{}] {}",
			u32::from(self.range.start()),
			u32::from(self.range.end()),
			self.severity,
			self.rule,
			self.message
		)
	}
}
impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.format())
	}
}

/// Nearest strict ancestor of any of `kinds`.
pub(crate) fn nearest_ancestor(node: &SyntaxNode, kinds: &[SyntaxKind]) -> Option<SyntaxNode> {
	node.ancestors().skip(1).find(|ancestor| kinds.contains(&ancestor.kind()))
}

/// Whether the parameter list belongs to a lambda.
pub(crate) fn is_lambda_parameter_list(list: &SyntaxNode) -> bool {
	list.parent_kind().is_some_and(SyntaxKind::is_lambda)
}

/// Text of the `nth` direct child, trimmed.
pub(crate) fn child_text(node: &SyntaxNode, nth: usize) -> Option<String> {
	node.nth_child(nth).map(|child| child.text_string().trim().to_owned())
}

/// Last segment of a dotted name.
pub(crate) fn last_segment(text: &str) -> &str {
	text.rsplit('.').next().unwrap_or(text)
}
