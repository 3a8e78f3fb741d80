//! Parameter rules backed by a [`SemanticContext`].

use crate::{
	analysis::{AnalysisContext, Finding, shared::nearest_ancestor},
	semantic::{RefKind, SemanticContext, Symbol, SymbolKind, TypeClassification},
	syntax::{NodeExt, SyntaxKind, SyntaxNode},
};

const ARGUMENT_NULL_EXCEPTION: &str = "System.ArgumentNullException";

/// Parameter of a non-private method or constructor that is dereferenced without a
/// matching `throw new ArgumentNullException(nameof(param))`.
pub(crate) fn missing_null_validation(node: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Option<Finding> {
	let semantic = ctx.semantic?;
	let method = node.parent()?.parent().filter(|owner| owner.kind().is_method_like())?;
	let parameter = declared_parameter(semantic, node)?;

	if is_struct(semantic, &parameter) || method.has_modifier("private") {
		return None;
	}

	let dereferenced = method.descendants_of_kind(SyntaxKind::MemberAccess).any(|access| {
		access.first_child().is_some_and(|receiver| {
			receiver.kind() == SyntaxKind::IdentifierName && receiver.text_string().trim() == parameter.name
		})
	});

	if !dereferenced || throws_argument_null(semantic, &method, &parameter) {
		return None;
	}

	Some(Finding::at(node))
}

/// Constructor parameter stored into a field that the type later dereferences.
pub(crate) fn missing_constructor_null_validation(
	node: &SyntaxNode,
	ctx: &AnalysisContext<'_>,
) -> Option<Finding> {
	let semantic = ctx.semantic?;
	let parameter = declared_parameter(semantic, node)?;
	let constructor = semantic
		.containing_method(&parameter)
		.filter(|owner| owner.kind() == SyntaxKind::ConstructorDecl)?;

	if is_struct(semantic, &parameter) || constructor.has_modifier("private") {
		return None;
	}

	let fields = constructor
		.descendants_of_kind(SyntaxKind::Assignment)
		.filter_map(|assignment| {
			let left = assignment.first_child()?;
			let right = assignment.children().nth(1)?;

			if semantic.referenced_symbol(&right)? != parameter {
				return None;
			}

			semantic.referenced_symbol(&left).filter(|symbol| symbol.kind == SymbolKind::Field)
		})
		.collect::<Vec<_>>();

	if fields.is_empty() {
		return None;
	}

	let ty = nearest_ancestor(&constructor, &[SyntaxKind::ClassDecl, SyntaxKind::StructDecl])?;
	let dereferenced = ty.descendants_of_kind(SyntaxKind::MemberAccess).any(|access| {
		access
			.first_child()
			.and_then(|receiver| semantic.referenced_symbol(&receiver))
			.is_some_and(|symbol| fields.contains(&symbol))
	});

	dereferenced.then(|| Finding::at(node))
}

/// By-value parameter assigned inside its method.
pub(crate) fn parameter_reassigned(node: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Option<Finding> {
	let semantic = ctx.semantic?;
	let parameter = declared_parameter(semantic, node).filter(|symbol| symbol.ref_kind == RefKind::None)?;
	let method = semantic.containing_method(&parameter)?;
	let reassigned = method.descendants_of_kind(SyntaxKind::Assignment).any(|assignment| {
		assignment
			.first_child()
			.and_then(|left| semantic.referenced_symbol(&left))
			.is_some_and(|symbol| symbol == parameter)
	});

	reassigned.then(|| Finding::at(node))
}

/// By-value method parameter that the body never reads.
pub(crate) fn parameter_unused(node: &SyntaxNode, ctx: &AnalysisContext<'_>) -> Option<Finding> {
	let semantic = ctx.semantic?;
	let parameter = declared_parameter(semantic, node).filter(|symbol| symbol.ref_kind == RefKind::None)?;
	let method = semantic
		.containing_method(&parameter)
		.filter(|owner| owner.kind() == SyntaxKind::MethodDecl)?;
	let body = method.child_of_kind(SyntaxKind::Block)?;
	let flow = semantic.data_flow(&body)?;
	let unused = flow.written_outside.contains(&parameter) && !flow.read_inside.contains(&parameter);

	if !unused || parameter.name == "this" {
		return None;
	}

	Some(Finding::with_message(
		node,
		format!("A possible improvement would be to remove unused parameter {}", parameter.name),
	))
}

fn declared_parameter(semantic: &dyn SemanticContext, node: &SyntaxNode) -> Option<Symbol> {
	semantic.declared_symbol(node).filter(|symbol| symbol.kind == SymbolKind::Parameter)
}

fn is_struct(semantic: &dyn SemanticContext, symbol: &Symbol) -> bool {
	semantic.type_of(symbol).is_some_and(|ty| ty.classification == TypeClassification::Struct)
}

/// Whether a `throw` statement or expression in `method` builds
/// `System.ArgumentNullException` with a `nameof(parameter)` argument.
fn throws_argument_null(semantic: &dyn SemanticContext, method: &SyntaxNode, parameter: &Symbol) -> bool {
	let expected_argument = format!("nameof({})", parameter.name);

	method
		.descendants()
		.filter(|node| matches!(node.kind(), SyntaxKind::ThrowStmt | SyntaxKind::ThrowExpr))
		.filter_map(|throw| throw.first_child())
		.filter(|creation| creation.kind() == SyntaxKind::ObjectCreation)
		.any(|creation| {
			let names_exception = creation
				.first_child()
				.filter(|ty| ty.kind() == SyntaxKind::IdentifierName)
				.and_then(|ty| semantic.referenced_symbol(&ty))
				.is_some_and(|symbol| {
					symbol.kind == SymbolKind::Type
						&& symbol.type_name.as_deref() == Some(ARGUMENT_NULL_EXCEPTION)
				});
			let names_parameter = creation.child_of_kind(SyntaxKind::ArgumentList).is_some_and(|list| {
				list.children_of_kind(SyntaxKind::Argument)
					.any(|argument| argument.text_string().trim() == expected_argument)
			});

			names_exception && names_parameter
		})
}
