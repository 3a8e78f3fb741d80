use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{
	config::Config,
	error::UnknownRuleError,
	syntax::SyntaxKind::{self, *},
};

/// Stable identifiers of every built-in rule.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
	EncapsulateField,
	ReplaceMagicValues,
	UseLambdaExpression,
	UnnecessaryShimsContext,
	SimplifyFakes,
	RemoveFakes,
	SimplifyFakesObject,
	DuplicateShims,
	SimplifyShims,
	ContextualKeyword,
	ClassNameIsNoun,
	BlankBlock,
	LiskovSubstitution,
	ToArrayToListInForeach,
	SwitchWithoutDefault,
	AggregateException,
	ExceptionWithoutContext,
	EnumWithoutDefaultValue,
	TooManyParameters,
	BoolParameter,
	PreferClassOverStruct,
	InappropriateUsageOfProperty,
	NonPrivateConstants,
	SingleAssertInUnitOfWork,
	TestCaseArguments,
	MissingParameterNullValidation,
	MissingConstructorParameterNullValidation,
	ParameterReassigned,
	ParameterUnused,
}
impl RuleId {
	/// Every rule, in catalog order.
	pub const ALL: [RuleId; 29] = [
		Self::EncapsulateField,
		Self::ReplaceMagicValues,
		Self::UseLambdaExpression,
		Self::UnnecessaryShimsContext,
		Self::SimplifyFakes,
		Self::RemoveFakes,
		Self::SimplifyFakesObject,
		Self::DuplicateShims,
		Self::SimplifyShims,
		Self::ContextualKeyword,
		Self::ClassNameIsNoun,
		Self::BlankBlock,
		Self::LiskovSubstitution,
		Self::ToArrayToListInForeach,
		Self::SwitchWithoutDefault,
		Self::AggregateException,
		Self::ExceptionWithoutContext,
		Self::EnumWithoutDefaultValue,
		Self::TooManyParameters,
		Self::BoolParameter,
		Self::PreferClassOverStruct,
		Self::InappropriateUsageOfProperty,
		Self::NonPrivateConstants,
		Self::SingleAssertInUnitOfWork,
		Self::TestCaseArguments,
		Self::MissingParameterNullValidation,
		Self::MissingConstructorParameterNullValidation,
		Self::ParameterReassigned,
		Self::ParameterUnused,
	];

	/// Stable string id used for configuration and suppression.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::EncapsulateField => "encapsulate_public_protected_field",
			Self::ReplaceMagicValues => "replace_magic_values",
			Self::UseLambdaExpression => "use_lambda_expression",
			Self::UnnecessaryShimsContext => "unnecessary_shims_context",
			Self::SimplifyFakes => "simplify_fakes",
			Self::RemoveFakes => "remove_fakes",
			Self::SimplifyFakesObject => "simplify_fakes_object",
			Self::DuplicateShims => "duplicate_shims",
			Self::SimplifyShims => "simplify_shims",
			Self::ContextualKeyword => "avoid_contextual_keywords",
			Self::ClassNameIsNoun => "class_name_is_noun",
			Self::BlankBlock => "blank_block_code",
			Self::LiskovSubstitution => "liskov_substitution_principle",
			Self::ToArrayToListInForeach => "toarray_tolist_inside_foreach_declaration",
			Self::SwitchWithoutDefault => "switch_without_default_case",
			Self::AggregateException => "aggregate_exception",
			Self::ExceptionWithoutContext => "exception_without_context",
			Self::EnumWithoutDefaultValue => "enum_without_default_value",
			Self::TooManyParameters => "method_with_more_than_seven_parameters",
			Self::BoolParameter => "method_with_bool_as_parameter",
			Self::PreferClassOverStruct => "prefer_class_over_struct",
			Self::InappropriateUsageOfProperty => "inappropriate_usage_of_property",
			Self::NonPrivateConstants => "non_private_constants",
			Self::SingleAssertInUnitOfWork => "shouldly_single_assert_in_uow",
			Self::TestCaseArguments => "test_case_arguments",
			Self::MissingParameterNullValidation => "missing_parameter_null_validation",
			Self::MissingConstructorParameterNullValidation =>
				"missing_constructor_parameter_null_validation",
			Self::ParameterReassigned => "parameter_not_reassigned",
			Self::ParameterUnused => "parameter_unused",
		}
	}
}
impl fmt::Display for RuleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for RuleId {
	type Err = UnknownRuleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|rule| rule.as_str() == s)
			.ok_or_else(|| UnknownRuleError(s.to_owned()))
	}
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	/// Stylistic suggestion.
	Info,
	/// Structural or design problem.
	Warning,
}
impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Info => f.write_str("info"),
			Self::Warning => f.write_str("warning"),
		}
	}
}

/// Static metadata of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
	/// Stable id.
	pub id: RuleId,
	/// Grouping shown to users.
	pub category: &'static str,
	/// Severity reported for this rule.
	pub severity: Severity,
	/// Short human title.
	pub title: &'static str,
	/// Default diagnostic message; detectors may report a more specific one.
	pub message: &'static str,
	/// Node kinds the detector runs on.
	pub triggers: &'static [SyntaxKind],
	/// Whether the fix engine has a fixer for this rule.
	pub fixable: bool,
	/// Whether the detector needs a semantic context.
	pub semantic: bool,
}

/// Built-in metadata for `id`.
pub fn builtin_descriptor(id: RuleId) -> RuleDescriptor {
	let (category, severity, title, message, triggers, fixable, semantic): (
		&'static str,
		Severity,
		&'static str,
		&'static str,
		&'static [SyntaxKind],
		bool,
		bool,
	) = match id {
		RuleId::EncapsulateField => (
			"Design",
			Severity::Warning,
			"Encapsulate public or protected field",
			"This code exposes a field as public or protected. Encapsulate this field into a property",
			&[FieldDecl],
			true,
			false,
		),
		RuleId::ReplaceMagicValues => (
			"Maintainability",
			Severity::Info,
			"Replace magic values",
			"Replace Magic Values inside methods with respect to defined constants",
			&[ClassDecl],
			true,
			false,
		),
		RuleId::UseLambdaExpression => (
			"Readability",
			Severity::Info,
			"Use lambda expressions",
			"Simplify Code Using Lambda Expressions",
			&[ClassDecl],
			true,
			false,
		),
		RuleId::UnnecessaryShimsContext => (
			"Testing",
			Severity::Warning,
			"Unnecessary shims context",
			"Remove Unnecessary Shims Context",
			&[UsingStmt],
			true,
			false,
		),
		RuleId::SimplifyFakes => (
			"Testing",
			Severity::Info,
			"Simplify fakes",
			"Simplify Fakes",
			&[MemberAccess],
			true,
			false,
		),
		RuleId::RemoveFakes => (
			"Testing",
			Severity::Info,
			"Remove fakes",
			"Remove Fakes",
			&[MemberAccess],
			true,
			false,
		),
		RuleId::SimplifyFakesObject => (
			"Testing",
			Severity::Info,
			"Simplify fakes object",
			"Simplify Fakes Object",
			&[ObjectCreation],
			false,
			false,
		),
		RuleId::DuplicateShims => (
			"Testing",
			Severity::Warning,
			"Duplicate shims",
			"Remove Duplicate Shims",
			&[MemberAccess],
			false,
			false,
		),
		RuleId::SimplifyShims => (
			"Testing",
			Severity::Warning,
			"Simplify shims",
			"Simplify Shims using existing object instances",
			&[MemberAccess],
			false,
			false,
		),
		RuleId::ContextualKeyword => (
			"Naming",
			Severity::Warning,
			"Avoid contextual keywords",
			"This code uses the contextual keyword as a variable or member name. An important improvement would be to rename this variable so that it is not named after a keyword",
			&[IdentifierName, Parameter],
			false,
			false,
		),
		RuleId::ClassNameIsNoun => (
			"Naming",
			Severity::Warning,
			"Classes are nouns",
			"Classes are nouns. Rename this class in order to eliminate \"Processor\", \"Data\" or \"Info\" word and keep a high level of expressiveness and meaningfulness.",
			&[ClassDecl],
			false,
			false,
		),
		RuleId::BlankBlock => (
			"Reliability",
			Severity::Warning,
			"Blank block",
			"This code has a blank block to do nothing. Sometimes this means the code missed to implement here",
			&[Block],
			false,
			false,
		),
		RuleId::LiskovSubstitution => (
			"Design",
			Severity::Warning,
			"Liskov substitution principle",
			"This member publicly exposes a concrete collection type",
			&[Parameter, GenericName, PredefinedType],
			false,
			false,
		),
		RuleId::ToArrayToListInForeach => (
			"Performance",
			Severity::Warning,
			"ToArray/ToList inside foreach declaration",
			"ToArray/ToList inside foreach declaration. Remove the `ToArray()` or `ToList()` call and use the `IEnumerable` instance directly",
			&[ForEachStmt],
			false,
			false,
		),
		RuleId::SwitchWithoutDefault => (
			"Reliability",
			Severity::Warning,
			"Switch without default case",
			"Missing default case for switch",
			&[SwitchStmt],
			false,
			false,
		),
		RuleId::AggregateException => (
			"Exceptions",
			Severity::Warning,
			"Overly general exception",
			"A method raises an exception type that is too general or that is reserved by the runtime. Use specific or Aggregation Exception",
			&[IdentifierName],
			false,
			false,
		),
		RuleId::ExceptionWithoutContext => (
			"Exceptions",
			Severity::Warning,
			"Exception without context",
			"This exception message does not provide context description.",
			&[ObjectCreation],
			false,
			false,
		),
		RuleId::EnumWithoutDefaultValue => (
			"Design",
			Severity::Warning,
			"Enum without a zero value",
			"This enumeration does not contain a value for 0 (zero).",
			&[EnumDecl],
			false,
			false,
		),
		RuleId::TooManyParameters => (
			"Design",
			Severity::Warning,
			"Method with more than seven parameters",
			"This method receives too many parameters (> 7)",
			&[ParameterList],
			false,
			false,
		),
		RuleId::BoolParameter => (
			"Design",
			Severity::Warning,
			"Method with bool parameter",
			"This method receives a bool argument. This is prone to be against SRP from SOLID",
			&[ParameterList],
			false,
			false,
		),
		RuleId::PreferClassOverStruct => (
			"Design",
			Severity::Warning,
			"Prefer class over struct",
			"This code defines a `struct` that should be a `class`",
			&[StructDecl],
			false,
			false,
		),
		RuleId::InappropriateUsageOfProperty => (
			"Design",
			Severity::Warning,
			"Inappropriate usage of property",
			"This code declares a property that should be a method.",
			&[PropertyDecl],
			false,
			false,
		),
		RuleId::NonPrivateConstants => (
			"Design",
			Severity::Warning,
			"Non-private constants",
			"Avoid protected / public constants for values that might change",
			&[FieldDecl],
			false,
			false,
		),
		RuleId::SingleAssertInUnitOfWork => (
			"Testing",
			Severity::Warning,
			"Single assert in unit of work",
			"Shouldly - Avoid Assert Single Item With UnitOfWork",
			&[IdentifierName],
			false,
			false,
		),
		RuleId::TestCaseArguments => (
			"Testing",
			Severity::Warning,
			"Redundant test case arguments",
			"Simplify Test Code by removing same arguments across all test cases",
			&[MethodDecl, ArrayInitializer, CollectionInitializer],
			false,
			false,
		),
		RuleId::MissingParameterNullValidation => (
			"Reliability",
			Severity::Warning,
			"Missing parameter null validation",
			"An important improvement would be to refactor the block so that it validates the parameter and throws an `ArgumentNullException` rather than letting a `NullReferenceException` occur or any unexpected behavior.",
			&[Parameter],
			false,
			true,
		),
		RuleId::MissingConstructorParameterNullValidation => (
			"Reliability",
			Severity::Warning,
			"Missing constructor parameter null validation",
			"An important improvement would be to refactor the block so that it validates the constructor parameter and throws an `ArgumentNullException` rather than letting a `NullReferenceException` occur or any unexpected behavior.",
			&[Parameter],
			false,
			true,
		),
		RuleId::ParameterReassigned => (
			"Maintainability",
			Severity::Warning,
			"Parameters are not reassigned",
			"A possible improvement would be to avoid such reassignment and use a local variable to hold the updated value.",
			&[Parameter],
			false,
			true,
		),
		RuleId::ParameterUnused => (
			"Maintainability",
			Severity::Warning,
			"Unused parameter",
			"A possible improvement would be to remove unused parameter",
			&[Parameter],
			false,
			true,
		),
	};

	RuleDescriptor { id, category, severity, title, message, triggers, fixable, semantic }
}

/// Immutable rule registry.
///
/// Built once and shared; detection and fixing only see the rules it holds, so tests
/// and configurations can run against a reduced catalog.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
	rules: Vec<RuleDescriptor>,
}
impl RuleCatalog {
	/// Every built-in rule with its default severity.
	pub fn builtin() -> Self {
		Self::with_rules(RuleId::ALL)
	}

	/// Only the given rules, in catalog order.
	pub fn with_rules(ids: impl IntoIterator<Item = RuleId>) -> Self {
		let mut ids = ids.into_iter().collect::<Vec<_>>();

		ids.sort();
		ids.dedup();

		Self { rules: ids.into_iter().map(builtin_descriptor).collect() }
	}

	/// Built-in rules reduced and re-weighted by `config`.
	pub fn configured(config: &Config) -> Result<Self, UnknownRuleError> {
		let disabled = config.disabled_rules()?;
		let overrides = config.severity_overrides()?;
		let mut catalog = Self::with_rules(RuleId::ALL.into_iter().filter(|id| !disabled.contains(id)));

		for rule in &mut catalog.rules {
			if let Some(severity) = overrides.get(&rule.id) {
				rule.severity = *severity;
			}
		}

		Ok(catalog)
	}

	/// Descriptor for a string id.
	pub fn describe(&self, id: &str) -> Result<&RuleDescriptor, UnknownRuleError> {
		let rule = id.parse::<RuleId>()?;

		self.get(rule).ok_or_else(|| UnknownRuleError(id.to_owned()))
	}

	/// Descriptor for a typed id, if the rule is part of this catalog.
	pub fn get(&self, id: RuleId) -> Option<&RuleDescriptor> {
		self.rules.iter().find(|rule| rule.id == id)
	}

	/// All descriptors in catalog order.
	pub fn all(&self) -> &[RuleDescriptor] {
		&self.rules
	}

	/// Number of registered rules.
	pub fn len(&self) -> usize {
		self.rules.len()
	}

	/// Whether the catalog is empty.
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
impl Default for RuleCatalog {
	fn default() -> Self {
		Self::builtin()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn rule_ids_are_unique_and_round_trip() {
		let ids = RuleId::ALL.iter().map(|id| id.as_str()).collect::<HashSet<_>>();

		assert_eq!(ids.len(), RuleId::ALL.len());

		for id in RuleId::ALL {
			assert_eq!(id.as_str().parse::<RuleId>(), Ok(id));
		}
	}

	#[test]
	fn describe_rejects_unknown_ids() {
		let catalog = RuleCatalog::builtin();

		assert_eq!(catalog.describe("no_such_rule"), Err(UnknownRuleError("no_such_rule".to_owned())));
		assert_eq!(
			catalog.describe("blank_block_code").map(|rule| rule.id),
			Ok(RuleId::BlankBlock)
		);
	}

	#[test]
	fn reduced_catalog_hides_other_rules() {
		let catalog = RuleCatalog::with_rules([RuleId::BlankBlock, RuleId::BlankBlock]);

		assert_eq!(catalog.len(), 1);
		assert!(catalog.describe("prefer_class_over_struct").is_err());
	}

	#[test]
	fn stylistic_rules_are_info_and_design_rules_are_warnings() {
		let catalog = RuleCatalog::builtin();
		let severity = |id: RuleId| catalog.get(id).map(|rule| rule.severity);

		assert_eq!(severity(RuleId::ReplaceMagicValues), Some(Severity::Info));
		assert_eq!(severity(RuleId::SimplifyFakes), Some(Severity::Info));
		assert_eq!(severity(RuleId::TooManyParameters), Some(Severity::Warning));
	}

	#[test]
	fn fixable_rules_match_the_fix_engine() {
		let fixable = RuleCatalog::builtin()
			.all()
			.iter()
			.filter(|rule| rule.fixable)
			.map(|rule| rule.id)
			.collect::<Vec<_>>();

		assert_eq!(
			fixable,
			vec![
				RuleId::EncapsulateField,
				RuleId::ReplaceMagicValues,
				RuleId::UseLambdaExpression,
				RuleId::UnnecessaryShimsContext,
				RuleId::SimplifyFakes,
				RuleId::RemoveFakes,
			]
		);
	}
}
