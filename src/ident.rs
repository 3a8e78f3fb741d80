//! Identifier text utilities.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z_0-9]*$").expect("Expected operation to succeed."));

const SUBSTITUTIONS: [(&str, &str); 3] = [("id", "Id"), ("URL", "Url"), ("$", "Dollar")];

/// Upper-cases the first character; blank input is returned as is.
pub fn capitalize(text: &str) -> String {
	if text.trim().is_empty() {
		return text.to_owned();
	}

	let mut chars = text.chars();

	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Lower-cases the first character.
pub fn decapitalize(text: &str) -> String {
	let mut chars = text.chars();

	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Property name for a field: underscores dropped, first letter upper-cased.
///
/// Returns `None` when nothing but underscores is left.
pub fn pascal_case_field_name(field_name: &str) -> Option<String> {
	let stripped = field_name.replace('_', "");

	if stripped.is_empty() { None } else { Some(capitalize(&stripped)) }
}

/// `snake_case` or `kebab-case` text to `camelCase`.
pub fn camel_case(text: &str) -> String {
	decapitalize(&pascal_case(text))
}

/// `snake_case` or `kebab-case` text to `PascalCase`.
pub fn pascal_case(text: &str) -> String {
	text.split(['_', '-', ' ']).filter(|part| !part.is_empty()).map(capitalize).collect()
}

/// Keeps the first letter of every uppercase run and lower-cases the rest, so `URLValue`
/// becomes `Urlvalue`.
pub fn collapse_uppercase_runs(text: &str) -> String {
	let chars = text.chars().collect::<Vec<_>>();
	let mut out = String::with_capacity(text.len());
	let mut idx = 0_usize;

	while idx < chars.len() {
		let ch = chars[idx];

		out.push(ch);

		idx += 1;

		if !ch.is_uppercase() {
			continue;
		}

		while idx < chars.len() && chars[idx].is_uppercase() {
			out.extend(chars[idx].to_lowercase());

			idx += 1;
		}
	}

	out
}

/// Turns the text of a literal into a member name candidate.
///
/// Quotes are trimmed, uppercase runs collapsed, underscores removed (a leading
/// underscore appends `Field`), then the fixed substitutions apply. The result is not
/// capitalized and may still be an invalid identifier; check it with
/// [`is_valid_identifier`].
pub fn sanitize_member_name(literal_text: &str) -> String {
	if literal_text.trim().is_empty() {
		return String::new();
	}

	let unquoted = literal_text.trim_matches('"');
	let mut name = collapse_uppercase_runs(unquoted).replace('_', "");

	if unquoted.starts_with('_') {
		name.push_str("Field");
	}

	SUBSTITUTIONS.iter().fold(name, |name, (from, to)| name.replace(from, to))
}

/// Constant name derived from a string literal, e.g. `"user_id"` to `UserId`.
pub fn constant_name_for_literal(literal_text: &str) -> String {
	capitalize(&sanitize_member_name(literal_text))
}

/// Whether `text` matches `^[a-zA-Z_][a-zA-Z_0-9]*$`.
pub fn is_valid_identifier(text: &str) -> bool {
	IDENTIFIER_RE.is_match(text)
}
