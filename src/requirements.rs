// src/requirements.rs
// Requirement-expression grammar, as printed on the catalog pages:
//
//   MC102 ou *MC102+F 128
//
// " ou " separates alternatives (OR), '+' separates codes inside one
// alternative (AND), a leading '*' marks a requirement that may be
// satisfied in progress. Codes are exactly five characters; some embed a
// space ("F 128"), so only the length is checked.

use crate::data::{Requirement, RequirementExpression};

pub const OR_SEPARATOR: &str = " ou ";
pub const AND_SEPARATOR: char = '+';
pub const PARTIAL_MARKER: char = '*';
pub const CODE_LEN: usize = 5;

fn is_discipline_code(raw: &str) -> bool {
    raw.chars().count() == CODE_LEN
}

/// Parse a single requirement token. Exactly two shapes are accepted: a
/// bare code and a marker-prefixed code. Anything else is `None`; there
/// is no fallback guessing.
pub fn parse_requirement(raw: &str) -> Option<Requirement> {
    if is_discipline_code(raw) {
        return Some(Requirement::new(raw, false));
    }

    let mut chars = raw.chars();
    if chars.next() == Some(PARTIAL_MARKER) && is_discipline_code(chars.as_str()) {
        return Some(Requirement::new(chars.as_str(), true));
    }

    None
}

/// Parse a full requirement string into an OR-of-ANDs expression.
///
/// Empty or whitespace-only input means "no prerequisites" and yields an
/// expression with zero groups. A token that fails to parse invalidates
/// the entire expression: partially kept prerequisite data would read as
/// weaker requirements than the catalog states.
///
/// Group and token order follow the source text; nothing is deduplicated
/// or sorted.
pub fn parse_expression(raw: &str) -> Option<RequirementExpression> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut groups = Vec::new();
    for group in raw.split(OR_SEPARATOR) {
        let mut requirements = Vec::new();
        for token in group.split(AND_SEPARATOR) {
            requirements.push(parse_requirement(token)?);
        }
        groups.push(requirements);
    }

    Some(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(code: &str, partial: bool) -> Requirement {
        Requirement::new(code, partial)
    }

    #[test]
    fn bare_code_parses() {
        assert_eq!(parse_requirement("MC102"), Some(req("MC102", false)));
    }

    #[test]
    fn marker_strips_into_partial() {
        assert_eq!(parse_requirement("*MC102"), Some(req("MC102", true)));
    }

    #[test]
    fn spaced_code_parses() {
        // Physics codes are "F" plus a space plus three digits.
        assert_eq!(parse_requirement("F 128"), Some(req("F 128", false)));
        assert_eq!(parse_requirement("*F 128"), Some(req("F 128", true)));
    }

    #[test]
    fn wrong_shapes_fail() {
        for raw in ["", "MC10", "MC1022", "*MC10", "**MC102", " MC102", "AA064 "] {
            assert_eq!(parse_requirement(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn empty_input_means_no_prerequisites() {
        assert_eq!(parse_expression(""), Some(vec![]));
        assert_eq!(parse_expression("   "), Some(vec![]));
    }

    #[test]
    fn or_separator_splits_groups() {
        assert_eq!(
            parse_expression("AB123 ou CD456"),
            Some(vec![vec![req("AB123", false)], vec![req("CD456", false)]])
        );
    }

    #[test]
    fn and_separator_splits_within_group() {
        assert_eq!(
            parse_expression("AB123+CD456"),
            Some(vec![vec![req("AB123", false), req("CD456", false)]])
        );
    }

    #[test]
    fn single_partial_token() {
        assert_eq!(parse_expression("*AB123"), Some(vec![vec![req("AB123", true)]]));
    }

    #[test]
    fn mixed_expression_keeps_source_order() {
        assert_eq!(
            parse_expression("ZZ999+*AA111 ou F 128"),
            Some(vec![
                vec![req("ZZ999", false), req("AA111", true)],
                vec![req("F 128", false)],
            ])
        );
    }

    #[test]
    fn one_bad_token_poisons_the_expression() {
        assert_eq!(parse_expression("AB123 ou CD45"), None);
        assert_eq!(parse_expression("AB12+CD456"), None);
        assert_eq!(parse_expression("AB123 ou "), None);
        assert_eq!(parse_expression("AB123 e CD456"), None);
    }
}
