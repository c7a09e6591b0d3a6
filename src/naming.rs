//! Naming transforms applied to a project name.
//!
//! Names are split on `-` only. These functions feed both the path
//! placeholders and the functions exposed to content templates.

const DELIMITER: char = '-';

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a `-` separated name to PascalCase.
///
/// Only the first character of each segment changes case; empty segments
/// are dropped.
///
/// ```
/// assert_eq!(glfast::naming::to_pascal_case("hello-world"), "HelloWorld");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect()
}

/// Converts a `-` separated name to camelCase.
///
/// ```
/// assert_eq!(glfast::naming::to_camel_case("hello-world"), "helloWorld");
/// ```
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_pascal_case(s))
}

/// Drops the first segment and camel-cases the remainder.
///
/// A name without `-` is returned unchanged.
pub fn skip_first_part(s: &str) -> String {
    match s.split_once(DELIMITER) {
        Some((_, rest)) => to_camel_case(rest),
        None => s.to_string(),
    }
}

/// Drops the last segment, keeping the rest joined with `-`.
pub fn skip_last_part(s: &str) -> String {
    match s.rsplit_once(DELIMITER) {
        Some((rest, _)) => rest.to_string(),
        None => s.to_string(),
    }
}

/// Drops both the first and the last segment.
///
/// With exactly two segments the second one is returned; a name without
/// `-` is returned unchanged.
pub fn skip_first_and_last_part(s: &str) -> String {
    let parts: Vec<&str> = s.split(DELIMITER).collect();
    match parts.len() {
        0 | 1 => s.to_string(),
        2 => parts[1].to_string(),
        n => parts[1..n - 1].join("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_helpers_on_empty_input() {
        assert_eq!(upper_first(""), "");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_upper_first_expands_multi_char_uppercase() {
        assert_eq!(upper_first("ßtraße"), "SStraße");
    }
}
