//! Field validation rules for form input.
//!
//! # Responsibility
//! - Check one field value against a set of optional constraints.
//!
//! # Invariants
//! - `validate` is pure: no logging, no side effects.
//! - Absent constraints are skipped.
//! - Length bounds only apply to text values; value bounds only to numbers.
//! - All bounds are exclusive (`>` / `<`), so a value equal to a bound fails.

use std::cmp::Ordering;

/// Raw value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Parses numeric form text the way a number input reports it.
    ///
    /// Blank input reads as `0`; anything unparseable reads as `NaN`, which
    /// fails every numeric bound.
    pub fn number_from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Number(0.0);
        }
        Self::Number(trimmed.parse::<f64>().unwrap_or(f64::NAN))
    }

    fn to_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

/// One field value plus the constraints it must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl Validatable {
    pub fn new(value: FieldValue) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(FieldValue::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(FieldValue::Number(value))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Length must be strictly greater than `bound`.
    /// Length is counted in `char`s, not UTF-16 code units.
    pub fn min_length(mut self, bound: usize) -> Self {
        self.min_length = Some(bound);
        self
    }

    /// Length must be strictly less than `bound`.
    /// Length is counted in `char`s, not UTF-16 code units.
    pub fn max_length(mut self, bound: usize) -> Self {
        self.max_length = Some(bound);
        self
    }

    /// Value must be strictly greater than `bound`.
    pub fn min_value(mut self, bound: f64) -> Self {
        self.min_value = Some(bound);
        self
    }

    /// Value must be strictly less than `bound`.
    pub fn max_value(mut self, bound: f64) -> Self {
        self.max_value = Some(bound);
        self
    }
}

/// Returns whether every declared constraint holds for the value.
///
/// Text length is counted in characters, not bytes.
pub fn validate(input: &Validatable) -> bool {
    if input.required && input.value.to_text().trim().is_empty() {
        return false;
    }

    match &input.value {
        FieldValue::Text(text) => {
            let length = text.chars().count();
            if matches!(input.min_length, Some(bound) if length <= bound) {
                return false;
            }
            if matches!(input.max_length, Some(bound) if length >= bound) {
                return false;
            }
        }
        FieldValue::Number(value) => {
            // NaN has no ordering, so it fails both bounds.
            if let Some(bound) = input.min_value {
                if value.partial_cmp(&bound) != Some(Ordering::Greater) {
                    return false;
                }
            }
            if let Some(bound) = input.max_value {
                if value.partial_cmp(&bound) != Some(Ordering::Less) {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::{validate, FieldValue, Validatable};

    #[test]
    fn unconstrained_value_is_valid() {
        assert!(validate(&Validatable::text("")));
        assert!(validate(&Validatable::number(-4.0)));
    }

    #[test]
    fn required_rejects_blank_text() {
        assert!(!validate(&Validatable::text("").required()));
        assert!(!validate(&Validatable::text("   \t").required()));
        assert!(validate(&Validatable::text(" x ").required()));
    }

    #[test]
    fn required_never_rejects_numbers() {
        assert!(validate(&Validatable::number(0.0).required()));
    }

    #[test]
    fn length_bounds_are_exclusive() {
        let at_max = "a".repeat(501);
        assert!(!validate(&Validatable::text(at_max).max_length(501)));
        assert!(validate(&Validatable::text("a".repeat(500)).max_length(501)));
        assert!(!validate(&Validatable::text("").min_length(0)));
        assert!(validate(&Validatable::text("a").min_length(0)));
    }

    #[test]
    fn length_counts_characters() {
        assert!(validate(&Validatable::text("ééé").max_length(4)));
        assert!(!validate(&Validatable::text("éééé").max_length(4)));
    }

    #[test]
    fn astral_characters_count_once() {
        let emoji = "\u{1F680}".repeat(500);
        assert!(validate(&Validatable::text(emoji).max_length(501)));
    }

    #[test]
    fn numeric_bounds_are_exclusive() {
        let rule = |value| Validatable::number(value).min_value(0.0).max_value(31.0);
        assert!(!validate(&rule(0.0)));
        assert!(validate(&rule(1.0)));
        assert!(validate(&rule(30.0)));
        assert!(!validate(&rule(31.0)));
    }

    #[test]
    fn length_bounds_ignore_numbers_and_value_bounds_ignore_text() {
        assert!(validate(&Validatable::number(5.0).max_length(1)));
        assert!(validate(&Validatable::text("abc").max_value(1.0)));
    }

    #[test]
    fn number_from_input_follows_numeric_input_semantics() {
        assert_eq!(FieldValue::number_from_input(""), FieldValue::Number(0.0));
        assert_eq!(FieldValue::number_from_input(" 3 "), FieldValue::Number(3.0));
        let FieldValue::Number(value) = FieldValue::number_from_input("three") else {
            panic!("expected a number");
        };
        assert!(value.is_nan());
        assert!(!validate(
            &Validatable::new(FieldValue::number_from_input("three")).min_value(0.0)
        ));
    }
}
