use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RESULT_COUNT: i64 = 3;
pub const MIN_RESULT_COUNT: i64 = 1;
pub const MAX_RESULT_COUNT: i64 = 10;

/// Top-K as the user entered it.
///
/// Out-of-range whole numbers stay `Value`; bounds are the service's concern.
/// Anything that is not a whole number is kept verbatim as `Unparsed` and only
/// rejected when an ask is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCount {
    Value(i64),
    Unparsed(String),
}

impl ResultCount {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Value(value);
        }

        match trimmed.parse::<f64>() {
            Ok(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && value >= i64::MIN as f64
                    && value <= i64::MAX as f64 =>
            {
                Self::Value(value as i64)
            }
            _ => Self::Unparsed(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::Unparsed(_) => None,
        }
    }

    pub fn in_range(&self) -> bool {
        self.value()
            .is_some_and(|value| (MIN_RESULT_COUNT..=MAX_RESULT_COUNT).contains(&value))
    }
}

impl Default for ResultCount {
    fn default() -> Self {
        Self::Value(DEFAULT_RESULT_COUNT)
    }
}

impl From<i64> for ResultCount {
    fn from(value: i64) -> Self {
        Self::Value(value)
    }
}

impl fmt::Display for ResultCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_integers() {
        assert_eq!(ResultCount::parse("4"), ResultCount::Value(4));
        assert_eq!(ResultCount::parse("  7 "), ResultCount::Value(7));
        assert_eq!(ResultCount::parse("-2"), ResultCount::Value(-2));
    }

    #[test]
    fn accepts_whole_floats() {
        assert_eq!(ResultCount::parse("3.0"), ResultCount::Value(3));
    }

    #[test]
    fn keeps_raw_text_for_non_numbers() {
        assert_eq!(
            ResultCount::parse("three"),
            ResultCount::Unparsed("three".to_string())
        );
        assert_eq!(ResultCount::parse("2.5"), ResultCount::Unparsed("2.5".to_string()));
        assert_eq!(ResultCount::parse(""), ResultCount::Unparsed(String::new()));
        assert_eq!(ResultCount::parse("NaN"), ResultCount::Unparsed("NaN".to_string()));
    }

    #[test]
    fn out_of_range_values_are_kept_but_flagged() {
        let count = ResultCount::parse("42");
        assert_eq!(count.value(), Some(42));
        assert!(!count.in_range());
        assert!(ResultCount::default().in_range());
        assert!(!ResultCount::parse("0").in_range());
    }
}
