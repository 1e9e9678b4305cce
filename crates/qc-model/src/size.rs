use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Garment size label such as `"6/7"` or `"13/14"`.
///
/// Sizes order naturally: labels with a leading number sort by that number
/// (so `9/10` precedes `11/12`), labels without one sort after them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeCode(String);

impl SizeCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptySize);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn leading_number(&self) -> Option<u32> {
        let digits: String = self.0.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

impl Ord for SizeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.leading_number(), other.leading_number()) {
            (Some(left), Some(right)) => left.cmp(&right).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SizeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SizeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SizeCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SizeCode> for String {
    fn from(value: SizeCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(label: &str) -> SizeCode {
        SizeCode::new(label).unwrap()
    }

    #[test]
    fn rejects_blank_labels() {
        assert_eq!(SizeCode::new("   "), Err(ModelError::EmptySize));
        assert_eq!(size(" 8/9 ").as_str(), "8/9");
    }

    #[test]
    fn sorts_naturally() {
        let mut sizes = vec![
            size("13/14"),
            size("M"),
            size("6/7"),
            size("11/12"),
            size("9/10"),
            size("7/8"),
        ];
        sizes.sort();
        let labels: Vec<&str> = sizes.iter().map(SizeCode::as_str).collect();
        assert_eq!(labels, vec!["6/7", "7/8", "9/10", "11/12", "13/14", "M"]);
    }
}
