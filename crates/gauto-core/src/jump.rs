//! # Jump Labels — Polarity-Tagged Boundary References
//!
//! A jump is a directional boundary reference. Every label must pair with
//! its reverse-polarity counterpart somewhere below the node carrying it.
//!
//! ## Invariant
//!
//! `reversed()` flips the polarity and leaves the base untouched, so
//! `label.reversed().reversed() == label` for every label.
//!
//! The `<base><+|->` text form is parsed and printed here and nowhere else.
//! Inside the workspace a label is always the structured value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JumpLabelError;

/// Direction of a jump label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Written `+`.
    Plus,
    /// Written `-`.
    Minus,
}

impl Polarity {
    /// The opposite polarity.
    pub fn flipped(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    /// The sign character used in the text form.
    pub fn sign(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

/// A jump label: base identifier plus polarity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JumpLabel {
    base: String,
    polarity: Polarity,
}

impl JumpLabel {
    /// Create a label from its parts.
    pub fn new(base: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            base: base.into(),
            polarity,
        }
    }

    /// Shorthand for a `+` label.
    pub fn plus(base: impl Into<String>) -> Self {
        Self::new(base, Polarity::Plus)
    }

    /// Shorthand for a `-` label.
    pub fn minus(base: impl Into<String>) -> Self {
        Self::new(base, Polarity::Minus)
    }

    /// The base identifier.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The same base with the opposite polarity.
    pub fn reversed(&self) -> Self {
        Self {
            base: self.base.clone(),
            polarity: self.polarity.flipped(),
        }
    }

    /// Whether `other` is this label's reverse.
    pub fn is_reverse_of(&self, other: &JumpLabel) -> bool {
        self.base == other.base && self.polarity != other.polarity
    }
}

impl std::fmt::Display for JumpLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.polarity.sign())
    }
}

impl FromStr for JumpLabel {
    type Err = JumpLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let polarity = match s.chars().last() {
            Some('+') => Polarity::Plus,
            Some('-') => Polarity::Minus,
            _ => return Err(JumpLabelError::MissingPolarity(s.to_string())),
        };
        let base = &s[..s.len() - 1];
        if base.is_empty() {
            return Err(JumpLabelError::EmptyBase(s.to_string()));
        }
        Ok(Self::new(base, polarity))
    }
}

impl TryFrom<String> for JumpLabel {
    type Error = JumpLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JumpLabel> for String {
    fn from(label: JumpLabel) -> Self {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_flips_polarity_only() {
        let label = JumpLabel::plus("a");
        let rev = label.reversed();
        assert_eq!(rev.base(), "a");
        assert_eq!(rev.polarity(), Polarity::Minus);
        assert!(label.is_reverse_of(&rev));
        assert!(!label.is_reverse_of(&label));
        assert!(!label.is_reverse_of(&JumpLabel::minus("b")));
    }

    #[test]
    fn parse_text_form() {
        assert_eq!("a+".parse::<JumpLabel>().unwrap(), JumpLabel::plus("a"));
        assert_eq!("ab-".parse::<JumpLabel>().unwrap(), JumpLabel::minus("ab"));
        // Only the final character is the sign.
        assert_eq!("x-+".parse::<JumpLabel>().unwrap(), JumpLabel::plus("x-"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(
            "a".parse::<JumpLabel>(),
            Err(JumpLabelError::MissingPolarity("a".into()))
        );
        assert_eq!(
            "".parse::<JumpLabel>(),
            Err(JumpLabelError::MissingPolarity(String::new()))
        );
        assert_eq!(
            "+".parse::<JumpLabel>(),
            Err(JumpLabelError::EmptyBase("+".into()))
        );
    }

    #[test]
    fn serde_uses_text_form() {
        let json = serde_json::to_string(&JumpLabel::minus("k")).unwrap();
        assert_eq!(json, "\"k-\"");
        let parsed: JumpLabel = serde_json::from_str("\"k+\"").unwrap();
        assert_eq!(parsed, JumpLabel::plus("k"));
        assert!(serde_json::from_str::<JumpLabel>("\"k\"").is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_label() -> impl Strategy<Value = JumpLabel> {
        ("[a-zA-Z0-9_+-]{1,12}", any::<bool>()).prop_map(|(base, plus)| {
            JumpLabel::new(base, if plus { Polarity::Plus } else { Polarity::Minus })
        })
    }

    proptest! {
        /// Reversal is an involution.
        #[test]
        fn reverse_is_involution(label in any_label()) {
            prop_assert_eq!(label.reversed().reversed(), label);
        }

        /// Reversal never yields the same label.
        #[test]
        fn reverse_differs(label in any_label()) {
            prop_assert_ne!(label.reversed(), label.clone());
            prop_assert!(label.is_reverse_of(&label.reversed()));
        }

        /// Printing then parsing returns the same label.
        #[test]
        fn display_parses_back(label in any_label()) {
            let parsed: JumpLabel = label.to_string().parse().unwrap();
            prop_assert_eq!(parsed, label);
        }
    }
}
