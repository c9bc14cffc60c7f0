//! Bus stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest code the NaPTAN scheme issues.
const MAX_ATCO_LEN: usize = 12;

/// Error returned when parsing an invalid ATCO code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ATCO code: {reason}")]
pub struct InvalidAtcoCode {
    reason: &'static str,
}

/// A valid ATCO (NaPTAN) stop code, e.g. `490008660N`.
///
/// Codes are 1 to 12 uppercase ASCII letters or digits. Any `AtcoCode`
/// value is valid by construction.
///
/// # Examples
///
/// ```
/// use waygo_server::domain::AtcoCode;
///
/// let code = AtcoCode::parse("490008660N").unwrap();
/// assert_eq!(code.as_str(), "490008660N");
///
/// // Lowercase is rejected by the strict parser
/// assert!(AtcoCode::parse("490008660n").is_err());
///
/// // but accepted from user input
/// assert!(AtcoCode::parse_normalized(" 490008660n ").is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AtcoCode(String);

impl AtcoCode {
    /// Parse an ATCO code exactly as given.
    pub fn parse(s: &str) -> Result<Self, InvalidAtcoCode> {
        if s.is_empty() {
            return Err(InvalidAtcoCode {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ATCO_LEN {
            return Err(InvalidAtcoCode {
                reason: "must be at most 12 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        {
            return Err(InvalidAtcoCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(AtcoCode(s.to_string()))
    }

    /// Parse user input: surrounding whitespace is trimmed and letters are
    /// uppercased before validation.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAtcoCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Deserialized codes come from clients and old saves, so they are
/// normalized like user input.
impl TryFrom<String> for AtcoCode {
    type Error = InvalidAtcoCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_normalized(&value)
    }
}

impl From<AtcoCode> for String {
    fn from(code: AtcoCode) -> Self {
        code.0
    }
}

impl fmt::Debug for AtcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtcoCode({})", self.0)
    }
}

impl fmt::Display for AtcoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical bus stop.
///
/// Identity is the `atcocode`; two stops with the same code are the same
/// stop regardless of the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub atcocode: AtcoCode,
    pub name: String,
    /// Distance from the search point in metres.
    #[serde(default)]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
}

impl Stop {
    /// Create a stop with no indicator or locality.
    pub fn new(atcocode: AtcoCode, name: impl Into<String>, distance: f64) -> Self {
        Self {
            atcocode,
            name: name.into(),
            distance,
            indicator: None,
            locality: None,
        }
    }

    /// Whether `other` refers to the same physical stop.
    pub fn same_stop(&self, other: &Stop) -> bool {
        self.atcocode == other.atcocode
    }

    /// Human-readable distance: `"340 m"` below a kilometre, `"1.2 km"` above.
    pub fn distance_label(&self) -> String {
        let metres = self.distance.round();
        if metres < 1000.0 {
            format!("{} m", metres as i64)
        } else {
            format!("{:.1} km", metres / 1000.0)
        }
    }
}

/// Filter stops whose name or code contains `query`, ignoring case.
///
/// An empty query matches every stop.
pub fn search_stops<'a>(stops: &'a [Stop], query: &str) -> Vec<&'a Stop> {
    let needle = query.to_lowercase();
    stops
        .iter()
        .filter(|stop| {
            stop.name.to_lowercase().contains(&needle)
                || stop.atcocode.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any valid code survives parse then as_str unchanged
        #[test]
        fn roundtrip(s in "[A-Z0-9]{1,12}") {
            let code = AtcoCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase input always parses once normalized
        #[test]
        fn normalized_accepts_lowercase(s in "[a-z0-9]{1,12}") {
            let code = AtcoCode::parse_normalized(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        /// Over-long codes are always rejected
        #[test]
        fn too_long_rejected(s in "[A-Z0-9]{13,20}") {
            prop_assert!(AtcoCode::parse(&s).is_err());
        }
    }
}
