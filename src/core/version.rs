//! Object version numbers.
//!
//! Versions are compared numerically everywhere. A version arriving as text
//! ("10", " 2 ") is parsed once at the boundary so that "10" sorts after "2".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RecordError;

/// A numeric object version.
///
/// # Example
///
/// ```rust
/// use milestone::core::Version;
///
/// let two: Version = "2".parse().unwrap();
/// let ten: Version = "10".parse().unwrap();
/// assert!(ten > two);
/// assert_eq!(Version::new(2), two);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// The first version of every object.
    pub const FIRST: Version = Version(1);

    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Version {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl FromStr for Version {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Version)
            .map_err(|_| RecordError::MalformedInput(format!("version is not a number: {s:?}")))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_surrounding_whitespace() {
        assert_eq!(" 3 ".parse::<Version>().unwrap(), Version::new(3));
    }

    #[test]
    fn leading_zeros_are_the_same_version() {
        assert_eq!("02".parse::<Version>().unwrap(), Version::new(2));
    }

    #[test]
    fn compares_numerically_not_lexically() {
        let ten: Version = "10".parse().unwrap();
        let two: Version = "2".parse().unwrap();
        assert!(ten > two);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = "v2".parse::<Version>().unwrap_err();
        assert!(matches!(err, RecordError::MalformedInput(_)));
        assert!("".parse::<Version>().is_err());
        assert!("-1".parse::<Version>().is_err());
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&Version::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Version::new(7));
    }
}
