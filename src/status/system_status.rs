use serde::{Deserialize, Serialize};
use std::fmt;

/// Status value attached to exactly one owning entity instance.
///
/// Set at entity creation to the family's initial status and replaced
/// wholesale on every transition; never partially mutated, never absent
/// after creation. The `PARENT-CHILD` full code is the stable external
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemStatus {
    pub parent_code: String,
    pub child_code: String,
}

impl SystemStatus {
    pub fn new(parent_code: impl Into<String>, child_code: impl Into<String>) -> Self {
        Self {
            parent_code: parent_code.into(),
            child_code: child_code.into(),
        }
    }

    /// `PARENT-CHILD` form, e.g. `BIDDING-PENDING`.
    pub fn full_code(&self) -> String {
        format!("{}-{}", self.parent_code, self.child_code)
    }

    /// Parse a `PARENT-CHILD` full code. The separator is the first `-`;
    /// codes themselves use `_` only.
    pub fn parse_full_code(s: &str) -> Result<Self, String> {
        match s.split_once('-') {
            Some((parent, child)) if !parent.is_empty() && !child.is_empty() => {
                Ok(Self::new(parent, child))
            }
            _ => Err(format!("Invalid full status code: {s}")),
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_code() {
        let status = SystemStatus::new("BIDDING", "PENDING");
        assert_eq!(status.full_code(), "BIDDING-PENDING");
        assert_eq!(status.to_string(), "BIDDING-PENDING");
    }

    #[test]
    fn test_parse_full_code() {
        let status = SystemStatus::parse_full_code("PURCHASE_REQUEST-VENDOR_SELECTION").unwrap();
        assert_eq!(status.parent_code, "PURCHASE_REQUEST");
        assert_eq!(status.child_code, "VENDOR_SELECTION");

        assert!(SystemStatus::parse_full_code("NOSEPARATOR").is_err());
        assert!(SystemStatus::parse_full_code("-CHILD").is_err());
    }

    #[test]
    fn test_equality_is_by_value() {
        let a = SystemStatus::new("BIDDING", "PENDING");
        let b = SystemStatus::new("BIDDING", "PENDING");
        assert_eq!(a, b);
        assert_ne!(a, SystemStatus::new("BIDDING", "ONGOING"));
    }
}
