//! Validation for message identifiers.
//!
//! Package and message names end up as TypeScript identifiers in generated
//! client files, so both must be plain identifiers.

use lazy_static::lazy_static;
use regex::Regex;

/// Identifier pattern accepted for packages and message names
const IDENTIFIER_REGEX: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Maximum identifier length
const MAX_IDENTIFIER_LENGTH: usize = 128;

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(IDENTIFIER_REGEX).unwrap();
}

/// Custom validation functions
pub mod validators {
    use super::*;
    use validator::ValidationError;

    /// Validate a package or message name
    pub fn validate_identifier(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new("identifier_empty"));
        }

        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(ValidationError::new("identifier_too_long"));
        }

        if !IDENTIFIER_RE.is_match(name) {
            return Err(ValidationError::new("invalid_identifier_characters"));
        }

        Ok(())
    }
}
