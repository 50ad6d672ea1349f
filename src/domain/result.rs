//! Result type alias for vitalis

use super::errors::VitalError;

/// Result type alias for vitalis operations
///
/// Convenience alias using `VitalError` as the error type; use this for
/// fallible operations throughout the codebase.
///
/// # Examples
///
/// ```
/// use vitalis::domain::result::Result;
/// use vitalis::domain::errors::VitalError;
///
/// fn parse_reading(raw: &str) -> Result<u32> {
///     raw.trim()
///         .parse()
///         .map_err(|_| VitalError::Validation(format!("not a number: {raw}")))
/// }
///
/// assert!(parse_reading("72").is_ok());
/// assert!(parse_reading("abc").is_err());
/// ```
pub type Result<T> = std::result::Result<T, VitalError>;
