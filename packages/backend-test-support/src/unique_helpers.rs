//! Unique test data built on ULIDs, so tests sharing an app never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("dev");
/// assert_ne!(a, unique_str("dev"));
/// assert!(a.starts_with("dev-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique, lowercase email address under `example.test`.
///
/// Lowercase so it survives the backend's email normalization unchanged.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("dev");
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
