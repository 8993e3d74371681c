//! Uniform formatting for user-facing error messages.

/// Prefix a message so errors from every layer read the same on stderr.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("dukkha: {}", msg.as_ref())
}
