//! Field validation shared by request types before they go over the wire.

use std::sync::LazyLock;

use regex::Regex;

use crate::CoreError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email regex is valid")
});

/// Reject blank (empty or whitespace-only) values.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming `field` when `value` is blank.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation {
            field,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

/// Check that `value` looks like a deliverable e-mail address.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming `field` when `value` is blank or
/// not of the form `local@domain.tld`.
pub fn require_email(field: &'static str, value: &str) -> Result<(), CoreError> {
    require_non_blank(field, value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(CoreError::Validation {
            field,
            reason: format!("'{value}' is not a valid e-mail address"),
        });
    }
    Ok(())
}

/// Largest data file the backend accepts.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Data file extensions the backend can parse.
pub const UPLOAD_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Check a data file's name and size before it is uploaded.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for field `file` when the extension is
/// not csv, xlsx or xls (case-insensitive) or the file exceeds
/// [`MAX_UPLOAD_BYTES`].
pub fn require_upload(file_name: &str, size_bytes: u64) -> Result<(), CoreError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CoreError::Validation {
            field: "file",
            reason: format!("'{file_name}' has an unsupported format (accepted: .csv, .xlsx, .xls)"),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation {
            field: "file",
            reason: format!(
                "'{file_name}' exceeds the maximum size of {}MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            ),
        });
    }
    Ok(())
}
