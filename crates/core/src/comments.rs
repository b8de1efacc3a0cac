//! Public comment validation.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of comment text in characters.
pub const MAX_COMMENT_TEXT_LENGTH: usize = 5_000;

/// Maximum length of the optional author name.
pub const MAX_USER_NAME_LENGTH: usize = 100;

/// Validate comment text: required and non-blank. The text is stored as
/// submitted apart from surrounding whitespace.
pub fn validate_comment_text(text: Option<&str>) -> Result<String, CoreError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(CoreError::missing("text"));
    }
    if text.chars().count() > MAX_COMMENT_TEXT_LENGTH {
        return Err(CoreError::validation(
            "text",
            format!("must be at most {MAX_COMMENT_TEXT_LENGTH} characters"),
        ));
    }
    Ok(text.to_string())
}

/// Normalize the author name. Absent names are stored as an empty string.
pub fn normalize_user_name(user_name: Option<&str>) -> Result<String, CoreError> {
    let name = user_name.map(str::trim).unwrap_or_default();
    if name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(CoreError::validation(
            "user_name",
            format!("must be at most {MAX_USER_NAME_LENGTH} characters"),
        ));
    }
    Ok(name.to_string())
}

/// Normalize the contact email. Absent emails are stored as an empty string;
/// a non-empty value must look like an address.
pub fn normalize_contact_email(email: Option<&str>) -> Result<String, CoreError> {
    let email = email.map(str::trim).unwrap_or_default();
    if !email.is_empty() && !email.validate_email() {
        return Err(CoreError::validation(
            "contact_email",
            "must be a valid email address",
        ));
    }
    Ok(email.to_string())
}
