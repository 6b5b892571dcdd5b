use url::Url;

use super::ApiError;

pub const MAX_TITLE_LEN: usize = 225;
pub const MAX_PER_PAGE: u64 = 100;
pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PAGE: u64 = 1_000_000;

/// Parse a path id into a positive integer; `kind` names it in the error.
pub fn parse_id(raw: &str, kind: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::validation(format!("Invalid {kind} ID"))),
    }
}

pub fn validate_username(username: &str) -> Result<String, ApiError> {
    let username = username.trim();

    if username.len() < 3 || username.len() > 50 {
        return Err(ApiError::validation(
            "Username must be between 3 and 50 characters",
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::validation(
            "Username can only contain letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(username.to_string())
}

/// Returns the normalized (trimmed, lower-cased) address.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();

    if email.len() > 254 {
        return Err(ApiError::validation(
            "Email must be at most 254 characters long",
        ));
    }

    if !email_address::EmailAddress::is_valid(email) {
        return Err(ApiError::validation("Email is not a valid email address"));
    }

    Ok(email.to_lowercase())
}

pub fn validate_password(password: &str, min_len: usize) -> Result<(), ApiError> {
    if password.chars().count() < min_len {
        return Err(ApiError::validation(format!(
            "Password must be at least {min_len} characters long"
        )));
    }

    if password.len() > 128 {
        return Err(ApiError::validation(
            "Password must be at most 128 characters long",
        ));
    }

    Ok(())
}

/// Profile images are stored as absolute http(s) URLs.
pub fn validate_pfp(pfp: &str) -> Result<String, ApiError> {
    let pfp = pfp.trim();
    let invalid = || ApiError::validation("Profile image must be an http(s) URL");

    if pfp.len() > 2048 || pfp.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let url = Url::parse(pfp).map_err(|_| invalid())?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(url.scheme(), "http" | "https") || !has_host {
        return Err(invalid());
    }

    Ok(pfp.to_string())
}

pub fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ApiError::validation("Title cannot be empty"));
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::validation(format!(
            "Title must be {MAX_TITLE_LEN} characters or less"
        )));
    }

    Ok(title.to_string())
}

/// Non-empty text body; `field` names it in the error.
pub fn validate_content(content: &str, field: &str) -> Result<String, ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }
    Ok(content.to_string())
}

pub fn validate_page(page: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE).contains(&page) {
        return Err(ApiError::validation(format!(
            "Invalid page: {page}. Must be between 1 and {MAX_PAGE}"
        )));
    }
    Ok(page)
}

pub fn validate_per_page(per_page: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(ApiError::validation(format!(
            "Invalid per_page: {per_page}. Must be between 1 and {MAX_PER_PAGE}"
        )));
    }
    Ok(per_page)
}
