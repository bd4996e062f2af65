//! Session token check
//!
//! There is no account system behind the token yet: a session without a
//! token is let through, and a configured token is only rejected when it is
//! blank.

/// Whether a session carrying `server_token` may call the modeling tools
pub fn validate_server_access(server_token: Option<&str>) -> bool {
    match server_token {
        Some(token) if !token.is_empty() => !token.trim().is_empty(),
        _ => true,
    }
}
