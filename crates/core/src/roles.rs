//! Role names carried in access tokens.

/// The site administrator. The only role that may write content.
pub const ROLE_ADMIN: &str = "admin";
