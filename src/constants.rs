/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

pub mod messages {

    pub const AUTH_REQUIRED: &str = "Authentication required";

    pub const INVALID_SESSION: &str = "Invalid or expired session";

    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

    pub const ADMIN_REQUIRED: &str = "Access denied, admin role required";

    pub const ACCOUNT_TAKEN: &str = "Username/Email already taken";
}
