//! Client-facing messages shared by every endpoint.

pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_QUERY: &str = "Invalid query parameters";
pub const NOT_FOUND: &str = "Not found";
pub const TOO_MANY_REQUESTS: &str = "Too many requests";
pub const INTERNAL_ERROR: &str = "Internal server error";
