//! Application-wide constants

/// Persisted session keys. Absence of any one of them is "no session".
pub const STORE_KEY_USER: &str = "user";
pub const STORE_KEY_ACCESS_TOKEN: &str = "accessToken";
pub const STORE_KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const STORE_KEY_TOKEN_EXPIRATION: &str = "tokenExpiration";

pub const MIN_USERNAME_LENGTH: usize = 6;
pub const MAX_USERNAME_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 20;
pub const MAX_GROUP_NAME_LENGTH: usize = 100;
