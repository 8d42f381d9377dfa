pub mod email;
pub mod opaque_token;
pub mod password;
pub mod password_policy;
pub mod refresh_token;
pub mod token;
pub mod user;
pub mod user_id;
