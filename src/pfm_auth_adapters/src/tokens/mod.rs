pub mod jwt_token_signer;

pub use jwt_token_signer::{JwtSignerConfig, JwtTokenSigner};
