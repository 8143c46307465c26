//! # dataroom-auth
//!
//! Authentication for the DataRoom backend.
//!
//! ## Modules
//!
//! - `jwt` — access token creation and validation
//! - `oauth` — Google OAuth 2.0 sign-in flow

pub mod jwt;
pub mod oauth;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use oauth::{GoogleOAuthClient, OAuthProfile};
