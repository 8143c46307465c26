//! OAuth 2.0 sign-in flow.

pub mod google;

pub use google::{GoogleOAuthClient, OAuthProfile};
