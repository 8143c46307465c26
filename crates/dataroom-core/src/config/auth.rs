//! Authentication and OAuth configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in hours (default 7 days).
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Google OAuth settings.
    #[serde(default)]
    pub google: GoogleOAuthConfig,
    /// Frontend base URL for the post-login redirect.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            google: GoogleOAuthConfig::default(),
            frontend_url: default_frontend_url(),
        }
    }
}

/// Google OAuth 2.0 client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleOAuthConfig {
    /// OAuth client ID.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

impl Default for GoogleOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

impl GoogleOAuthConfig {
    /// Whether the OAuth client has been configured with credentials.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    168 // 7 days
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/api/auth/callback".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}
