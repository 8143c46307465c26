//! Google OAuth 2.0 client.
//!
//! Implements the authorization-code flow: build the consent URL,
//! exchange the returned code for an access token, then fetch the user
//! profile from the userinfo endpoint.

use serde::Deserialize;
use tracing::debug;

use dataroom_core::config::GoogleOAuthConfig;
use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Identity profile returned by the provider after a successful exchange.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    /// Provider-assigned account identifier.
    pub provider_id: String,
    /// Verified email address.
    pub email: String,
    /// Display name, if the provider shares one.
    pub name: Option<String>,
    /// Avatar image URL, if the provider shares one.
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    id: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

/// Client for the Google OAuth 2.0 authorization-code flow.
#[derive(Debug, Clone)]
pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuthClient {
    /// Create a new client from OAuth configuration.
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Whether the client has credentials configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Build the consent-screen URL the browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = reqwest::Url::parse(AUTHORIZE_URL).expect("static URL is valid");
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("access_type", "offline")
            .append_pair("state", state);
        url.to_string()
    }

    /// Exchange an authorization code for the user's identity profile.
    pub async fn exchange_code(&self, code: &str) -> AppResult<OAuthProfile> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("OAuth token exchange failed: {e}"))
            })?
            .error_for_status()
            .map_err(|e| {
                AppError::external_service(format!("OAuth token exchange rejected: {e}"))
            })?
            .json()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Invalid OAuth token response: {e}"))
            })?;

        let info: UserInfoResponse = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Userinfo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("Userinfo request rejected: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Invalid userinfo response: {e}")))?;

        debug!(provider_id = %info.id, "OAuth exchange complete");

        Ok(OAuthProfile {
            provider_id: info.id,
            email: info.email,
            name: info.name,
            avatar_url: info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_client_and_state() {
        let client = GoogleOAuthClient::new(GoogleOAuthConfig {
            client_id: "client-123".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:8080/api/auth/callback".into(),
        });

        let url = client.authorize_url("opaque-state");
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=opaque-state"));
        assert!(url.contains("response_type=code"));
    }
}
