//! OAuth 2.0 grants against `{base}/oauth/token`

use crate::error::{NicError, Result};
use crate::http_client::{HttpUtils, is_success};
use crate::utils::log_sanitizer::truncate_for_log;

use super::Session;
use super::token::{OAuthErrorResponse, Token, TokenResponse};

impl Session {
    /// Resource-owner password grant.
    pub(crate) async fn password_grant(&self, username: &str, password: &str) -> Result<Token> {
        let mut form = vec![
            ("grant_type", "password".to_string()),
            ("username", username.to_string()),
            ("password", password.to_string()),
        ];
        if let Some(scope) = &self.config.scope {
            form.push(("scope", scope.clone()));
        }
        self.token_request(form).await
    }

    /// Refresh-token grant.
    pub(crate) async fn refresh_grant(&self, refresh_token: &str) -> Result<Token> {
        let form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
        ];
        self.token_request(form).await
    }

    async fn token_request(&self, mut form: Vec<(&'static str, String)>) -> Result<Token> {
        form.push(("client_id", self.config.client_id.clone()));
        form.push(("client_secret", self.config.client_secret.clone()));
        if let Some(offline) = self.config.offline {
            form.push(("offline", offline.to_string()));
        }

        let url = self.config.token_url();
        let request = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .form(&form);

        let (status, body) = HttpUtils::execute_request_quiet(request, "POST", &url).await?;

        if !is_success(status) {
            let detail = match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(err) => err.to_string(),
                Err(_) => format!("HTTP {status}: {}", truncate_for_log(&body)),
            };
            return Err(NicError::Authentication { detail });
        }

        let response: TokenResponse = HttpUtils::parse_json(&body)?;
        Ok(Token::from(response))
    }
}
