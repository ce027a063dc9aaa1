//! OAuth session and authenticated transport
//!
//! [`Session`] owns the HTTP client and the current [`Token`]. Every
//! dns-master call goes through [`Session::request`], which obtains a token on
//! first use, refreshes it when it has expired locally, and retries exactly
//! once after a 401.

mod oauth;
mod token;
mod updater;

use std::fmt;
use std::mem;
use std::time::Duration;

use reqwest::{Client, Method};

use crate::config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS};
use crate::error::{NicError, Result};
use crate::http_client::{HttpUtils, is_success};

pub use token::Token;
pub use updater::{TokenUpdater, UpdaterError};

/// Where the session is in its token lifecycle.
///
/// `Authenticating` and `Refreshing` are only observable if a grant future was
/// dropped half-way; the next request then starts over from the held token (if
/// any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(Token),
    /// Refresh in flight; the previous token is kept until it completes.
    Refreshing(Token),
}

impl SessionState {
    /// The token currently held, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Authenticated(token) | Self::Refreshing(token) => Some(token),
            Self::Unauthenticated | Self::Authenticating => None,
        }
    }
}

/// Authenticated HTTP session against the NIC.RU API.
///
/// All methods that may touch the token take `&mut self`, so one session is
/// never used by two requests at once.
pub struct Session {
    client: Client,
    config: ClientConfig,
    state: SessionState,
    token_updater: Option<Box<dyn TokenUpdater>>,
}

impl Session {
    /// Creates an unauthenticated session. No network call is made.
    ///
    /// # Errors
    /// [`NicError::Network`] if the HTTP client (TLS backend) cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout())
            .build()
            .map_err(|e| NicError::Network {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            config,
            state: SessionState::Unauthenticated,
            token_updater: None,
        })
    }

    /// Starts from a previously persisted token instead of a password grant.
    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.state = SessionState::Authenticated(token);
        self
    }

    /// Registers the callback that receives every newly issued token.
    #[must_use]
    pub fn with_token_updater(mut self, updater: impl TokenUpdater + 'static) -> Self {
        self.token_updater = Some(Box::new(updater));
        self
    }

    pub(crate) fn set_token_updater(&mut self, updater: Option<Box<dyn TokenUpdater>>) {
        self.token_updater = updater;
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&Token> {
        self.state.token()
    }

    /// Runs the password grant and stores the resulting token.
    ///
    /// # Errors
    /// * [`NicError::MissingCredentials`] - no username/password configured;
    ///   the session state is left untouched
    /// * [`NicError::Authentication`] - the grant was denied
    /// * [`NicError::TokenPersistence`] - the token updater failed (the new
    ///   token is kept anyway)
    pub async fn authenticate(&mut self) -> Result<Token> {
        let (username, password) = self
            .config
            .credentials()
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .ok_or(NicError::MissingCredentials)?;

        log::debug!("[nic] Requesting token for {username} (password grant)");
        self.state = SessionState::Authenticating;

        match self.password_grant(&username, &password).await {
            Ok(token) => self.store_token(token).await,
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                log::warn!("[nic] Password grant failed: {e}");
                Err(e)
            }
        }
    }

    /// Exchanges the refresh token for a new token pair.
    ///
    /// Without a refresh token this falls back to [`authenticate`](Self::authenticate).
    /// When the answer carries no new refresh token, the one just used is kept.
    ///
    /// # Errors
    /// * [`NicError::Authentication`] - the refresh was denied or failed; the
    ///   session drops its token and becomes unauthenticated
    /// * [`NicError::TokenPersistence`] - the token updater failed
    pub async fn refresh(&mut self) -> Result<Token> {
        let current = match mem::replace(&mut self.state, SessionState::Unauthenticated) {
            SessionState::Authenticated(token) | SessionState::Refreshing(token) => token,
            SessionState::Unauthenticated | SessionState::Authenticating => {
                return self.authenticate().await;
            }
        };

        let Some(refresh_token) = current.refresh_token.clone() else {
            log::debug!("[nic] No refresh token held, falling back to password grant");
            return self.authenticate().await.map_err(|e| match e {
                NicError::MissingCredentials => NicError::Authentication {
                    detail: "token refresh failed: no refresh token held and no credentials configured"
                        .to_string(),
                },
                other => other,
            });
        };

        log::debug!("[nic] Refreshing access token");
        self.state = SessionState::Refreshing(current);

        match self.refresh_grant(&refresh_token).await {
            Ok(mut token) => {
                // the provider may keep the refresh token and not re-issue it
                if token.refresh_token.is_none() {
                    token.refresh_token = Some(refresh_token);
                }
                self.store_token(token).await
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                log::warn!("[nic] Token refresh failed: {e}");
                let detail = match e {
                    NicError::Authentication { detail } => detail,
                    other => other.to_string(),
                };
                Err(NicError::Authentication {
                    detail: format!("token refresh failed: {detail}"),
                })
            }
        }
    }

    /// Sends an authenticated request to `{base}/dns-master{path}` and returns
    /// the response body.
    ///
    /// A token is obtained first if none is held, and refreshed first if it
    /// has expired. A 401 answer triggers one refresh and one resend; no other
    /// failure is retried.
    ///
    /// # Errors
    /// * [`NicError::Transport`] - non-2xx status and `enforce_success` is set
    /// * [`NicError::Network`] / [`NicError::Timeout`] - transport failure
    /// * any error of [`authenticate`](Self::authenticate) or
    ///   [`refresh`](Self::refresh)
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<String>,
        enforce_success: bool,
    ) -> Result<String> {
        self.ensure_token().await?;

        let (mut status, mut text) = self.send(&method, path, body.as_deref()).await?;

        if status == 401 {
            log::debug!("[nic] Access token rejected (401), refreshing once");
            self.refresh().await?;
            (status, text) = self.send(&method, path, body.as_deref()).await?;
        }

        if enforce_success && !is_success(status) {
            return Err(NicError::Transport { status, body: text });
        }

        Ok(text)
    }

    async fn ensure_token(&mut self) -> Result<()> {
        match self.state.token().map(Token::is_expired) {
            None => {
                self.authenticate().await?;
            }
            Some(true) => {
                log::debug!("[nic] Access token expired, refreshing");
                self.refresh().await?;
            }
            Some(false) => {}
        }
        Ok(())
    }

    async fn send(&self, method: &Method, path: &str, body: Option<&str>) -> Result<(u16, String)> {
        let token = self.state.token().ok_or_else(|| NicError::Authentication {
            detail: "no access token held".to_string(),
        })?;

        let url = self.config.api_url(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", format!("Bearer {}", token.access_token));

        if let Some(body) = body {
            request = request
                .header("Content-Type", "text/xml; charset=utf-8")
                .body(body.to_string());
        }

        HttpUtils::execute_request(request, method.as_str(), &url).await
    }

    /// Keeps `token` in memory, then hands it to the updater.
    async fn store_token(&mut self, token: Token) -> Result<Token> {
        log::debug!("[nic] New token issued: {token:?}");
        self.state = SessionState::Authenticated(token.clone());

        if let Some(updater) = &self.token_updater {
            updater.update(&token).await.map_err(|e| {
                log::error!("[nic] Token updater failed: {e}");
                NicError::TokenPersistence {
                    detail: e.to_string(),
                }
            })?;
        }

        Ok(token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("token_updater", &self.token_updater.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(ClientConfig::new("id", "secret")).unwrap()
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session = session();
        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(session.token().is_none());
    }

    #[test]
    fn with_token_starts_authenticated() {
        let session = session().with_token(Token::new("T0"));
        assert!(matches!(session.state(), SessionState::Authenticated(t) if t.access_token == "T0"));
    }

    #[tokio::test]
    async fn authenticate_without_credentials_keeps_state() {
        let mut session = session().with_token(Token::new("T0"));
        let err = session.authenticate().await.unwrap_err();
        assert!(matches!(err, NicError::MissingCredentials));
        assert_eq!(session.token().map(|t| t.access_token.as_str()), Some("T0"));
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_or_credentials_fails() {
        let mut session = session().with_token(Token::new("T0"));
        let err = session.refresh().await.unwrap_err();
        assert!(
            matches!(&err, NicError::Authentication { detail } if detail.starts_with("token refresh failed")),
            "unexpected error: {err:?}"
        );
        assert_eq!(session.state(), &SessionState::Unauthenticated);
    }

    #[test]
    fn debug_hides_updater_and_secrets() {
        let session = session()
            .with_token(Token::new("verysecrettoken"))
            .with_token_updater(|_: &Token| -> std::result::Result<(), std::io::Error> { Ok(()) });
        let debug = format!("{session:?}");
        assert!(!debug.contains("verysecrettoken"));
        assert!(debug.contains("token_updater: true"));
    }
}
