use async_trait::async_trait;

use super::Token;

/// Boxed error returned by a [`TokenUpdater`].
pub type UpdaterError = Box<dyn std::error::Error + Send + Sync>;

/// Receives every newly issued token so the caller can persist it.
///
/// The session awaits the updater inline, right after storing the new token in
/// memory. An `Err` is reported to the caller of the operation that triggered
/// the token change as [`NicError::TokenPersistence`](crate::NicError::TokenPersistence).
///
/// Plain closures work too:
///
/// ```rust
/// use nic_dns_api::{Token, TokenUpdater};
///
/// fn accepts(_: impl TokenUpdater) {}
///
/// accepts(|token: &Token| -> Result<(), std::io::Error> {
///     std::fs::write("token.json", &token.access_token)
/// });
/// ```
#[async_trait]
pub trait TokenUpdater: Send + Sync {
    async fn update(&self, token: &Token) -> Result<(), UpdaterError>;
}

#[async_trait]
impl<F, E> TokenUpdater for F
where
    F: Fn(&Token) -> Result<(), E> + Send + Sync,
    E: Into<UpdaterError>,
{
    async fn update(&self, token: &Token) -> Result<(), UpdaterError> {
        (self)(token).map_err(Into::into)
    }
}
