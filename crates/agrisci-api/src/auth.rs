// Request interceptors
//
// Every authenticated call runs through an ordered chain of interceptors
// before it is sent. `BearerAuth` is the one that matters: it asks its
// `TokenSource` for the current token at call time, so a login or logout
// elsewhere is visible on the very next request.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::trace;

/// Rewrites an outbound request before it is sent.
///
/// Interceptors are applied in registration order. They must be cheap and
/// synchronous; anything that needs I/O belongs in the caller.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

/// Supplies the bearer token for the next request.
///
/// Read on every call and never cached by the gateway.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<SecretString>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<SecretString> + Send + Sync,
{
    fn token(&self) -> Option<SecretString> {
        self()
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is available.
///
/// An absent or empty token leaves the request untouched; the server then
/// answers 401 and the error surfaces as [`Error::Unauthorized`](crate::Error::Unauthorized).
#[derive(Clone)]
pub struct BearerAuth {
    source: Arc<dyn TokenSource>,
}

impl BearerAuth {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.source.token() {
            Some(token) if !token.expose_secret().is_empty() => {
                trace!("attaching bearer token");
                request.bearer_auth(token.expose_secret())
            }
            _ => request,
        }
    }
}
