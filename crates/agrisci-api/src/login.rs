// Credential exchange.
//
// Login is the one call that skips the interceptor chain: there is no
// token yet, and a stale one must not leak into the exchange.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::client::{ApiClient, handle_response};
use crate::types::{LoginRequest, LoginResponse};
use crate::Error;

impl ApiClient {
    /// `POST /admin/login` with `{username, password}`, returning the token.
    ///
    /// Any non-success status, an empty token, or an unreadable body is
    /// reported as [`Error::Authentication`].
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.url(["admin", "login"])?;
        debug!("POST {url}");

        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };

        let resp = self.http().post(url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status})"),
            });
        }

        let login: LoginResponse = handle_response(resp).await.map_err(|e| Error::Authentication {
            message: format!("unreadable login response: {e}"),
        })?;

        if login.token.is_empty() {
            return Err(Error::Authentication {
                message: "login response carried an empty token".into(),
            });
        }

        info!(username, "login accepted");
        Ok(SecretString::from(login.token))
    }
}
