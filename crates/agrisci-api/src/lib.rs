//! Async client for the Unique Agrisciences admin JSON API.
//!
//! [`ApiClient`] is the request gateway: it owns the HTTP client and base
//! URL and runs an ordered chain of [`RequestInterceptor`]s over every
//! authenticated call. [`BearerAuth`] reads the session token through a
//! [`TokenSource`] at call time.
//!
//! ```no_run
//! use std::sync::Arc;
//! use agrisci_api::{ApiClient, BearerAuth, TransportConfig};
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), agrisci_api::Error> {
//! let token = Arc::new(|| Some(SecretString::from("t0k3n")));
//! let api = ApiClient::new("http://localhost:8086", &TransportConfig::default())?
//!     .with_interceptor(Arc::new(BearerAuth::new(token)));
//!
//! let products = api.list_products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod login;
pub mod resource;
pub mod transport;
pub mod types;

pub use auth::{BearerAuth, RequestInterceptor, TokenSource};
pub use client::ApiClient;
pub use error::Error;
pub use resource::Resource;
pub use transport::{TlsMode, TransportConfig};
