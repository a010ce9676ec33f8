//! Client-side core of the agrisci admin console.
//!
//! Sits between `agrisci-api` and a front end (the `agrisci` CLI today):
//!
//! - **[`DashboardController`]** - Owns the session, the data store, one
//!   editor per entity kind, the notification slot and the load status.
//!   [`load()`](DashboardController::load) fetches products, carts and
//!   shipping records concurrently; every successful create, update or
//!   delete is followed by another full load.
//!
//! - **[`AuthSession`]** - Login/logout over a durable [`CredentialStore`].
//!   Logout returns a [`Navigation`] value instead of navigating.
//!
//! - **[`DataStore`]** - Whole-collection storage on `tokio::sync::watch`
//!   channels, replaced only by a full load.
//!
//! - **[`EditorDialog`]** - One create/edit state machine parametrised by an
//!   [`EntitySchema`] ([`ProductSchema`], [`OrderSchema`],
//!   [`ShippingSchema`]).
//!
//! - **[`NotificationCenter`]** - Single-slot, auto-dismissing feed.

pub mod config;
pub mod controller;
pub mod convert;
pub mod editor;
pub mod error;
pub mod messages;
pub mod model;
pub mod notification;
pub mod route;
pub mod rows;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BASE_URL_ENV, ControllerConfig, DEFAULT_BASE_URL};
pub use controller::{Confirm, DashboardController, DeleteOutcome, LoadStatus};
pub use editor::{
    Dialog, DialogState, EditMode, EditorDialog, EntitySchema, FieldKind, FieldSpec, FormValues,
    OrderLine, OrderSchema, ProductSchema, ShippingSchema,
};
pub use error::CoreError;
pub use notification::{Notification, NotificationCenter, Severity};
pub use route::{Navigation, Resolution, Route, landing, resolve};
pub use rows::{OrderRow, ProductRow, Rows, ShippingRow, Summary, Tab};
pub use session::{AuthSession, CredentialStore, MemoryCredentialStore, Session};
pub use store::DataStore;

pub use model::{CartOrder, EntityKind, LineItem, Product, ShippingRecord, ShippingStatus};
