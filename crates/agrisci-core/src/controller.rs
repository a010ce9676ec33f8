// ── Dashboard controller ──
//
// Owns everything the dashboard screen needs: the session, the three
// collections, one editor per entity kind, the notification slot, the
// page-level load status, the selected tab, and any navigation the
// router still has to perform. Mutations never patch collections
// locally; every successful write is followed by a full `load()`.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use agrisci_api::{ApiClient, BearerAuth, Error as ApiError, Resource};

use crate::config::ControllerConfig;
use crate::editor::{
    Dialog, EditMode, EditorDialog, EntitySchema, OrderLine, OrderSchema, ProductSchema,
    ShippingSchema,
};
use crate::error::CoreError;
use crate::messages;
use crate::model::{CartOrder, EntityKind, Product, ShippingRecord};
use crate::notification::{NotificationCenter, Severity};
use crate::route::Navigation;
use crate::rows::{self, OrderRow, ProductRow, Rows, ShippingRow, Summary, Tab};
use crate::session::{AuthSession, CredentialStore};
use crate::store::DataStore;

// ── Confirmation ─────────────────────────────────────────────────────

/// Synchronous yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Deleted,
}

// ── Load status ──────────────────────────────────────────────────────

/// Page-level loading flag and error banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
}

// ── Controller ───────────────────────────────────────────────────────

pub struct DashboardController {
    config: ControllerConfig,
    api: Arc<ApiClient>,
    session: AuthSession,
    store: Arc<DataStore>,
    products: EditorDialog<ProductSchema>,
    orders: EditorDialog<OrderSchema>,
    shipping: EditorDialog<ShippingSchema>,
    notifications: NotificationCenter,
    status: LoadStatus,
    tab: Tab,
    pending_navigation: Option<Navigation>,
}

impl DashboardController {
    /// Bootstrap the session from `credentials` and build the gateway.
    ///
    /// The gateway's bearer interceptor reads the same credential store,
    /// so logins and logouts apply to the next request without rebuilding
    /// anything.
    pub fn new(
        config: ControllerConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, CoreError> {
        let session = AuthSession::bootstrap(credentials);
        let api = ApiClient::new(&config.base_url, &config.transport())?
            .with_interceptor(Arc::new(BearerAuth::new(session.token_source())));

        Ok(Self {
            notifications: NotificationCenter::new(config.notification_duration),
            config,
            api: Arc::new(api),
            session,
            store: Arc::new(DataStore::new()),
            products: EditorDialog::new(),
            orders: EditorDialog::new(),
            shipping: EditorDialog::new(),
            status: LoadStatus::default(),
            tab: Tab::default(),
            pending_navigation: None,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    // ── Session ──────────────────────────────────────────────────────

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log in and return where to go next.
    pub async fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Navigation, CoreError> {
        self.session.login(&self.api, username, password).await?;
        Ok(Navigation::Dashboard)
    }

    pub fn logout(&mut self) -> Navigation {
        self.session.logout()
    }

    /// Navigation queued by the controller itself (e.g. after a 401).
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.pending_navigation.take()
    }

    fn expire_session(&mut self) {
        warn!("API rejected the session token; logging out");
        let nav = self.session.logout();
        self.pending_navigation = Some(nav);
        self.notifications
            .show(messages::SESSION_EXPIRED, Severity::Warning);
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch all three collections concurrently and replace them.
    ///
    /// Any single failure fails the whole load: the banner is set and no
    /// collection is touched.
    pub async fn load(&mut self) -> Result<(), CoreError> {
        if !self.session.is_authenticated() {
            self.pending_navigation = Some(Navigation::Login);
            return Err(CoreError::NotAuthenticated);
        }

        self.status.loading = true;
        self.status.error = None;

        let api = &self.api;
        let (products_res, carts_res, shipping_res) =
            tokio::join!(api.list_products(), api.list_carts(), api.list_shippings());

        self.status.loading = false;

        let fetched = match (products_res, carts_res, shipping_res) {
            (Ok(p), Ok(c), Ok(s)) => Ok((p, c, s)),
            // A 401 wins over other failures so the session still ends.
            (Err(e @ ApiError::Unauthorized), _, _)
            | (_, Err(e @ ApiError::Unauthorized), _)
            | (_, _, Err(e @ ApiError::Unauthorized)) => Err(e),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e),
        };

        match fetched {
            Ok((products, carts, shipping)) => {
                let products: Vec<Product> = products.into_iter().map(Product::from).collect();
                let orders: Vec<CartOrder> = carts.into_iter().map(CartOrder::from).collect();
                let shipping: Vec<ShippingRecord> =
                    shipping.into_iter().map(ShippingRecord::from).collect();

                info!(
                    products = products.len(),
                    orders = orders.len(),
                    shipping = shipping.len(),
                    "dashboard data loaded"
                );
                self.store.apply_full_refresh(products, orders, shipping);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "dashboard load failed");
                self.status.error = Some(messages::LOAD_FAILED.into());
                let err = CoreError::from(e);
                if matches!(err, CoreError::Unauthorized) {
                    self.expire_session();
                    return Err(err);
                }
                Err(CoreError::Load {
                    message: err.to_string(),
                })
            }
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    // ── Editors ──────────────────────────────────────────────────────

    /// Open the editor for `kind`, seeded from the row `target` or empty
    /// for a new record.
    ///
    /// For orders `target` is an order row id (`"{orderId}-{itemId}"`).
    pub fn open_editor(&mut self, kind: EntityKind, target: Option<&str>) -> Result<(), CoreError> {
        let not_found = |id: &str| CoreError::NotFound {
            kind: kind.to_string(),
            id: id.to_owned(),
        };

        match (kind, target) {
            (EntityKind::Product, None) => self.products.open(None),
            (EntityKind::Product, Some(id)) => {
                let product = self.store.product_by_id(id).ok_or_else(|| not_found(id))?;
                self.products.open(Some(&*product))
            }
            (EntityKind::Order, None) => self.orders.open(None),
            (EntityKind::Order, Some(id)) => {
                let line = self.order_line(id).ok_or_else(|| not_found(id))?;
                self.orders.open(Some(&line))
            }
            (EntityKind::Shipping, None) => self.shipping.open(None),
            (EntityKind::Shipping, Some(id)) => {
                let record = self.store.shipping_by_id(id).ok_or_else(|| not_found(id))?;
                self.shipping.open(Some(&*record))
            }
        }
    }

    fn order_line(&self, row_id: &str) -> Option<OrderLine> {
        self.store.orders_snapshot().iter().find_map(|order| {
            order
                .items
                .iter()
                .find(|item| rows::order_row_id(&order.order_id, &item.id) == row_id)
                .map(|item| OrderLine::new(order, item))
        })
    }

    pub fn dialog(&self, kind: EntityKind) -> &dyn Dialog {
        match kind {
            EntityKind::Product => &self.products,
            EntityKind::Order => &self.orders,
            EntityKind::Shipping => &self.shipping,
        }
    }

    pub fn dialog_mut(&mut self, kind: EntityKind) -> &mut dyn Dialog {
        match kind {
            EntityKind::Product => &mut self.products,
            EntityKind::Order => &mut self.orders,
            EntityKind::Shipping => &mut self.shipping,
        }
    }

    pub fn set_field(
        &mut self,
        kind: EntityKind,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        self.dialog_mut(kind).set_field(name, value.into())
    }

    pub fn cancel_editor(&mut self, kind: EntityKind) -> Result<(), CoreError> {
        self.dialog_mut(kind).cancel()
    }

    /// Validate and save the open editor for `kind`.
    ///
    /// Validation failures never reach the network. On success the data is
    /// reloaded once, one success notification is shown, and the editor
    /// closes. On failure one error notification is shown and the editor
    /// stays open with its input.
    pub async fn submit(&mut self, kind: EntityKind) -> Result<(), CoreError> {
        match kind {
            EntityKind::Product => self.submit_with::<ProductSchema>(|c| &mut c.products).await,
            EntityKind::Order => self.submit_with::<OrderSchema>(|c| &mut c.orders).await,
            EntityKind::Shipping => self.submit_with::<ShippingSchema>(|c| &mut c.shipping).await,
        }
    }

    async fn submit_with<S: EntitySchema>(
        &mut self,
        editor: fn(&mut Self) -> &mut EditorDialog<S>,
    ) -> Result<(), CoreError> {
        let submission = editor(self).begin_submit().inspect_err(|e| {
            debug!(kind = %S::KIND, error = %e, "submit rejected locally");
        })?;

        let updated = submission.mode.is_update();
        let result = match &submission.mode {
            EditMode::Create => self.api.create(S::RESOURCE, &submission.payload).await,
            EditMode::Update { id } => {
                self.api
                    .update(S::RESOURCE, id, &submission.payload)
                    .await
            }
        };

        match result {
            Ok(()) => {
                info!(kind = %S::KIND, updated, "saved");
                self.reload_after_mutation().await;
                if self.pending_navigation.is_none() {
                    self.notifications
                        .show(messages::saved(S::KIND, updated), Severity::Success);
                }
                editor(self).complete_success();
                Ok(())
            }
            Err(e) => {
                warn!(kind = %S::KIND, error = %e, "save failed");
                editor(self).complete_failure();
                let err = CoreError::from(e);
                if matches!(err, CoreError::Unauthorized) {
                    self.expire_session();
                } else {
                    self.notifications
                        .show(messages::save_failed(S::KIND), Severity::Error);
                }
                Err(err)
            }
        }
    }

    async fn reload_after_mutation(&mut self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after change failed");
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Ask `confirm`, then delete `row_id` and reload.
    ///
    /// For orders the row id is mapped to its owning cart; an id that
    /// matches no row is taken to be a cart id already.
    pub async fn delete(
        &mut self,
        kind: EntityKind,
        row_id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, CoreError> {
        let id = match kind {
            EntityKind::Order => self
                .order_line(row_id)
                .map_or_else(|| row_id.to_owned(), |line| line.cart_id),
            EntityKind::Product | EntityKind::Shipping => row_id.to_owned(),
        };

        if !confirm.confirm(&messages::delete_prompt(kind)) {
            debug!(%kind, id = %id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete(resource_for(kind), &id).await {
            Ok(()) => {
                info!(%kind, id = %id, "deleted");
                self.reload_after_mutation().await;
                if self.pending_navigation.is_none() {
                    self.notifications
                        .show(messages::deleted(kind), Severity::Success);
                }
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(%kind, id = %id, error = %e, "delete failed");
                let err = CoreError::from(e);
                if matches!(err, CoreError::Unauthorized) {
                    self.expire_session();
                } else {
                    self.notifications
                        .show(messages::delete_failed(kind), Severity::Error);
                }
                Err(err)
            }
        }
    }

    // ── Notifications ────────────────────────────────────────────────

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    // ── Tabs and rows ────────────────────────────────────────────────

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch the visible row set. Never triggers a fetch.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Rows for the selected tab, shaped from the last load.
    pub fn visible_rows(&self) -> Rows {
        match self.tab {
            Tab::Products => Rows::Products(self.product_rows()),
            Tab::Orders => Rows::Orders(self.order_rows()),
            Tab::Shipping => Rows::Shipping(self.shipping_rows()),
        }
    }

    pub fn product_rows(&self) -> Vec<ProductRow> {
        rows::product_rows(&self.store.products_snapshot())
    }

    pub fn order_rows(&self) -> Vec<OrderRow> {
        rows::order_rows(&self.store.orders_snapshot())
    }

    pub fn shipping_rows(&self) -> Vec<ShippingRow> {
        rows::shipping_rows(&self.store.shipping_snapshot())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            products: self.store.product_count(),
            orders: self.store.order_count(),
            shipping: self.store.shipping_count(),
        }
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .field("status", &self.status)
            .field("tab", &self.tab)
            .finish_non_exhaustive()
    }
}

fn resource_for(kind: EntityKind) -> Resource {
    match kind {
        EntityKind::Product => ProductSchema::RESOURCE,
        EntityKind::Order => OrderSchema::RESOURCE,
        EntityKind::Shipping => ShippingSchema::RESOURCE,
    }
}
