// ── Entity editor dialog ──
//
// One dialog type drives create and edit for every entity kind. The
// per-kind differences (fields, seeding, payload shape, endpoint) live in
// an `EntitySchema` implementation.
//
//   Closed --open--> Editing --begin_submit--> Submitting --success--> Closed
//                      ^                          |
//                      +---------failure----------+

mod order;
mod product;
mod schema;
mod shipping;

use std::marker::PhantomData;

use indexmap::IndexMap;
use tracing::debug;

pub use order::{OrderLine, OrderSchema};
pub use product::ProductSchema;
pub use schema::{EntitySchema, FieldKind, FieldSpec, join_urls, split_urls};
pub use shipping::ShippingSchema;

use crate::error::CoreError;
use crate::messages;
use crate::model::EntityKind;

// ── Form values ──────────────────────────────────────────────────────

/// Raw text of every field, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(IndexMap<&'static str, String>);

impl FormValues {
    /// Every field at its schema default.
    pub fn defaults(fields: &'static [FieldSpec]) -> Self {
        Self(
            fields
                .iter()
                .map(|f| (f.name, f.default.to_owned()))
                .collect(),
        )
    }

    /// Text of `name`, or `""` for an unknown field.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map_or("", String::as_str)
    }

    /// Set a field. Only names declared by the schema are accepted.
    pub(crate) fn set(&mut self, name: &str, value: String) -> bool {
        match self.0.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

// ── State ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DialogState {
    Closed,
    Editing,
    Submitting,
}

/// Fixed when the dialog opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update { id: String },
}

impl EditMode {
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }
}

/// A validated payload ready to send. Produced by
/// [`EditorDialog::begin_submit`].
#[derive(Debug, Clone)]
pub struct Submission<P> {
    pub mode: EditMode,
    pub payload: P,
}

// ── Dialog ───────────────────────────────────────────────────────────

pub struct EditorDialog<S: EntitySchema> {
    state: DialogState,
    mode: EditMode,
    values: FormValues,
    error: Option<String>,
    _schema: PhantomData<S>,
}

impl<S: EntitySchema> EditorDialog<S> {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            mode: EditMode::Create,
            values: FormValues::defaults(S::FIELDS),
            error: None,
            _schema: PhantomData,
        }
    }

    /// Open for `entity` (update) or for a new record (create).
    ///
    /// Seeds every field. Refused while a save is in flight.
    pub fn open(&mut self, entity: Option<&S::Entity>) -> Result<(), CoreError> {
        if self.state == DialogState::Submitting {
            return Err(CoreError::InvalidState {
                message: format!("cannot reopen the {} editor while saving", S::KIND),
            });
        }

        match entity {
            Some(entity) => {
                self.mode = EditMode::Update {
                    id: S::entity_id(entity),
                };
                self.values = S::seed(entity);
            }
            None => {
                self.mode = EditMode::Create;
                self.values = S::defaults();
            }
        }
        self.error = None;
        self.state = DialogState::Editing;
        debug!(kind = %S::KIND, mode = ?self.mode, "editor opened");
        Ok(())
    }

    /// Whether a field is read-only in the current mode.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.mode.is_update() && S::FIELDS.iter().any(|f| f.name == name && f.identity)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        if self.state != DialogState::Editing {
            return Err(CoreError::InvalidState {
                message: format!("the {} editor is not accepting input", S::KIND),
            });
        }
        let Some(spec) = S::FIELDS.iter().find(|f| f.name == name) else {
            return Err(CoreError::validation(format!("Unknown field: {name}")));
        };
        if self.is_disabled(name) {
            return Err(CoreError::validation(format!(
                "{} cannot be changed once created.",
                spec.label
            )));
        }

        let value = value.into();
        if let FieldKind::Choice(options) = spec.kind {
            if !options.contains(&value.as_str()) {
                return Err(CoreError::validation(format!(
                    "{} must be one of: {}",
                    spec.label,
                    options.join(", ")
                )));
            }
        }

        self.values.set(name, value);
        Ok(())
    }

    /// Validate and move to `Submitting`.
    ///
    /// On a validation failure the inline error is set, the dialog stays in
    /// `Editing`, and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<Submission<S::Payload>, CoreError> {
        match self.state {
            DialogState::Editing => {}
            DialogState::Submitting => {
                return Err(CoreError::InvalidState {
                    message: format!("a {} save is already in progress", S::KIND),
                });
            }
            DialogState::Closed => {
                return Err(CoreError::InvalidState {
                    message: format!("the {} editor is not open", S::KIND),
                });
            }
        }

        self.error = None;
        let payload = self.validate().inspect_err(|e| {
            self.error = Some(e.to_string());
        })?;

        self.state = DialogState::Submitting;
        Ok(Submission {
            mode: self.mode.clone(),
            payload,
        })
    }

    fn validate(&self) -> Result<S::Payload, CoreError> {
        let missing = S::FIELDS
            .iter()
            .filter(|f| f.required)
            .any(|f| self.values.get(f.name).trim().is_empty());
        if missing {
            return Err(CoreError::validation(messages::REQUIRED_FIELDS));
        }
        S::payload(&self.values)
    }

    /// The save went through.
    pub fn complete_success(&mut self) {
        self.state = DialogState::Closed;
        self.error = None;
    }

    /// The save failed. Input is kept so the user can retry.
    pub fn complete_failure(&mut self) {
        self.state = DialogState::Editing;
        self.error = Some(messages::save_failed_inline(S::KIND));
    }

    /// Close without saving. Refused while a save is in flight.
    pub fn cancel(&mut self) -> Result<(), CoreError> {
        if self.state == DialogState::Submitting {
            return Err(CoreError::InvalidState {
                message: format!("cannot close the {} editor while saving", S::KIND),
            });
        }
        self.state = DialogState::Closed;
        self.error = None;
        Ok(())
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state == DialogState::Editing
    }
}

impl<S: EntitySchema> Default for EditorDialog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EntitySchema> std::fmt::Debug for EditorDialog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorDialog")
            .field("kind", &S::KIND)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("values", &self.values)
            .field("error", &self.error)
            .finish()
    }
}

// ── Type-erased view ─────────────────────────────────────────────────

/// Kind-agnostic access to an editor, for callers that pick the dialog by
/// [`EntityKind`] at runtime.
pub trait Dialog: Send {
    fn kind(&self) -> EntityKind;
    fn state(&self) -> DialogState;
    fn mode(&self) -> &EditMode;
    fn fields(&self) -> &'static [FieldSpec];
    fn value(&self, name: &str) -> &str;
    fn is_disabled(&self, name: &str) -> bool;
    fn error(&self) -> Option<&str>;
    fn submit_enabled(&self) -> bool;
    fn set_field(&mut self, name: &str, value: String) -> Result<(), CoreError>;
    fn cancel(&mut self) -> Result<(), CoreError>;
}

impl<S: EntitySchema> Dialog for EditorDialog<S> {
    fn kind(&self) -> EntityKind {
        S::KIND
    }

    fn state(&self) -> DialogState {
        self.state
    }

    fn mode(&self) -> &EditMode {
        &self.mode
    }

    fn fields(&self) -> &'static [FieldSpec] {
        S::FIELDS
    }

    fn value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    fn is_disabled(&self, name: &str) -> bool {
        EditorDialog::is_disabled(self, name)
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit_enabled(&self) -> bool {
        EditorDialog::submit_enabled(self)
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), CoreError> {
        EditorDialog::set_field(self, name, value)
    }

    fn cancel(&mut self) -> Result<(), CoreError> {
        EditorDialog::cancel(self)
    }
}
