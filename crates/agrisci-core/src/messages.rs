// User-facing message text.

use crate::model::EntityKind;

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields.";
pub const LOAD_FAILED: &str = "Failed to load data. Please try again later.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

pub fn saved(kind: EntityKind, updated: bool) -> String {
    let verb = if updated { "updated" } else { "added" };
    format!("{} {verb} successfully.", kind.title())
}

pub fn save_failed(kind: EntityKind) -> String {
    format!("Failed to save {kind}.")
}

pub fn save_failed_inline(kind: EntityKind) -> String {
    format!("Failed to save {kind}. Please try again.")
}

pub fn delete_prompt(kind: EntityKind) -> String {
    format!("Are you sure you want to delete this {kind}?")
}

pub fn deleted(kind: EntityKind) -> String {
    format!("{} deleted successfully.", kind.title())
}

pub fn delete_failed(kind: EntityKind) -> String {
    format!("Failed to delete {kind}.")
}
