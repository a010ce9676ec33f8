// Resource routing table.
//
// Each entity type has one list endpoint, one create endpoint (whose path
// differs per resource), and `{id}` item endpoints for update and delete.

use std::fmt;

/// A collection exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Cart,
    Shippings,
}

impl Resource {
    /// Path segment of the collection (`GET /{name}`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Shippings => "shippings",
        }
    }

    /// Trailing segment of the create endpoint.
    pub const fn create_action(self) -> &'static str {
        match self {
            Self::Products | Self::Cart => "add",
            Self::Shippings => "save",
        }
    }

    pub(crate) fn list_segments(self) -> [&'static str; 1] {
        [self.name()]
    }

    pub(crate) fn create_segments(self) -> [&'static str; 2] {
        [self.name(), self.create_action()]
    }

    pub(crate) fn item_segments(self, id: &str) -> [&str; 2] {
        [self.name(), id]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
