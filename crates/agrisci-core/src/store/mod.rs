// ── Reactive data store ──
//
// Whole-collection entity storage, replaced only by a full load.

mod collection;
mod data_store;

pub use data_store::DataStore;
