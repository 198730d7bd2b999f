//! In-memory monitoring backend loaded from an exported snapshot.

/// `SiteApi` implementation over shared in-memory state.
pub mod memory;
/// Snapshot file format.
pub mod snapshot;

pub use memory::MemoryApi;
pub use snapshot::{SiteRecord, Snapshot};
