//! csa-core: shared foundation for the CSA bootstrap workspace.
//!
//! Contains:
//! - area (area codes and the tag area resolver)
//! - io (IO signal kinds and per-area count records)
//! - sizing (remote IO module sizing with spare capacity)
//! - error (shared error types)

pub mod area;
pub mod error;
pub mod io;
pub mod sizing;

// Re-exports: nice ergonomics for downstream crates
pub use area::{AreaCode, resolve_area};
pub use error::{CsaError, CsaResult};
pub use io::{IoCounts, IoKind};
pub use sizing::{
    DEFAULT_SPARE_PCT, ModuleCapacities, ModuleCounts, format_module_counts, size_modules,
    size_modules_with,
};
