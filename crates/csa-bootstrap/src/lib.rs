//! csa-bootstrap: draft control system topologies from plant inputs.
//!
//! Provides:
//! - Lenient parsing of equipment lists and instrument databases
//! - Per-area IO aggregation
//! - The topology synthesizer, driven by an architecture template
//! - File helpers for front ends
//!
//! # Example
//!
//! ```
//! use csa_bootstrap::{BootstrapRequest, bootstrap};
//!
//! let equipment = "equipment:\n  - tag: 200-P-001\n    feeder_type: VFD\n";
//! let instruments = "instruments:\n  - tag: FIT-200-01\n    io_signals:\n      - io_type: AI\n";
//! let outcome = bootstrap(&BootstrapRequest::new(equipment, instruments, "Demo")).unwrap();
//!
//! assert_eq!(outcome.equipment_mapping["200-P-001"], "PLC-001");
//! assert!(outcome.topology.device("VFD-200-P-001").is_some());
//! ```

pub mod addressing;
pub mod error;
pub mod fingerprint;
pub mod inputs;
pub mod io_summary;
pub mod request;
pub mod service;
pub mod synth;

pub use error::{BootstrapError, BootstrapResult};
pub use fingerprint::compute_fingerprint;
pub use inputs::{
    EquipmentEntry, InstrumentDatabase, InstrumentRecord, IoSignal, Parsed,
    parse_equipment_list, parse_instrument_database,
};
pub use io_summary::{IoSummary, instrument_area, summarize_io, total_points};
pub use request::{BootstrapOutcome, BootstrapRequest, SelectionMode};
pub use service::{
    bootstrap_to_file, load_overrides, read_input, request_from_files, validate_topology_file,
};
pub use synth::bootstrap;
