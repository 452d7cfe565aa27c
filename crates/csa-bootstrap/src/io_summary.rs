//! Per-area IO point aggregation.

use std::collections::BTreeMap;

use csa_core::{AreaCode, IoCounts, resolve_area};

use crate::inputs::{InstrumentDatabase, InstrumentRecord, IoSignal};

/// IO counts keyed by area, in area order.
pub type IoSummary = BTreeMap<AreaCode, IoCounts>;

/// Area an instrument belongs to.
///
/// The equipment tag wins when it resolves to a real area; otherwise the
/// instrument's own tag decides. An equipment tag in area `000` therefore
/// falls through to the instrument tag.
pub fn instrument_area(record: &InstrumentRecord) -> AreaCode {
    let area = resolve_area(record.equipment_tag());
    if !area.is_default() {
        return area;
    }
    resolve_area(record.tag())
}

/// Count recognized IO signals per area.
///
/// Any signal attributes its instrument's area, so an area whose signals are
/// all of unrecognized types appears with zero counts. Instruments without
/// signals contribute nothing.
pub fn summarize_io(database: &InstrumentDatabase) -> IoSummary {
    let mut summary = IoSummary::new();
    for record in &database.instruments {
        let signals = record.signals();
        if signals.is_empty() {
            continue;
        }
        let counts = summary.entry(instrument_area(record)).or_default();
        for kind in signals.iter().filter_map(IoSignal::kind) {
            counts.increment(kind);
        }
    }
    summary
}

/// Sum of all points across areas.
pub fn total_points(summary: &IoSummary) -> u32 {
    summary.values().map(IoCounts::total).sum()
}
