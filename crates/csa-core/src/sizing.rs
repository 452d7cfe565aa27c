//! Remote IO module sizing.
//!
//! Converts raw IO point counts into module counts:
//! `required = floor(count * (1 + spare_pct / 100))`, then
//! `modules = ceil(required / capacity)`. Arithmetic is done in integers so
//! results never depend on float rounding.

use std::collections::BTreeMap;

use crate::error::{CsaError, CsaResult};
use crate::io::{IoCounts, IoKind};

/// Spare capacity applied when the caller does not override it.
pub const DEFAULT_SPARE_PCT: u32 = 20;

/// Points per module for a kind missing from the capacity table.
pub const FALLBACK_MODULE_CAPACITY: u32 = 16;

/// Module count per IO kind. Kinds that need no modules are absent.
pub type ModuleCounts = BTreeMap<IoKind, u32>;

/// Points-per-module table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCapacities {
    table: BTreeMap<IoKind, u32>,
}

impl Default for ModuleCapacities {
    /// Typical 1756-class modules.
    fn default() -> Self {
        let table = [
            (IoKind::DI, 32),
            (IoKind::DO, 32),
            (IoKind::AI, 8),
            (IoKind::AO, 8),
            (IoKind::PI, 4),
            (IoKind::PO, 4),
        ]
        .into_iter()
        .collect();
        Self { table }
    }
}

impl ModuleCapacities {
    /// A table with no entries; every kind uses the fallback capacity.
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    pub fn with(mut self, kind: IoKind, points_per_module: u32) -> CsaResult<Self> {
        if points_per_module == 0 {
            return Err(CsaError::InvalidArg {
                what: "module capacity must be at least one point",
            });
        }
        self.table.insert(kind, points_per_module);
        Ok(self)
    }

    pub fn capacity(&self, kind: IoKind) -> u32 {
        self.table
            .get(&kind)
            .copied()
            .unwrap_or(FALLBACK_MODULE_CAPACITY)
    }
}

/// Size modules for one area using the default capacity table.
pub fn size_modules(counts: &IoCounts, spare_pct: u32) -> ModuleCounts {
    size_modules_with(counts, spare_pct, &ModuleCapacities::default())
}

/// Size modules for one area against an explicit capacity table.
pub fn size_modules_with(
    counts: &IoCounts,
    spare_pct: u32,
    capacities: &ModuleCapacities,
) -> ModuleCounts {
    counts
        .iter()
        .filter(|&(_, count)| count > 0)
        .map(|(kind, count)| {
            let required = u64::from(count) * (100 + u64::from(spare_pct)) / 100;
            let capacity = u64::from(capacities.capacity(kind));
            let modules = required.div_ceil(capacity);
            (kind, u32::try_from(modules).unwrap_or(u32::MAX))
        })
        .collect()
}

/// Render module counts as `DI=2, AI=1` for review notes.
pub fn format_module_counts(modules: &ModuleCounts) -> String {
    modules
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_digital_inputs_need_two_cards() {
        let counts = IoCounts::default().with(IoKind::DI, 45);
        let modules = size_modules(&counts, 20);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[&IoKind::DI], 2);
    }

    #[test]
    fn zero_counts_are_omitted() {
        let counts = IoCounts::default().with(IoKind::AI, 1);
        let modules = size_modules(&counts, 20);
        assert_eq!(modules.keys().copied().collect::<Vec<_>>(), [IoKind::AI]);
        assert!(size_modules(&IoCounts::default(), 20).is_empty());
    }

    #[test]
    fn spare_is_floored_before_division() {
        // 8 * 1.2 = 9.6 -> 9 points -> two 8-point cards
        let counts = IoCounts::default().with(IoKind::AI, 8);
        assert_eq!(size_modules(&counts, 20)[&IoKind::AI], 2);
        // 8 * 1.1 = 8.8 -> 8 points -> one card
        assert_eq!(size_modules(&counts, 10)[&IoKind::AI], 1);
    }

    #[test]
    fn missing_kind_uses_fallback_capacity() {
        let capacities = ModuleCapacities::empty().with(IoKind::DI, 32).unwrap();
        let counts = IoCounts::default().with(IoKind::PI, 17);
        let modules = size_modules_with(&counts, 0, &capacities);
        assert_eq!(modules[&IoKind::PI], 2);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(ModuleCapacities::default().with(IoKind::DO, 0).is_err());
    }

    #[test]
    fn format_lists_kinds_in_order() {
        let counts = IoCounts::default()
            .with(IoKind::AI, 3)
            .with(IoKind::DI, 40);
        assert_eq!(format_module_counts(&size_modules(&counts, 20)), "DI=2, AI=1");
    }
}
