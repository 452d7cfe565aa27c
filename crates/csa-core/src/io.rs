//! IO signal kinds and per-area IO count records.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CsaError;

/// The six IO signal kinds the tally recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IoKind {
    /// Digital input.
    DI,
    /// Digital output.
    DO,
    /// Analog input.
    AI,
    /// Analog output.
    AO,
    /// Pulse input.
    PI,
    /// Pulse output.
    PO,
}

impl IoKind {
    pub const ALL: [IoKind; 6] = [
        IoKind::DI,
        IoKind::DO,
        IoKind::AI,
        IoKind::AO,
        IoKind::PI,
        IoKind::PO,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IoKind::DI => "DI",
            IoKind::DO => "DO",
            IoKind::AI => "AI",
            IoKind::AO => "AO",
            IoKind::PI => "PI",
            IoKind::PO => "PO",
        }
    }

    /// Match a declared signal type after uppercasing; `None` for anything else.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let upper = declared.to_ascii_uppercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == upper)
    }
}

impl fmt::Display for IoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IoKind {
    type Err = CsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_declared(s.trim()).ok_or_else(|| CsaError::UnknownName {
            what: "IO kind",
            value: s.to_string(),
        })
    }
}

/// IO point counts for one area, one counter per [`IoKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IoCounts {
    #[serde(rename = "DI", default)]
    pub digital_in: u32,
    #[serde(rename = "DO", default)]
    pub digital_out: u32,
    #[serde(rename = "AI", default)]
    pub analog_in: u32,
    #[serde(rename = "AO", default)]
    pub analog_out: u32,
    #[serde(rename = "PI", default)]
    pub pulse_in: u32,
    #[serde(rename = "PO", default)]
    pub pulse_out: u32,
}

impl IoCounts {
    pub fn get(&self, kind: IoKind) -> u32 {
        match kind {
            IoKind::DI => self.digital_in,
            IoKind::DO => self.digital_out,
            IoKind::AI => self.analog_in,
            IoKind::AO => self.analog_out,
            IoKind::PI => self.pulse_in,
            IoKind::PO => self.pulse_out,
        }
    }

    fn slot(&mut self, kind: IoKind) -> &mut u32 {
        match kind {
            IoKind::DI => &mut self.digital_in,
            IoKind::DO => &mut self.digital_out,
            IoKind::AI => &mut self.analog_in,
            IoKind::AO => &mut self.analog_out,
            IoKind::PI => &mut self.pulse_in,
            IoKind::PO => &mut self.pulse_out,
        }
    }

    pub fn set(&mut self, kind: IoKind, count: u32) {
        *self.slot(kind) = count;
    }

    pub fn increment(&mut self, kind: IoKind) {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(1);
    }

    /// Builder-style setter, handy in tests and fixtures.
    pub fn with(mut self, kind: IoKind, count: u32) -> Self {
        self.set(kind, count);
        self
    }

    /// Iterate `(kind, count)` in canonical kind order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (IoKind, u32)> + '_ {
        IoKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for IoCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, count) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind}={count}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_types_are_case_insensitive() {
        assert_eq!(IoKind::from_declared("ai"), Some(IoKind::AI));
        assert_eq!(IoKind::from_declared("Po"), Some(IoKind::PO));
        assert_eq!(IoKind::from_declared("HART"), None);
        assert_eq!(IoKind::from_declared(""), None);
    }

    #[test]
    fn parse_reports_unknown_kind() {
        let err = "RTD".parse::<IoKind>().unwrap_err();
        assert!(err.to_string().contains("RTD"));
        assert_eq!(" di ".parse::<IoKind>().unwrap(), IoKind::DI);
    }

    #[test]
    fn counts_increment_and_total() {
        let mut counts = IoCounts::default();
        counts.increment(IoKind::DI);
        counts.increment(IoKind::DI);
        counts.increment(IoKind::AO);
        assert_eq!(counts.get(IoKind::DI), 2);
        assert_eq!(counts.get(IoKind::AO), 1);
        assert_eq!(counts.total(), 3);
        assert!(!counts.is_empty());
        assert!(IoCounts::default().is_empty());
    }

    #[test]
    fn counts_display_lists_every_kind() {
        let counts = IoCounts::default().with(IoKind::DI, 4).with(IoKind::AI, 2);
        assert_eq!(counts.to_string(), "DI=4, DO=0, AI=2, AO=0, PI=0, PO=0");
    }

    #[test]
    fn counts_serialize_with_wire_names() {
        let counts = IoCounts::default().with(IoKind::PI, 3);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["PI"], 3);
        assert_eq!(json["DI"], 0);
    }
}
