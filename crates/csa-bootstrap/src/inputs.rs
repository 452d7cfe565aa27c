//! Upstream input documents: the equipment list and the instrument database.
//!
//! Both arrive as loosely structured YAML. Parsing is lenient: a document
//! that cannot be read at all yields an empty set, and an individual entry
//! with the wrong shape is dropped. Every such loss is reported as a
//! warning string so the caller can surface it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use csa_core::IoKind;

static FRONT_MATTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---").expect("front matter pattern is valid")
});

/// A parsed document together with the warnings produced while reading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

/// How an item of equipment is fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feeder {
    Vfd,
    SoftStarter,
}

/// One equipment-list entry. Unrecognized fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentEntry {
    pub tag: Option<String>,
    /// Alternate tag field used by some equipment lists.
    pub equipment_tag: Option<String>,
    pub feeder_type: Option<String>,
    /// `plc` (default) or `vendor`.
    pub control_responsibility: Option<String>,
}

impl EquipmentEntry {
    /// `tag`, falling back to `equipment_tag`. Empty when neither is set.
    pub fn tag(&self) -> &str {
        self.tag
            .as_deref()
            .or(self.equipment_tag.as_deref())
            .unwrap_or_default()
            .trim()
    }

    pub fn is_vendor(&self) -> bool {
        self.control_responsibility
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case("vendor"))
    }

    pub fn feeder(&self) -> Option<Feeder> {
        let feeder = self.feeder_type.as_deref()?.trim().to_ascii_uppercase();
        match feeder.as_str() {
            "VFD" => Some(Feeder::Vfd),
            "SOFT-STARTER" | "SOFT_STARTER" => Some(Feeder::SoftStarter),
            _ => None,
        }
    }
}

/// Instrument tag, either plain text or a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstrumentTag {
    Plain(String),
    Structured {
        #[serde(default)]
        full_tag: Option<String>,
    },
}

impl InstrumentTag {
    pub fn as_str(&self) -> &str {
        match self {
            InstrumentTag::Plain(tag) => tag,
            InstrumentTag::Structured { full_tag } => full_tag.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoSignal {
    pub io_type: Option<String>,
    #[serde(rename = "type")]
    pub signal_type: Option<String>,
}

impl IoSignal {
    /// Declared kind from `io_type`, else `type`. `None` for unrecognized kinds.
    pub fn kind(&self) -> Option<IoKind> {
        let declared = non_empty(self.io_type.as_deref())
            .or_else(|| non_empty(self.signal_type.as_deref()))?;
        IoKind::from_declared(declared.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentRecord {
    pub tag: Option<InstrumentTag>,
    pub equipment_tag: Option<String>,
    pub io_signals: Option<Vec<IoSignal>>,
    pub signals: Option<Vec<IoSignal>>,
}

impl InstrumentRecord {
    pub fn tag(&self) -> &str {
        self.tag.as_ref().map(InstrumentTag::as_str).unwrap_or_default()
    }

    pub fn equipment_tag(&self) -> &str {
        self.equipment_tag.as_deref().unwrap_or_default()
    }

    /// `io_signals`, or `signals` when that list is absent or empty.
    pub fn signals(&self) -> &[IoSignal] {
        match (&self.io_signals, &self.signals) {
            (Some(primary), _) if !primary.is_empty() => primary,
            (_, Some(fallback)) => fallback,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstrumentDatabase {
    pub instruments: Vec<InstrumentRecord>,
}

impl InstrumentDatabase {
    pub fn new(instruments: Vec<InstrumentRecord>) -> Self {
        Self { instruments }
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Parse an equipment list from QMD text.
///
/// Accepts YAML front matter between `---` markers, or a bare YAML
/// document. The entries are read from an `equipment` key, a top-level
/// list, or the values of a top-level map, in that order.
pub fn parse_equipment_list(text: &str) -> Parsed<Vec<EquipmentEntry>> {
    let mut warnings = Vec::new();
    let yaml = match FRONT_MATTER.captures(text) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => text,
    };

    let root = match load_document(yaml, "equipment list", &mut warnings) {
        Some(root) => root,
        None => return Parsed { value: Vec::new(), warnings },
    };

    let items = match root {
        Value::Mapping(mut map) => match map.remove("equipment") {
            Some(Value::Sequence(items)) => items,
            Some(Value::Null) => Vec::new(),
            Some(_) => {
                warnings.push("Equipment list 'equipment' key is not a list".to_string());
                Vec::new()
            }
            None => map.into_iter().map(|(_, v)| v).collect(),
        },
        Value::Sequence(items) => items,
        _ => {
            warnings.push("Equipment list is not a list or mapping".to_string());
            Vec::new()
        }
    };

    let value = decode_entries(items, "Equipment", &mut warnings);
    Parsed { value, warnings }
}

/// Parse an instrument database from YAML text.
///
/// Instruments are read from `instruments`, falling back to `database`
/// when that key is missing or empty.
pub fn parse_instrument_database(text: &str) -> Parsed<InstrumentDatabase> {
    let mut warnings = Vec::new();

    let root = match load_document(text, "instrument database", &mut warnings) {
        Some(root) => root,
        None => return Parsed { value: InstrumentDatabase::default(), warnings },
    };

    let Value::Mapping(mut map) = root else {
        warnings.push("Instrument database is not a mapping".to_string());
        return Parsed { value: InstrumentDatabase::default(), warnings };
    };

    let items = match map.remove("instruments") {
        Some(Value::Sequence(items)) if !items.is_empty() => items,
        _ => match map.remove("database") {
            Some(Value::Sequence(items)) => items,
            _ => Vec::new(),
        },
    };

    let instruments = decode_entries(items, "Instrument", &mut warnings);
    Parsed {
        value: InstrumentDatabase::new(instruments),
        warnings,
    }
}

fn load_document(text: &str, what: &str, warnings: &mut Vec<String>) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, "unparsable {what}");
            warnings.push(format!("Could not parse {what}: {err}"));
            None
        }
    }
}

fn decode_entries<T: DeserializeOwned>(
    items: Vec<Value>,
    what: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_yaml::from_value(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(index = i, %err, "skipping malformed {what} entry");
                warnings.push(format!("{what} entry {i} skipped: {err}"));
                None
            }
        })
        .collect()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_from_front_matter() {
        let qmd = r#"---
equipment:
  - tag: 200-P-001
    feeder_type: vfd
  - equipment_tag: 300-B-01
    feeder_type: Soft-Starter
---

# Equipment List

| Tag | Feeder |
|-----|--------|
"#;
        let parsed = parse_equipment_list(qmd);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.value.len(), 2);
        assert_eq!(parsed.value[0].tag(), "200-P-001");
        assert_eq!(parsed.value[0].feeder(), Some(Feeder::Vfd));
        assert_eq!(parsed.value[1].tag(), "300-B-01");
        assert_eq!(parsed.value[1].feeder(), Some(Feeder::SoftStarter));
    }

    #[test]
    fn equipment_from_bare_list_and_map() {
        let list = parse_equipment_list("- tag: 100-P-01\n- tag: 100-P-02\n");
        assert_eq!(list.value.len(), 2);

        let map = parse_equipment_list("pump_a:\n  tag: 100-P-01\npump_b:\n  tag: 100-P-02\n");
        assert_eq!(map.value.len(), 2);
        assert_eq!(map.value[1].tag(), "100-P-02");
    }

    #[test]
    fn vendor_responsibility_is_case_insensitive() {
        let parsed = parse_equipment_list("- tag: 200-MBR-001\n  control_responsibility: Vendor\n");
        assert!(parsed.value[0].is_vendor());
        let parsed = parse_equipment_list("- tag: 200-P-001\n");
        assert!(!parsed.value[0].is_vendor());
    }

    #[test]
    fn malformed_entry_is_dropped_with_warning() {
        let parsed = parse_equipment_list("- tag: 200-P-001\n- 42\n");
        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("entry 1"));
    }

    #[test]
    fn unmodelled_fields_of_any_shape_are_ignored() {
        let yaml = r#"
- tag: 200-P-001
  description: { en: Feed pump, de: Speisepumpe }
  power_kw: 75
  feeder_type: VFD
"#;
        let parsed = parse_equipment_list(yaml);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.value[0].feeder(), Some(Feeder::Vfd));
    }

    #[test]
    fn unparsable_or_empty_text_is_empty() {
        let parsed = parse_equipment_list("equipment: [unclosed");
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.warnings.len(), 1);

        let parsed = parse_equipment_list("");
        assert!(parsed.value.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn instruments_fall_back_to_database_key() {
        let yaml = r#"
instruments: []
database:
  - tag: FIT-200-01
    io_signals:
      - io_type: AI
"#;
        let parsed = parse_instrument_database(yaml);
        assert_eq!(parsed.value.instruments.len(), 1);
        assert_eq!(parsed.value.instruments[0].tag(), "FIT-200-01");
    }

    #[test]
    fn structured_tag_and_signal_fallbacks() {
        let yaml = r#"
instruments:
  - tag: { full_tag: LIT-300-02 }
    io_signals: []
    signals:
      - type: di
      - io_type: ""
        type: ao
      - io_type: HART
"#;
        let parsed = parse_instrument_database(yaml);
        let record = &parsed.value.instruments[0];
        assert_eq!(record.tag(), "LIT-300-02");
        let kinds: Vec<_> = record.signals().iter().map(IoSignal::kind).collect();
        assert_eq!(kinds, [Some(IoKind::DI), Some(IoKind::AO), None]);
    }

    #[test]
    fn non_mapping_database_warns() {
        let parsed = parse_instrument_database("- just\n- a list\n");
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.warnings.len(), 1);
    }
}
