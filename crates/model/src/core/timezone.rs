//! Static legacy → canonical timezone table.
//!
//! The keys are identifiers PostgreSQL's timezone resolver rejects or
//! misreads on the target installation; the values are the IANA region/city
//! names it resolves reliably.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Built-in table shipped with the tool.
pub const LEGACY_TIMEZONES: &[(&str, &str)] = &[
    ("US/Central", "America/Chicago"),
    ("US/Eastern", "America/New_York"),
    ("US/Mountain", "America/Denver"),
    ("US/Pacific", "America/Los_Angeles"),
    ("US/Alaska", "America/Anchorage"),
    ("US/Arizona", "America/Phoenix"),
    ("US/East-Indiana", "America/Indiana/Indianapolis"),
    ("US/Hawaii", "Pacific/Honolulu"),
    ("Canada/Atlantic", "America/Halifax"),
    ("Canada/Central", "America/Winnipeg"),
    ("Canada/Eastern", "America/Toronto"),
    ("Canada/Mountain", "America/Edmonton"),
    ("Canada/Newfoundland", "America/St_Johns"),
    ("Canada/Pacific", "America/Vancouver"),
    ("Canada/Saskatchewan", "America/Regina"),
    ("Canada/Yukon", "America/Whitehorse"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("Empty timezone name in mapping entry {0}")]
    EmptyName(usize),

    #[error("Timezone '{0}' is mapped to itself")]
    SelfMapping(String),

    #[error("Duplicate legacy timezone '{0}'")]
    DuplicateKey(String),

    #[error("Canonical timezone '{canonical}' for '{legacy}' is itself a legacy key")]
    ChainedMapping { legacy: String, canonical: String },
}

/// Read-only view over a legacy → canonical table.
///
/// Entry order is preserved; it drives scan parameters, the generated
/// artifact and the fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneMapping {
    entries: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Serialize)]
pub struct MappingEntry<'a> {
    pub legacy: &'a str,
    pub canonical: &'a str,
}

impl TimezoneMapping {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    pub const fn builtin() -> Self {
        Self::new(LEGACY_TIMEZONES)
    }

    pub fn canonical(&self, legacy: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == legacy)
            .map(|(_, canonical)| *canonical)
    }

    /// Total lookup: unknown names come back unchanged.
    pub fn normalize<'a>(&self, zone: &'a str) -> &'a str {
        self.canonical(zone).unwrap_or(zone)
    }

    pub fn legacy_keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = MappingEntry<'static>> + '_ {
        self.entries.iter().map(|&(legacy, canonical)| MappingEntry {
            legacy,
            canonical,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        let mut seen = HashSet::with_capacity(self.entries.len());

        for (idx, (legacy, canonical)) in self.entries.iter().enumerate() {
            if legacy.trim().is_empty() || canonical.trim().is_empty() {
                return Err(MappingError::EmptyName(idx));
            }
            if legacy == canonical {
                return Err(MappingError::SelfMapping(legacy.to_string()));
            }
            if !seen.insert(*legacy) {
                return Err(MappingError::DuplicateKey(legacy.to_string()));
            }
        }

        for (legacy, canonical) in self.entries {
            if seen.contains(canonical) {
                return Err(MappingError::ChainedMapping {
                    legacy: legacy.to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Stable md5 digest of the ordered entries, used as the artifact version.
    pub fn fingerprint(&self) -> String {
        let mut buf = String::new();
        for (legacy, canonical) in self.entries {
            buf.push_str(legacy);
            buf.push('\t');
            buf.push_str(canonical);
            buf.push('\n');
        }
        format!("{:x}", md5::compute(buf.as_bytes()))
    }
}

impl Default for TimezoneMapping {
    fn default() -> Self {
        Self::builtin()
    }
}
