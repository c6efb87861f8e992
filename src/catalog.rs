// src/catalog.rs

use crate::clock::{TzFormatter, ZoneId};
use serde::Deserialize;

/// One selectable zone.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: String,
    pub zone_id: ZoneId,
    // Long display name, e.g. "India Standard Time"; tzdata has none.
    #[serde(default)]
    pub long_name: Option<String>,
}

impl CatalogEntry {
    pub fn new(label: &str, zone_id: &str, long_name: &str) -> Self {
        Self {
            label: label.to_string(),
            zone_id: ZoneId::new(zone_id),
            long_name: Some(long_name.to_string()),
        }
    }
}

/// Ordered list of zones offered in the zone pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry::new("UTC", "UTC", "Coordinated Universal Time"),
            CatalogEntry::new("Los Angeles", "America/Los_Angeles", "Pacific Standard Time"),
            CatalogEntry::new("Denver", "America/Denver", "Mountain Standard Time"),
            CatalogEntry::new("Chicago", "America/Chicago", "Central Standard Time"),
            CatalogEntry::new("New York", "America/New_York", "Eastern Standard Time"),
            CatalogEntry::new("São Paulo", "America/Sao_Paulo", "Brasilia Standard Time"),
            CatalogEntry::new("London", "Europe/London", "Greenwich Mean Time"),
            CatalogEntry::new("Paris", "Europe/Paris", "Central European Standard Time"),
            CatalogEntry::new("Berlin", "Europe/Berlin", "Central European Standard Time"),
            CatalogEntry::new("Dubai", "Asia/Dubai", "Gulf Standard Time"),
            CatalogEntry::new("Kolkata", "Asia/Kolkata", "India Standard Time"),
            CatalogEntry::new("Singapore", "Asia/Singapore", "Singapore Standard Time"),
            CatalogEntry::new("Tokyo", "Asia/Tokyo", "Japan Standard Time"),
            CatalogEntry::new("Sydney", "Australia/Sydney", "Australian Eastern Standard Time"),
        ])
    }
}

impl ZoneCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Display label for `zone`, falling back to the raw identifier.
    pub fn label_for<'a>(&'a self, zone: &'a ZoneId) -> &'a str {
        self.entries
            .iter()
            .find(|e| &e.zone_id == zone)
            .map(|e| e.label.as_str())
            .unwrap_or_else(|| zone.as_str())
    }

    /// Entries whose zone the bundled database does not know.
    pub fn unresolvable(&self) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| TzFormatter::resolve(&e.zone_id).is_err())
            .collect()
    }

    /// Formatter that knows the catalog's long names.
    pub fn formatter(&self) -> TzFormatter {
        self.entries
            .iter()
            .fold(TzFormatter::new(), |f, e| match &e.long_name {
                Some(name) => f.with_long_name(&e.zone_id, name.clone()),
                None => f,
            })
    }
}
