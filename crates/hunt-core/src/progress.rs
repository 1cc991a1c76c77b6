//! Server progress snapshots and per-area completion

use crate::catalog::Catalog;
use crate::identity::ItemId;
use serde::{Deserialize, Serialize};

/// Case-insensitive substring match of `core` against any owned id.
///
/// Scan-time and server-time ids drift (`"MAR_Sewing"` vs `"sewing"` vs
/// `"MarcelaStitching"`), so ownership is decided loosely.
pub fn owns_loosely<S: AsRef<str>>(owned: &[S], core: &str) -> bool {
    let core = core.to_lowercase();
    owned
        .iter()
        .any(|id| id.as_ref().to_lowercase().contains(&core))
}

/// Authoritative unlock list pulled from `/api/mobile-get-progress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub unlocked_ids: Vec<String>,
    #[serde(default)]
    pub progress_value: f32,
}

impl ProgressSnapshot {
    pub fn new(unlocked_ids: Vec<String>) -> Self {
        Self {
            unlocked_ids,
            progress_value: 0.0,
        }
    }

    /// Whether the snapshot shows `item` as owned
    pub fn owns(&self, item: &ItemId) -> bool {
        owns_loosely(&self.unlocked_ids, item.core_name())
    }
}

/// Completion of one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaProgress {
    pub name: String,
    pub unlocked: usize,
    pub total: usize,
}

impl AreaProgress {
    /// Completion in percent, zero for an area without items
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.unlocked as f32 / self.total as f32 * 100.0
        }
    }

    pub fn rounded_percent(&self) -> u32 {
        self.percent().round() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.unlocked == self.total
    }
}

/// Completion of every area, in catalog order
pub fn progress_report(catalog: &Catalog, snapshot: &ProgressSnapshot) -> Vec<AreaProgress> {
    catalog
        .areas
        .iter()
        .map(|area| AreaProgress {
            name: area.name.clone(),
            unlocked: area.items.iter().filter(|i| snapshot.owns(i)).count(),
            total: area.items.len(),
        })
        .collect()
}

/// Catalog items the snapshot shows as owned, for the museum carousel
pub fn owned_items<'a>(catalog: &'a Catalog, snapshot: &ProgressSnapshot) -> Vec<&'a ItemId> {
    catalog
        .areas
        .iter()
        .flat_map(|a| a.items.iter())
        .filter(|i| snapshot.owns(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Area;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.areas = vec![
            Area {
                prefix: "BAS".into(),
                name: "Taal Basilica".into(),
                items: vec!["BAS_Basilica".into(), "BAS_Jesus".into(), "BAS_Stoup".into()],
            },
            Area {
                prefix: "CAS".into(),
                name: "Casa Real".into(),
                items: vec!["CAS_CasaReal".into(), "CAS_MariaRosa".into()],
            },
            Area {
                prefix: "XXX".into(),
                name: "Empty".into(),
                items: vec![],
            },
        ];
        catalog
    }

    #[test]
    fn test_owns_loosely() {
        assert!(owns_loosely(&["basilicajesus"], "Jesus"));
        assert!(owns_loosely(&["CASAREAL"], "casareal"));
        assert!(!owns_loosely(&["stoup"], "Basilica"));
        assert!(!owns_loosely::<&str>(&[], "Basilica"));
    }

    #[test]
    fn test_progress_report() {
        let snapshot = ProgressSnapshot::new(vec!["basilica".into(), "stoup".into()]);
        let report = progress_report(&catalog(), &snapshot);

        assert_eq!(report[0].unlocked, 2);
        assert_eq!(report[0].total, 3);
        assert_eq!(report[0].rounded_percent(), 67);
        assert_eq!(report[1].percent(), 0.0);
        assert_eq!(report[2].percent(), 0.0);
        assert!(!report[2].is_complete());
    }

    #[test]
    fn test_owned_items() {
        let catalog = catalog();
        let snapshot = ProgressSnapshot::new(vec!["mariarosa".into()]);
        let owned = owned_items(&catalog, &snapshot);
        assert_eq!(owned, vec![&ItemId::new("CAS_MariaRosa")]);
    }

    #[test]
    fn test_snapshot_missing_fields_default() {
        let snapshot: ProgressSnapshot = ron::from_str("()").unwrap();
        assert!(snapshot.unlocked_ids.is_empty());
        assert_eq!(snapshot.progress_value, 0.0);
    }
}
