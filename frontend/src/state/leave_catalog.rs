use serde::{Deserialize, Serialize};

use crate::api::LeaveType;

/// Neutral gray used whenever a leave type has no configured color or the
/// type id is unknown; rendering never fails on an unrecognized type.
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// Read-only reference data: the finite set of leave types, loaded once per
/// session from `GET /leaves/types`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCatalog {
    types: Vec<LeaveType>,
}

impl LeaveCatalog {
    pub fn new(types: Vec<LeaveType>) -> Self {
        Self { types }
    }

    /// The catalog the original deployment ships when the backend exposes
    /// no configured types.
    pub fn builtin() -> Self {
        let defaults = [
            ("sick", "Sick Leave", 12, "#EF4444"),
            ("vacation", "Vacation", 25, "#3B82F6"),
            ("personal", "Personal Leave", 5, "#8B5CF6"),
            ("maternity", "Maternity Leave", 90, "#EC4899"),
            ("paternity", "Paternity Leave", 15, "#10B981"),
        ];
        Self {
            types: defaults
                .into_iter()
                .map(|(id, name, max_days, color)| LeaveType {
                    id: id.to_string(),
                    name: name.to_string(),
                    max_days,
                    advance_notice_days: 0,
                    color: Some(color.to_string()),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[LeaveType] {
        &self.types
    }

    pub fn get(&self, type_id: &str) -> Option<&LeaveType> {
        self.types.iter().find(|t| t.id == type_id)
    }

    pub fn color_of(&self, type_id: &str) -> String {
        self.get(type_id)
            .and_then(|t| t.color.clone())
            .unwrap_or_else(|| NEUTRAL_COLOR.to_string())
    }

    /// Falls back to the raw id so unknown types still render something.
    pub fn name_of(&self, type_id: &str) -> String {
        self.get(type_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| type_id.to_string())
    }

    pub fn max_days_of(&self, type_id: &str) -> Option<i64> {
        self.get(type_id).map(|t| t.max_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_prefers_configured_values() {
        let catalog = LeaveCatalog::builtin();
        assert_eq!(catalog.name_of("vacation"), "Vacation");
        assert_eq!(catalog.color_of("sick"), "#EF4444");
        assert_eq!(catalog.max_days_of("personal"), Some(5));
    }

    #[test]
    fn unknown_type_falls_back_to_neutral_rendering() {
        let catalog = LeaveCatalog::builtin();
        assert_eq!(catalog.color_of("sabbatical"), NEUTRAL_COLOR);
        assert_eq!(catalog.name_of("sabbatical"), "sabbatical");
        assert_eq!(catalog.max_days_of("sabbatical"), None);
    }

    #[test]
    fn catalog_preserves_backend_order() {
        let catalog = LeaveCatalog::new(vec![
            LeaveType {
                id: "b".into(),
                name: "B".into(),
                max_days: 1,
                advance_notice_days: 0,
                color: None,
            },
            LeaveType {
                id: "a".into(),
                name: "A".into(),
                max_days: 2,
                advance_notice_days: 0,
                color: None,
            },
        ]);
        let ids: Vec<_> = catalog.types().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog.color_of("a"), NEUTRAL_COLOR);
    }
}
