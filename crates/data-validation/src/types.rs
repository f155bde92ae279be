use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Inferred classification of a column.
///
/// Assigned once per column per run and never re-evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What median imputation did to a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImputationOutcome {
    /// Nulls (possibly zero of them) were filled with the column median.
    Imputed { value: f64, filled: usize },
    /// Nothing was filled; the column keeps its nulls.
    Skipped { reason: String },
    /// Imputation was impossible and the run was configured to fail on it.
    Failed { reason: String },
}

impl ImputationOutcome {
    pub fn is_imputed(&self) -> bool {
        matches!(self, Self::Imputed { .. })
    }
}

/// Per-column map that keeps the dataset's column order.
///
/// Serializes as a JSON object whose keys appear in insertion order, which
/// keeps report bytes deterministic and aligned with the input layout.
pub type ColumnMap<V> = IndexMap<String, V>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
}

/// Where a completed run left its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: RunStatus,
    #[serde(rename = "cleaned_data")]
    pub cleaned_data_path: PathBuf,
    #[serde(rename = "report")]
    pub report_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ColumnKind::Numeric).unwrap(),
            "\"numeric\""
        );
        assert_eq!(ColumnKind::Categorical.to_string(), "categorical");
    }

    #[test]
    fn test_column_map_keeps_insertion_order() {
        let mut map = ColumnMap::new();
        map.insert("zeta".to_string(), 1);
        map.insert("alpha".to_string(), 2);
        map.insert("mid".to_string(), 3);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_column_map_insert_replaces_in_place() {
        let mut map: ColumnMap<usize> = ColumnMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 10);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_imputation_outcome_serialization() {
        let imputed = ImputationOutcome::Imputed {
            value: 2.5,
            filled: 3,
        };
        let json = serde_json::to_value(&imputed).unwrap();
        assert_eq!(json["outcome"], "imputed");
        assert_eq!(json["value"], 2.5);
        assert_eq!(json["filled"], 3);

        let skipped = ImputationOutcome::Skipped {
            reason: "no values".to_string(),
        };
        assert!(!skipped.is_imputed());
        assert_eq!(serde_json::to_value(&skipped).unwrap()["outcome"], "skipped");
    }

    #[test]
    fn test_run_summary_keys() {
        let summary = RunSummary {
            status: RunStatus::Success,
            cleaned_data_path: PathBuf::from("out/cleaned_data.csv"),
            report_path: PathBuf::from("out/validation_report_data.json"),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["cleaned_data"], "out/cleaned_data.csv");
        assert_eq!(json["report"], "out/validation_report_data.json");
    }
}
