//! Task-instance identity supplied by the metadata collaborator.
//!
//! Identifies which attempt's logs the viewer shows. This crate never
//! fetches; the identity is carried to the fetch collaborator and to the
//! external log-viewer link builder as opaque strings.

use serde::{Deserialize, Serialize};

/// Sentinel the orchestrator uses for an unmapped task.
const UNMAPPED_INDEX: i64 = -1;

/// Identity of one task-instance attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInstanceRef {
    pub dag_id: String,
    pub dag_run_id: String,
    pub task_id: String,
    /// Mapped-task index; -1 means the task is not mapped.
    #[serde(default = "default_map_index")]
    pub map_index: i64,
    pub execution_date: String,
    pub try_number: u32,
    #[serde(default)]
    pub state: Option<String>,
}

fn default_map_index() -> i64 {
    UNMAPPED_INDEX
}

impl TaskInstanceRef {
    /// The map index, or `None` for an unmapped task.
    #[must_use]
    pub fn map_index(&self) -> Option<i64> {
        (self.map_index >= 0).then_some(self.map_index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "dag_id": "etl",
            "dag_run_id": "scheduled__2024-01-01",
            "task_id": "extract",
            "execution_date": "2024-01-01T00:00:00+00:00",
            "try_number": 2
        }"#;
        let meta: TaskInstanceRef = serde_json::from_str(json).unwrap();
        assert_eq!(meta.map_index, -1);
        assert_eq!(meta.map_index(), None);
        assert_eq!(meta.state, None);
        assert_eq!(meta.try_number, 2);
    }

    #[test]
    fn mapped_task_exposes_its_index() {
        let json = r#"{
            "dag_id": "etl",
            "dag_run_id": "scheduled__2024-01-01",
            "task_id": "extract",
            "map_index": 3,
            "execution_date": "2024-01-01T00:00:00+00:00",
            "try_number": 1,
            "state": "failed"
        }"#;
        let meta: TaskInstanceRef = serde_json::from_str(json).unwrap();
        assert_eq!(meta.map_index(), Some(3));
        assert_eq!(meta.state.as_deref(), Some("failed"));
    }

    #[test]
    fn serde_round_trip() {
        let meta = TaskInstanceRef {
            dag_id: "etl".to_owned(),
            dag_run_id: "manual__2024-02-02".to_owned(),
            task_id: "load".to_owned(),
            map_index: -1,
            execution_date: "2024-02-02T00:00:00+00:00".to_owned(),
            try_number: 1,
            state: Some("success".to_owned()),
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: TaskInstanceRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
