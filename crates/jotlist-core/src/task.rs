use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One to-do item as it lives in memory and in the persisted snapshot.
///
/// Field names follow the snapshot format (`createdAt` in camelCase), so a
/// record written by one session is readable by the next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,

    pub title: String,

    pub note: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Builds a fresh, incomplete record stamped at `now`.
    ///
    /// The id is `now` in Unix milliseconds. Two records created within the
    /// same millisecond share an id; callers accept that limitation.
    pub fn new(title: &str, note: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id_for(now),
            title: title.trim().to_string(),
            note: note.trim().to_string(),
            completed: false,
            created_at: Some(now),
        }
    }
}

pub fn id_for(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn march_first_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn new_record_trims_fields_and_derives_id_from_timestamp() {
        let now = march_first_noon();
        let task = TaskRecord::new("  Buy milk ", "\n2 liters\t", now);

        assert_eq!(task.id, 1_709_294_400_000);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.note, "2 liters");
        assert!(!task.completed);
        assert_eq!(task.created_at, Some(now));
    }

    #[test]
    fn snapshot_fields_use_camel_case_and_skip_missing_timestamp() {
        let task = TaskRecord {
            id: 7,
            title: "a".to_string(),
            note: "b".to_string(),
            completed: true,
            created_at: None,
        };

        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "title": "a",
                "note": "b",
                "completed": true
            })
        );
    }

    #[test]
    fn missing_completed_flag_defaults_to_false() {
        let raw = r#"{"id":1,"title":"t","note":"n","createdAt":"2024-03-01T12:00:00Z"}"#;
        let task: TaskRecord = serde_json::from_str(raw).expect("deserialize");

        assert!(!task.completed);
        assert_eq!(task.created_at, Some(march_first_noon()));
    }

    #[test]
    fn blank_detection_ignores_surrounding_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }
}
