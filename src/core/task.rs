use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ranking of a completed task among all completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    #[serde(rename = "RECORD")]
    Record,
    #[serde(rename = "WORST")]
    Worst,
    #[serde(rename = "")]
    Neutral,
}

impl Notation {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Record => "RECORD",
            Self::Worst => "WORST",
            Self::Neutral => "",
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Self::Record => "#3a997d",
            Self::Worst => "#c0684b",
            Self::Neutral => "#4b4b4b",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "task")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "startTime", with = "js_date")]
    pub start_time: DateTime<Utc>,
    /// Elapsed milliseconds, frozen once the task is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_notation")]
    notation: Option<Notation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
}

impl Task {
    pub fn new(description: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            completed: false,
            start_time: truncate_to_millis(now),
            duration: None,
            notation: None,
            style: None,
        }
    }

    /// Milliseconds since `start_time`, clamped at zero.
    pub fn elapsed(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_milliseconds().max(0)
    }

    pub fn notation(&self) -> Option<Notation> {
        self.notation
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Sets the notation together with its style so the two never drift.
    pub fn annotate(&mut self, notation: Option<Notation>) {
        self.notation = notation;
        self.style = notation.map(|n| n.style().to_string());
    }
}

/// Notations are recomputed after every load, so an unknown label is dropped
/// instead of failing the whole list.
fn lenient_notation<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<Notation>, D::Error> {
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

/// `startTime` as written by `JSON.stringify(new Date())`: `2024-03-01T09:30:00.000Z`.
mod js_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, millis: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, millis * 1_000_000).unwrap()
    }

    #[test]
    fn new_task_defaults() {
        let task = Task::new("buy milk", at(1_700_000_000, 0));
        assert_eq!(task.description, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.duration, None);
        assert_eq!(task.notation(), None);
        assert_eq!(task.style(), None);
    }

    #[test]
    fn start_time_is_truncated_to_millis() {
        let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let task = Task::new("x", precise);
        assert_eq!(task.start_time, at(1_700_000_000, 123));
    }

    #[test]
    fn elapsed_never_negative() {
        let task = Task::new("x", at(1_700_000_010, 0));
        assert_eq!(task.elapsed(at(1_700_000_000, 0)), 0);
        assert_eq!(task.elapsed(at(1_700_000_012, 500)), 2_500);
    }

    #[test]
    fn annotate_keeps_style_in_step() {
        let mut task = Task::new("x", at(0, 0));
        task.annotate(Some(Notation::Record));
        assert_eq!(task.style(), Some("#3a997d"));
        task.annotate(Some(Notation::Neutral));
        assert_eq!(task.style(), Some("#4b4b4b"));
        task.annotate(None);
        assert_eq!(task.style(), None);
    }

    #[test]
    fn json_uses_browser_field_names() {
        let mut task = Task::new("buy milk", at(1_709_285_400, 0));
        task.duration = Some(1_500);
        task.annotate(Some(Notation::Worst));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["task"], "buy milk");
        assert_eq!(value["completed"], false);
        assert_eq!(value["startTime"], "2024-03-01T09:30:00.000Z");
        assert_eq!(value["duration"], 1_500);
        assert_eq!(value["notation"], "WORST");
        assert_eq!(value["style"], "#c0684b");
    }

    #[test]
    fn parses_entry_without_id_or_transient_fields() {
        let raw = r#"{"task":"walk dog","completed":true,"startTime":"2024-03-01T09:30:00.250Z","duration":4200}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.description, "walk dog");
        assert!(task.completed);
        assert_eq!(task.start_time, at(1_709_285_400, 250));
        assert_eq!(task.duration, Some(4_200));
        assert_eq!(task.notation(), None);
        assert!(!task.id.is_nil());
    }

    #[test]
    fn unknown_notation_is_dropped() {
        let raw = r##"{"task":"a","completed":true,"startTime":"2024-03-01T09:30:00.000Z","notation":"BEST","style":"#000000"}"##;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.notation(), None);
        assert_eq!(task.description, "a");

        let raw = r#"{"task":"b","startTime":"2024-03-01T09:30:00.000Z","notation":7}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.notation(), None);
    }

    #[test]
    fn neutral_notation_is_empty_string() {
        let raw = r##"{"task":"a","completed":true,"startTime":"2024-03-01T09:30:00.000Z","notation":"","style":"#4b4b4b"}"##;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.notation(), Some(Notation::Neutral));
    }
}
