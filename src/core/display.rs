use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use super::task::Task;

static SENTENCE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII word characters only: accented initials stay as typed
    Regex::new(r"^(?-u:\w)|\.\s*(?-u:\w)").unwrap()
});

/// `days:hours:minutes:seconds`, unpadded.
pub fn format_duration(millis: i64) -> String {
    let total_secs = millis.max(0) / 1000;
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;
    let days = total_secs / 86_400;
    format!("{}:{}:{}:{}", days, hours, minutes, seconds)
}

/// Uppercases the first letter of the text and of every sentence after a period.
pub fn capitalize(text: &str) -> String {
    SENTENCE_START_RE
        .replace_all(text, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Parses `#rrggbb`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Everything a task row shows, derived from one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: Uuid,
    pub index: usize,
    pub label: String,
    pub completed: bool,
    pub duration: String,
    pub notation: Option<&'static str>,
    pub color: Option<(u8, u8, u8)>,
}

impl TaskRow {
    pub fn build(index: usize, task: &Task) -> Self {
        let duration = match task.duration {
            Some(ms) if ms != 0 => format_duration(ms),
            _ => String::new(),
        };
        Self {
            id: task.id,
            index,
            label: capitalize(&task.description),
            completed: task.completed,
            duration,
            notation: task
                .notation()
                .map(|n| n.as_label())
                .filter(|label| !label.is_empty()),
            color: task.style().and_then(parse_hex_color),
        }
    }
}

pub fn build_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| TaskRow::build(i, task))
        .collect()
}
