use serde::{Deserialize, Serialize};

use super::task::{Notation, Task};

/// Which notation a task receives when its duration is both the fastest and
/// the slowest among completed tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiePrecedence {
    #[default]
    Record,
    Worst,
}

/// Re-ranks every task from the current set of completed durations.
///
/// Incomplete tasks lose any notation. Completed tasks without a duration are
/// left out of the min/max and marked neutral. Ties share the notation.
pub fn annotate(tasks: &mut [Task], precedence: TiePrecedence) {
    let ranked = tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.duration);
    let bounds = ranked.fold(None, |acc: Option<(i64, i64)>, d| match acc {
        None => Some((d, d)),
        Some((min, max)) => Some((min.min(d), max.max(d))),
    });

    for task in tasks.iter_mut() {
        let notation = if task.completed {
            Some(match (task.duration, bounds) {
                (Some(d), Some((min, max))) => rank(d, min, max, precedence),
                _ => Notation::Neutral,
            })
        } else {
            None
        };
        task.annotate(notation);
    }
}

fn rank(duration: i64, min: i64, max: i64, precedence: TiePrecedence) -> Notation {
    let fastest = duration == min;
    let slowest = duration == max;
    match (fastest, slowest, precedence) {
        (true, true, TiePrecedence::Record) => Notation::Record,
        (true, true, TiePrecedence::Worst) => Notation::Worst,
        (true, false, _) => Notation::Record,
        (false, true, _) => Notation::Worst,
        (false, false, _) => Notation::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(completed: bool, duration: Option<i64>) -> Task {
        let mut t = Task::new("t", Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        t.completed = completed;
        t.duration = duration;
        t
    }

    fn notations(tasks: &[Task]) -> Vec<Option<Notation>> {
        tasks.iter().map(|t| t.notation()).collect()
    }

    #[test]
    fn min_is_record_and_tied_max_is_worst() {
        let mut tasks = vec![
            task(true, Some(100)),
            task(true, Some(500)),
            task(true, Some(500)),
        ];
        annotate(&mut tasks, TiePrecedence::Record);
        assert_eq!(
            notations(&tasks),
            vec![Some(Notation::Record), Some(Notation::Worst), Some(Notation::Worst)]
        );
    }

    #[test]
    fn middle_durations_are_neutral() {
        let mut tasks = vec![
            task(true, Some(300)),
            task(true, Some(100)),
            task(true, Some(900)),
        ];
        annotate(&mut tasks, TiePrecedence::Record);
        assert_eq!(tasks[0].notation(), Some(Notation::Neutral));
        assert_eq!(tasks[0].style(), Some("#4b4b4b"));
    }

    #[test]
    fn incomplete_tasks_are_cleared() {
        let mut tasks = vec![task(false, Some(50)), task(true, Some(100))];
        tasks[0].annotate(Some(Notation::Record));
        annotate(&mut tasks, TiePrecedence::Record);
        assert_eq!(tasks[0].notation(), None);
        assert_eq!(tasks[0].style(), None);
        assert_eq!(tasks[1].notation(), Some(Notation::Record));
    }

    #[test]
    fn single_completed_task_follows_precedence() {
        let mut tasks = vec![task(true, Some(700))];
        annotate(&mut tasks, TiePrecedence::Record);
        assert_eq!(tasks[0].notation(), Some(Notation::Record));
        annotate(&mut tasks, TiePrecedence::Worst);
        assert_eq!(tasks[0].notation(), Some(Notation::Worst));
    }

    #[test]
    fn completed_without_duration_is_neutral_and_unranked() {
        let mut tasks = vec![task(true, None), task(true, Some(10)), task(true, Some(20))];
        annotate(&mut tasks, TiePrecedence::Record);
        assert_eq!(
            notations(&tasks),
            vec![Some(Notation::Neutral), Some(Notation::Record), Some(Notation::Worst)]
        );
    }

    #[test]
    fn nothing_completed_leaves_no_notation() {
        let mut tasks = vec![task(false, Some(10)), task(false, None)];
        annotate(&mut tasks, TiePrecedence::Worst);
        assert_eq!(notations(&tasks), vec![None, None]);
    }
}
