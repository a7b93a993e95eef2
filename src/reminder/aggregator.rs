use super::classifier::{DueDateClassifier, Urgency};
use crate::calendar::CalendarOracle;
use crate::error::ClassifyError;
use crate::task::{Importance, Task};
use chrono::NaiveDate;
use std::fmt;
use tracing::{error, warn};

/// Display buckets of the reminder panel, in panel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    NeedsTodayCompletion,
    DueToday,
    DueTomorrow,
    DueDayAfterTomorrow,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::NeedsTodayCompletion,
        Bucket::DueToday,
        Bucket::DueTomorrow,
        Bucket::DueDayAfterTomorrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::NeedsTodayCompletion => "NeedsTodayCompletion",
            Bucket::DueToday => "DueToday",
            Bucket::DueTomorrow => "DueTomorrow",
            Bucket::DueDayAfterTomorrow => "DueDayAfterTomorrow",
        }
    }

    /// Header shown above the bucket in the rendered panel
    pub fn title(self) -> &'static str {
        match self {
            Bucket::NeedsTodayCompletion => "Needs completion today",
            Bucket::DueToday => "Due today",
            Bucket::DueTomorrow => "Due tomorrow",
            Bucket::DueDayAfterTomorrow => "Due day after tomorrow",
        }
    }

    /// Whether task lines in this bucket carry their due date
    pub fn shows_due_date(self) -> bool {
        !matches!(self, Bucket::NeedsTodayCompletion | Bucket::DueToday)
    }

    /// Route a classified task to its bucket; `None` keeps it off the panel
    ///
    /// Urgent tasks due today or tomorrow join the holiday-block tasks in
    /// `NeedsTodayCompletion`. Overdue tasks belong to the overdue listing.
    pub fn route(importance: Importance, urgency: Urgency) -> Option<Bucket> {
        match (importance, urgency) {
            (
                Importance::Urgent,
                Urgency::NeedsTodayCompletion | Urgency::DueToday | Urgency::DueTomorrow,
            ) => Some(Bucket::NeedsTodayCompletion),
            (_, Urgency::DueToday) => Some(Bucket::DueToday),
            (_, Urgency::DueTomorrow) => Some(Bucket::DueTomorrow),
            (_, Urgency::DueDayAfterTomorrow) => Some(Bucket::DueDayAfterTomorrow),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A task as listed on the reminder panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    pub due_date: String,
    /// Show the due date after the name
    pub show_due_date: bool,
}

impl TaskView {
    fn new(task: &Task, bucket: Bucket) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            importance: task.importance,
            due_date: task.due_date.clone(),
            show_due_date: bucket.shows_due_date(),
        }
    }

    pub fn marker(&self) -> &'static str {
        self.importance.marker()
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.name)?;
        if self.show_due_date {
            write!(f, " ({})", self.due_date)?;
        }
        Ok(())
    }
}

/// Ordered bucket → tasks mapping; empty buckets are never stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPanel {
    sections: Vec<(Bucket, Vec<TaskView>)>,
}

impl ReminderPanel {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Non-empty buckets in panel order
    pub fn buckets(&self) -> Vec<Bucket> {
        self.sections.iter().map(|(b, _)| *b).collect()
    }

    pub fn bucket_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|(b, _)| b.name()).collect()
    }

    pub fn get(&self, bucket: Bucket) -> Option<&[TaskView]> {
        self.sections
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, tasks)| tasks.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[TaskView])> {
        self.sections.iter().map(|(b, tasks)| (*b, tasks.as_slice()))
    }

    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|(_, tasks)| tasks.len()).sum()
    }
}

/// A task left out of a pass because its record could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTask {
    pub id: String,
    pub name: String,
    pub error: ClassifyError,
}

/// Tasks a pass had to leave out, split by cause
#[derive(Debug, Default)]
struct Omissions {
    skipped: Vec<SkippedTask>,
    faults: Vec<SkippedTask>,
}

impl Omissions {
    fn record(&mut self, task: &Task, e: ClassifyError) {
        let entry = SkippedTask {
            id: task.id.clone(),
            name: task.name.clone(),
            error: e,
        };
        if entry.error.is_configuration_fault() {
            error!(
                task = %task.id,
                name = %task.name,
                "holiday calendar misconfigured: {}",
                entry.error
            );
            self.faults.push(entry);
        } else {
            warn!(task = %task.id, name = %task.name, "skipping task: {}", entry.error);
            self.skipped.push(entry);
        }
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub panel: ReminderPanel,
    /// Tasks whose stored due date does not parse
    pub skipped: Vec<SkippedTask>,
    /// Tasks whose workday lookup hit a calendar configuration fault
    pub faults: Vec<SkippedTask>,
}

/// Build the reminder panel for the pending tasks in `tasks`
///
/// Tasks keep their input order within a bucket. A task that cannot be
/// classified is logged and left out, and the rest of the panel is still
/// built: malformed due dates land in `skipped`, calendar faults such as an
/// exhausted workday search land in `faults`.
pub fn aggregate<'a, O, I>(
    classifier: &DueDateClassifier<O>,
    tasks: I,
    today: NaiveDate,
) -> AggregateReport
where
    O: CalendarOracle,
    I: IntoIterator<Item = &'a Task>,
{
    let mut grouped: [Vec<TaskView>; 4] = Default::default();
    let mut omissions = Omissions::default();

    for task in tasks.into_iter().filter(|t| t.is_pending()) {
        let verdict = match classifier.classify_raw(&task.due_date, task.importance, today) {
            Ok(v) => v,
            Err(e) => {
                omissions.record(task, e);
                continue;
            }
        };

        if let Some(bucket) = Bucket::route(task.importance, verdict.urgency) {
            grouped[bucket as usize].push(TaskView::new(task, bucket));
        }
    }

    let sections = Bucket::ALL
        .into_iter()
        .zip(grouped)
        .filter(|(_, tasks)| !tasks.is_empty())
        .collect();

    AggregateReport {
        panel: ReminderPanel { sections },
        skipped: omissions.skipped,
        faults: omissions.faults,
    }
}

/// Result of one overdue listing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverdueReport<'a> {
    pub tasks: Vec<&'a Task>,
    pub skipped: Vec<SkippedTask>,
    pub faults: Vec<SkippedTask>,
}

/// Pending tasks whose due date has passed, in input order
///
/// Tasks that cannot be classified are reported the same way `aggregate`
/// reports them.
pub fn overdue<'a, O, I>(
    classifier: &DueDateClassifier<O>,
    tasks: I,
    today: NaiveDate,
) -> OverdueReport<'a>
where
    O: CalendarOracle,
    I: IntoIterator<Item = &'a Task>,
{
    let mut result = Vec::new();
    let mut omissions = Omissions::default();
    for task in tasks.into_iter().filter(|t| t.is_pending()) {
        match classifier.classify_raw(&task.due_date, task.importance, today) {
            Ok(v) if v.urgency == Urgency::Overdue => result.push(task),
            Ok(_) => {}
            Err(e) => omissions.record(task, e),
        }
    }
    OverdueReport {
        tasks: result,
        skipped: omissions.skipped,
        faults: omissions.faults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{HolidayCalendar, WeekendCalendar};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, due: NaiveDate, importance: Importance) -> Task {
        Task::new(id, id, due, importance, None, date(2024, 3, 1)).unwrap()
    }

    #[test]
    fn test_route_table() {
        use Importance::*;
        assert_eq!(
            Bucket::route(Urgent, Urgency::NeedsTodayCompletion),
            Some(Bucket::NeedsTodayCompletion)
        );
        assert_eq!(
            Bucket::route(Urgent, Urgency::DueToday),
            Some(Bucket::NeedsTodayCompletion)
        );
        assert_eq!(
            Bucket::route(Urgent, Urgency::DueTomorrow),
            Some(Bucket::NeedsTodayCompletion)
        );
        assert_eq!(
            Bucket::route(Urgent, Urgency::DueDayAfterTomorrow),
            Some(Bucket::DueDayAfterTomorrow)
        );
        assert_eq!(Bucket::route(Normal, Urgency::DueToday), Some(Bucket::DueToday));
        assert_eq!(
            Bucket::route(Important, Urgency::DueTomorrow),
            Some(Bucket::DueTomorrow)
        );
        assert_eq!(Bucket::route(Urgent, Urgency::Overdue), None);
        assert_eq!(Bucket::route(Normal, Urgency::None), None);
    }

    #[test]
    fn test_panel_order_and_insertion_order() {
        let today = date(2024, 3, 11); // Monday
        let tasks = vec![
            task("late", date(2024, 3, 13), Importance::Normal),
            task("today-a", today, Importance::Normal),
            task("overdue", date(2024, 3, 8), Importance::Normal),
            task("tomorrow", date(2024, 3, 12), Importance::Important),
            task("today-b", today, Importance::Important),
            task("urgent", date(2024, 3, 12), Importance::Urgent),
        ];
        let classifier = DueDateClassifier::new(WeekendCalendar);

        let report = aggregate(&classifier, &tasks, today);
        let panel = report.panel;

        assert!(report.skipped.is_empty());
        assert_eq!(
            panel.bucket_names(),
            vec!["NeedsTodayCompletion", "DueToday", "DueTomorrow", "DueDayAfterTomorrow"]
        );
        let names = |b| {
            panel
                .get(b)
                .unwrap()
                .iter()
                .map(|v| v.name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(Bucket::NeedsTodayCompletion), vec!["urgent"]);
        assert_eq!(names(Bucket::DueToday), vec!["today-a", "today-b"]);
        assert_eq!(names(Bucket::DueTomorrow), vec!["tomorrow"]);
        assert_eq!(names(Bucket::DueDayAfterTomorrow), vec!["late"]);
        assert_eq!(panel.task_count(), 5);
    }

    #[test]
    fn test_task_view_rendering() {
        let today = date(2024, 3, 11);
        let tasks = vec![
            task("Ship release", date(2024, 3, 12), Importance::Urgent),
            task("Renew badge", date(2024, 3, 12), Importance::Normal),
        ];
        let classifier = DueDateClassifier::new(WeekendCalendar);
        let panel = aggregate(&classifier, &tasks, today).panel;

        let urgent = &panel.get(Bucket::NeedsTodayCompletion).unwrap()[0];
        assert_eq!(urgent.to_string(), "★ Ship release");
        let normal = &panel.get(Bucket::DueTomorrow).unwrap()[0];
        assert_eq!(normal.to_string(), "• Renew badge (2024-03-12)");
    }

    #[test]
    fn test_completed_tasks_are_ignored() {
        let today = date(2024, 3, 11);
        let mut done = task("done", today, Importance::Normal);
        done.complete(today.and_hms_opt(8, 0, 0).unwrap()).unwrap();
        let tasks = vec![done];
        let classifier = DueDateClassifier::new(WeekendCalendar);

        let report = aggregate(&classifier, &tasks, today);
        assert!(report.panel.is_empty());
        assert!(overdue(&classifier, &tasks, date(2024, 3, 20)).tasks.is_empty());
    }

    #[test]
    fn test_overdue_listing() {
        let today = date(2024, 3, 11);
        let tasks = vec![
            task("a", date(2024, 3, 1), Importance::Normal),
            task("b", today, Importance::Normal),
            task("c", date(2024, 3, 4), Importance::Urgent),
        ];
        let classifier = DueDateClassifier::new(WeekendCalendar);

        let report = overdue(&classifier, &tasks, today);
        assert!(report.skipped.is_empty());
        let ids: Vec<&str> = report
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_overdue_reports_malformed_dates() {
        let today = date(2024, 3, 11);
        let mut broken = task("broken", today, Importance::Normal);
        broken.due_date = "last friday".to_string();
        let tasks = vec![broken, task("late", date(2024, 3, 5), Importance::Normal)];
        let classifier = DueDateClassifier::new(WeekendCalendar);

        let report = overdue(&classifier, &tasks, today);
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].id, "late");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, "broken");
        assert!(report.faults.is_empty());
    }

    #[test]
    fn test_calendar_fault_leaves_other_tasks_listed() {
        let mut calendar = HolidayCalendar::new();
        let mut day = date(2025, 1, 1);
        while day <= date(2026, 12, 31) {
            calendar.set_day(day, false, None);
            day = day.succ_opt().unwrap();
        }
        let today = date(2024, 3, 13);
        let tasks = vec![
            task("year end", date(2026, 12, 31), Importance::Urgent),
            task("standup", today, Importance::Normal),
        ];
        let classifier = DueDateClassifier::new(&calendar);

        let report = aggregate(&classifier, &tasks, today);
        assert_eq!(report.panel.bucket_names(), vec!["DueToday"]);
        assert_eq!(report.panel.get(Bucket::DueToday).unwrap()[0].id, "standup");
        assert!(report.skipped.is_empty());
        assert_eq!(report.faults.len(), 1);
        assert_eq!(report.faults[0].id, "year end");
        assert!(report.faults[0].error.is_configuration_fault());

        let late = overdue(&classifier, &tasks, today);
        assert!(late.tasks.is_empty());
        assert_eq!(late.faults.len(), 1);
    }
}
