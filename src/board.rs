//! Task list orchestration.
//!
//! `TaskBoard` pulls tasks from the repository, applies the active search
//! filter and sort, and produces the grouped view model. It also owns the
//! notification side effects: due reminders on refresh, cancellation on
//! completion and deletion, and nearby alerts on location updates.
//! Scheduling failures are logged and never fail the triggering operation.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::Result;
use crate::notify::{notification_id, NotificationRequest, Notifier};
use crate::organizer::{filter_tasks, organize, GroupedTasks, SortCriteria};
use crate::proximity::{find_nearby, Coordinates};
use crate::store::TaskStore;
use crate::task::Task;

pub struct TaskBoard {
    store: TaskStore,
    tasks: Vec<Task>,
    query: String,
    sort: SortCriteria,
}

impl TaskBoard {
    pub fn new(store: TaskStore, sort: SortCriteria) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            query: String::new(),
            sort,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Re-fetch the full task set from the repository
    pub fn refresh(&mut self) -> Result<()> {
        self.tasks = self.store.fetch_all()?;
        Ok(())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.sort = sort;
    }

    /// The filtered working set, in repository order
    pub fn working_set(&self) -> Vec<Task> {
        filter_tasks(&self.tasks, &self.query)
    }

    /// Sorted, grouped view of the working set
    pub fn grouped(&self, now: NaiveDateTime) -> GroupedTasks {
        organize(&self.working_set(), self.sort, now)
    }

    /// Schedule a due reminder for every working-set task that has a due
    /// instant. Returns how many requests were emitted.
    pub fn schedule_reminders(&self, notifier: &mut dyn Notifier, now: NaiveDateTime) -> usize {
        let mut scheduled = 0;
        for task in self.working_set() {
            let status = task.status_at(now);
            let Some(request) = NotificationRequest::due_reminder(&task, status) else {
                continue;
            };
            match notifier.schedule(&request) {
                Ok(()) => scheduled += 1,
                Err(err) => warn!(task = %task.id, "failed to schedule reminder: {err}"),
            }
        }
        scheduled
    }

    /// Toggle completion. Completing a task cancels its reminder.
    pub fn toggle_complete(&mut self, id: &str, notifier: &mut dyn Notifier) -> Result<Task> {
        let task = self.store.toggle_complete(id)?;
        if task.is_complete {
            if let Err(err) = notifier.cancel(&notification_id(&task.id)) {
                warn!(task = %task.id, "failed to cancel reminder: {err}");
            }
        }
        self.refresh()?;
        Ok(task)
    }

    /// Delete a task and cancel its reminder.
    pub fn delete(&mut self, id: &str, notifier: &mut dyn Notifier) -> Result<()> {
        self.store.delete(id)?;
        if let Err(err) = notifier.cancel(&notification_id(id)) {
            warn!(task = %id, "failed to cancel reminder: {err}");
        }
        self.refresh()
    }

    /// Process one location update: emit a nearby alert for every
    /// working-set task within the threshold, and return their ids.
    ///
    /// Every update re-alerts for tasks still in range; there is no
    /// cooldown.
    pub fn on_location_update(
        &self,
        user: Coordinates,
        threshold_m: f64,
        notifier: &mut dyn Notifier,
    ) -> Vec<String> {
        let working = self.working_set();
        let mut alerted = Vec::new();
        for task in find_nearby(&working, user, threshold_m) {
            let request = NotificationRequest::nearby_alert(task);
            match notifier.schedule(&request) {
                Ok(()) => alerted.push(task.id.clone()),
                Err(err) => warn!(task = %task.id, "failed to send nearby alert: {err}"),
            }
        }
        alerted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdConfig;
    use crate::notify::MemoryNotifier;
    use crate::place::Place;
    use crate::storage::Storage;
    use crate::store::TaskDraft;
    use crate::task::{Category, Priority, TaskStatus};
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn board(temp: &TempDir) -> TaskBoard {
        let store = TaskStore::new(Storage::at(temp.path().to_path_buf()), IdConfig::default());
        TaskBoard::new(store, SortCriteria::DueDate)
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn overdue_complete_delete_walkthrough() {
        let temp = TempDir::new().unwrap();
        let mut board = board(&temp);
        let mut notifier = MemoryNotifier::default();

        let created = board
            .store()
            .create(TaskDraft {
                title: "Yesterday's errand".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 8, 5),
                due_time: NaiveTime::from_hms_opt(9, 0, 0),
                ..TaskDraft::default()
            })
            .unwrap();
        board.refresh().unwrap();

        let task = &board.working_set()[0];
        assert_eq!(task.status_at(now()), TaskStatus::Overdue);

        let completed = board.toggle_complete(&created.id, &mut notifier).unwrap();
        assert_eq!(completed.status_at(now()), TaskStatus::Complete);
        assert_eq!(notifier.cancelled.len(), 1);

        board.delete(&created.id, &mut notifier).unwrap();
        assert!(board.working_set().is_empty());
        assert!(board.store().fetch_all().unwrap().is_empty());
    }

    #[test]
    fn reopening_does_not_cancel() {
        let temp = TempDir::new().unwrap();
        let mut board = board(&temp);
        let mut notifier = MemoryNotifier::default();

        let created = board
            .store()
            .create(TaskDraft {
                title: "Toggle twice".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
        board.refresh().unwrap();

        board.toggle_complete(&created.id, &mut notifier).unwrap();
        board.toggle_complete(&created.id, &mut notifier).unwrap();
        // Only the completing toggle cancels.
        assert_eq!(notifier.cancelled.len(), 1);
    }

    #[test]
    fn reminders_cover_only_tasks_with_due_instants() {
        let temp = TempDir::new().unwrap();
        let mut board = board(&temp);
        let mut notifier = MemoryNotifier::default();

        board
            .store()
            .create(TaskDraft {
                title: "Dated".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 8, 8),
                due_time: NaiveTime::from_hms_opt(10, 30, 0),
                ..TaskDraft::default()
            })
            .unwrap();
        board
            .store()
            .create(TaskDraft {
                title: "Date only".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 8, 8),
                ..TaskDraft::default()
            })
            .unwrap();
        board
            .store()
            .create(TaskDraft {
                title: "Undated".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
        board.refresh().unwrap();

        let scheduled = board.schedule_reminders(&mut notifier, now());
        assert_eq!(scheduled, 1);
        assert_eq!(notifier.scheduled[0].title, "Dated");
    }

    #[test]
    fn search_filter_narrows_the_working_set() {
        let temp = TempDir::new().unwrap();
        let mut board = board(&temp);

        board
            .store()
            .create(TaskDraft {
                title: "Water the plants".to_string(),
                category: Some(Category::Personal),
                ..TaskDraft::default()
            })
            .unwrap();
        board
            .store()
            .create(TaskDraft {
                title: "Quarterly review".to_string(),
                category: Some(Category::Work),
                priority: Priority::High,
                ..TaskDraft::default()
            })
            .unwrap();
        board.refresh().unwrap();

        board.set_query("plants");
        assert_eq!(board.working_set().len(), 1);

        let grouped = board.grouped(now());
        assert_eq!(grouped.section_names(), vec!["Personal"]);

        board.set_query("");
        assert_eq!(board.working_set().len(), 2);
    }

    #[test]
    fn location_update_alerts_each_task_in_range() {
        let temp = TempDir::new().unwrap();
        let mut board = board(&temp);
        let mut notifier = MemoryNotifier::default();

        board
            .store()
            .create(TaskDraft {
                title: "Pick up parcel".to_string(),
                place: Some(Place {
                    name: "Post office".to_string(),
                    latitude: 40.0,
                    longitude: 20.0,
                }),
                ..TaskDraft::default()
            })
            .unwrap();
        board
            .store()
            .create(TaskDraft {
                title: "No place".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
        board.refresh().unwrap();

        let user = Coordinates::new(40.0001, 20.0);
        let alerted = board.on_location_update(user, 100.0, &mut notifier);
        assert_eq!(alerted.len(), 1);
        assert_eq!(notifier.scheduled.len(), 1);

        // A second update in range re-alerts; there is no cooldown.
        board.on_location_update(user, 100.0, &mut notifier);
        assert_eq!(notifier.scheduled.len(), 2);
    }
}
