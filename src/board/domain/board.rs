//! Board aggregate: ordered columns and tasks with referential integrity.
//!
//! Every mutation preserves two invariants: each task's `column_id` names an
//! existing column, and column/task ids stay unique. Mutations referencing a
//! missing id are no-ops (never an error, never a partial application) so
//! UI-driven event races such as delete-then-edit stay harmless.

use super::{AccentColor, Column, ColumnId, IssueType, Priority, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Moves one element of `items` from `from` to `to`, clamping `to` to the
/// post-removal bounds. Out-of-range `from` is a no-op.
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let clamped = to.min(items.len());
    items.insert(clamped, item);
}

/// The columns-and-tasks aggregate for one kanban page.
///
/// Column order is left-to-right display order. Task order within a column
/// is top-to-bottom display order; positions of tasks across columns carry
/// no meaning but stay stable under same-column splicing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl Board {
    /// Assembles a board from already-validated parts.
    ///
    /// Callers (the content loader, tests) are responsible for handing over
    /// tasks whose `column_id`s reference the given columns.
    #[must_use]
    pub const fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// Builds the fixed default board seeded into first-time pages.
    #[must_use]
    pub fn starter() -> Self {
        let todo = ColumnId::new("todo");
        let inprogress = ColumnId::new("inprogress");
        let review = ColumnId::new("review");
        let done = ColumnId::new("done");

        let columns = vec![
            Column::from_parts(todo.clone(), "Backlog", Some(AccentColor::new("#6B7280"))),
            Column::from_parts(
                inprogress.clone(),
                "In Progress",
                Some(AccentColor::new("#3B82F6")),
            ),
            Column::from_parts(
                review.clone(),
                "In Review",
                Some(AccentColor::new("#F97316")),
            ),
            Column::from_parts(done, "Done", Some(AccentColor::new("#16A34A"))),
        ];

        let seed = |column: &ColumnId, summary: &str, priority: Priority, issue: IssueType| {
            let mut task = Task::new(column.clone());
            task.summary = summary.to_owned();
            task.priority = Some(priority);
            task.issue_type = Some(issue);
            task
        };

        let tasks = vec![
            seed(&todo, "Project setup", Priority::High, IssueType::Task),
            seed(
                &todo,
                "Develop main feature",
                Priority::High,
                IssueType::Story,
            ),
            seed(
                &inprogress,
                "Testing and QA",
                Priority::Medium,
                IssueType::Bug,
            ),
            seed(
                &review,
                "Code review for feature",
                Priority::Medium,
                IssueType::FeatureRequest,
            ),
        ];

        Self { columns, tasks }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the flat task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a column by id.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == *id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    /// Mutable task lookup for in-place field edits (comments, summary).
    ///
    /// Crate-internal: callers must not rewrite `column_id` through this;
    /// that is what [`Self::set_task_column`] is for.
    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == *id)
    }

    /// Returns the tasks of one column in display order.
    pub fn tasks_in<'a>(&'a self, column_id: &'a ColumnId) -> impl Iterator<Item = &'a Task> {
        self.tasks
            .iter()
            .filter(move |task| task.column_id == *column_id)
    }

    /// Returns the index of a column in the flat column list.
    #[must_use]
    pub fn column_position(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id == *id)
    }

    /// Returns the index of a task in the flat task list.
    #[must_use]
    pub fn task_position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == *id)
    }

    /// Replaces the task with a matching id.
    ///
    /// No-op when the id is unknown, or when the replacement would orphan
    /// the task by naming a column that does not exist. Returns `true` when
    /// the replacement was applied.
    pub fn update_task_details(&mut self, updated: Task) -> bool {
        if self.column(&updated.column_id).is_none() {
            return false;
        }
        let Some(slot) = self.tasks.iter_mut().find(|task| task.id == updated.id) else {
            return false;
        };
        *slot = updated;
        true
    }

    /// Removes the task with a matching id. Returns `true` when removed.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != *id);
        self.tasks.len() != before
    }

    /// Sets the title of a matching column. Returns `true` when applied.
    pub fn rename_column(&mut self, id: &ColumnId, title: &str) -> bool {
        let Some(column) = self.columns.iter_mut().find(|column| column.id == *id) else {
            return false;
        };
        column.title = title.to_owned();
        true
    }

    /// Removes a column and every task that references it.
    ///
    /// The cascade is what keeps the no-orphans invariant: a task is never
    /// left pointing at a deleted column. Returns `true` when the column
    /// existed.
    pub fn delete_column(&mut self, id: &ColumnId) -> bool {
        let before = self.columns.len();
        self.columns.retain(|column| column.id != *id);
        if self.columns.len() == before {
            return false;
        }
        self.tasks.retain(|task| task.column_id != *id);
        true
    }

    /// Appends a new column with a fresh id, trimmed title, and a palette
    /// accent. Returns the new column's id.
    pub fn add_column(&mut self, title: &str) -> ColumnId {
        let column = Column::new(title);
        let id = column.id.clone();
        self.columns.push(column);
        id
    }

    /// Appends a new placeholder task to the given column.
    ///
    /// Returns the new task's id, or `None` (no-op) when the column does not
    /// exist; appending to a ghost column would break the membership
    /// invariant.
    pub fn add_task(&mut self, column_id: &ColumnId) -> Option<TaskId> {
        self.column(column_id)?;
        let task = Task::new(column_id.clone());
        let id = task.id.clone();
        self.tasks.push(task);
        Some(id)
    }

    /// Reassigns a task to another existing column, keeping its position in
    /// the flat list. Returns `true` when applied.
    pub fn set_task_column(&mut self, task_id: &TaskId, column_id: &ColumnId) -> bool {
        if self.column(column_id).is_none() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == *task_id) else {
            return false;
        };
        task.column_id = column_id.clone();
        true
    }

    /// Moves a task between positions in the flat task list.
    pub fn move_task(&mut self, from: usize, to: usize) {
        array_move(&mut self.tasks, from, to);
    }

    /// Moves a column between positions in the flat column list.
    pub fn move_column(&mut self, from: usize, to: usize) {
        array_move(&mut self.columns, from, to);
    }

    /// Returns the ids of tasks whose column no longer exists.
    ///
    /// Always empty when only this type's mutations have been applied;
    /// exposed so tests and debug assertions can state the invariant.
    #[must_use]
    pub fn orphaned_tasks(&self) -> Vec<&TaskId> {
        self.tasks
            .iter()
            .filter(|task| self.column(&task.column_id).is_none())
            .map(|task| &task.id)
            .collect()
    }
}
