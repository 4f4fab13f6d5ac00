//! Serde shapes for persisted board content, current and legacy.
//!
//! The data store treats page content as opaque JSON; these types are the
//! only place in the crate that knows what has historically been written
//! there. Everything after load works on [`Board`] alone.

use crate::board::domain::{
    AccentColor, Attachment, Board, Column, ColumnId, Comment, IssueType, Priority, Task, TaskId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current persisted shape: flat ordered arrays, serialised straight from
/// domain records.
#[derive(Debug, Serialize)]
pub(crate) struct EncodedContent<'a> {
    pub(crate) columns: &'a [Column],
    pub(crate) tasks: &'a [Task],
}

/// Current persisted shape on the way in. Tasks decode through [`RawTask`]
/// so the deprecated `content` field can be folded into `summary`.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentContent {
    pub(crate) columns: Vec<Column>,
    pub(crate) tasks: Vec<RawTask>,
}

/// A task as persisted, including the deprecated `content` summary field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTask {
    id: TaskId,
    column_id: ColumnId,
    #[serde(default)]
    summary: Option<String>,
    /// Pre-`summary` field; renamed into `summary` when that is absent.
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    issue_type: Option<IssueType>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl RawTask {
    /// Converts into a domain task, folding `content` into `summary`.
    pub(crate) fn into_task(self) -> Task {
        let summary = self
            .summary
            .or(self.content)
            .unwrap_or_else(|| Task::PLACEHOLDER_SUMMARY.to_owned());
        Task {
            id: self.id,
            column_id: self.column_id,
            summary,
            description: self.description,
            issue_type: self.issue_type,
            assignee: self.assignee,
            start_date: self.start_date,
            end_date: self.end_date,
            priority: self.priority,
            comments: self.comments,
            attachments: self.attachments,
        }
    }
}

/// Historical object-keyed shape: columns by id plus an explicit order
/// array, tasks by id with per-column membership lists.
#[derive(Debug, Deserialize)]
pub(crate) struct LegacyContent {
    columns: BTreeMap<String, LegacyColumn>,
    #[serde(default)]
    tasks: Option<BTreeMap<String, LegacyTask>>,
    #[serde(rename = "columnOrder")]
    column_order: Vec<String>,
}

/// A column in the historical shape.
#[derive(Debug, Deserialize)]
struct LegacyColumn {
    id: String,
    title: String,
    #[serde(rename = "taskIds", default)]
    task_ids: Vec<String>,
}

/// A task in the historical shape.
#[derive(Debug, Deserialize)]
struct LegacyTask {
    id: String,
    #[serde(default)]
    content: Option<String>,
}

impl LegacyTask {
    /// Builds a domain task owned by `column_id` from the legacy record.
    fn into_task(self, column_id: ColumnId) -> Task {
        let mut task = Task::new(column_id);
        task.id = TaskId::new(self.id);
        task.summary = self
            .content
            .unwrap_or_else(|| Task::PLACEHOLDER_SUMMARY.to_owned());
        task
    }
}

impl LegacyContent {
    /// Rebuilds a board from the historical shape.
    ///
    /// Columns materialise in `columnOrder` order with fresh accent colours;
    /// each column's `taskIds` list fixes the within-column task order.
    /// Tasks referenced by no column are assigned to the first ordered
    /// column rather than dropped. Order entries naming a missing column
    /// are skipped.
    pub(crate) fn into_board(self) -> Board {
        let mut columns = Vec::new();
        for key in &self.column_order {
            if let Some(legacy) = self.columns.get(key) {
                let id = ColumnId::new(legacy.id.clone());
                let color = AccentColor::for_column(&id);
                columns.push(Column::from_parts(id, legacy.title.clone(), Some(color)));
            }
        }

        let mut task_map = self.tasks.unwrap_or_default();
        let mut tasks = Vec::new();
        for key in &self.column_order {
            let Some(legacy) = self.columns.get(key) else {
                continue;
            };
            let owner = ColumnId::new(legacy.id.clone());
            for task_id in &legacy.task_ids {
                // remove() also guards against a task id claimed twice
                if let Some(raw) = task_map.remove(task_id) {
                    tasks.push(raw.into_task(owner.clone()));
                }
            }
        }

        // Tasks no taskIds list claimed: park them in the first column.
        if let Some(first) = columns.first().map(|column| column.id.clone()) {
            for raw in task_map.into_values() {
                tasks.push(raw.into_task(first.clone()));
            }
        }

        Board::new(columns, tasks)
    }
}
