//! Drag-reorder engine: translates a pointer drag gesture into board
//! ordering mutations.
//!
//! Task reordering is applied live on every drag-over event so the board
//! gives continuous feedback; column reordering only commits on drop, which
//! is coarse enough for the handful of columns a board has. All operations
//! are local array splices: a missing id makes the event a no-op, never a
//! panic or a half-applied move.

use crate::board::domain::{Board, Column, ColumnId, Task, TaskId};
use std::mem;

/// Entity picked up at drag start, snapshotted for overlay rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    /// A whole column is being dragged.
    Column(Column),
    /// A single task is being dragged.
    Task(Task),
}

/// What the pointer is currently over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    /// Over another task card.
    Task(TaskId),
    /// Over a column surface (empty body, header, or footer).
    Column(ColumnId),
}

/// Gesture state between drag-start and drag-end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A column drag is in progress.
    DraggingColumn(Column),
    /// A task drag is in progress.
    DraggingTask(Task),
}

/// Consumes drag lifecycle events and applies ordering mutations.
#[derive(Debug, Clone, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    /// Creates an idle engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Returns the current gesture state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the dragged column snapshot, when a column drag is active.
    #[must_use]
    pub const fn active_column(&self) -> Option<&Column> {
        match &self.state {
            DragState::DraggingColumn(column) => Some(column),
            _ => None,
        }
    }

    /// Returns the dragged task snapshot, when a task drag is active.
    #[must_use]
    pub const fn active_task(&self) -> Option<&Task> {
        match &self.state {
            DragState::DraggingTask(task) => Some(task),
            _ => None,
        }
    }

    /// Begins a drag, snapshotting the picked-up entity.
    pub fn drag_start(&mut self, item: DragItem) {
        self.state = match item {
            DragItem::Column(column) => DragState::DraggingColumn(column),
            DragItem::Task(task) => DragState::DraggingTask(task),
        };
    }

    /// Applies live reordering as the pointer moves.
    ///
    /// Only task drags react here. Crossing into another column reassigns
    /// the task and splices it just before the hovered card; this live
    /// placement can be transiently off by one when the pointer wanders
    /// across columns and back, which the drop corrects.
    pub fn drag_over(&mut self, board: &mut Board, target: Option<&DragTarget>) {
        let DragState::DraggingTask(active) = &self.state else {
            return;
        };
        let active_id = active.id.clone();
        let Some(over) = target else {
            return;
        };
        match over {
            DragTarget::Task(over_id) => {
                if *over_id == active_id {
                    return;
                }
                let Some(active_index) = board.task_position(&active_id) else {
                    return;
                };
                let Some(over_index) = board.task_position(over_id) else {
                    return;
                };
                let Some(over_column) =
                    board.task(over_id).map(|task| task.column_id.clone())
                else {
                    return;
                };
                let same_column = board
                    .task(&active_id)
                    .is_some_and(|task| task.column_id == over_column);
                if same_column {
                    if active_index != over_index {
                        board.move_task(active_index, over_index);
                    }
                } else {
                    board.set_task_column(&active_id, &over_column);
                    board.move_task(active_index, over_index.saturating_sub(1));
                }
            }
            DragTarget::Column(column_id) => {
                // Hovering an empty column region adopts the column and keeps
                // the flat position; the task renders at that column's end
                // until further over-events reposition it.
                board.set_task_column(&active_id, column_id);
            }
        }
    }

    /// Ends the gesture and commits the final placement.
    ///
    /// A task dropped on another task lands immediately before it in that
    /// task's column; the drop is authoritative over whatever order the
    /// live feedback left behind. A column dropped on another column takes
    /// its index. No target, or dropping an entity on itself, mutates
    /// nothing.
    pub fn drag_end(&mut self, board: &mut Board, target: Option<&DragTarget>) {
        let ended = mem::take(&mut self.state);
        let Some(over) = target else {
            return;
        };
        match ended {
            DragState::Idle => {}
            DragState::DraggingColumn(column) => {
                let DragTarget::Column(over_id) = over else {
                    return;
                };
                if *over_id == column.id {
                    return;
                }
                let Some(from) = board.column_position(&column.id) else {
                    return;
                };
                let Some(to) = board.column_position(over_id) else {
                    return;
                };
                board.move_column(from, to);
            }
            DragState::DraggingTask(task) => match over {
                DragTarget::Task(over_id) => {
                    if *over_id == task.id {
                        return;
                    }
                    place_before(board, &task.id, over_id);
                }
                DragTarget::Column(column_id) => {
                    board.set_task_column(&task.id, column_id);
                }
            },
        }
    }
}

/// Moves `active` into `over`'s column, immediately before `over` in the
/// flat task list.
fn place_before(board: &mut Board, active: &TaskId, over: &TaskId) {
    let Some(active_index) = board.task_position(active) else {
        return;
    };
    let Some(over_index) = board.task_position(over) else {
        return;
    };
    let Some(over_column) = board.task(over).map(|task| task.column_id.clone()) else {
        return;
    };
    board.set_task_column(active, &over_column);
    // Removing `active` first shifts `over` left when coming from above it.
    let destination = if active_index < over_index {
        over_index.saturating_sub(1)
    } else {
        over_index
    };
    board.move_task(active_index, destination);
}
