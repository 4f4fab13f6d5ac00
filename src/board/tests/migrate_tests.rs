//! Tests for persisted-content shape detection and migration.

use crate::board::domain::{Board, ColumnId, Task, TaskId};
use crate::board::migrate::{ContentShape, encode_content, load_board};
use rstest::rstest;
use serde_json::{Value, json};

fn legacy_payload() -> Value {
    json!({
        "columns": {
            "todo": { "id": "todo", "title": "To do", "taskIds": ["t2", "t1"] },
            "doing": { "id": "doing", "title": "Doing", "taskIds": ["t3"] }
        },
        "tasks": {
            "t1": { "id": "t1", "content": "Write the brief" },
            "t2": { "id": "t2", "content": "Collect feedback" },
            "t3": { "id": "t3" },
            "t4": { "id": "t4", "content": "Orphaned follow-up" }
        },
        "columnOrder": ["todo", "doing"]
    })
}

/// Starter-board check that ignores the generated seed-task ids.
fn assert_is_starter(board: &Board) {
    let starter = Board::starter();
    assert_eq!(board.columns(), starter.columns());
    let summaries: Vec<&str> = board.tasks().iter().map(|task| task.summary.as_str()).collect();
    let expected: Vec<&str> = starter
        .tasks()
        .iter()
        .map(|task| task.summary.as_str())
        .collect();
    assert_eq!(summaries, expected);
}

#[rstest]
fn missing_content_seeds_the_starter_board() {
    let (board, shape) = load_board(None);
    assert_eq!(shape, ContentShape::Missing);
    assert_is_starter(&board);
}

#[rstest]
fn legacy_shape_is_rebuilt_in_column_order() {
    let payload = legacy_payload();
    let (board, shape) = load_board(Some(&payload));
    assert_eq!(shape, ContentShape::Legacy);

    let ids: Vec<&str> = board
        .columns()
        .iter()
        .map(|column| column.id.as_str())
        .collect();
    assert_eq!(ids, ["todo", "doing"]);

    let titles: Vec<&str> = board
        .columns()
        .iter()
        .map(|column| column.title.as_str())
        .collect();
    assert_eq!(titles, ["To do", "Doing"]);

    for column in board.columns() {
        let color = column.color.as_ref().expect("accent assigned");
        assert!(color.is_palette_entry());
    }
}

#[rstest]
fn legacy_tasks_keep_their_per_column_order_and_summaries() {
    let payload = legacy_payload();
    let (board, _) = load_board(Some(&payload));

    let todo: Vec<&str> = board
        .tasks_in(&ColumnId::new("todo"))
        .map(|task| task.id.as_str())
        .collect();
    // taskIds order wins, not the object key order
    assert!(todo.starts_with(&["t2", "t1"]));

    let t1 = board.task(&TaskId::new("t1")).expect("migrated");
    assert_eq!(t1.summary, "Write the brief");

    // a legacy task without content gets the placeholder
    let t3 = board.task(&TaskId::new("t3")).expect("migrated");
    assert_eq!(t3.summary, Task::PLACEHOLDER_SUMMARY);
}

#[rstest]
fn legacy_task_claimed_by_no_column_lands_in_the_first_column() {
    let payload = legacy_payload();
    let (board, _) = load_board(Some(&payload));

    let t4 = board.task(&TaskId::new("t4")).expect("never dropped");
    assert_eq!(t4.column_id, ColumnId::new("todo"));
    assert!(board.orphaned_tasks().is_empty());
}

#[rstest]
fn legacy_order_entry_naming_a_missing_column_is_skipped() {
    let payload = json!({
        "columns": {
            "todo": { "id": "todo", "title": "To do", "taskIds": [] }
        },
        "tasks": {},
        "columnOrder": ["vanished", "todo"]
    });
    let (board, shape) = load_board(Some(&payload));
    assert_eq!(shape, ContentShape::Legacy);
    assert_eq!(board.columns().len(), 1);
}

#[rstest]
fn current_shape_passes_through_verbatim() {
    let payload = json!({
        "columns": [
            { "id": "todo", "title": "To do", "color": "#3B82F6" },
            { "id": "done", "title": "Done" }
        ],
        "tasks": [
            { "id": "t1", "columnId": "todo", "summary": "Ship it", "priority": "High" }
        ]
    });
    let (board, shape) = load_board(Some(&payload));
    assert_eq!(shape, ContentShape::Current);
    assert_eq!(board.columns().len(), 2);
    let task = board.task(&TaskId::new("t1")).expect("present");
    assert_eq!(task.summary, "Ship it");
    // the column without a stored color keeps none: passthrough, not repair
    let done = board.column(&ColumnId::new("done")).expect("present");
    assert!(done.color.is_none());
}

#[rstest]
fn deprecated_content_field_is_renamed_into_summary() {
    let payload = json!({
        "columns": [{ "id": "todo", "title": "To do" }],
        "tasks": [
            { "id": "t1", "columnId": "todo", "content": "Old style summary" },
            { "id": "t2", "columnId": "todo", "summary": "Kept", "content": "Ignored" }
        ]
    });
    let (board, _) = load_board(Some(&payload));

    let t1 = board.task(&TaskId::new("t1")).expect("present");
    assert_eq!(t1.summary, "Old style summary");
    let t2 = board.task(&TaskId::new("t2")).expect("present");
    assert_eq!(t2.summary, "Kept");

    // the deprecated field is renamed, never written back out
    let encoded = encode_content(board.columns(), board.tasks()).expect("serialisable");
    let tasks = encoded
        .get("tasks")
        .and_then(Value::as_array)
        .expect("tasks array");
    assert!(tasks.iter().all(|task| task.get("content").is_none()));
}

#[rstest]
fn migration_applies_only_once_per_raw_shape() {
    let payload = legacy_payload();
    let (migrated, first_shape) = load_board(Some(&payload));
    assert_eq!(first_shape, ContentShape::Legacy);

    let reserialized =
        encode_content(migrated.columns(), migrated.tasks()).expect("serialisable");
    let (reloaded, second_shape) = load_board(Some(&reserialized));

    assert_eq!(second_shape, ContentShape::Current);
    assert_eq!(reloaded, migrated);
}

#[rstest]
#[case(json!("not an object"))]
#[case(json!([1, 2, 3]))]
#[case(json!({ "unrelated": true }))]
#[case(json!({ "columns": [], "unrelated": true }))]
fn unreadable_content_falls_back_to_the_starter_board(#[case] payload: Value) {
    let (board, shape) = load_board(Some(&payload));
    assert_eq!(shape, ContentShape::Unrecognized);
    assert_is_starter(&board);
}
