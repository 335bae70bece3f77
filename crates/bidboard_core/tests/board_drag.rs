use bidboard_core::board::{DropLocation, DropTarget};
use bidboard_core::{
    interpret_drop, BuiltinSeed, DropError, DropEvent, MemoryKvStore, MutationOutcome,
    ProjectStore, Stage, TaskStatus,
};

fn store() -> ProjectStore<MemoryKvStore, BuiltinSeed> {
    ProjectStore::open(MemoryKvStore::new(), BuiltinSeed)
}

fn cell(stage: Stage, status: TaskStatus) -> String {
    DropTarget::new(stage, status).droppable_id()
}

#[test]
fn seeded_project_board_matches_its_stage_statuses() {
    let store = store();
    let board = store.board("3");

    assert_eq!(board.rows.len(), 9);
    assert_eq!(board.row(Stage::BidKickoff).progress().percent(), 100);
    assert_eq!(
        board.cell(Stage::Estimating, TaskStatus::InProgress).len(),
        4
    );
    assert_eq!(board.status_counts().iter().sum::<usize>(), 27);
    assert!(store.board("404").rows.iter().all(|row| row.task_count() == 0));
}

#[test]
fn drop_into_other_column_moves_task_and_board_regroups() {
    let mut store = store();
    let from = cell(Stage::BidReview, TaskStatus::Todo);
    let to = cell(Stage::BidReview, TaskStatus::Blocked);
    let event = DropEvent {
        draggable_id: "Anbudsgenomgång-2",
        source: DropLocation {
            droppable_id: &from,
            index: 1,
        },
        destination: Some(DropLocation {
            droppable_id: &to,
            index: 0,
        }),
    };

    let request = interpret_drop(&event).unwrap().unwrap();
    assert_eq!(store.apply_move("1", &request), MutationOutcome::Applied);

    let board = store.board("1");
    assert_eq!(
        board.locate("Anbudsgenomgång-2"),
        Some((Stage::BidReview, TaskStatus::Blocked))
    );
    assert_eq!(board.cell(Stage::BidReview, TaskStatus::Todo).len(), 3);
}

#[test]
fn drop_outside_or_across_stages_changes_nothing() {
    let mut store = store();
    let before = store.snapshot();
    let from = cell(Stage::BidReview, TaskStatus::Todo);
    let elsewhere = cell(Stage::Handover, TaskStatus::Done);

    let outside = DropEvent {
        draggable_id: "Anbudsgenomgång-1",
        source: DropLocation {
            droppable_id: &from,
            index: 0,
        },
        destination: None,
    };
    assert_eq!(interpret_drop(&outside), Ok(None));

    let across = DropEvent {
        destination: Some(DropLocation {
            droppable_id: &elsewhere,
            index: 0,
        }),
        ..outside
    };
    assert_eq!(
        interpret_drop(&across),
        Err(DropError::CrossStage {
            from: Stage::BidReview,
            to: Stage::Handover,
        })
    );

    assert_eq!(store.snapshot(), before);
    assert_eq!(
        store.move_task("1", "Anbudsgenomgång-1", TaskStatus::Todo, TaskStatus::Todo),
        MutationOutcome::Unchanged
    );
}
