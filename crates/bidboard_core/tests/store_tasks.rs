use bidboard_core::repo::snapshot::{encode_projects, encode_tasks};
use bidboard_core::{
    Attachment, BuiltinSeed, MemoryKvStore, MutationOutcome, NewTask, NotificationLevel,
    ProjectStore, Stage, StoreChange, StoreEvent, TaskStatus,
};
use std::cell::RefCell;
use std::rc::Rc;

fn store() -> ProjectStore<MemoryKvStore, BuiltinSeed> {
    ProjectStore::open(MemoryKvStore::new(), BuiltinSeed)
}

fn record_events(
    store: &mut ProjectStore<MemoryKvStore, BuiltinSeed>,
) -> (Rc<RefCell<Vec<StoreEvent>>>, bidboard_core::SubscriptionId) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    (events, id)
}

#[test]
fn move_todo_to_done_changes_only_status() {
    let mut store = store();
    let before = store.get_task("1", "Kalkylarbete-2").unwrap().clone();
    assert_eq!(before.status, TaskStatus::Todo);

    let outcome = store.move_task("1", "Kalkylarbete-2", TaskStatus::Todo, TaskStatus::Done);
    assert_eq!(outcome, MutationOutcome::Applied);

    let after = store.get_task("1", "Kalkylarbete-2").unwrap();
    assert_eq!(after.status, TaskStatus::Done);
    let mut expected = before;
    expected.status = TaskStatus::Done;
    assert_eq!(*after, expected);

    let others_unchanged = store
        .get_tasks_for_project("1")
        .iter()
        .filter(|task| task.id != "Kalkylarbete-2")
        .all(|task| task.status == TaskStatus::Todo);
    assert!(others_unchanged);
}

#[test]
fn done_to_done_leaves_serialized_state_byte_identical() {
    let mut store = store();
    let projects_before = encode_projects(store.projects()).unwrap();
    let tasks_before = encode_tasks(store.task_map()).unwrap();
    let (events, _) = record_events(&mut store);

    let outcome = store.move_task("4", "Anbudsstart-1", TaskStatus::Done, TaskStatus::Done);

    assert_eq!(outcome, MutationOutcome::Unchanged);
    assert_eq!(encode_projects(store.projects()).unwrap(), projects_before);
    assert_eq!(encode_tasks(store.task_map()).unwrap(), tasks_before);
    assert!(store.storage().is_empty());
    assert!(events.borrow().is_empty());
}

#[test]
fn stale_source_status_still_moves() {
    let mut store = store();
    let outcome = store.move_task("3", "Anbudsstart-1", TaskStatus::Todo, TaskStatus::Blocked);
    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(
        store.get_task("3", "Anbudsstart-1").unwrap().status,
        TaskStatus::Blocked
    );
}

#[test]
fn add_and_remove_task() {
    let mut store = store();
    let task_id = store
        .add_task(
            "2",
            NewTask {
                name: "Platsbesök".to_string(),
                description: "Besök tomten med konstruktör".to_string(),
                stage: Stage::Estimating,
                status: TaskStatus::InProgress,
            },
        )
        .unwrap();

    let task = store.get_task("2", &task_id).unwrap();
    assert_eq!(task.stage, Stage::Estimating);
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(task.attachments.is_empty());
    assert_eq!(store.get_tasks_for_project("2").last().unwrap().id, task_id);

    assert_eq!(store.remove_task("2", &task_id), MutationOutcome::Applied);
    assert!(store.get_task("2", &task_id).is_none());
    assert_eq!(store.remove_task("2", &task_id), MutationOutcome::NotFound);
}

#[test]
fn assignee_and_description_updates() {
    let mut store = store();
    assert_eq!(
        store.update_task_assignee("1", "Anbudsråd-1", Some("2".to_string())),
        MutationOutcome::Applied
    );
    let task = store.get_task("1", "Anbudsråd-1").unwrap().clone();
    assert_eq!(store.assignee_of(&task).unwrap().name, "Erik Johansson");
    assert_eq!(
        store.update_task_assignee("1", "Anbudsråd-1", Some("2".to_string())),
        MutationOutcome::Unchanged
    );
    assert_eq!(
        store.update_task_assignee("1", "Anbudsråd-1", None),
        MutationOutcome::Applied
    );

    assert_eq!(
        store.update_task_description("1", "Anbudsråd-1", "Beslut om anbud"),
        MutationOutcome::Applied
    );
    assert_eq!(
        store.get_task("1", "Anbudsråd-1").unwrap().description,
        "Beslut om anbud"
    );
}

#[test]
fn attachments_are_added_once_and_removed_by_id() {
    let mut store = store();
    let attachment = Attachment::document("ritning.pdf");
    let attachment_id = attachment.id.clone();

    assert_eq!(
        store.add_attachment("1", "Anbudsstart-3", attachment.clone()),
        MutationOutcome::Applied
    );
    assert_eq!(
        store.add_attachment("1", "Anbudsstart-3", attachment),
        MutationOutcome::Unchanged
    );
    let stored = &store.get_task("1", "Anbudsstart-3").unwrap().attachments;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, "document");

    assert_eq!(
        store.remove_attachment("1", "Anbudsstart-3", &attachment_id),
        MutationOutcome::Applied
    );
    assert_eq!(
        store.remove_attachment("1", "Anbudsstart-3", &attachment_id),
        MutationOutcome::NotFound
    );
}

#[test]
fn missing_targets_are_not_found() {
    let mut store = store();
    assert_eq!(
        store.update_task_status("99", "Anbudsstart-1", TaskStatus::Done),
        MutationOutcome::NotFound
    );
    assert_eq!(
        store.update_task_status("1", "Anbudsstart-99", TaskStatus::Done),
        MutationOutcome::NotFound
    );
    assert_eq!(
        store.add_attachment("1", "nope", Attachment::document("a.pdf")),
        MutationOutcome::NotFound
    );
    assert!(store
        .add_task(
            "99",
            NewTask {
                name: "x".to_string(),
                description: String::new(),
                stage: Stage::Handover,
                status: TaskStatus::Todo,
            }
        )
        .is_none());
    assert!(!store.task_map().contains_key("99"));
}

#[test]
fn listeners_get_events_until_unsubscribed() {
    let mut store = store();
    let (events, id) = record_events(&mut store);

    store.update_task_status("1", "Anbudsstart-1", TaskStatus::InProgress);
    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].change,
            StoreChange::TaskStatusChanged {
                project_id: "1".to_string(),
                task_id: "Anbudsstart-1".to_string(),
                status: TaskStatus::InProgress,
            }
        );
        assert_eq!(seen[0].notification.level, NotificationLevel::Info);
        assert_eq!(seen[0].notification.title, "Status uppdaterad");
        assert!(seen[0].notification.description.ends_with("Pågående"));
    }

    assert!(store.unsubscribe(id));
    store.update_task_status("1", "Anbudsstart-1", TaskStatus::Done);
    store.delete_project("5");
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn moves_announce_the_destination_column() {
    let mut store = store();
    let (events, _) = record_events(&mut store);

    store.move_task("1", "Anbudsstart-2", TaskStatus::Todo, TaskStatus::Blocked);

    let seen = events.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].change,
        StoreChange::TaskStatusChanged {
            project_id: "1".to_string(),
            task_id: "Anbudsstart-2".to_string(),
            status: TaskStatus::Blocked,
        }
    );
    assert_eq!(seen[0].notification.title, "Uppgift flyttad");
    assert_eq!(
        seen[0].notification.description,
        "Uppgiften har flyttats till Blockerat"
    );
}
