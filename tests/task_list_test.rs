use std::collections::HashSet;

use studydesk::{Task, TaskId, TaskList};

fn task(id: TaskId, text: &str, completed: bool) -> Task {
    Task {
        id,
        text: text.to_string(),
        completed,
    }
}

#[test]
fn first_id_is_one() {
    let mut list = TaskList::new();
    assert_eq!(list.add_task("英単語"), Some(1));
    assert_eq!(list.add_task("数学"), Some(2));
    assert!(!list.get(1).unwrap().completed);
}

#[test]
fn id_is_one_past_max() {
    let mut list = TaskList::from_tasks(vec![task(1, "a", false), task(3, "b", false)]);
    assert_eq!(list.add_task("x"), Some(4));
    assert_eq!(list.tasks().last().unwrap().text, "x");
}

#[test]
fn ids_stay_above_survivors() {
    let mut list = TaskList::new();
    for text in ["a", "b", "c"] {
        list.add_task(text);
    }
    list.delete_task(2);
    let id = list.add_task("d").unwrap();
    assert!(list.tasks().iter().filter(|t| t.id != id).all(|t| t.id < id));
    assert_eq!(id, 4);
}

#[test]
fn ids_past_u32_range_keep_counting() {
    let mut list = TaskList::from_tasks(vec![task(TaskId::from(u32::MAX), "a", false)]);
    assert_eq!(list.add_task("b"), Some(TaskId::from(u32::MAX) + 1));
    assert_eq!(list.len(), 2);
}

#[test]
fn exhausted_id_space_adds_nothing() {
    let mut list = TaskList::from_tasks(vec![task(TaskId::MAX, "a", false)]);
    let before = list.clone();

    assert_eq!(list.add_task("b"), None);
    assert_eq!(list, before);
}

#[test]
fn negative_ids_count_up_from_the_max() {
    let mut list = TaskList::from_tasks(vec![task(-5, "a", false), task(-2, "b", false)]);
    assert_eq!(list.add_task("c"), Some(-1));
}

#[test]
fn blank_text_is_rejected() {
    let mut list = TaskList::new();
    assert_eq!(list.add_task(""), None);
    assert_eq!(list.add_task("  \t "), None);
    assert!(list.is_empty());
}

#[test]
fn toggle_flips_back_and_forth() {
    let mut list = TaskList::new();
    let id = list.add_task("復習").unwrap();
    assert!(list.toggle_complete(id));
    assert!(list.get(id).unwrap().completed);
    assert!(list.toggle_complete(id));
    assert!(!list.get(id).unwrap().completed);
}

#[test]
fn unknown_ids_are_noops() {
    let mut list = TaskList::from_tasks(vec![task(1, "a", false), task(2, "b", true)]);
    let before = list.clone();

    assert!(!list.delete_task(999));
    assert!(!list.toggle_complete(999));
    assert_eq!(list, before);
}

#[test]
fn filters_keep_insertion_order_and_partition() {
    let list = TaskList::from_tasks(vec![
        task(5, "e", true),
        task(1, "a", false),
        task(4, "d", true),
        task(2, "b", false),
    ]);

    let open: Vec<TaskId> = list.list_incomplete().iter().map(|t| t.id).collect();
    let done: Vec<TaskId> = list.list_completed().iter().map(|t| t.id).collect();
    assert_eq!(open, vec![1, 2]);
    assert_eq!(done, vec![5, 4]);

    let open: HashSet<TaskId> = open.into_iter().collect();
    let done: HashSet<TaskId> = done.into_iter().collect();
    let all: HashSet<TaskId> = list.tasks().iter().map(|t| t.id).collect();
    assert!(open.is_disjoint(&done));
    assert_eq!(&open | &done, all);
    assert_eq!(list.len(), 4);
}
