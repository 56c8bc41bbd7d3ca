//! Property-based tests for the store, the document round trip and queries.

use proptest::prelude::*;
use std::collections::HashSet;
use todo_tactician::query::{query, Filter, SortKey};
use todo_tactician::{from_str, to_string, NewTask, Task, TaskStore, TaskUpdate};

#[derive(Debug, Clone)]
enum Op {
    Add(NewTask),
    Update(usize, TaskUpdate),
    Delete(usize),
}

fn due() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (1900i32..=2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d)),
    ]
}

// Printable text plus the escapes the writer and reader agree on
fn title() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \"\\\\/\t\n\ré-]{1,40}"
}

fn new_task() -> impl Strategy<Value = NewTask> {
    (title(), due(), proptest::option::of(1u8..=5)).prop_map(|(title, due, priority)| NewTask {
        title,
        due,
        priority,
    })
}

fn update() -> impl Strategy<Value = TaskUpdate> {
    (
        proptest::option::of(title()),
        proptest::option::of(due()),
        proptest::option::of(0u8..=7),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(title, due, priority, done)| TaskUpdate {
            title,
            due,
            priority,
            done,
        })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => new_task().prop_map(Op::Add),
        2 => (any::<usize>(), update()).prop_map(|(i, u)| Op::Update(i, u)),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

fn build(ops: Vec<Op>) -> TaskStore {
    let mut store = TaskStore::new();
    for op in ops {
        match op {
            Op::Add(new) => {
                store.add(new).unwrap();
            }
            Op::Update(i, update) => {
                if let Some(id) = pick_id(&store, i) {
                    store.update(id, update).unwrap();
                }
            }
            Op::Delete(i) => {
                if let Some(id) = pick_id(&store, i) {
                    store.delete(id);
                }
            }
        }
    }
    store
}

fn pick_id(store: &TaskStore, i: usize) -> Option<u32> {
    if store.is_empty() {
        None
    } else {
        Some(store.as_slice()[i % store.len()].id)
    }
}

fn as_set(tasks: &[Task]) -> HashSet<Task> {
    tasks.iter().cloned().collect()
}

fn task() -> impl Strategy<Value = Task> {
    (1u32..50, due(), 1u8..=5, any::<bool>()).prop_map(|(id, due, priority, done)| Task {
        id,
        title: format!("t{}", id),
        due,
        priority,
        done,
    })
}

fn store_of(tasks: Vec<Task>) -> TaskStore {
    let mut store = TaskStore::new();
    for t in tasks {
        let _ = store.push(t); // duplicates are dropped
    }
    store
}

proptest! {
    #[test]
    fn prop_round_trip(ops in prop::collection::vec(op(), 0..30)) {
        let store = build(ops);
        let back = from_str(&to_string(&store)).unwrap();
        prop_assert_eq!(as_set(back.as_slice()), as_set(store.as_slice()));
        prop_assert_eq!(back.len(), store.len());
    }

    #[test]
    fn prop_ids_unique(ops in prop::collection::vec(op(), 0..60)) {
        let store = build(ops);
        let ids: HashSet<u32> = store.iter().map(|t| t.id).collect();
        prop_assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn prop_filters_compose_as_intersection(
        tasks in prop::collection::vec(task(), 0..25),
        cutoff in due(),
        min in 0u8..=5,
        pending in any::<bool>(),
        sort_by_priority in any::<bool>(),
    ) {
        let store = store_of(tasks);
        let sort = if sort_by_priority { SortKey::Priority } else { SortKey::Due };

        let mut combined = Filter::new().with_due_before(cutoff.clone()).with_min_priority(min);
        let mut pending_filter = Filter::new();
        if pending {
            combined = combined.pending_only();
            pending_filter = pending_filter.pending_only();
        }

        let all = as_set(&query(&store, sort, &combined));
        let by_due = as_set(&query(&store, sort, &Filter::new().with_due_before(cutoff)));
        let by_priority = as_set(&query(&store, sort, &Filter::new().with_min_priority(min)));
        let by_pending = as_set(&query(&store, sort, &pending_filter));

        let expected: HashSet<Task> = by_due
            .intersection(&by_priority)
            .cloned()
            .collect::<HashSet<_>>()
            .intersection(&by_pending)
            .cloned()
            .collect();
        prop_assert_eq!(all, expected);
    }

    #[test]
    fn prop_sorted_output_is_ordered(tasks in prop::collection::vec(task(), 0..25)) {
        let store = store_of(tasks);
        for sort in [SortKey::Due, SortKey::Priority] {
            let out = query(&store, sort, &Filter::new());
            prop_assert_eq!(out.len(), store.len());
            for pair in out.windows(2) {
                prop_assert!(sort.compare(&pair[0], &pair[1]).is_lt());
            }
        }
    }
}
