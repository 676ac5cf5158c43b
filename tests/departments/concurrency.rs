//! Competing writers holding the same captured version.

use std::sync::Barrier;
use std::thread;

use campus_records::model::ModelsExt;
use campus_records::school::{
    Department, DepartmentEditor, EditOutcome, EditRequest, Formatting,
};
use rust_decimal::Decimal;

use crate::support::{seeded, DEPARTMENT_ID};

#[test]
fn only_one_of_many_stale_writers_wins() {
    const WRITERS: usize = 8;

    let (store, saved) = seeded();
    let formatting = Formatting::default();
    let barrier = Barrier::new(WRITERS);

    let outcomes: Vec<EditOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let store = &store;
                let formatting = &formatting;
                let barrier = &barrier;
                let mut fields = saved.data.fields();
                fields.budget = Decimal::new(10_000 * (writer as i64 + 1), 0);
                let version = saved.version;

                scope.spawn(move || {
                    let editor = DepartmentEditor::new(store, formatting);
                    barrier.wait();
                    editor
                        .apply_edit(&EditRequest {
                            id: DEPARTMENT_ID,
                            fields,
                            version,
                        })
                        .unwrap()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            EditOutcome::Saved(saved) => Some(saved),
            _ => None,
        })
        .collect();
    assert_eq!(winners.len(), 1);
    let conflicts = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, EditOutcome::Conflict(_)))
        .count();
    assert_eq!(conflicts, WRITERS - 1);

    // The store holds exactly the winner's write.
    let stored = store.models::<Department>().get(&DEPARTMENT_ID).unwrap().unwrap();
    assert_eq!(stored.version, winners[0].version);
    assert_eq!(stored.data.budget, winners[0].data.budget);

    // Every loser was shown the winner's values and version.
    for outcome in &outcomes {
        if let EditOutcome::Conflict(report) = outcome {
            assert_eq!(report.refreshed_version, stored.version);
            assert_eq!(report.current.budget, stored.data.budget);
        }
    }
}

#[test]
fn sequential_writers_with_same_token() {
    let (store, saved) = seeded();
    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);

    let mut first = saved.data.fields();
    first.name = "Finance".into();
    let mut second = saved.data.fields();
    second.name = "Accounting".into();

    let a = editor
        .apply_edit(&EditRequest {
            id: DEPARTMENT_ID,
            fields: first,
            version: saved.version,
        })
        .unwrap();
    let b = editor
        .apply_edit(&EditRequest {
            id: DEPARTMENT_ID,
            fields: second,
            version: saved.version,
        })
        .unwrap();

    assert!(matches!(a, EditOutcome::Saved(_)));
    let EditOutcome::Conflict(report) = b else {
        panic!("second writer should conflict, got {b:?}");
    };
    assert_eq!(report.field_errors[0].message, "Current value: Finance");
}
