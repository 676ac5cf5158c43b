//! The editor's outcomes against a real store.

use campus_records::model::{InMemoryModelStore, ModelsExt, VersionToken};
use campus_records::school::{
    Department, DepartmentEditor, DepartmentField, EditForm, EditOutcome, EditRequest,
    EditResponse, Formatting, CONCURRENT_EDIT, DELETED_DURING_SAVE, RECORD_GONE,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::support::{economics, other_user_saves, seeded, RacingStore, DEPARTMENT_ID};

fn request(fields: campus_records::school::DepartmentFields, version: VersionToken) -> EditRequest {
    EditRequest {
        id: DEPARTMENT_ID,
        fields,
        version,
    }
}

#[test]
fn unchanged_version_saves_submitted_fields() {
    let (store, saved) = seeded();
    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);

    let mut fields = saved.data.fields();
    fields.name = "Political Economy".into();
    fields.budget = Decimal::new(52_500_50, 2);
    fields.start_date = NaiveDate::from_ymd_opt(2011, 1, 10).unwrap();
    fields.administrator_id = None;

    let outcome = editor.apply_edit(&request(fields.clone(), saved.version)).unwrap();
    let EditOutcome::Saved(updated) = outcome else {
        panic!("expected save, got {outcome:?}");
    };
    assert_ne!(updated.version, saved.version);

    let stored = store.models::<Department>().get(&DEPARTMENT_ID).unwrap().unwrap();
    assert_eq!(stored.data.id, DEPARTMENT_ID);
    assert_eq!(stored.data.fields(), fields);
    assert_eq!(stored.version, updated.version);
}

#[test]
fn stale_budget_edit_cites_current_budget() {
    let (store, saved) = seeded();
    // Another user saves without changing anything, which still moves the version.
    other_user_saves(&store, &saved.data.fields());

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let mut fields = saved.data.fields();
    fields.budget = Decimal::new(50_000, 0);

    let outcome = editor.apply_edit(&request(fields, saved.version)).unwrap();
    let EditOutcome::Conflict(report) = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(report.field_errors.len(), 1);
    assert_eq!(report.field_errors[0].field, DepartmentField::Budget);
    assert_eq!(report.field_errors[0].message, "Current value: $45,000.00");
    assert_eq!(report.error, CONCURRENT_EDIT);
}

#[test]
fn administrator_conflict_names_current_instructor() {
    let (store, saved) = seeded();
    other_user_saves(&store, &saved.data.fields());

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let mut fields = saved.data.fields();
    fields.administrator_id = Some(3);

    let outcome = editor.apply_edit(&request(fields, saved.version)).unwrap();
    let EditOutcome::Conflict(report) = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(report.field_errors.len(), 1);
    assert_eq!(report.field_errors[0].field, DepartmentField::AdministratorId);
    assert_eq!(report.field_errors[0].message, "Current value: Jane Doe");
    assert_eq!(report.current.administrator_id, Some(7));
}

#[test]
fn absent_department_echoes_submission() {
    let (store, saved) = seeded();
    store.models::<Department>().delete(&DEPARTMENT_ID).unwrap();

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let mut fields = saved.data.fields();
    fields.name = "Econometrics".into();

    let outcome = editor.apply_edit(&request(fields.clone(), saved.version)).unwrap();
    match outcome {
        EditOutcome::RecordGone {
            attempted, error, ..
        } => {
            assert_eq!(attempted, fields);
            assert_eq!(error, RECORD_GONE);
        }
        other => panic!("expected record gone, got {other:?}"),
    }
    assert!(store.models::<Department>().get(&DEPARTMENT_ID).unwrap().is_none());
}

#[test]
fn deletion_between_read_and_write() {
    let (inner, saved) = seeded();
    let store = RacingStore::new(inner.clone(), |store| {
        store.models::<Department>().delete(&DEPARTMENT_ID).unwrap();
    });

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let outcome = editor
        .apply_edit(&request(saved.data.fields(), saved.version))
        .unwrap();

    assert_eq!(
        outcome,
        EditOutcome::DeletedDuringSave {
            error: DELETED_DURING_SAVE.to_string()
        }
    );
    assert!(inner.models::<Department>().get(&DEPARTMENT_ID).unwrap().is_none());
}

#[test]
fn update_between_read_and_write_is_a_conflict() {
    let (inner, saved) = seeded();
    let store = RacingStore::new(inner.clone(), |store| {
        let mut fields = economics().fields();
        fields.name = "Finance".into();
        other_user_saves(store, &fields);
    });

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let outcome = editor
        .apply_edit(&request(saved.data.fields(), saved.version))
        .unwrap();

    let EditOutcome::Conflict(report) = outcome else {
        panic!("expected conflict, got {outcome:?}");
    };
    assert_eq!(report.field_errors.len(), 1);
    assert_eq!(report.field_errors[0].field, DepartmentField::Name);
    assert_eq!(report.field_errors[0].message, "Current value: Finance");

    let stored = inner.models::<Department>().get(&DEPARTMENT_ID).unwrap().unwrap();
    assert_eq!(stored.data.name, "Finance");
    assert_eq!(report.refreshed_version, stored.version);
}

#[test]
fn errors_appear_exactly_for_fields_that_differ() {
    let other = {
        let mut fields = economics().fields();
        fields.name = "Finance".into();
        fields.budget = Decimal::new(60_000, 0);
        fields.start_date = NaiveDate::from_ymd_opt(2012, 2, 2).unwrap();
        fields.administrator_id = Some(3);
        fields
    };

    for other_mask in 0u8..16 {
        for user_mask in 0u8..16 {
            let (store, saved) = seeded();

            // The other user changes the fields in `other_mask`; this user
            // submits the same new values for the fields in `user_mask`.
            let mut theirs = saved.data.fields();
            let mut ours = saved.data.fields();
            for (bit, field) in DepartmentField::ALL.iter().enumerate() {
                let take = |mask: u8| mask & (1 << bit) != 0;
                for (mask, target) in [(other_mask, &mut theirs), (user_mask, &mut ours)] {
                    if take(mask) {
                        match field {
                            DepartmentField::Name => target.name = other.name.clone(),
                            DepartmentField::Budget => target.budget = other.budget,
                            DepartmentField::StartDate => target.start_date = other.start_date,
                            DepartmentField::AdministratorId => {
                                target.administrator_id = other.administrator_id
                            }
                        }
                    }
                }
            }
            other_user_saves(&store, &theirs);

            let formatting = Formatting::default();
            let editor = DepartmentEditor::new(&store, &formatting);
            let outcome = editor.apply_edit(&request(ours, saved.version)).unwrap();
            let EditOutcome::Conflict(report) = outcome else {
                panic!("expected conflict for masks {other_mask}/{user_mask}");
            };

            let expected: Vec<_> = DepartmentField::ALL
                .iter()
                .enumerate()
                .filter(|(bit, _)| (other_mask ^ user_mask) & (1 << bit) != 0)
                .map(|(_, field)| *field)
                .collect();
            let actual: Vec<_> = report.field_errors.iter().map(|e| e.field).collect();
            assert_eq!(actual, expected, "masks {other_mask}/{user_mask}");
        }
    }
}

#[test]
fn tokens_with_equal_diagnostics_are_not_interchangeable() {
    let (store, saved) = seeded();
    let bytes = *saved.version.as_bytes();
    assert!(bytes[7] != 0 && bytes[..7].iter().all(|b| *b == 0));

    let mut shifted = [0u8; 8];
    shifted[6] = bytes[7];
    let forged = VersionToken::new(shifted);
    assert_eq!(forged.diagnostic(), saved.version.diagnostic());
    assert_ne!(forged, saved.version);

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let outcome = editor
        .apply_edit(&request(saved.data.fields(), forged))
        .unwrap();
    assert!(matches!(outcome, EditOutcome::Conflict(_)));
}

#[test]
fn resubmitting_with_refreshed_token_succeeds() {
    let (store, saved) = seeded();
    other_user_saves(&store, &saved.data.fields());

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let mut fields = saved.data.fields();
    fields.budget = Decimal::new(50_000, 0);

    let EditOutcome::Conflict(report) = editor
        .apply_edit(&request(fields.clone(), saved.version))
        .unwrap()
    else {
        panic!("first attempt should conflict");
    };

    let outcome = editor
        .apply_edit(&request(fields.clone(), report.refreshed_version))
        .unwrap();
    let EditOutcome::Saved(updated) = outcome else {
        panic!("resubmission should save, got {outcome:?}");
    };
    assert_eq!(updated.data.budget, Decimal::new(50_000, 0));
}

#[test]
fn submit_conflict_carries_refreshed_token_in_form() {
    let (store, saved) = seeded();
    let bumped = other_user_saves(&store, &saved.data.fields());

    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let mut form = EditForm::from_fields(&saved.data.fields(), saved.version);
    form.budget = Decimal::new(50_000, 0);

    let response = editor.submit(Some(DEPARTMENT_ID), &form).unwrap();
    let EditResponse::Conflict {
        form: replay,
        field_errors,
        version_diagnostic,
        ..
    } = response
    else {
        panic!("expected conflict, got {response:?}");
    };
    assert_eq!(replay.budget, Decimal::new(50_000, 0));
    assert_eq!(replay.row_version, Some(bumped.version.to_base64()));
    assert_eq!(version_diagnostic, bumped.version.diagnostic());
    assert_eq!(field_errors.len(), 1);

    let response = editor.submit(Some(DEPARTMENT_ID), &replay).unwrap();
    assert!(matches!(response, EditResponse::Saved { .. }));
}

#[test]
fn malformed_token_is_rejected_before_any_write() {
    let (store, saved) = seeded();
    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);

    let mut form = EditForm::from_fields(&saved.data.fields(), saved.version);
    form.name = "Behavioral Economics".into();
    form.row_version = Some("AAAA".into());

    let response = editor.submit(Some(DEPARTMENT_ID), &form).unwrap();
    let EditResponse::Invalid { errors, .. } = response else {
        panic!("expected invalid, got {response:?}");
    };
    assert!(errors.get("Department.RowVersion").is_some());

    let stored = store.models::<Department>().get(&DEPARTMENT_ID).unwrap().unwrap();
    assert_eq!(stored.version, saved.version);
    assert_eq!(stored.data.name, "Economics");
}

#[test]
fn empty_store_reports_record_gone_through_submit() {
    let store = InMemoryModelStore::new();
    let formatting = Formatting::default();
    let editor = DepartmentEditor::new(&store, &formatting);
    let form = EditForm::from_fields(&economics().fields(), VersionToken::from_counter(1));

    let response = editor.submit(Some(DEPARTMENT_ID), &form).unwrap();
    let EditResponse::RecordGone {
        department,
        error,
        administrators,
    } = response
    else {
        panic!("expected record gone, got {response:?}");
    };
    assert_eq!(department, economics().fields());
    assert_eq!(error, RECORD_GONE);
    assert!(administrators.is_empty());
}
