//! Demonstration data: a handful of instructors and departments.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{ModelError, ModelStore, ModelsExt};
use crate::school::{Department, Instructor};

/// Insert the demo rows. Existing rows make this fail with a conflict.
pub fn demo_data<S: ModelStore>(store: &S) -> Result<(), ModelError> {
    let instructors = [
        Instructor::new(1, "Abercrombie", "Kim"),
        Instructor::new(2, "Fakhouri", "Fadi"),
        Instructor::new(3, "Harui", "Roger"),
        Instructor::new(4, "Kapoor", "Candace"),
        Instructor::new(5, "Zheng", "Roger"),
    ];
    for instructor in &instructors {
        store.models::<Instructor>().insert(instructor)?;
    }

    let start = NaiveDate::from_ymd_opt(2007, 9, 1).unwrap_or_default();
    let departments = [
        (1, "English", 350_000, Some(1)),
        (2, "Mathematics", 100_000, Some(2)),
        (3, "Engineering", 350_000, Some(3)),
        (4, "Economics", 100_000, Some(4)),
    ];
    let department_count = departments.len();
    for (id, name, budget, administrator_id) in departments {
        store.models::<Department>().insert(&Department {
            id,
            name: name.to_string(),
            budget: Decimal::new(budget, 0),
            start_date: start,
            administrator_id,
        })?;
    }

    tracing::info!(
        instructors = instructors.len(),
        departments = department_count,
        "seeded demo data"
    );
    Ok(())
}
