//! The posted department edit form and its input validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::VersionToken;

use super::{DepartmentField, DepartmentFields};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;

const VERSION_KEY: &str = "Department.RowVersion";

/// Department edit form as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub administrator_id: Option<i32>,
    /// Base64 version token from the hidden field.
    #[serde(default)]
    pub row_version: Option<String>,
}

/// One rejected input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

/// Every input the form rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    fn push(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError {
            key: key.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.key == key)
    }
}

impl EditForm {
    /// Prefill a form from a stored department.
    pub fn from_fields(fields: &DepartmentFields, version: VersionToken) -> Self {
        Self {
            name: fields.name.clone(),
            budget: fields.budget,
            start_date: fields.start_date,
            administrator_id: fields.administrator_id,
            row_version: Some(version.to_base64()),
        }
    }

    /// Check the posted values and split them into fields and version.
    pub fn validate(&self) -> Result<(DepartmentFields, VersionToken), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        let length = name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&length) {
            errors.push(
                DepartmentField::Name.form_key(),
                format!(
                    "The field Name must be a string with a minimum length of {NAME_MIN} \
                     and a maximum length of {NAME_MAX}."
                ),
            );
        }

        if self.budget.is_sign_negative() && !self.budget.is_zero() {
            errors.push(DepartmentField::Budget.form_key(), "The budget cannot be negative.");
        } else if self.budget.normalize().scale() > 2 {
            errors.push(
                DepartmentField::Budget.form_key(),
                "The budget cannot have more than two decimal places.",
            );
        }

        let version = match self.row_version.as_deref().map(VersionToken::from_base64) {
            Some(Ok(version)) => Some(version),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "rejecting malformed version token");
                None
            }
            None => None,
        };
        if version.is_none() {
            errors.push(VERSION_KEY, "The version token is missing or malformed.");
        }

        match version {
            Some(version) if errors.is_empty() => Ok((
                DepartmentFields {
                    name: name.to_string(),
                    budget: self.budget,
                    start_date: self.start_date,
                    administrator_id: self.administrator_id,
                },
                version,
            )),
            _ => Err(errors),
        }
    }
}
