//! The person resource.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrors, Issue};
use crate::types::RecordId;

use super::{Resource, ResourceKind, SubmitMode};

/// Gender of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    /// The wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "female" => Ok(Gender::Female),
            "male" => Ok(Gender::Male),
            "other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

/// A person record as known to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Server-assigned id.
    pub id: RecordId,
    /// Display name, non-empty.
    pub name: String,
    pub gender: Gender,
    /// Whether the person is currently banned.
    pub banned: bool,
}

/// Sortable/searchable columns of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Id,
    Name,
    Gender,
    Banned,
}

/// Operator input for creating or editing a person.
///
/// Enum fields are plain text here; validation turns them into typed
/// values or reports which field is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub gender: String,
    /// Only honored in edit mode; new records are never pre-banned.
    pub banned: bool,
}

impl Default for PersonDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: "male".to_string(),
            banned: false,
        }
    }
}

/// Validated person payload without an id (create body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonFields {
    pub name: String,
    pub gender: Gender,
    pub banned: bool,
}

/// Partial person update (patch body); `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned: Option<bool>,
}

impl PersonPatch {
    /// A patch that only flips the banned flag.
    pub fn set_banned(banned: bool) -> Self {
        Self {
            banned: Some(banned),
            ..Self::default()
        }
    }
}

impl Resource for Person {
    type Field = PersonField;
    type Draft = PersonDraft;
    type Fields = PersonFields;
    type Patch = PersonPatch;

    const KIND: ResourceKind = ResourceKind::Person;
    const BASE_PATH: &'static str = "/users";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn fields() -> &'static [PersonField] {
        &[
            PersonField::Id,
            PersonField::Name,
            PersonField::Gender,
            PersonField::Banned,
        ]
    }

    fn field_name(field: PersonField) -> &'static str {
        match field {
            PersonField::Id => "id",
            PersonField::Name => "name",
            PersonField::Gender => "gender",
            PersonField::Banned => "banned",
        }
    }

    fn field_text(&self, field: PersonField) -> String {
        match field {
            PersonField::Id => self.id.to_string(),
            PersonField::Name => self.name.clone(),
            PersonField::Gender => self.gender.to_string(),
            PersonField::Banned => self.banned.to_string(),
        }
    }

    fn field_number(&self, _field: PersonField) -> Option<f64> {
        None
    }

    fn draft(&self) -> PersonDraft {
        PersonDraft {
            name: self.name.clone(),
            gender: self.gender.to_string(),
            banned: self.banned,
        }
    }

    fn validate(draft: &PersonDraft, mode: SubmitMode) -> Result<PersonFields, FieldErrors> {
        let mut errors = Vec::new();

        let name = draft.name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: "name",
                issue: Issue::Required,
            });
        }

        let gender = match draft.gender.trim().parse::<Gender>() {
            Ok(g) => Some(g),
            Err(()) => {
                errors.push(FieldError {
                    field: "gender",
                    issue: Issue::InvalidEnum {
                        allowed: "female, male, other",
                    },
                });
                None
            }
        };

        if !errors.is_empty() {
            return Err(FieldErrors::new(errors));
        }

        // New records are never pre-banned; the flag is only an edit-mode
        // input.
        let banned = match mode {
            SubmitMode::Create => false,
            SubmitMode::Edit => draft.banned,
        };

        Ok(PersonFields {
            name: name.to_string(),
            gender: gender.expect("validated above"),
            banned,
        })
    }

    fn patch_from(fields: PersonFields) -> PersonPatch {
        PersonPatch {
            name: Some(fields.name),
            gender: Some(fields.gender),
            banned: Some(fields.banned),
        }
    }
}
