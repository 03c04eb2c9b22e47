//! The animal resource.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldErrors, Issue};
use crate::types::RecordId;

use super::{Resource, ResourceKind, SubmitMode};

/// Species of an animal record. Serialized as `type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Dog,
    Other,
}

impl Species {
    /// The wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Dog => "dog",
            Species::Other => "other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(Species::Cat),
            "dog" => Ok(Species::Dog),
            "other" => Ok(Species::Other),
            _ => Err(()),
        }
    }
}

/// An animal record as known to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Server-assigned id.
    pub id: RecordId,
    /// Display name, non-empty.
    pub name: String,
    #[serde(rename = "type")]
    pub species: Species,
    /// Age in years.
    pub age: u32,
}

/// Sortable/searchable columns of an animal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalField {
    Id,
    Name,
    Species,
    Age,
}

/// Operator input for creating or editing an animal.
///
/// All fields arrive as text; validation parses the species and age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalDraft {
    pub name: String,
    pub species: String,
    pub age: String,
}

impl Default for AnimalDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            species: "cat".to_string(),
            age: "0".to_string(),
        }
    }
}

/// Validated animal payload without an id (create body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalFields {
    pub name: String,
    #[serde(rename = "type")]
    pub species: Species,
    pub age: u32,
}

/// Partial animal update (patch body); `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnimalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Parse the age text into a non-negative whole number.
fn parse_age(input: &str) -> Result<u32, Issue> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Issue::OutOfRange("must be a number".to_string()))?;

    if value < 0.0 {
        return Err(Issue::OutOfRange("must not be negative".to_string()));
    }
    if value.fract() != 0.0 {
        return Err(Issue::OutOfRange("must be a whole number".to_string()));
    }
    if value > u32::MAX as f64 {
        return Err(Issue::OutOfRange("is too large".to_string()));
    }

    Ok(value as u32)
}

impl Resource for Animal {
    type Field = AnimalField;
    type Draft = AnimalDraft;
    type Fields = AnimalFields;
    type Patch = AnimalPatch;

    const KIND: ResourceKind = ResourceKind::Animal;
    const BASE_PATH: &'static str = "/animals";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn fields() -> &'static [AnimalField] {
        &[
            AnimalField::Id,
            AnimalField::Name,
            AnimalField::Species,
            AnimalField::Age,
        ]
    }

    fn field_name(field: AnimalField) -> &'static str {
        match field {
            AnimalField::Id => "id",
            AnimalField::Name => "name",
            AnimalField::Species => "type",
            AnimalField::Age => "age",
        }
    }

    fn field_text(&self, field: AnimalField) -> String {
        match field {
            AnimalField::Id => self.id.to_string(),
            AnimalField::Name => self.name.clone(),
            AnimalField::Species => self.species.to_string(),
            AnimalField::Age => self.age.to_string(),
        }
    }

    fn field_number(&self, field: AnimalField) -> Option<f64> {
        match field {
            AnimalField::Age => Some(self.age as f64),
            _ => None,
        }
    }

    fn draft(&self) -> AnimalDraft {
        AnimalDraft {
            name: self.name.clone(),
            species: self.species.to_string(),
            age: self.age.to_string(),
        }
    }

    fn validate(draft: &AnimalDraft, _mode: SubmitMode) -> Result<AnimalFields, FieldErrors> {
        let mut errors = Vec::new();

        let name = draft.name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: "name",
                issue: Issue::Required,
            });
        }

        let species = match draft.species.trim().parse::<Species>() {
            Ok(s) => Some(s),
            Err(()) => {
                errors.push(FieldError {
                    field: "type",
                    issue: Issue::InvalidEnum {
                        allowed: "cat, dog, other",
                    },
                });
                None
            }
        };

        let age = match parse_age(&draft.age) {
            Ok(age) => Some(age),
            Err(issue) => {
                errors.push(FieldError {
                    field: "age",
                    issue,
                });
                None
            }
        };

        if !errors.is_empty() {
            return Err(FieldErrors::new(errors));
        }

        Ok(AnimalFields {
            name: name.to_string(),
            species: species.expect("validated above"),
            age: age.expect("validated above"),
        })
    }

    fn patch_from(fields: AnimalFields) -> AnimalPatch {
        AnimalPatch {
            name: Some(fields.name),
            species: Some(fields.species),
            age: Some(fields.age),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, species: &str, age: &str) -> AnimalDraft {
        AnimalDraft {
            name: name.to_string(),
            species: species.to_string(),
            age: age.to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        let fields = Animal::validate(&draft("Rex", "dog", "3"), SubmitMode::Create).unwrap();
        assert_eq!(fields.name, "Rex");
        assert_eq!(fields.species, Species::Dog);
        assert_eq!(fields.age, 3);
    }

    #[test]
    fn empty_name_is_required() {
        let err = Animal::validate(&draft("", "cat", "3"), SubmitMode::Create).unwrap_err();
        assert_eq!(err.for_field("name"), Some(&Issue::Required));
    }

    #[test]
    fn unknown_species_is_invalid_enum() {
        let err = Animal::validate(&draft("Rex", "fish", "3"), SubmitMode::Create).unwrap_err();
        assert!(matches!(
            err.for_field("type"),
            Some(Issue::InvalidEnum { .. })
        ));
    }

    #[test]
    fn negative_age_is_out_of_range() {
        let err = Animal::validate(&draft("Rex", "dog", "-1"), SubmitMode::Create).unwrap_err();
        assert!(matches!(err.for_field("age"), Some(Issue::OutOfRange(_))));
    }

    #[test]
    fn fractional_age_is_out_of_range() {
        let err = Animal::validate(&draft("Rex", "dog", "2.5"), SubmitMode::Create).unwrap_err();
        assert!(matches!(err.for_field("age"), Some(Issue::OutOfRange(_))));
    }

    #[test]
    fn non_numeric_age_is_out_of_range() {
        let err = Animal::validate(&draft("Rex", "dog", "old"), SubmitMode::Create).unwrap_err();
        assert!(matches!(err.for_field("age"), Some(Issue::OutOfRange(_))));
    }

    #[test]
    fn species_serializes_as_type() {
        let animal = Animal {
            id: RecordId::new("1").unwrap(),
            name: "Whiskers".to_string(),
            species: Species::Cat,
            age: 2,
        };
        let json = serde_json::to_value(&animal).unwrap();
        assert_eq!(json["type"], "cat");
        assert!(json.get("species").is_none());
    }

    #[test]
    fn age_sorts_numerically() {
        let animal = Animal {
            id: RecordId::new("1").unwrap(),
            name: "Old Tom".to_string(),
            species: Species::Cat,
            age: 10,
        };
        assert_eq!(animal.field_number(AnimalField::Age), Some(10.0));
        assert_eq!(animal.field_number(AnimalField::Name), None);
    }
}
