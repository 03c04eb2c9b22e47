//! Search, sort, and filter: pure transforms from a cached collection
//! plus query state to a display sequence.

use std::cmp::Ordering;

use crate::resource::Resource;

/// Transient search/sort parameters controlling which records are
/// displayed and in what order. Owned by the list controller, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<F> {
    /// Free-text search; matches any field, case-insensitively.
    pub search: String,
    /// The active sort column, if any.
    pub sort_by: Option<F>,
    /// Whether the sort direction is flipped.
    pub reversed: bool,
}

impl<F> Default for QueryState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: None,
            reversed: false,
        }
    }
}

impl<F: PartialEq> QueryState<F> {
    /// True when this query is the identity transform.
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.sort_by.is_none() && !self.reversed
    }
}

/// Derive the display sequence for a collection under a query.
///
/// Deterministic and side-effect free: identical inputs always yield the
/// identical ordered output, so rows can be re-derived after every query
/// change without refetching.
///
/// Filtering happens first (it is order-preserving, so the result is the
/// same as sorting first), then a stable sort when a sort column is set.
pub fn derive<R: Resource>(rows: &[R], query: &QueryState<R::Field>) -> Vec<R> {
    let needle = query.search.trim().to_lowercase();

    let mut out: Vec<R> = rows
        .iter()
        .filter(|row| matches(*row, &needle))
        .cloned()
        .collect();

    if let Some(field) = query.sort_by {
        out.sort_by(|a, b| {
            let ord = compare_field(a, b, field);
            if query.reversed { ord.reverse() } else { ord }
        });
    }

    out
}

/// A row matches when any registered field's string form contains the
/// lowercased needle. The empty needle matches everything.
fn matches<R: Resource>(row: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    R::fields()
        .iter()
        .any(|&field| row.field_text(field).to_lowercase().contains(needle))
}

/// Compare one field of two rows: numerically when the field is numeric,
/// otherwise case-sensitive lexicographic on the canonical string form.
fn compare_field<R: Resource>(a: &R, b: &R, field: R::Field) -> Ordering {
    match (a.field_number(field), b.field_number(field)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.field_text(field).cmp(&b.field_text(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Animal, AnimalField, Gender, Person, PersonField, Species};
    use crate::types::RecordId;

    fn person(id: &str, name: &str, gender: Gender, banned: bool) -> Person {
        Person {
            id: RecordId::new(id).unwrap(),
            name: name.to_string(),
            gender,
            banned,
        }
    }

    fn animal(id: &str, name: &str, species: Species, age: u32) -> Animal {
        Animal {
            id: RecordId::new(id).unwrap(),
            name: name.to_string(),
            species,
            age,
        }
    }

    fn people() -> Vec<Person> {
        vec![
            person("1", "Alice", Gender::Female, false),
            person("2", "bob", Gender::Male, true),
            person("3", "Carol", Gender::Other, false),
        ]
    }

    #[test]
    fn empty_collection_yields_empty() {
        let rows: Vec<Person> = Vec::new();
        let out = derive(&rows, &QueryState::default());
        assert!(out.is_empty());
    }

    #[test]
    fn default_query_is_identity() {
        let rows = people();
        let out = derive(&rows, &QueryState::default());
        assert_eq!(out, rows);
    }

    #[test]
    fn derive_is_deterministic() {
        let rows = people();
        let query = QueryState {
            search: "o".to_string(),
            sort_by: Some(PersonField::Name),
            reversed: true,
        };
        let first = derive(&rows, &query);
        let second = derive(&rows, &query);
        assert_eq!(first, second);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = people();
        for needle in ["ali", "ALI", "  Ali  "] {
            let query = QueryState {
                search: needle.to_string(),
                ..QueryState::default()
            };
            let out = derive(&rows, &query);
            assert_eq!(out.len(), 1, "needle {:?}", needle);
            assert_eq!(out[0].name, "Alice");
        }
    }

    #[test]
    fn search_matches_any_field() {
        let rows = people();
        // "true" only matches bob's banned flag.
        let query = QueryState {
            search: "true".to_string(),
            ..QueryState::default()
        };
        let out = derive(&rows, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "bob");
    }

    #[test]
    fn string_sort_is_case_sensitive_lexicographic() {
        let rows = people();
        let query = QueryState {
            search: String::new(),
            sort_by: Some(PersonField::Name),
            reversed: false,
        };
        let out = derive(&rows, &query);
        // Uppercase sorts before lowercase.
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol", "bob"]);
    }

    #[test]
    fn reversed_flips_order() {
        let rows = people();
        let query = QueryState {
            search: String::new(),
            sort_by: Some(PersonField::Name),
            reversed: true,
        };
        let out = derive(&rows, &query);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "Carol", "Alice"]);
    }

    #[test]
    fn numeric_field_sorts_numerically() {
        let rows = vec![
            animal("1", "Rex", Species::Dog, 9),
            animal("2", "Tom", Species::Cat, 10),
            animal("3", "Kid", Species::Other, 2),
        ];
        let query = QueryState {
            search: String::new(),
            sort_by: Some(AnimalField::Age),
            reversed: false,
        };
        let out = derive(&rows, &query);
        let ages: Vec<u32> = out.iter().map(|a| a.age).collect();
        // Lexicographic would put "10" before "9".
        assert_eq!(ages, vec![2, 9, 10]);
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        let rows = vec![
            person("1", "Same", Gender::Female, false),
            person("2", "Same", Gender::Male, false),
            person("3", "Same", Gender::Other, false),
        ];
        for reversed in [false, true] {
            let query = QueryState {
                search: String::new(),
                sort_by: Some(PersonField::Name),
                reversed,
            };
            let out = derive(&rows, &query);
            let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2", "3"], "reversed = {}", reversed);
        }
    }

    #[test]
    fn filter_and_sort_compose() {
        let rows = people();
        let query = QueryState {
            search: "o".to_string(),
            sort_by: Some(PersonField::Name),
            reversed: true,
        };
        let out = derive(&rows, &query);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "Carol"]);
    }
}
