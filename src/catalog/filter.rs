use std::fmt;

use super::Animal;

/// Keyword that disables a filter dimension
pub const ALL: &str = "all";

/// One dimension of the filter: either everything passes, or only the
/// animals whose value equals the given one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Criterion {
    #[default]
    All,
    Only(String),
}

impl Criterion {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Criterion::All
        } else {
            Criterion::Only(value.to_string())
        }
    }

    pub fn admits(&self, value: &str) -> bool {
        match self {
            Criterion::All => true,
            Criterion::Only(expected) => expected == value,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::All => f.write_str(ALL),
            Criterion::Only(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Habitat,
    Diet,
    Status,
}

impl FilterField {
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Habitat => "Habitat",
            FilterField::Diet => "Diet",
            FilterField::Status => "Status",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub habitat: Criterion,
    pub diet: Criterion,
    pub status: Criterion,
    pub search_text: String,
}

impl FilterState {
    /// Returns a copy with one dimension replaced
    pub fn with(&self, field: FilterField, criterion: Criterion) -> Self {
        let mut next = self.clone();
        match field {
            FilterField::Habitat => next.habitat = criterion,
            FilterField::Diet => next.diet = criterion,
            FilterField::Status => next.status = criterion,
        }
        next
    }

    pub fn criterion(&self, field: FilterField) -> &Criterion {
        match field {
            FilterField::Habitat => &self.habitat,
            FilterField::Diet => &self.diet,
            FilterField::Status => &self.status,
        }
    }

    pub fn matches(&self, animal: &Animal) -> bool {
        self.habitat.admits(&animal.habitat)
            && self.diet.admits(&animal.diet)
            && self.status.admits(animal.status.as_str())
            && self.matches_text(animal)
    }

    // Case-insensitive substring over name, scientific name and description.
    // An empty search matches everything.
    fn matches_text(&self, animal: &Animal) -> bool {
        let term = self.search_text.to_lowercase();
        if term.is_empty() {
            return true;
        }
        animal.name.to_lowercase().contains(&term)
            || animal.scientific_name.to_lowercase().contains(&term)
            || animal.description.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::animal;
    use crate::catalog::ConservationStatus;

    #[test]
    fn test_criterion_parse() {
        assert_eq!(Criterion::parse("all"), Criterion::All);
        assert_eq!(Criterion::parse(" ALL "), Criterion::All);
        assert_eq!(Criterion::parse(""), Criterion::All);
        assert_eq!(Criterion::parse("jungle"), Criterion::Only("jungle".to_string()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tiger = animal(1, "Bengal Tiger", "jungle", "carnivore");
        let search = |text: &str| FilterState {
            search_text: text.to_string(),
            ..FilterState::default()
        };

        assert!(search("TIGER").matches(&tiger));
        assert!(search("scientificus").matches(&tiger));
        assert!(search("is an animal").matches(&tiger));
        assert!(search("").matches(&tiger));
        assert!(!search("penguin").matches(&tiger));
    }

    #[test]
    fn test_all_dimensions_must_match() {
        let mut tiger = animal(1, "Bengal Tiger", "jungle", "carnivore");
        tiger.status = ConservationStatus::Endangered;

        let filter = FilterState::default()
            .with(FilterField::Habitat, Criterion::parse("jungle"))
            .with(FilterField::Status, Criterion::parse("endangered"));
        assert!(filter.matches(&tiger));

        let filter = filter.with(FilterField::Diet, Criterion::parse("herbivore"));
        assert!(!filter.matches(&tiger));
    }
}
