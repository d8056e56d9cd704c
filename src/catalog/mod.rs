pub mod filter;
pub mod loader;
pub mod regions;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::error::{CatalogError, CatalogResult};
pub use filter::{Criterion, FilterField, FilterState};

/// Default amount of cards revealed per "load more" step
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Catalog identifier. The data file may carry either numbers or strings,
/// both end up as the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize)]
#[serde(from = "RawAnimalId")]
pub struct AnimalId(String);

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawAnimalId {
    Number(u64),
    Text(String),
}

impl From<RawAnimalId> for AnimalId {
    fn from(raw: RawAnimalId) -> Self {
        match raw {
            RawAnimalId::Number(n) => Self(n.to_string()),
            RawAnimalId::Text(s) => Self(s.trim().to_string()),
        }
    }
}

impl AnimalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnimalId {
    fn from(s: &str) -> Self {
        Self(s.trim().to_string())
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub enum ConservationStatus {
    #[serde(rename = "least concern")]
    LeastConcern,
    #[serde(rename = "near threatened")]
    NearThreatened,
    #[serde(rename = "vulnerable")]
    Vulnerable,
    #[serde(rename = "endangered")]
    Endangered,
    #[serde(rename = "critically endangered")]
    CriticallyEndangered,
    #[serde(rename = "extinct in the wild")]
    ExtinctInTheWild,
    #[serde(rename = "extinct")]
    Extinct,
}

impl ConservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConservationStatus::LeastConcern => "least concern",
            ConservationStatus::NearThreatened => "near threatened",
            ConservationStatus::Vulnerable => "vulnerable",
            ConservationStatus::Endangered => "endangered",
            ConservationStatus::CriticallyEndangered => "critically endangered",
            ConservationStatus::ExtinctInTheWild => "extinct in the wild",
            ConservationStatus::Extinct => "extinct",
        }
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub scientific_name: String,
    pub habitat: String,
    pub diet: String,
    pub status: ConservationStatus,
    pub location: String,
    pub size: String,
    pub description: String,
    pub conservation_info: String,
    #[serde(default)]
    pub diet_info: Option<String>,
    #[serde(default)]
    pub behavior: Option<String>,
    pub facts: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub hologram: bool,
}

impl Animal {
    /// The first fact doubles as the card teaser
    pub fn teaser(&self) -> &str {
        self.facts.first().map(String::as_str).unwrap_or_default()
    }
}

/// The full, read-only list of animals for the session.
#[derive(Debug)]
pub struct Catalog {
    animals: Vec<Animal>,
    index: HashMap<AnimalId, usize>,
}

impl Catalog {
    /// Builds the catalog, refusing anything that would leave downstream
    /// code with partial records: an empty list, duplicate ids, nameless
    /// entries or entries without a single fact.
    pub fn new(animals: Vec<Animal>) -> CatalogResult<Self> {
        if animals.is_empty() {
            return Err(CatalogError::Malformed("catalog has no animals".to_string()));
        }

        let mut index = HashMap::with_capacity(animals.len());
        for (position, animal) in animals.iter().enumerate() {
            if animal.name.trim().is_empty() {
                return Err(CatalogError::Malformed(format!(
                    "animal {} has no name",
                    animal.id
                )));
            }
            if animal.facts.is_empty() {
                return Err(CatalogError::Malformed(format!(
                    "animal {} has no facts",
                    animal.id
                )));
            }
            if index.insert(animal.id.clone(), position).is_some() {
                return Err(CatalogError::Malformed(format!(
                    "duplicate animal id {}",
                    animal.id
                )));
            }
        }

        Ok(Self { animals, index })
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn get_by_id(&self, id: &AnimalId) -> CatalogResult<&Animal> {
        self.index
            .get(id)
            .map(|&position| &self.animals[position])
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn by_habitat<'a>(&'a self, habitat: &'a str) -> impl Iterator<Item = &'a Animal> + 'a {
        self.animals.iter().filter(move |a| a.habitat == habitat)
    }

    pub fn by_diet<'a>(&'a self, diet: &'a str) -> impl Iterator<Item = &'a Animal> + 'a {
        self.animals.iter().filter(move |a| a.diet == diet)
    }

    /// Up to three other animals sharing the habitat or the diet, in catalog order
    pub fn related(&self, animal: &Animal) -> Vec<&Animal> {
        self.animals
            .iter()
            .filter(|a| a.id != animal.id && (a.habitat == animal.habitat || a.diet == animal.diet))
            .take(3)
            .collect()
    }

    pub fn habitats(&self) -> Vec<&str> {
        distinct(self.animals.iter().map(|a| a.habitat.as_str()))
    }

    pub fn diets(&self) -> Vec<&str> {
        distinct(self.animals.iter().map(|a| a.diet.as_str()))
    }

    pub fn statuses(&self) -> Vec<&str> {
        distinct(self.animals.iter().map(|a| a.status.as_str()))
    }

    /// Values of one filter dimension, as they appear in the catalog
    pub fn observed(&self, field: FilterField) -> Vec<&str> {
        match field {
            FilterField::Habitat => self.habitats(),
            FilterField::Diet => self.diets(),
            FilterField::Status => self.statuses(),
        }
    }
}

// First-seen order, so keyboards follow the data file
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Filter and pagination cursor over a shared catalog.
///
/// The visible slice is cumulative: page `n` shows the first
/// `n * page_size` matches. Any filter change drops back to page 1.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    catalog: Arc<Catalog>,
    filter: FilterState,
    filtered: Vec<usize>,
    page: usize,
    page_size: usize,
}

impl CatalogEngine {
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> Self {
        let mut engine = Self {
            catalog,
            filter: FilterState::default(),
            filtered: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
        };
        engine.apply_filter(FilterState::default());
        engine
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn apply_filter(&mut self, filter: FilterState) {
        self.filtered = self
            .catalog
            .animals()
            .iter()
            .enumerate()
            .filter(|(_, animal)| filter.matches(animal))
            .map(|(position, _)| position)
            .collect();
        self.filter = filter;
        self.page = 1;

        debug!(
            "Filter applied: {} of {} animals match",
            self.filtered.len(),
            self.catalog.len()
        );
    }

    /// Reveals one more page. Returns `false` and changes nothing when
    /// every match is already visible.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.filtered.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn visible_len(&self) -> usize {
        self.filtered.len().min(self.page * self.page_size)
    }

    pub fn visible(&self) -> Vec<&Animal> {
        self.filtered[..self.visible_len()]
            .iter()
            .map(|&position| &self.catalog.animals()[position])
            .collect()
    }

    /// Resolves against the whole catalog, never the filtered view
    pub fn get_by_id(&self, id: &AnimalId) -> CatalogResult<&Animal> {
        self.catalog.get_by_id(id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn animal(id: u32, name: &str, habitat: &str, diet: &str) -> Animal {
        Animal {
            id: AnimalId(id.to_string()),
            name: name.to_string(),
            scientific_name: format!("{} scientificus", name),
            habitat: habitat.to_string(),
            diet: diet.to_string(),
            status: ConservationStatus::LeastConcern,
            location: "Somewhere".to_string(),
            size: "Medium".to_string(),
            description: format!("The {} is an animal.", name),
            conservation_info: "Stable.".to_string(),
            diet_info: None,
            behavior: None,
            facts: vec![format!("{} fact", name)],
            image: format!("assets/images/animals/{}.jpg", id),
            audio: None,
            hologram: false,
        }
    }

    fn ten_animals() -> Arc<Catalog> {
        let habitats = ["jungle", "savanna", "ocean", "arctic", "savanna"];
        let animals = (1..=10)
            .map(|i| animal(i, &format!("Animal{}", i), habitats[(i as usize) % 5], "herbivore"))
            .collect();
        Arc::new(Catalog::new(animals).unwrap())
    }

    #[test]
    fn test_pagination_reveals_cumulatively() {
        let mut engine = CatalogEngine::new(ten_animals(), 9);
        assert_eq!(engine.visible().len(), 9);

        assert!(engine.load_more());
        assert_eq!(engine.visible().len(), 10);

        assert!(!engine.load_more());
        assert_eq!(engine.page(), 2);
        assert_eq!(engine.visible().len(), 10);
    }

    #[test]
    fn test_visible_size_matches_page_bound() {
        let catalog = ten_animals();
        for page_size in 1..=12 {
            let mut engine = CatalogEngine::new(catalog.clone(), page_size);
            loop {
                let expected = (engine.page() * page_size).min(engine.filtered_len());
                assert_eq!(engine.visible().len(), expected);
                for animal in engine.visible() {
                    assert!(catalog.get_by_id(&animal.id).is_ok());
                }
                if !engine.load_more() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_habitat_filter() {
        let animals = vec![
            animal(1, "Tiger", "jungle", "carnivore"),
            animal(2, "Lion", "savanna", "carnivore"),
            animal(3, "Toucan", "jungle", "omnivore"),
            animal(4, "Penguin", "arctic", "carnivore"),
        ];
        let mut engine = CatalogEngine::new(Arc::new(Catalog::new(animals).unwrap()), 9);
        engine.apply_filter(FilterState {
            habitat: Criterion::Only("jungle".to_string()),
            ..FilterState::default()
        });

        let names: Vec<_> = engine.visible().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Tiger", "Toucan"]);
    }

    #[test]
    fn test_apply_filter_is_idempotent_and_resets_page() {
        let mut engine = CatalogEngine::new(ten_animals(), 3);
        let filter = FilterState {
            habitat: Criterion::Only("savanna".to_string()),
            ..FilterState::default()
        };

        engine.load_more();
        engine.apply_filter(filter.clone());
        let first: Vec<AnimalId> = engine.visible().iter().map(|a| a.id.clone()).collect();
        assert_eq!(engine.page(), 1);

        engine.load_more();
        engine.apply_filter(filter);
        let second: Vec<AnimalId> = engine.visible().iter().map(|a| a.id.clone()).collect();
        assert_eq!(engine.page(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_filter_value_yields_nothing() {
        let mut engine = CatalogEngine::new(ten_animals(), 9);
        engine.apply_filter(FilterState {
            diet: Criterion::Only("photosynthesis".to_string()),
            ..FilterState::default()
        });
        assert!(engine.visible().is_empty());
        assert!(!engine.has_more());
        assert!(!engine.load_more());
    }

    #[test]
    fn test_get_by_id_ignores_filter() {
        let mut engine = CatalogEngine::new(ten_animals(), 9);
        engine.apply_filter(FilterState {
            search_text: "no such animal".to_string(),
            ..FilterState::default()
        });
        assert!(engine.visible().is_empty());
        assert_eq!(engine.get_by_id(&AnimalId::from("7")).unwrap().name, "Animal7");
        assert!(matches!(
            engine.get_by_id(&AnimalId::from("999")),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicates_and_empty_facts() {
        let dup = vec![animal(1, "A", "jungle", "x"), animal(1, "B", "jungle", "x")];
        assert!(matches!(Catalog::new(dup), Err(CatalogError::Malformed(_))));

        let mut factless = animal(2, "C", "jungle", "x");
        factless.facts.clear();
        assert!(matches!(Catalog::new(vec![factless]), Err(CatalogError::Malformed(_))));

        assert!(Catalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_related_and_observed_values() {
        let animals = vec![
            animal(1, "Tiger", "jungle", "carnivore"),
            animal(2, "Lion", "savanna", "carnivore"),
            animal(3, "Toucan", "jungle", "omnivore"),
            animal(4, "Zebra", "savanna", "herbivore"),
            animal(5, "Jaguar", "jungle", "carnivore"),
            animal(6, "Gorilla", "jungle", "herbivore"),
        ];
        let catalog = Catalog::new(animals).unwrap();
        let tiger = catalog.get_by_id(&AnimalId::from("1")).unwrap();

        let related: Vec<_> = catalog.related(tiger).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(related, vec!["Lion", "Toucan", "Jaguar"]);

        assert_eq!(catalog.habitats(), vec!["jungle", "savanna"]);
        assert_eq!(catalog.diets(), vec!["carnivore", "omnivore", "herbivore"]);
        assert_eq!(catalog.by_habitat("savanna").count(), 2);
        assert_eq!(catalog.by_diet("herbivore").count(), 2);
    }
}
