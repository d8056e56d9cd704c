use std::path::Path;

use log::{error, info, warn};

use super::{Animal, AnimalId, Catalog, ConservationStatus};
use crate::error::{CatalogError, CatalogResult};

/// Catalog compiled into the binary, used when the data file cannot be read
pub const BUNDLED_CATALOG: &str = include_str!("../../data/animals.json");

#[derive(serde::Deserialize)]
struct CatalogDocument {
    animals: Vec<Animal>,
}

/// Which stage of the fallback chain produced the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    DataFile,
    Bundled,
    Placeholder,
}

#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
}

pub fn parse_document(raw: &str) -> CatalogResult<Catalog> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    Catalog::new(document.animals)
}

async fn read_data_file(path: &Path) -> CatalogResult<Catalog> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
    parse_document(&raw)
}

/// Data file, then the bundled catalog, then the single placeholder record.
/// Never fails.
pub async fn load(path: &Path) -> LoadedCatalog {
    load_with_fallback(path, BUNDLED_CATALOG).await
}

pub async fn load_with_fallback(path: &Path, bundled: &str) -> LoadedCatalog {
    match read_data_file(path).await {
        Ok(catalog) => {
            info!("Loaded {} animals from {}", catalog.len(), path.display());
            return LoadedCatalog {
                catalog,
                source: CatalogSource::DataFile,
            };
        }
        Err(e) => error!("Error loading animals from {}: {}", path.display(), e),
    }

    match parse_document(bundled) {
        Ok(catalog) => {
            info!("Loaded {} animals from bundled data", catalog.len());
            LoadedCatalog {
                catalog,
                source: CatalogSource::Bundled,
            }
        }
        Err(e) => {
            warn!("Bundled catalog unusable ({}), using placeholder data", e);
            LoadedCatalog {
                catalog: placeholder(),
                source: CatalogSource::Placeholder,
            }
        }
    }
}

pub fn placeholder() -> Catalog {
    let tiger = Animal {
        id: AnimalId::from("1"),
        name: "Bengal Tiger".to_string(),
        scientific_name: "Panthera tigris tigris".to_string(),
        habitat: "jungle".to_string(),
        diet: "carnivore".to_string(),
        status: ConservationStatus::Endangered,
        location: "Indian Subcontinent".to_string(),
        size: "2.7-3.1 meters, 180-258 kg".to_string(),
        description: "The Bengal tiger is a majestic big cat known for its striking orange coat with black stripes.".to_string(),
        conservation_info: "Habitat loss and poaching threats.".to_string(),
        diet_info: Some("Hunts deer and wild boar.".to_string()),
        behavior: Some("Solitary hunters, primarily nocturnal.".to_string()),
        facts: vec![
            "Largest tiger species".to_string(),
            "Can swim up to 6 km".to_string(),
            "Stripes help camouflage".to_string(),
        ],
        image: "assets/images/animals/tiger.jpg".to_string(),
        audio: None,
        hologram: false,
    };

    Catalog {
        index: std::iter::once((tiger.id.clone(), 0)).collect(),
        animals: vec![tiger],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wildlife-bot-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const ONE_ANIMAL: &str = r#"{ "animals": [ {
        "id": 42, "name": "Koala", "scientificName": "Phascolarctos cinereus",
        "habitat": "forest", "diet": "herbivore", "status": "vulnerable",
        "location": "Australia", "size": "60-85 cm", "description": "Sleeps a lot.",
        "conservationInfo": "Bushfires.", "facts": ["Sleeps 20 hours a day"],
        "image": "koala.jpg"
    } ] }"#;

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = parse_document(BUNDLED_CATALOG).unwrap();
        assert!(catalog.len() > 10);
    }

    #[test]
    fn test_numeric_and_text_ids() {
        let catalog = parse_document(ONE_ANIMAL).unwrap();
        let koala = catalog.get_by_id(&AnimalId::from("42")).unwrap();
        assert_eq!(koala.status, ConservationStatus::Vulnerable);
        assert_eq!(koala.behavior, None);
        assert!(!koala.hologram);

        let text_id = ONE_ANIMAL.replace("\"id\": 42", "\"id\": \"koala\"");
        assert!(parse_document(&text_id)
            .unwrap()
            .get_by_id(&AnimalId::from("koala"))
            .is_ok());
    }

    #[test]
    fn test_padded_text_id_is_reachable_by_command() {
        let padded = ONE_ANIMAL.replace("\"id\": 42", "\"id\": \" 7 \"");
        let catalog = parse_document(&padded).unwrap();
        let id = crate::render::parse_animal_command("/animal_7").unwrap();
        assert_eq!(catalog.get_by_id(&id).unwrap().name, "Koala");
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let broken = ONE_ANIMAL.replace("\"scientificName\": \"Phascolarctos cinereus\",", "");
        assert!(matches!(parse_document(&broken), Err(CatalogError::Json(_))));

        let unknown_status = ONE_ANIMAL.replace("vulnerable", "fine");
        assert!(parse_document(&unknown_status).is_err());
    }

    #[tokio::test]
    async fn test_loads_data_file() {
        let path = temp_file("good.json", ONE_ANIMAL);
        let loaded = load_with_fallback(&path, BUNDLED_CATALOG).await;
        assert_eq!(loaded.source, CatalogSource::DataFile);
        assert_eq!(loaded.catalog.len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_falls_back_to_bundled() {
        let missing = std::env::temp_dir().join("wildlife-bot-does-not-exist.json");
        let loaded = load_with_fallback(&missing, BUNDLED_CATALOG).await;
        assert_eq!(loaded.source, CatalogSource::Bundled);

        let path = temp_file("malformed.json", "{ \"animals\": [ { \"id\": 1 } ] }");
        let loaded = load_with_fallback(&path, BUNDLED_CATALOG).await;
        assert_eq!(loaded.source, CatalogSource::Bundled);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_falls_back_to_placeholder() {
        let missing = std::env::temp_dir().join("wildlife-bot-does-not-exist.json");
        let loaded = load_with_fallback(&missing, "not json").await;
        assert_eq!(loaded.source, CatalogSource::Placeholder);
        assert_eq!(loaded.catalog.len(), 1);
        assert_eq!(loaded.catalog.animals()[0].name, "Bengal Tiger");
    }
}
