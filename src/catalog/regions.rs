//! Static range table behind the habitat map.
//!
//! Ranges are keyed by catalog id. Each region carries the centre used to
//! place its marker; the map itself is drawn by whoever renders it.

use super::AnimalId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub key: &'static str,
    pub name: &'static str,
    /// (latitude, longitude)
    pub centre: (f64, f64),
}

const REGIONS: &[Region] = &[
    Region { key: "arctic", name: "Arctic", centre: (75.0, -40.0) },
    Region { key: "africa", name: "Africa", centre: (8.0, 21.0) },
    Region { key: "asia", name: "Asia", centre: (34.0, 100.0) },
    Region { key: "india", name: "India", centre: (22.0, 79.0) },
    Region { key: "south america", name: "South America", centre: (-14.0, -60.0) },
    Region { key: "north america", name: "North America", centre: (45.0, -100.0) },
    Region { key: "central america", name: "Central America", centre: (17.0, -88.0) },
    Region { key: "europe", name: "Europe", centre: (50.0, 10.0) },
    Region { key: "australia", name: "Australia", centre: (-25.0, 135.0) },
    Region { key: "antarctica", name: "Antarctica", centre: (-75.0, 0.0) },
    Region { key: "china", name: "China", centre: (35.0, 104.0) },
    Region { key: "global oceans", name: "Global Oceans", centre: (0.0, -160.0) },
    Region { key: "north atlantic", name: "North Atlantic", centre: (40.0, -40.0) },
    Region { key: "north pacific", name: "North Pacific", centre: (30.0, -160.0) },
    Region { key: "bering sea", name: "Bering Sea", centre: (60.0, -175.0) },
    Region { key: "sub-saharan africa", name: "Sub-Saharan Africa", centre: (0.0, 20.0) },
    Region { key: "himalayan mountains", name: "Himalayan Mountains", centre: (30.0, 85.0) },
    Region { key: "congo basin", name: "Congo Basin", centre: (0.0, 22.0) },
    Region { key: "amazon basin", name: "Amazon Basin", centre: (-5.0, -60.0) },
    Region { key: "southeast asia", name: "Southeast Asia", centre: (10.0, 105.0) },
];

const RANGES: &[(&str, &[&str])] = &[
    ("1", &["asia", "india"]),
    ("2", &["africa", "congo basin"]),
    ("3", &["africa", "sub-saharan africa"]),
    ("4", &["asia", "china"]),
    ("5", &["africa", "sub-saharan africa"]),
    ("6", &["antarctica"]),
    ("7", &["south america", "amazon basin"]),
    ("8", &["south america", "amazon basin"]),
    ("9", &["africa", "sub-saharan africa"]),
    ("10", &["asia", "himalayan mountains"]),
    ("11", &["asia", "southeast asia"]),
    ("12", &["arctic"]),
    ("13", &["asia", "himalayan mountains"]),
    ("14", &["asia", "southeast asia"]),
    ("15", &["arctic"]),
    ("16", &["global oceans"]),
    ("17", &["global oceans"]),
    ("18", &["global oceans"]),
    ("19", &["north america"]),
    ("20", &["north america", "europe", "asia"]),
    ("21", &["africa", "sub-saharan africa"]),
    ("22", &["africa", "sub-saharan africa"]),
    ("23", &["australia"]),
    ("24", &["australia"]),
    ("25", &["australia"]),
    ("26", &["africa", "sub-saharan africa"]),
    ("27", &["africa", "asia"]),
    ("28", &["south america", "central america"]),
    ("29", &["africa", "congo basin"]),
    ("30", &["africa", "congo basin"]),
    ("31", &["asia", "southeast asia"]),
    ("32", &["africa", "congo basin"]),
    ("33", &["asia", "southeast asia"]),
    ("34", &["africa", "asia"]),
    ("35", &["africa", "sub-saharan africa"]),
    ("36", &["north america", "europe", "asia"]),
    ("37", &["north america"]),
    ("38", &["africa", "sub-saharan africa"]),
    ("39", &["africa", "asia", "south america"]),
    ("40", &["asia", "india"]),
    ("41", &["global oceans"]),
    ("42", &["global oceans"]),
    ("43", &["global oceans"]),
    ("44", &["global oceans"]),
    ("45", &["south america", "central america"]),
    ("46", &["south america", "central america", "north america"]),
    ("47", &["africa", "sub-saharan africa"]),
    ("48", &["north america", "europe", "asia"]),
    ("49", &["global oceans"]),
    ("50", &["north america"]),
    // extinct
    ("51", &["australia"]),
    ("52", &["arctic", "north america", "europe", "asia"]),
    ("53", &["africa"]),
    ("54", &["north america", "south america"]),
    ("55", &["europe", "asia"]),
    ("56", &["north atlantic"]),
    ("57", &["africa"]),
    ("58", &["north america"]),
    ("59", &["north pacific", "bering sea"]),
    ("60", &["north america"]),
];

pub fn region(key: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.key == key)
}

/// Known range of an animal; empty when the id has no entry
pub fn regions_for(id: &AnimalId) -> Vec<&'static Region> {
    RANGES
        .iter()
        .find(|(animal, _)| *animal == id.as_str())
        .map(|(_, keys)| keys.iter().filter_map(|key| region(key)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_range_key_resolves() {
        for (id, keys) in RANGES {
            for key in keys.iter() {
                assert!(region(key).is_some(), "animal {} references unknown region {}", id, key);
            }
        }
    }

    #[test]
    fn test_regions_for() {
        let names: Vec<_> = regions_for(&AnimalId::from("1")).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Asia", "India"]);
        assert!(regions_for(&AnimalId::from("tiger")).is_empty());
    }
}
