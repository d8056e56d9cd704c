//! 360° safari tour: fixed scenes, hotspots and the per-chat expedition log.

use std::collections::BTreeSet;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::AnimalId;

/// Probability of a random wildlife encounter when entering a scene
pub const ENCOUNTER_CHANCE: f64 = 0.4;

pub const DEFAULT_SCENE: &str = "jungle";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HotspotKind {
    Animal(&'static str),
    Habitat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub pitch: f32,
    pub yaw: f32,
    pub text: &'static str,
    pub kind: HotspotKind,
}

impl Hotspot {
    pub fn animal_id(&self) -> Option<AnimalId> {
        match self.kind {
            HotspotKind::Animal(id) => Some(AnimalId::from(id)),
            HotspotKind::Habitat => None,
        }
    }

    /// Where to look from the scene's starting view, e.g. "NE, up"
    pub fn bearing(&self) -> String {
        const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        let point = POINTS[((self.yaw.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8];
        if self.pitch >= 10.0 {
            format!("{}, up", point)
        } else if self.pitch <= -10.0 {
            format!("{}, down", point)
        } else {
            point.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: &'static str,
    pub title: &'static str,
    pub panorama: &'static str,
    pub ambient_audio: &'static str,
    pub hotspots: Vec<Hotspot>,
    guide_lines: &'static [&'static str],
    features: &'static [(&'static str, &'static str)],
}

impl Scene {
    pub fn wildlife_spots(&self) -> usize {
        self.hotspots
            .iter()
            .filter(|h| matches!(h.kind, HotspotKind::Animal(_)))
            .count()
    }

    pub fn hotspot(&self, text: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.text == text)
    }

    pub fn feature_details(&self, text: &str) -> &'static str {
        self.features
            .iter()
            .find(|(feature, _)| *feature == text)
            .map(|(_, details)| *details)
            .unwrap_or("This feature contributes to the unique ecosystem of this habitat.")
    }
}

const SAFARI_FACTS: &[&str] = &[
    "Many predators are most active during dawn and dusk hours.",
    "Animal tracks can tell stories about recent wildlife activity.",
    "Birds often give alarm calls when predators are nearby.",
    "Water sources attract diverse wildlife, especially in dry seasons.",
    "Many animals have camouflage that makes them nearly invisible.",
    "Listening carefully can reveal hidden wildlife through their sounds.",
];

fn animal(pitch: f32, yaw: f32, text: &'static str, id: &'static str) -> Hotspot {
    Hotspot { pitch, yaw, text, kind: HotspotKind::Animal(id) }
}

fn habitat(pitch: f32, yaw: f32, text: &'static str) -> Hotspot {
    Hotspot { pitch, yaw, text, kind: HotspotKind::Habitat }
}

/// The fixed set of scenes, shared by every chat
#[derive(Debug, Clone)]
pub struct SafariTour {
    scenes: Vec<Scene>,
}

impl SafariTour {
    pub fn builtin() -> Self {
        let scenes = vec![
            Scene {
                id: "jungle",
                title: "Tropical Rainforest Canopy",
                panorama: "assets/images/360/jungle-canopy.jpg",
                ambient_audio: "assets/sounds/jungle-ambience.mp3",
                hotspots: vec![
                    animal(-10.0, 30.0, "🦍 Howler Monkeys in the trees!", "8"),
                    animal(5.0, 150.0, "🦜 Colorful Toucans flying", "7"),
                    animal(-15.0, -45.0, "🐅 Bengal Tiger territory", "1"),
                    habitat(8.0, 200.0, "🌿 Dense jungle vegetation"),
                ],
                guide_lines: &[
                    "Welcome to the tropical rainforest! Listen for howler monkeys and watch for colorful birds in the canopy.",
                    "The dense vegetation here provides perfect camouflage for jaguars and other elusive predators.",
                    "Rainforests are the most biodiverse habitats on Earth - every glance reveals new wonders!",
                ],
                features: &[
                    ("🌿 Dense jungle vegetation", "The rainforest canopy creates multiple layers of habitat, supporting incredible biodiversity from forest floor to treetops."),
                    ("💦 Waterfall mist zone", "The constant mist creates a unique microclimate supporting mosses, ferns, and specialized plant life."),
                ],
            },
            Scene {
                id: "savanna",
                title: "African Savanna Plains",
                panorama: "assets/images/360/savanna.jpg",
                ambient_audio: "assets/sounds/savanna-wind.mp3",
                hotspots: vec![
                    animal(-5.0, 0.0, "🦁 Lion pride resting", "5"),
                    animal(-8.0, 120.0, "🐘 Elephant herd gathering", "3"),
                    animal(0.0, -90.0, "🦒 Giraffes grazing", "21"),
                    habitat(-3.0, 180.0, "🌅 Sunset over the plains"),
                ],
                guide_lines: &[
                    "You've entered the African savanna. Scan the horizon for elephant herds and watch the grass for predators.",
                    "The acacia trees provide shade and food for many savanna species during the heat of the day.",
                    "During dry season, water holes become gathering spots for all kinds of wildlife.",
                ],
                features: &[
                    ("🌅 Sunset over the plains", "The golden hour provides optimal lighting for photography and is when many animals become most active."),
                    ("🌾 Grassland expanse", "These vast grasslands support large herds of grazing animals and their predators."),
                ],
            },
            Scene {
                id: "waterfall",
                title: "Rainforest Waterfall Oasis",
                panorama: "assets/images/360/waterfall.jpg",
                ambient_audio: "assets/sounds/waterfall.mp3",
                hotspots: vec![
                    animal(-20.0, 0.0, "🐅 Tiger drinking water", "1"),
                    animal(-10.0, 100.0, "🐊 River crocodile", "9"),
                    habitat(5.0, -60.0, "🦜 Macaws flying overhead"),
                    habitat(-15.0, 150.0, "💦 Waterfall mist zone"),
                ],
                guide_lines: &[
                    "This waterfall oasis attracts animals from miles around. Look for tracks along the water's edge.",
                    "The constant mist creates unique microhabitats for specialized plants and animals.",
                    "Water sources are critical survival points in the rainforest ecosystem.",
                ],
                features: &[
                    ("💦 Waterfall mist zone", "The oxygen-rich mist supports unique ecosystems and provides drinking water for forest animals."),
                    ("🦜 Macaws flying overhead", "Colorful macaws use cliff faces near waterfalls for nesting and mineral supplementation."),
                ],
            },
            Scene {
                id: "arctic",
                title: "Arctic Tundra Expedition",
                panorama: "assets/images/360/arctic.jpg",
                ambient_audio: "assets/sounds/arctic-wind.mp3",
                hotspots: vec![
                    animal(-15.0, 20.0, "🐧 Penguin colony", "6"),
                    animal(-5.0, -120.0, "🦊 Arctic fox hunting", "12"),
                    animal(10.0, 180.0, "🐻‍❄️ Polar bear territory", "15"),
                    habitat(0.0, 90.0, "❄️ Frozen landscape"),
                ],
                guide_lines: &[
                    "Welcome to the arctic tundra. The extreme conditions here require special adaptations to survive.",
                    "Look for animal tracks in the snow - they can lead you to recent wildlife activity.",
                    "Despite the harsh environment, the arctic supports a surprising diversity of life.",
                ],
                features: &[
                    ("❄️ Frozen landscape", "The permafrost and ice create challenging conditions that only specialized species can survive."),
                    ("🌅 Midnight sun", "During summer months, the sun never fully sets, creating unique lighting conditions."),
                ],
            },
        ];
        Self { scenes }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn scene_by_title(&self, title: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.title == title)
    }

    pub fn random_fact<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        SAFARI_FACTS.choose(rng).copied().unwrap_or(SAFARI_FACTS[0])
    }
}

/// What happens when a chat walks into a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    pub scene_id: &'static str,
    pub guide_line: &'static str,
    pub encounter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafariProgress {
    pub total_sightings: usize,
    pub completion: u8,
}

/// Per-chat safari state: where the visitor stands and what they spotted.
#[derive(Debug, Clone, PartialEq)]
pub struct Expedition {
    current: &'static str,
    sightings: BTreeSet<AnimalId>,
}

impl Default for Expedition {
    fn default() -> Self {
        Self {
            current: DEFAULT_SCENE,
            sightings: BTreeSet::new(),
        }
    }
}

impl Expedition {
    pub fn current<'a>(&self, tour: &'a SafariTour) -> Option<&'a Scene> {
        tour.scene(self.current)
    }

    /// Enters the current scene, rolling the guide line and a possible encounter
    pub fn enter<R: Rng + ?Sized>(&self, tour: &SafariTour, rng: &mut R) -> Option<SceneEntry> {
        let scene = tour.scene(self.current)?;
        Some(SceneEntry {
            scene_id: scene.id,
            guide_line: scene.guide_lines.choose(rng).copied().unwrap_or_default(),
            encounter: rng.gen_bool(ENCOUNTER_CHANCE),
        })
    }

    /// Moves to another scene. Unknown ids and the current scene are no-ops.
    pub fn switch<R: Rng + ?Sized>(
        &mut self,
        tour: &SafariTour,
        scene_id: &str,
        rng: &mut R,
    ) -> Option<SceneEntry> {
        if scene_id == self.current {
            return None;
        }
        let scene = tour.scene(scene_id)?;
        debug!("Safari moving from {} to {}", self.current, scene.id);
        self.current = scene.id;
        self.enter(tour, rng)
    }

    /// Returns `true` the first time an animal is spotted
    pub fn record_sighting(&mut self, id: AnimalId) -> bool {
        self.sightings.insert(id)
    }

    pub fn sightings(&self) -> &BTreeSet<AnimalId> {
        &self.sightings
    }

    pub fn progress(&self, catalog_size: usize) -> SafariProgress {
        let total = self.sightings.len();
        let completion = if catalog_size == 0 {
            0
        } else {
            crate::quiz::scoring::percentage(total, catalog_size)
        };
        SafariProgress {
            total_sightings: total,
            completion,
        }
    }
}
