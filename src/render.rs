//! Chat rendering. Pure functions from engine state to Telegram HTML text.

use teloxide::utils::html::escape;

use crate::catalog::{regions, Animal, AnimalId, CatalogEngine, FilterState};
use crate::quiz::{Attempt, Category, Feedback, Summary};
use crate::safari::{SafariProgress, Scene, SceneEntry};

pub const ANIMAL_COMMAND: &str = "/animal_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Description,
    Facts,
    Behavior,
    Conservation,
    Map,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Description,
        DetailTab::Facts,
        DetailTab::Behavior,
        DetailTab::Conservation,
        DetailTab::Map,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Description => "Description",
            DetailTab::Facts => "Amazing Facts",
            DetailTab::Behavior => "Behavior",
            DetailTab::Conservation => "Conservation",
            DetailTab::Map => "Habitat Map",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tab| tab.label() == label)
    }
}

/// Parses `/animal_<id>`, the link printed under every card
pub fn parse_animal_command(text: &str) -> Option<AnimalId> {
    let id = text.trim().strip_prefix(ANIMAL_COMMAND)?;
    // group chats append the bot name: /animal_1@wildlife_bot
    let id = id.split('@').next().unwrap_or(id);
    if id.is_empty() {
        None
    } else {
        Some(AnimalId::from(id))
    }
}

pub fn animal_command(id: &AnimalId) -> String {
    format!("{}{}", ANIMAL_COMMAND, id)
}

pub fn animal_card(animal: &Animal) -> String {
    format!(
        "<b>{}</b> <i>{}</i>\n🏠 {} · 🍽 {} · {}\n💡 {}\n{}",
        escape(&animal.name),
        escape(&animal.scientific_name),
        escape(&animal.habitat),
        escape(&animal.diet),
        animal.status,
        escape(animal.teaser()),
        animal_command(&animal.id),
    )
}

pub fn filter_summary(filter: &FilterState) -> String {
    let mut text = format!(
        "Habitat: <b>{}</b> · Diet: <b>{}</b> · Status: <b>{}</b>",
        escape(&filter.habitat.to_string()),
        escape(&filter.diet.to_string()),
        escape(&filter.status.to_string()),
    );
    if !filter.search_text.is_empty() {
        text.push_str(&format!("\nSearch: <b>{}</b>", escape(&filter.search_text)));
    }
    text
}

/// Telegram rejects longer messages (counted in UTF-16 units)
pub const MESSAGE_LIMIT: usize = 4096;

fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The catalog screen, split into messages Telegram will accept.
/// Cards before `from` are skipped, so "load more" sends only the new page.
pub fn catalog_messages(engine: &CatalogEngine, from: usize) -> Vec<String> {
    let visible = engine.visible();
    let header = filter_summary(engine.filter());

    if visible.is_empty() {
        return vec![format!(
            "{}\n\n🔍 <b>No animals found</b>\nTry adjusting your filters or search terms.",
            header
        )];
    }

    let mut messages = Vec::new();
    let mut current = format!(
        "{}\nShowing {} of {} animals",
        header,
        visible.len(),
        engine.filtered_len()
    );
    for animal in visible.iter().skip(from) {
        let card = animal_card(animal);
        if text_len(&current) + 2 + text_len(&card) > MESSAGE_LIMIT {
            messages.push(std::mem::replace(&mut current, card));
        } else {
            current.push_str("\n\n");
            current.push_str(&card);
        }
    }
    messages.push(current);
    messages
}

pub fn detail_caption(animal: &Animal) -> String {
    let mut caption = format!(
        "<b>{}</b>\n<i>{}</i>\n{}\n\n🏠 Habitat: {}\n🍽 Diet: {}\n🌍 Location: {}\n📏 Size: {}",
        escape(&animal.name),
        escape(&animal.scientific_name),
        animal.status.as_str().to_uppercase(),
        escape(&animal.habitat),
        escape(&animal.diet),
        escape(&animal.location),
        escape(&animal.size),
    );
    if animal.hologram {
        caption.push_str("\n\n🧊 3D hologram view available");
    }
    caption
}

pub fn detail_tab(animal: &Animal, tab: DetailTab) -> String {
    match tab {
        DetailTab::Description => {
            let mut text = format!(
                "📄 <b>About the {}</b>\n{}",
                escape(&animal.name),
                escape(&animal.description)
            );
            if let Some(diet_info) = &animal.diet_info {
                text.push_str(&format!("\n\n🍽 <b>Diet &amp; Feeding</b>\n{}", escape(diet_info)));
            }
            text
        }
        DetailTab::Facts => {
            let facts = animal
                .facts
                .iter()
                .map(|fact| format!("✨ {}", escape(fact)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("⭐ <b>Amazing Facts</b>\n{}", facts)
        }
        DetailTab::Behavior => match &animal.behavior {
            Some(behavior) => format!("🧠 <b>Behavior &amp; Social Structure</b>\n{}", escape(behavior)),
            None => "🧠 <b>Behavior &amp; Social Structure</b>\n🔬 Behavioral data currently being analyzed...".to_string(),
        },
        DetailTab::Conservation => format!(
            "🛡 <b>Conservation Status</b>\n⚠️ STATUS: {}\n{}\n\n🤝 <b>How You Can Help</b>\n\
             • Support wildlife conservation organizations\n\
             • Choose sustainable products\n\
             • Spread awareness about {} conservation\n\
             • Reduce your environmental footprint",
            animal.status.as_str().to_uppercase(),
            escape(&animal.conservation_info),
            escape(&animal.name),
        ),
        DetailTab::Map => habitat_map(animal),
    }
}

pub fn habitat_map(animal: &Animal) -> String {
    let regions = regions::regions_for(&animal.id);
    if regions.is_empty() {
        return format!(
            "🗺 <b>{} Habitat Range</b>\n{}",
            escape(&animal.name),
            escape(&animal.location)
        );
    }
    let lines = regions
        .iter()
        .map(|r| format!("📍 {} ({:.0}°, {:.0}°)", r.name, r.centre.0, r.centre.1))
        .collect::<Vec<_>>()
        .join("\n");
    format!("🗺 <b>{} Habitat Range</b>\n{}", escape(&animal.name), lines)
}

pub fn related(animals: &[&Animal]) -> String {
    if animals.is_empty() {
        return String::new();
    }
    let links = animals
        .iter()
        .map(|a| format!("{} {}", escape(&a.name), animal_command(&a.id)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("🔗 <b>Related animals</b>\n{}", links)
}

pub fn share_text(animal: &Animal) -> String {
    let teaser: String = animal.description.chars().take(100).collect();
    format!("Check out the {} on BioRelm! {}...", animal.name, teaser)
}

pub fn option_letter(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

pub fn option_index(letter: &str) -> Option<usize> {
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some((c as u8 - b'A') as usize),
        _ => None,
    }
}

pub fn categories(categories: &[std::sync::Arc<Category>]) -> String {
    let list = categories
        .iter()
        .map(|c| {
            format!(
                "<b>{}</b>\n{}\n<i>{} questions</i>",
                escape(&c.title),
                escape(&c.description),
                c.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "<b>Wildlife Knowledge Challenge</b>\nTest your knowledge about animals, ecosystems, and conservation. Choose a category to begin!\n\n{}\n\n🏆 Complete all quizzes to become a Wildlife Expert!",
        list
    )
}

pub fn question(attempt: &Attempt, feedback: Option<&Feedback>) -> String {
    let index = attempt.current_index();
    let total = attempt.category().len();
    let question = attempt.current_question();

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mark = match feedback {
                Some(fb) if i == fb.correct_option => " ✅",
                Some(fb) if i == fb.selected => " ❌",
                _ => "",
            };
            format!("{}. {}{}", option_letter(i), escape(option), mark)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = format!(
        "Question {} of {} · Score: {}\n\n<b>{}</b>\n\n{}",
        index + 1,
        total,
        attempt.score(),
        escape(&question.text),
        options
    );
    if let Some(fb) = feedback {
        text.push_str("\n\n");
        text.push_str(&self::feedback(fb));
    }
    text
}

pub fn feedback(feedback: &Feedback) -> String {
    let verdict = if feedback.is_correct { "✅ Correct!" } else { "❌ Not quite!" };
    format!("{}\n{}", verdict, escape(&feedback.explanation))
}

pub fn summary(summary: &Summary) -> String {
    let review = summary
        .review
        .iter()
        .map(|entry| {
            let mut line = format!(
                "{} <b>Q{}:</b> {}\nYour answer: {}",
                if entry.is_correct { "✅" } else { "❌" },
                entry.number,
                escape(&entry.question),
                escape(entry.chosen.as_deref().unwrap_or("-")),
            );
            if let Some(correct) = &entry.correct_answer {
                line.push_str(&format!("\nCorrect answer: {}", escape(correct)));
            }
            line.push_str(&format!("\n<i>{}</i>", escape(&entry.explanation)));
            line
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "<b>Quiz Complete!</b>\n{}\n\n<b>{}%</b>\n{}\n\nCorrect answers: {}\nTotal questions: {}\n\n<b>Question Review</b>\n{}",
        escape(&summary.title),
        summary.percentage,
        summary.tier.message(),
        summary.score,
        summary.total,
        review
    )
}

pub fn scene(scene: &Scene, sound_on: bool) -> String {
    let hotspots = scene
        .hotspots
        .iter()
        .map(|h| format!("{} <i>({})</i>", h.text, h.bearing()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<b>{}</b>\n🎯 {} wildlife spots · {}\n\nLook around and pick a marker to discover animals and habitat features!\n\n{}",
        escape(scene.title),
        scene.wildlife_spots(),
        if sound_on { "🔊 Ambient sounds on" } else { "🔇 Sounds off" },
        hotspots
    )
}

pub fn scene_entry(entry: &SceneEntry) -> String {
    let mut text = format!("🦁 {}", entry.guide_line);
    if entry.encounter {
        text.push_str("\n\n🔭 <b>Wildlife Sighting!</b>\nYou've spotted something moving in the distance...");
    }
    text
}

pub fn habitat_feature(scene: &Scene, text: &str, fact: &str) -> String {
    format!(
        "<b>{} Feature</b>\n{}\n{}\n\n🌿 <b>Safari Fact:</b>\n{}",
        escape(scene.title),
        escape(text),
        escape(scene.feature_details(text)),
        escape(fact)
    )
}

pub fn safari_progress(progress: &SafariProgress) -> String {
    format!(
        "🎯 Unique sightings: {}\n📈 Safari completion: {}%",
        progress.total_sightings, progress.completion
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::animal;
    use crate::catalog::Catalog;
    use std::sync::Arc;

    #[test]
    fn test_animal_command_round_trip() {
        let id = AnimalId::from("12");
        assert_eq!(animal_command(&id), "/animal_12");
        assert_eq!(parse_animal_command("/animal_12"), Some(id.clone()));
        assert_eq!(parse_animal_command("/animal_12@wildlife_bot"), Some(id));
        assert_eq!(parse_animal_command("/animal_"), None);
        assert_eq!(parse_animal_command("Browse"), None);
    }

    #[test]
    fn test_large_catalog_fits_in_messages() {
        let animals = (1..=50)
            .map(|i| {
                let mut a = animal(i, &format!("Animal number {}", i), "savanna", "herbivore");
                a.facts = vec![format!("{} {}", i, "lives a long and eventful life. ".repeat(5))];
                a
            })
            .collect();
        let catalog = Arc::new(Catalog::new(animals).unwrap());
        let mut engine = CatalogEngine::new(catalog, 9);
        while engine.load_more() {}
        assert_eq!(engine.visible().len(), 50);

        let messages = catalog_messages(&engine, 0);
        assert!(messages.len() > 1);
        for message in &messages {
            assert!(message.encode_utf16().count() <= MESSAGE_LIMIT);
        }
        let all = messages.join("\n");
        assert!(all.contains("Showing 50 of 50 animals"));
        for i in 1..=50 {
            assert!(all.contains(&format!("/animal_{}\n", i)) || all.ends_with(&format!("/animal_{}", i)));
        }
    }

    #[test]
    fn test_load_more_sends_only_new_cards() {
        let animals = (1..=20)
            .map(|i| animal(i, &format!("Animal{}", i), "savanna", "herbivore"))
            .collect();
        let mut engine = CatalogEngine::new(Arc::new(Catalog::new(animals).unwrap()), 9);
        let shown = engine.visible().len();
        assert!(engine.load_more());

        let messages = catalog_messages(&engine, shown);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Showing 18 of 20 animals"));
        assert!(messages[0].contains("/animal_10"));
        assert!(messages[0].contains("/animal_18"));
        assert!(!messages[0].contains("/animal_9"));
        assert!(!messages[0].contains("/animal_19"));
    }

    #[test]
    fn test_empty_catalog_page() {
        let animals = vec![animal(1, "Tiger", "jungle", "carnivore")];
        let mut engine = CatalogEngine::new(Arc::new(Catalog::new(animals).unwrap()), 9);
        engine.apply_filter(FilterState {
            search_text: "walrus".to_string(),
            ..FilterState::default()
        });
        let messages = catalog_messages(&engine, 0);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("No animals found"));
    }

    #[test]
    fn test_option_letters() {
        assert_eq!(option_letter(0), "A");
        assert_eq!(option_letter(3), "D");
        assert_eq!(option_index("C"), Some(2));
        assert_eq!(option_index("c"), None);
        assert_eq!(option_index("AB"), None);
    }

    #[test]
    fn test_detail_tabs() {
        let mut tiger = animal(1, "Tiger", "jungle", "carnivore");
        assert!(detail_tab(&tiger, DetailTab::Behavior).contains("currently being analyzed"));
        tiger.behavior = Some("Solitary".to_string());
        assert!(detail_tab(&tiger, DetailTab::Behavior).contains("Solitary"));
        assert!(detail_tab(&tiger, DetailTab::Map).contains("India"));
        assert_eq!(DetailTab::from_label("Amazing Facts"), Some(DetailTab::Facts));
    }

    #[test]
    fn test_names_are_escaped() {
        let mut odd = animal(2, "Cat <script>", "jungle", "carnivore");
        odd.facts = vec!["a & b".to_string()];
        let card = animal_card(&odd);
        assert!(card.contains("Cat &lt;script&gt;"));
        assert!(card.contains("a &amp; b"));
    }

    #[test]
    fn test_share_text_truncates_description() {
        let mut whale = animal(16, "Blue Whale", "ocean", "carnivore");
        whale.description = "x".repeat(150);
        let text = share_text(&whale);
        assert_eq!(text, format!("Check out the Blue Whale on BioRelm! {}...", "x".repeat(100)));
    }
}
