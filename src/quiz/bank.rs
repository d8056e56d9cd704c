use super::{Category, Question, QuestionBank};

impl QuestionBank {
    pub fn builtin() -> Self {
        Self::new(vec![food_chains(), adaptations(), conservation()])
    }
}

fn category(id: &str, title: &str, description: &str, questions: Vec<Question>) -> Category {
    Category {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        questions,
    }
}

fn food_chains() -> Category {
    category(
        "food-chains",
        "Food Chains & Ecosystems",
        "Test your knowledge about how energy flows through ecosystems",
        vec![
            Question::new(
                1,
                "In a typical food chain, which organism is usually a primary producer?",
                &["Grass", "Rabbit", "Fox", "Mushroom"],
                0,
                "Grass is a primary producer because it creates its own food through photosynthesis.",
            ),
            Question::new(
                2,
                "What happens if you remove all predators from an ecosystem?",
                &[
                    "Prey population decreases",
                    "Prey population increases dramatically",
                    "Plants stop growing",
                    "Nothing changes",
                ],
                1,
                "Without predators, prey populations can grow unchecked, potentially leading to overgrazing and ecosystem imbalance.",
            ),
            Question::new(
                3,
                "Which animal is typically an apex predator in its ecosystem?",
                &["Deer", "Rabbit", "Lion", "Mouse"],
                2,
                "Lions are apex predators because they have no natural predators in their ecosystem.",
            ),
            Question::new(
                4,
                "What is the role of decomposers in a food chain?",
                &[
                    "Hunt other animals",
                    "Produce oxygen",
                    "Break down dead organisms",
                    "Provide shelter",
                ],
                2,
                "Decomposers like fungi and bacteria break down dead organisms, returning nutrients to the soil.",
            ),
            Question::new(
                5,
                "In an ocean food chain, what do krill typically eat?",
                &["Small fish", "Phytoplankton", "Sharks", "Seaweed"],
                1,
                "Krill are small crustaceans that feed on phytoplankton, which are microscopic marine plants.",
            ),
        ],
    )
}

fn adaptations() -> Category {
    category(
        "animal-adaptations",
        "Animal Adaptations",
        "Learn how animals survive in their environments",
        vec![
            Question::new(
                1,
                "Why do arctic foxes change their fur color with seasons?",
                &[
                    "To attract mates",
                    "For temperature regulation",
                    "For camouflage",
                    "To show dominance",
                ],
                2,
                "Arctic foxes change from white in winter to brown in summer for better camouflage in different environments.",
            ),
            Question::new(
                2,
                "What special adaptation helps camels survive in deserts?",
                &["Webbed feet", "Hump for fat storage", "Sharp claws", "Long neck"],
                1,
                "Camels store fat in their humps, which can be converted to water and energy when resources are scarce.",
            ),
            Question::new(
                3,
                "How do penguins keep warm in freezing temperatures?",
                &[
                    "They hibernate",
                    "Thick fur and fat layers",
                    "They migrate south",
                    "Special heating system",
                ],
                1,
                "Penguins have dense, waterproof feathers and a thick layer of blubber for insulation against cold.",
            ),
            Question::new(
                4,
                "What is the main purpose of a chameleon changing colors?",
                &["Temperature control", "Communication", "Camouflage", "All of the above"],
                3,
                "Chameleons change colors for camouflage, temperature regulation, and communication with other chameleons.",
            ),
            Question::new(
                5,
                "Why do some animals have patterns that look like eyes?",
                &["To see better", "To attract prey", "To scare predators", "For beauty"],
                2,
                "Eye-like patterns can startle or confuse predators, giving the animal time to escape.",
            ),
        ],
    )
}

fn conservation() -> Category {
    category(
        "conservation",
        "Conservation & Threats",
        "Understand wildlife conservation challenges",
        vec![
            Question::new(
                1,
                "What is the biggest threat to most endangered species?",
                &["Climate change", "Habitat loss", "Pollution", "Natural predators"],
                1,
                "Habitat loss due to human activities like deforestation and urbanization is the primary threat to most endangered species.",
            ),
            Question::new(
                2,
                "How does climate change affect polar bears?",
                &[
                    "They get too hot",
                    "Loss of sea ice habitat",
                    "They change color",
                    "They eat more fish",
                ],
                1,
                "Polar bears depend on sea ice for hunting seals. Melting ice reduces their hunting grounds and access to food.",
            ),
            Question::new(
                3,
                "What is the main purpose of wildlife corridors?",
                &[
                    "Tourist attractions",
                    "Connect fragmented habitats",
                    "Animal entertainment",
                    "Research facilities",
                ],
                1,
                "Wildlife corridors connect isolated habitat patches, allowing animals to move between areas safely.",
            ),
            Question::new(
                4,
                "Why are bees important for ecosystems?",
                &[
                    "They make honey",
                    "They pollinate plants",
                    "They control pests",
                    "They are food for birds",
                ],
                1,
                "Bees are crucial pollinators for many plants, including food crops that humans depend on.",
            ),
            Question::new(
                5,
                "What can individuals do to help wildlife conservation?",
                &[
                    "Visit zoos frequently",
                    "Support sustainable products",
                    "Keep wild animals as pets",
                    "Feed animals in parks",
                ],
                1,
                "Choosing sustainable products and supporting conservation organizations are effective ways to help wildlife.",
            ),
        ],
    )
}
