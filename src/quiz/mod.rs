pub mod bank;
pub mod engine;
pub mod scoring;

use std::sync::Arc;

use log::warn;

pub use engine::{Advance, Attempt, Feedback, QuizEngine, QuizState};
pub use scoring::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: String,
}

impl Question {
    pub fn new(id: u32, text: &str, options: &[&str], correct_option: usize, explanation: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option,
            explanation: explanation.to_string(),
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }

    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_option]
    }

    /// Two or more options and a correct index that points at one of them
    pub fn is_valid(&self) -> bool {
        self.options.len() >= 2 && self.correct_option < self.options.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Category {
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

/// Fixed set of quiz categories, shared read-only by every attempt
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    categories: Vec<Arc<Category>>,
}

impl QuestionBank {
    /// Categories without questions or with an invalid question are dropped
    pub fn new(categories: Vec<Category>) -> Self {
        let categories = categories
            .into_iter()
            .filter(|category| {
                let usable = !category.questions.is_empty()
                    && category.questions.iter().all(Question::is_valid);
                if !usable {
                    warn!("Skipping unusable quiz category '{}'", category.id);
                }
                usable
            })
            .map(Arc::new)
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<Arc<Category>> {
        self.categories.iter().find(|c| c.id == id).cloned()
    }

    pub fn find_by_title(&self, title: &str) -> Option<Arc<Category>> {
        self.categories.iter().find(|c| c.title == title).cloned()
    }
}
