use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::{Category, Question, QuestionBank, Summary};
use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub selected: usize,
    pub is_correct: bool,
}

/// One run through a category. The first answer to a question is final.
#[derive(Debug, Clone)]
pub struct Attempt {
    category: Arc<Category>,
    current: usize,
    answers: BTreeMap<usize, RecordedAnswer>,
    score: usize,
}

impl Attempt {
    fn new(category: Arc<Category>) -> Self {
        Self {
            category,
            current: 0,
            answers: BTreeMap::new(),
            score: 0,
        }
    }

    pub fn category(&self) -> &Arc<Category> {
        &self.category
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.category.questions[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.category.len()
    }

    pub fn answer_at(&self, index: usize) -> Option<RecordedAnswer> {
        self.answers.get(&index).copied()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Score recomputed from the recorded answers; always equal to `score()`
    pub fn recount(&self) -> usize {
        self.answers.values().filter(|a| a.is_correct).count()
    }

    fn feedback_at(&self, index: usize) -> Option<Feedback> {
        let answer = self.answer_at(index)?;
        let question = &self.category.questions[index];
        Some(Feedback {
            question_index: index,
            selected: answer.selected,
            is_correct: answer.is_correct,
            correct_option: question.correct_option,
            explanation: question.explanation.clone(),
        })
    }
}

/// What to show after a question has been answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub question_index: usize,
    pub selected: usize,
    pub is_correct: bool,
    pub correct_option: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Question(usize),
    Completed(Summary),
}

#[derive(Debug, Clone, Default)]
pub enum QuizState {
    #[default]
    NotStarted,
    InProgress(Attempt),
    Completed(Attempt),
}

/// Quiz state machine: `NotStarted -> InProgress -> Completed`.
///
/// Every rejected call returns a [`QuizError`] and leaves the state as it was.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    bank: Arc<QuestionBank>,
    state: QuizState,
}

impl QuizEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            state: QuizState::NotStarted,
        }
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn in_progress(&self) -> Option<&Attempt> {
        match &self.state {
            QuizState::InProgress(attempt) => Some(attempt),
            _ => None,
        }
    }

    fn in_progress_mut(&mut self) -> Result<&mut Attempt, QuizError> {
        match &mut self.state {
            QuizState::InProgress(attempt) => Ok(attempt),
            _ => Err(QuizError::NotInProgress),
        }
    }

    /// Starts a fresh attempt, discarding whatever was there before.
    /// An unknown id leaves the engine untouched.
    pub fn select_category(&mut self, id: &str) -> Result<(), QuizError> {
        let category = self.bank.get(id).ok_or_else(|| {
            debug!("Quiz category '{}' not found", id);
            QuizError::UnknownCategory(id.to_string())
        })?;
        self.state = QuizState::InProgress(Attempt::new(category));
        Ok(())
    }

    pub fn select_answer(&mut self, option: usize) -> Result<Feedback, QuizError> {
        let attempt = self.in_progress_mut()?;
        let index = attempt.current;

        if attempt.answers.contains_key(&index) {
            return Err(QuizError::AlreadyAnswered(index));
        }

        let question = &attempt.category.questions[index];
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption {
                option,
                available: question.options.len(),
            });
        }

        let is_correct = question.is_correct(option);
        attempt.answers.insert(
            index,
            RecordedAnswer {
                selected: option,
                is_correct,
            },
        );
        if is_correct {
            attempt.score += 1;
        }

        attempt.feedback_at(index).ok_or(QuizError::NotInProgress)
    }

    /// Feedback for the current question, if it was answered already
    pub fn feedback(&self) -> Option<Feedback> {
        self.in_progress()
            .and_then(|attempt| attempt.feedback_at(attempt.current))
    }

    pub fn next(&mut self) -> Result<Advance, QuizError> {
        let attempt = self.in_progress_mut()?;
        if !attempt.answers.contains_key(&attempt.current) {
            return Err(QuizError::MustAnswerFirst);
        }

        if !attempt.is_last() {
            attempt.current += 1;
            return Ok(Advance::Question(attempt.current));
        }

        let attempt = match std::mem::take(&mut self.state) {
            QuizState::InProgress(attempt) => attempt,
            other => {
                self.state = other;
                return Err(QuizError::NotInProgress);
            }
        };
        let summary = Summary::from_attempt(&attempt);
        self.state = QuizState::Completed(attempt);
        Ok(Advance::Completed(summary))
    }

    pub fn previous(&mut self) -> Result<usize, QuizError> {
        let attempt = self.in_progress_mut()?;
        if attempt.current == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        attempt.current -= 1;
        Ok(attempt.current)
    }

    /// Same category, clean slate. Only valid once the attempt is completed.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        match &self.state {
            QuizState::Completed(attempt) => {
                let category = attempt.category.clone();
                self.state = QuizState::InProgress(Attempt::new(category));
                Ok(())
            }
            _ => Err(QuizError::NotCompleted),
        }
    }

    pub fn reset(&mut self) {
        self.state = QuizState::NotStarted;
    }

    pub fn summary(&self) -> Result<Summary, QuizError> {
        match &self.state {
            QuizState::Completed(attempt) => Ok(Summary::from_attempt(attempt)),
            _ => Err(QuizError::NotCompleted),
        }
    }
}
