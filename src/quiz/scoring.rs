use std::fmt;

use super::Attempt;

/// Performance band for a final percentage. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Expert,
    Great,
    Good,
    NeedsReview,
    Beginner,
}

impl Tier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90..=u8::MAX => Tier::Expert,
            75..=89 => Tier::Great,
            60..=74 => Tier::Good,
            40..=59 => Tier::NeedsReview,
            _ => Tier::Beginner,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Tier::Expert => "🏆 Wildlife Expert! Amazing knowledge!",
            Tier::Great => "🎉 Great job! You know your wildlife!",
            Tier::Good => "👍 Good effort! Keep learning!",
            Tier::NeedsReview => "📚 Not bad! Review and try again!",
            Tier::Beginner => "🌱 Beginner level - plenty to discover!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Expert => "expert",
            Tier::Great => "great",
            Tier::Good => "good",
            Tier::NeedsReview => "needs review",
            Tier::Beginner => "beginner",
        };
        f.write_str(label)
    }
}

/// `round(100 * score / total)`, halves rounding up
pub fn percentage(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = score.min(total);
    ((200 * score + total) / (2 * total)) as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub number: usize,
    pub question: String,
    /// `None` only if the question was somehow left unanswered
    pub chosen: Option<String>,
    pub is_correct: bool,
    /// Only present for incorrect answers
    pub correct_answer: Option<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub category_id: String,
    pub title: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u8,
    pub tier: Tier,
    pub review: Vec<ReviewEntry>,
}

impl Summary {
    pub fn from_attempt(attempt: &Attempt) -> Self {
        let category = attempt.category();
        let review = category
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = attempt.answer_at(index);
                let is_correct = answer.map(|a| a.is_correct).unwrap_or(false);
                ReviewEntry {
                    number: index + 1,
                    question: question.text.clone(),
                    chosen: answer.and_then(|a| question.options.get(a.selected).cloned()),
                    is_correct,
                    correct_answer: (!is_correct).then(|| question.correct_text().to_string()),
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        let score = attempt.score();
        let total = category.len();
        let percentage = percentage(score, total);

        Self {
            category_id: category.id.clone(),
            title: category.title.clone(),
            score,
            total,
            percentage,
            tier: Tier::from_percentage(percentage),
            review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_percentage(100), Tier::Expert);
        assert_eq!(Tier::from_percentage(90), Tier::Expert);
        assert_eq!(Tier::from_percentage(89), Tier::Great);
        assert_eq!(Tier::from_percentage(75), Tier::Great);
        assert_eq!(Tier::from_percentage(74), Tier::Good);
        assert_eq!(Tier::from_percentage(60), Tier::Good);
        assert_eq!(Tier::from_percentage(59), Tier::NeedsReview);
        assert_eq!(Tier::from_percentage(40), Tier::NeedsReview);
        assert_eq!(Tier::from_percentage(39), Tier::Beginner);
        assert_eq!(Tier::from_percentage(0), Tier::Beginner);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(4, 5), 80);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 0), 0);
    }
}
