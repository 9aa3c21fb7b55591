use super::{response_rate, Aggregate, SummaryDelta};
use crate::domain::entities::Question;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub total_questions: i64,
    pub answered_questions: i64,
    pub unanswered_questions: i64,
    pub total_answers: i64,
    pub response_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionStatsDelta {
    pub questions: i64,
    pub answered: i64,
    pub answers: i64,
}

impl SummaryDelta for QuestionStatsDelta {
    fn plus(&self, other: &Self) -> Self {
        Self {
            questions: self.questions + other.questions,
            answered: self.answered + other.answered,
            answers: self.answers + other.answers,
        }
    }

    fn negate(&self) -> Self {
        Self {
            questions: -self.questions,
            answered: -self.answered,
            answers: -self.answers,
        }
    }
}

impl Aggregate<Question> for QuestionStats {
    type Delta = QuestionStatsDelta;

    fn contribution(question: &Question) -> QuestionStatsDelta {
        QuestionStatsDelta {
            questions: 1,
            answered: i64::from(question.has_my_answer),
            answers: i64::from(question.total_answers),
        }
    }

    fn counters(&self) -> QuestionStatsDelta {
        QuestionStatsDelta {
            questions: self.total_questions,
            answered: self.answered_questions,
            answers: self.total_answers,
        }
    }

    fn from_counters(counters: QuestionStatsDelta) -> Self {
        Self {
            total_questions: counters.questions,
            answered_questions: counters.answered,
            unanswered_questions: counters.questions - counters.answered,
            total_answers: counters.answers,
            response_rate: response_rate(counters.answered, counters.questions),
        }
    }
}
