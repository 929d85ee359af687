//! Question bank and quiz session.
//!
//! The built-in bank holds sixteen situational questions, four per axis. Each
//! choice carries the [`AnswerImpact`] that is fed to the scorer.

use crate::error::{CvtiError, QuestionBankError};
use crate::models::{AnswerImpact, Axis};
use crate::scoring::{CvtiScorer, ScoringResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

/// One answer option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default, alias = "cvtiImpact", alias = "mbtiImpact")]
    pub impact: AnswerImpact,
}

/// One situational question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// Axis the question mainly probes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(default, alias = "iconType", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub situation: String,
    pub choices: Vec<Choice>,
}

/// Ordered set of questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The embedded sixteen-question bank.
    pub fn builtin() -> Result<Self, QuestionBankError> {
        Self::from_json_str(BUILTIN_QUESTIONS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuestionBankError> {
        let bank: QuestionBank = serde_json::from_str(json)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, QuestionBankError> {
        let content = fs::read_to_string(path)?;
        let bank = Self::from_json_str(&content)?;
        log::info!(
            "[Questions] loaded {} questions from {}",
            bank.len(),
            path.display()
        );
        Ok(bank)
    }

    /// Non-empty, unique ids, at least two choices per question.
    pub fn validate(&self) -> Result<(), QuestionBankError> {
        if self.questions.is_empty() {
            return Err(QuestionBankError::ValidationFailed(
                "question bank is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(QuestionBankError::ValidationFailed(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
            if question.choices.len() < 2 {
                return Err(QuestionBankError::ValidationFailed(format!(
                    "question {} needs at least 2 choices, has {}",
                    question.id,
                    question.choices.len()
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Questions probing one axis.
    pub fn for_axis(&self, axis: Axis) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.axis == Some(axis))
    }
}

/// Walks a bank one question at a time and records the chosen impacts.
#[derive(Debug)]
pub struct QuizSession<'a> {
    bank: &'a QuestionBank,
    answers: Vec<Option<AnswerImpact>>,
}

impl<'a> QuizSession<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        QuizSession {
            bank,
            answers: Vec::with_capacity(bank.len()),
        }
    }

    /// Question awaiting an answer, `None` once complete.
    pub fn current_question(&self) -> Option<&'a Question> {
        self.bank.get(self.answers.len())
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    /// Record the choice at `choice_index` for the current question.
    pub fn choose(&mut self, choice_index: usize) -> Result<(), CvtiError> {
        let question = self.current_question().ok_or_else(|| {
            CvtiError::InvalidInput("quiz is already complete".to_string())
        })?;
        let choice = question.choices.get(choice_index).ok_or_else(|| {
            CvtiError::InvalidInput(format!(
                "question {} has {} choices, got choice {}",
                question.id,
                question.choices.len(),
                choice_index + 1
            ))
        })?;
        let impact = if choice.impact.is_empty() {
            None
        } else {
            Some(choice.impact)
        };
        self.answers.push(impact);
        Ok(())
    }

    /// Move past the current question without an impact.
    pub fn skip(&mut self) -> Result<(), CvtiError> {
        if self.is_complete() {
            return Err(CvtiError::InvalidInput("quiz is already complete".to_string()));
        }
        self.answers.push(None);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.bank.len()
    }

    /// Completion percentage counting the current question, like the quiz
    /// progress bar (first question shows 1/N).
    pub fn progress_percent(&self) -> f32 {
        if self.bank.is_empty() {
            return 100.0;
        }
        let shown = (self.answers.len() + 1).min(self.bank.len());
        shown as f32 / self.bank.len() as f32 * 100.0
    }

    pub fn answers(&self) -> &[Option<AnswerImpact>] {
        &self.answers
    }

    /// Score the completed session.
    pub fn finish<R: RngCore>(
        &self,
        scorer: &mut CvtiScorer<R>,
    ) -> Result<ScoringResult, CvtiError> {
        if !self.is_complete() {
            return Err(CvtiError::InvalidInput(format!(
                "quiz incomplete: {} of {} answered",
                self.answers.len(),
                self.bank.len()
            )));
        }
        Ok(scorer.score(&self.answers))
    }
}
