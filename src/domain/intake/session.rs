//! Intake session aggregate.
//!
//! A session walks one patient through the question bank, one reply per
//! step. Replies are parsed against the current question; a required
//! question that yields nothing is asked again, anything else advances.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IntakeSessionId, PatientId, Timestamp};

use super::catalog::{QuestionCatalog, QuestionSpec};
use super::parser::FieldParser;
use super::severity::Severity;
use super::value::Answers;

/// Catalog paired with the parser built from its vocabulary.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    catalog: QuestionCatalog,
    parser: FieldParser,
}

impl Questionnaire {
    pub fn new(catalog: QuestionCatalog) -> Self {
        let parser = FieldParser::new(catalog.vocabulary.clone());
        Self { catalog, parser }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn parser(&self) -> &FieldParser {
        &self.parser
    }

    pub fn greeting(&self) -> &str {
        &self.catalog.greeting
    }

    pub fn total_steps(&self) -> usize {
        self.catalog.len()
    }

    pub fn question(&self, step_index: usize) -> Option<&QuestionSpec> {
        self.catalog.question(step_index)
    }
}

/// Result stored on a session once every question has been asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSummary {
    pub answers: Answers,
    pub severity: Severity,
}

/// Outcome of applying one reply to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeReply {
    /// The answer recorded by this reply; empty on a re-prompt or once finished.
    pub saved: Answers,
    pub next_prompt: Option<String>,
    pub step_index: usize,
    pub total_steps: usize,
    pub finished: bool,
    pub summary: Option<IntakeSummary>,
    /// True only for the reply that completed the intake.
    pub just_finished: bool,
}

/// Intake session aggregate.
///
/// # Invariants
///
/// - `step_index` never decreases and never exceeds the catalog length
/// - `finished` and `summary` are set once, on the final reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSession {
    id: IntakeSessionId,
    patient_id: PatientId,
    created_at: Timestamp,
    step_index: usize,
    answers: Answers,
    finished: bool,
    summary: Option<IntakeSummary>,
}

impl IntakeSession {
    pub fn new(id: IntakeSessionId, patient_id: PatientId) -> Self {
        Self {
            id,
            patient_id,
            created_at: Timestamp::now(),
            step_index: 0,
            answers: Answers::new(),
            finished: false,
            summary: None,
        }
    }

    pub fn id(&self) -> IntakeSessionId {
        self.id
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn summary(&self) -> Option<&IntakeSummary> {
        self.summary.as_ref()
    }

    pub fn belongs_to(&self, patient_id: PatientId) -> bool {
        self.patient_id == patient_id
    }

    /// Applies one free-text reply to the current question.
    pub fn apply_reply(&mut self, questionnaire: &Questionnaire, text: &str) -> IntakeReply {
        let total_steps = questionnaire.total_steps();

        if self.finished {
            return self.finished_reply(total_steps);
        }

        let Some(question) = questionnaire.question(self.step_index) else {
            // The bank shrank under a live session; nothing left to ask.
            self.finished = true;
            return self.finished_reply(total_steps);
        };

        let value = questionnaire.parser().parse(question, text);

        if value.is_none() && question.required {
            return IntakeReply {
                saved: Answers::new(),
                next_prompt: Some(question.reprompt()),
                step_index: self.step_index,
                total_steps,
                finished: false,
                summary: None,
                just_finished: false,
            };
        }

        let field = question.field.clone();
        self.answers.insert(field.clone(), value.clone());

        for rule in questionnaire.catalog().derived_for(&field) {
            if let Some(derived) = rule.compute(&self.answers) {
                self.answers.insert(rule.field.clone(), Some(derived));
            }
        }

        self.step_index += 1;

        let mut saved = Answers::new();
        saved.insert(field, value);

        if let Some(next) = questionnaire.question(self.step_index) {
            return IntakeReply {
                saved,
                next_prompt: Some(next.prompt.clone()),
                step_index: self.step_index,
                total_steps,
                finished: false,
                summary: None,
                just_finished: false,
            };
        }

        let summary = IntakeSummary {
            answers: self.answers.clone(),
            severity: Severity::infer(&self.answers),
        };
        self.finished = true;
        self.summary = Some(summary.clone());

        IntakeReply {
            saved,
            next_prompt: None,
            step_index: self.step_index,
            total_steps,
            finished: true,
            summary: Some(summary),
            just_finished: true,
        }
    }

    fn finished_reply(&self, total_steps: usize) -> IntakeReply {
        IntakeReply {
            saved: Answers::new(),
            next_prompt: None,
            step_index: self.step_index,
            total_steps,
            finished: true,
            summary: self.summary.clone(),
            just_finished: false,
        }
    }
}
