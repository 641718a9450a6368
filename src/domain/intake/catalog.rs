//! Intake question catalog.
//!
//! The catalog is data: an ordered list of questions, the parser vocabulary
//! and the derived-field rules. A default bank is embedded in the binary;
//! deployments can point `intake.question_bank_path` at their own YAML file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::parser::ParserVocabulary;
use super::value::{Answers, FieldValue, ValueType};

/// The question bank shipped with the binary.
pub const EMBEDDED_QUESTION_BANK: &str = include_str!("question_bank.yaml");

/// Errors raised while loading or validating a question bank.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read question bank at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Question bank has no questions")]
    Empty,

    #[error("Duplicate question {kind} '{value}'")]
    Duplicate { kind: &'static str, value: String },

    #[error("Question '{id}' has min greater than max")]
    InvalidBounds { id: String },

    #[error("Choice question '{id}' has no choices")]
    MissingChoices { id: String },

    #[error("Derived field '{field}' references unknown field '{input}'")]
    UnknownInput { field: String, input: String },
}

/// One alias a choice question accepts, mapped to its dataset code.
///
/// Written in YAML as an `[alias, code]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, i64)", into = "(String, i64)")]
pub struct ChoiceOption {
    pub alias: String,
    pub code: i64,
}

impl ChoiceOption {
    pub fn new(alias: impl Into<String>, code: i64) -> Self {
        Self {
            alias: alias.into().trim().to_lowercase(),
            code,
        }
    }
}

impl From<(String, i64)> for ChoiceOption {
    fn from((alias, code): (String, i64)) -> Self {
        ChoiceOption::new(alias, code)
    }
}

impl From<ChoiceOption> for (String, i64) {
    fn from(option: ChoiceOption) -> Self {
        (option.alias, option.code)
    }
}

/// A single intake question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub id: String,
    pub field: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceOption>,
}

impl QuestionSpec {
    /// Prompt used when a required answer could not be extracted.
    pub fn reprompt(&self) -> String {
        format!("I might have missed that. {}", self.prompt)
    }
}

/// Computation applied by a derived-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// `weight_kg / (height_cm / 100)^2`, inputs in that order: height, weight.
    BodyMassIndex,
}

/// A field computed from earlier answers rather than asked directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedField {
    pub field: String,
    pub formula: Formula,
    pub inputs: Vec<String>,
    pub triggers: Vec<String>,
}

impl DerivedField {
    pub fn is_triggered_by(&self, field: &str) -> bool {
        self.triggers.iter().any(|t| t == field)
    }

    /// Computes the field if it is still absent and every input is present
    /// and non-zero.
    pub fn compute(&self, answers: &Answers) -> Option<FieldValue> {
        if answers.value(&self.field).is_some() {
            return None;
        }

        let inputs: Vec<f64> = self
            .inputs
            .iter()
            .map(|name| answers.number(name).filter(|v| *v != 0.0))
            .collect::<Option<_>>()?;

        match self.formula {
            Formula::BodyMassIndex => {
                let &[height_cm, weight_kg] = inputs.as_slice() else {
                    return None;
                };
                let meters = height_cm / 100.0;
                Some(FieldValue::Number(round2(weight_kg / (meters * meters))))
            }
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ordered question bank plus the data the parser and engine need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub greeting: String,
    #[serde(default)]
    pub vocabulary: ParserVocabulary,
    pub questions: Vec<QuestionSpec>,
    #[serde(default)]
    pub derived: Vec<DerivedField>,
}

impl QuestionCatalog {
    /// Loads the bank compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_QUESTION_BANK)
    }

    /// Loads a bank from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Parses and validates a bank.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: QuestionCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads the override when a path is configured, the embedded bank otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut ids = HashSet::new();
        let mut fields = HashSet::new();
        for question in &self.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "id",
                    value: question.id.clone(),
                });
            }
            if !fields.insert(question.field.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "field",
                    value: question.field.clone(),
                });
            }
            if let (Some(min), Some(max)) = (question.min, question.max) {
                if min > max {
                    return Err(CatalogError::InvalidBounds {
                        id: question.id.clone(),
                    });
                }
            }
            if question.value_type == ValueType::Choice && question.choices.is_empty() {
                return Err(CatalogError::MissingChoices {
                    id: question.id.clone(),
                });
            }
        }

        for rule in &self.derived {
            for input in rule.inputs.iter().chain(rule.triggers.iter()) {
                if !fields.contains(input.as_str()) {
                    return Err(CatalogError::UnknownInput {
                        field: rule.field.clone(),
                        input: input.clone(),
                    });
                }
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

    pub fn question(&self, step_index: usize) -> Option<&QuestionSpec> {
        self.questions.get(step_index)
    }

    /// Derived-field rules fired by an answer to `field`.
    pub fn derived_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a DerivedField> {
        self.derived.iter().filter(move |rule| rule.is_triggered_by(field))
    }
}
