//! Intake questionnaire: question bank, answer parsing, session state and
//! the severity heuristic run when the bank is complete.

mod catalog;
mod errors;
mod parser;
mod session;
mod severity;
mod value;

pub use catalog::{
    CatalogError, ChoiceOption, DerivedField, Formula, QuestionCatalog, QuestionSpec,
    EMBEDDED_QUESTION_BANK,
};
pub use errors::IntakeError;
pub use parser::{
    parse_choice, parse_height_cm, parse_number, parse_weight_kg, FieldParser, ParserVocabulary,
};
pub use session::{IntakeReply, IntakeSession, IntakeSummary, Questionnaire};
pub use severity::{Severity, SeverityLabel, DEFAULT_ADL, DEFAULT_MMSE};
pub use value::{Answers, FieldValue, ValueType};
