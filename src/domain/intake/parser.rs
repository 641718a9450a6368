//! Free-text answer parsing.
//!
//! Every function here is total: a reply that cannot be turned into a value
//! for the declared type yields `None`, never an error. The engine decides
//! whether `None` means "re-ask" or "record as absent".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::catalog::{ChoiceOption, QuestionSpec};
use super::value::{FieldValue, ValueType};

/// Plausible height range (cm) for a bare number with no unit.
pub const HEIGHT_FALLBACK_RANGE_CM: (f64, f64) = (120.0, 230.0);

/// Plausible weight range (kg) for a bare number with no unit.
pub const WEIGHT_FALLBACK_RANGE_KG: (f64, f64) = (35.0, 200.0);

pub const CM_PER_FOOT: f64 = 30.48;
pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.45359237;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("number pattern is valid"));

static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:(?P<cm>\d{2,3}(?:\.\d+)?)\s*(?:cm|centimet(?:er|re)s?)\b)|(?:(?P<ft>\d)\s*(?:'|’|ft\b|feet\b|foot\b)\s*(?:(?P<inch>\d{1,2})\s*(?:"|”|''|in\b|inch(?:es)?\b)?)?)"#,
    )
    .expect("height pattern is valid")
});

static WEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?P<kg>\d{2,3}(?:\.\d+)?)\s*(?:kgs?|kilo(?:gram)?s?)\b)|(?:(?P<lb>\d{2,3}(?:\.\d+)?)\s*(?:lbs?|pounds?)\b)",
    )
    .expect("weight pattern is valid")
});

/// Word lists used to interpret yes/no style replies.
///
/// Replies are compared as a whole, after trimming and lowercasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserVocabulary {
    pub affirmative: Vec<String>,
    pub negative: Vec<String>,
    pub skip: Vec<String>,
}

impl Default for ParserVocabulary {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        Self {
            affirmative: words(&["y", "yes", "yeah", "yep", "true", "sure"]),
            negative: words(&["n", "no", "nope", "false"]),
            skip: words(&[
                "skip",
                "unknown",
                "unsure",
                "dont know",
                "don't know",
                "na",
                "n/a",
                "idk",
            ]),
        }
    }
}

impl ParserVocabulary {
    fn normalized(mut self) -> Self {
        for list in [&mut self.affirmative, &mut self.negative, &mut self.skip] {
            for word in list.iter_mut() {
                *word = normalize(word);
            }
        }
        self
    }
}

/// Converts free-text replies into typed values for a question.
#[derive(Debug, Clone, Default)]
pub struct FieldParser {
    vocabulary: ParserVocabulary,
}

impl FieldParser {
    pub fn new(vocabulary: ParserVocabulary) -> Self {
        Self {
            vocabulary: vocabulary.normalized(),
        }
    }

    /// Parses `raw` according to the question's declared type and constraints.
    pub fn parse(&self, question: &QuestionSpec, raw: &str) -> Option<FieldValue> {
        let text = raw.trim();
        if self.is_skip(text) {
            return None;
        }

        match question.value_type {
            ValueType::Boolean => self.parse_boolean(text).map(FieldValue::Boolean),
            ValueType::Tristate => self.parse_tristate(text).map(FieldValue::Integer),
            ValueType::Number => parse_number(text, question.min, question.max).map(FieldValue::Number),
            ValueType::Choice => parse_choice(text, &question.choices).map(FieldValue::Integer),
            ValueType::Height => parse_height_cm(text).map(FieldValue::Number),
            ValueType::Weight => parse_weight_kg(text).map(FieldValue::Number),
            ValueType::Text if text.is_empty() => None,
            ValueType::Text => Some(FieldValue::Text(text.to_string())),
        }
    }

    /// Returns true if the reply is an explicit "skip / don't know".
    pub fn is_skip(&self, raw: &str) -> bool {
        let reply = normalize(raw);
        self.vocabulary.skip.iter().any(|w| *w == reply)
    }

    pub fn parse_boolean(&self, raw: &str) -> Option<bool> {
        let reply = normalize(raw);
        if self.vocabulary.affirmative.iter().any(|w| *w == reply) {
            Some(true)
        } else if self.vocabulary.negative.iter().any(|w| *w == reply) {
            Some(false)
        } else {
            None
        }
    }

    /// Affirmative maps to 1, negative to 0; "unsure" and anything else is absent.
    pub fn parse_tristate(&self, raw: &str) -> Option<i64> {
        self.parse_boolean(raw).map(i64::from)
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace('’', "'")
}

/// Extracts the first signed decimal numeral, rejecting it outside `[min, max]`.
pub fn parse_number(raw: &str, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    let value: f64 = NUMBER_RE.find(raw)?.as_str().parse().ok()?;
    if min.is_some_and(|lo| value < lo) || max.is_some_and(|hi| value > hi) {
        return None;
    }
    Some(value)
}

/// Maps a reply to a choice code: exact alias first, then the first alias
/// (in declaration order) contained in the reply.
pub fn parse_choice(raw: &str, choices: &[ChoiceOption]) -> Option<i64> {
    let reply = raw.trim().to_lowercase();
    if reply.is_empty() {
        return None;
    }
    choices
        .iter()
        .find(|choice| choice.alias == reply)
        .or_else(|| choices.iter().find(|choice| reply.contains(choice.alias.as_str())))
        .map(|choice| choice.code)
}

/// Height in centimeters from "170 cm", "5'7\"", "5 ft 7 in" or a bare number.
pub fn parse_height_cm(raw: &str) -> Option<f64> {
    let Some(caps) = HEIGHT_RE.captures(raw) else {
        let (lo, hi) = HEIGHT_FALLBACK_RANGE_CM;
        return parse_number(raw, Some(lo), Some(hi));
    };

    if let Some(cm) = caps.name("cm") {
        return cm.as_str().parse().ok();
    }

    let feet: f64 = caps.name("ft")?.as_str().parse().ok()?;
    let inches: f64 = match caps.name("inch") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0.0,
    };
    Some(feet * CM_PER_FOOT + inches * CM_PER_INCH)
}

/// Weight in kilograms from "70 kg", "154 lb" or a bare number.
pub fn parse_weight_kg(raw: &str) -> Option<f64> {
    let Some(caps) = WEIGHT_RE.captures(raw) else {
        let (lo, hi) = WEIGHT_FALLBACK_RANGE_KG;
        return parse_number(raw, Some(lo), Some(hi));
    };

    if let Some(kg) = caps.name("kg") {
        return kg.as_str().parse().ok();
    }
    let pounds: f64 = caps.name("lb")?.as_str().parse().ok()?;
    Some(pounds * KG_PER_POUND)
}
