//! Typed answer values and the ordered answer map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared type of an intake question's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    Boolean,
    /// Yes / no / unsure, stored as 1 / 0 / absent.
    Tristate,
    /// Categorical answer mapped to an integer code.
    Choice,
    Text,
    /// Free-text height, normalised to centimeters.
    Height,
    /// Free-text weight, normalised to kilograms.
    Weight,
}

/// A parsed answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Number(v) => Some(*v),
            FieldValue::Boolean(_) | FieldValue::Text(_) => None,
        }
    }
}

/// Answers keyed by dataset field, in the order they were first recorded.
///
/// A present key with a `None` value means the question was asked and
/// nothing usable was extracted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Answers {
    entries: Vec<(String, Option<FieldValue>)>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the answer for `field`, keeping its original position.
    pub fn insert(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Returns the stored value, or `None` if the field is absent or unanswered.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Numeric view of a stored value.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.value(field).and_then(FieldValue::as_f64)
    }

    /// Returns true if the field has been recorded, even as absent.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnswersVisitor;

        impl<'de> Visitor<'de> for AnswersVisitor {
            type Value = Answers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to answer values")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Answers, M::Error> {
                let mut answers = Answers::new();
                while let Some((field, value)) =
                    access.next_entry::<String, Option<FieldValue>>()?
                {
                    answers.insert(field, value);
                }
                Ok(answers)
            }
        }

        deserializer.deserialize_map(AnswersVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_first_position_on_replace() {
        let mut answers = Answers::new();
        answers.insert("Age", Some(FieldValue::Number(70.0)));
        answers.insert("BMI", None);
        answers.insert("Age", Some(FieldValue::Number(71.0)));

        let fields: Vec<&str> = answers.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["Age", "BMI"]);
        assert_eq!(answers.number("Age"), Some(71.0));
    }

    #[test]
    fn absent_answer_is_recorded_but_has_no_value() {
        let mut answers = Answers::new();
        answers.insert("MMSE", None);

        assert!(answers.contains("MMSE"));
        assert_eq!(answers.value("MMSE"), None);
        assert!(!answers.contains("ADL"));
    }

    #[test]
    fn serializes_as_ordered_json_object() {
        let mut answers = Answers::new();
        answers.insert("Smoking", Some(FieldValue::Boolean(false)));
        answers.insert("Gender", Some(FieldValue::Integer(1)));
        answers.insert("BMI", None);

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"Smoking":false,"Gender":1,"BMI":null}"#);

        let back: Answers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }

    #[test]
    fn integer_values_have_numeric_view() {
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Boolean(true).as_f64(), None);
    }
}
