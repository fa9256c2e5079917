// src/models/import.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::{
    config::MAX_OPTIONS_PER_QUESTION,
    engine::labels::label_for,
    error::AppError,
    models::test_bank::validate_exam_code,
};

/// An exam file as uploaded or passed to the importer CLI.
#[derive(Debug, Deserialize, Validate)]
pub struct ExamImport {
    #[validate(length(min = 1, max = 200))]
    pub exam_name: String,
    #[validate(length(min = 1, max = 50), custom(function = validate_exam_code))]
    pub exam_code: String,
    #[validate(length(min = 1))]
    pub questions: Vec<ImportedQuestion>,
}

/// `"A,C"` or `["A", "C"]`.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Letters(String),
    List(Vec<Value>),
}

/// A single string or a list of lines joined with spaces.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ExplanationText {
    Text(String),
    Lines(Vec<Value>),
}

/// One question entry of an import file.
///
/// Options are given as `option_a` .. `option_z`, with optional `option_<letter>_image`
/// file names. Both are captured through `fields`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ImportedQuestion {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_number: Option<Value>,
    #[serde(default)]
    pub correct_answer: Option<AnswerKey>,
    #[serde(default)]
    pub explanation: Option<ExplanationText>,
    #[serde(default)]
    pub question_images: Option<Vec<String>>,
    #[serde(default)]
    pub explanation_images: Option<Vec<String>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// A validated question ready to be written. Text is stored exactly as imported.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuestion {
    pub text: String,
    pub explanation: Option<String>,
    pub question_images: Vec<String>,
    pub explanation_images: Vec<String>,
    /// Options in canonical order.
    pub options: Vec<PreparedOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOption {
    pub text: String,
    pub is_correct: bool,
    pub image_ref: Option<String>,
}

/// Summary returned after a successful import.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub test_bank_id: i64,
    pub exam_name: String,
    pub exam_code: String,
    pub created_test_bank: bool,
    pub questions_imported: usize,
    pub message: String,
}

impl ExamImport {
    /// Validates the whole document before anything is written.
    ///
    /// The first invalid question rejects the import, naming its 1-based position.
    pub fn prepare(&self) -> Result<Vec<PreparedQuestion>, AppError> {
        self.validate()?;

        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                question.prepare().map_err(|reason| {
                    AppError::BadRequest(format!(
                        "Failed to process question at position {}: {}. Problematic data: {}",
                        index + 1,
                        reason,
                        serde_json::to_string(question).unwrap_or_default()
                    ))
                })
            })
            .collect()
    }
}

impl ImportedQuestion {
    fn prepare(&self) -> Result<PreparedQuestion, String> {
        if self.question.trim().is_empty() {
            return Err("'question' is empty".to_string());
        }

        let correct_letters = match &self.correct_answer {
            None => return Err("'correct_answer' is null or missing".to_string()),
            Some(key) => key.letters(),
        };
        if correct_letters.is_empty() {
            return Err("'correct_answer' is empty".to_string());
        }

        let mut options = Vec::new();
        let mut option_letters = Vec::new();
        for index in 0..MAX_OPTIONS_PER_QUESTION {
            let letter = label_for(index);
            let option_text = match self.fields.get(&format!("option_{}", letter)) {
                None | Some(Value::Null) => continue,
                Some(value) => value_text(value),
            };
            let image_ref = match self.fields.get(&format!("option_{}_image", letter)) {
                None | Some(Value::Null) => None,
                Some(Value::String(name)) => Some(checked_image_name(name)?),
                Some(other) => return Err(format!("invalid image for option {}: {}", letter, other)),
            };

            options.push(PreparedOption {
                text: option_text,
                is_correct: correct_letters.contains(&letter),
                image_ref,
            });
            option_letters.push(letter);
        }

        if options.is_empty() {
            return Err("No valid options provided".to_string());
        }
        if let Some(unknown) = correct_letters.iter().find(|l| !option_letters.contains(*l)) {
            return Err(format!("correct answer '{}' does not match any option", unknown));
        }

        let explanation = match &self.explanation {
            None => None,
            Some(ExplanationText::Text(text)) => Some(text.clone()),
            Some(ExplanationText::Lines(lines)) if lines.is_empty() => None,
            Some(ExplanationText::Lines(lines)) => {
                Some(lines.iter().map(value_text).collect::<Vec<_>>().join(" "))
            }
        };

        Ok(PreparedQuestion {
            text: self.question.clone(),
            explanation,
            question_images: checked_image_names(self.question_images.as_deref())?,
            explanation_images: checked_image_names(self.explanation_images.as_deref())?,
            options,
        })
    }
}

impl AnswerKey {
    /// Lower-cased option letters named by the key.
    fn letters(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            AnswerKey::Letters(s) => vec![s.clone()],
            AnswerKey::List(values) => values.iter().map(value_text).collect(),
        };

        let mut letters: Vec<String> = raw
            .iter()
            .flat_map(|s| s.split(','))
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        letters.dedup();
        letters
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Image references are bare file names inside `{exam_code}/images/`.
fn checked_image_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(format!("invalid image file name '{}'", name));
    }
    Ok(name.to_string())
}

fn checked_image_names(names: Option<&[String]>) -> Result<Vec<String>, String> {
    names
        .unwrap_or_default()
        .iter()
        .map(|n| checked_image_name(n))
        .collect()
}
