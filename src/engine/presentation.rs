// src/engine/presentation.rs

use serde::{Serialize, Serializer};

use crate::{
    engine::{labels::label_for, shuffle::presentation_order},
    error::AppError,
    models::question::{QuestionBundle, QuestionOption},
};

/// Letter-keyed map that serializes as a JSON object in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterMap<T>(Vec<(String, T)>);

impl<T> LetterMap<T> {
    pub fn get(&self, label: &str) -> Option<&T> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T> FromIterator<(String, T)> for LetterMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for LetterMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, v)| (l, v)))
    }
}

/// Client-facing view of a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedQuestion {
    pub id: i64,
    pub question: String,
    /// Display letter -> option text.
    pub options: LetterMap<String>,
    /// Display letter -> resolved option image path (null when absent).
    pub option_images: LetterMap<Option<String>>,
    /// Correct display letters of this presentation, comma-joined in letter order.
    pub correct_answer: String,
    pub explanation: String,
    pub question_images: Vec<String>,
    pub explanation_images: Vec<String>,
}

/// The display letters assigned to a question's options for one presentation.
#[derive(Debug)]
pub struct Lettering<'a> {
    pub entries: Vec<(String, &'a QuestionOption)>,
    pub correct_answer: String,
}

/// Assigns display letters to the options of `bundle` and derives the correct-answer string.
///
/// Returns `NotFound` for a question without options, which cannot be presented or graded.
pub fn letter_options(bundle: &QuestionBundle, shuffle: bool) -> Result<Lettering<'_>, AppError> {
    let options = &bundle.options;
    if options.is_empty() {
        return Err(AppError::NotFound(format!(
            "Question {} has no options",
            bundle.question.id
        )));
    }

    let texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
    let order = presentation_order(bundle.question.id, &texts, shuffle);

    let entries: Vec<(String, &QuestionOption)> = order
        .iter()
        .enumerate()
        .map(|(position, &canonical)| (label_for(position), &options[canonical]))
        .collect();

    // Joined in presented-position order: alphabetical up to `z`, then `aa`, `ab`, ...
    let correct_answer = entries
        .iter()
        .filter(|(_, option)| option.is_correct)
        .map(|(label, _)| label.as_str())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Lettering {
        entries,
        correct_answer,
    })
}

/// Public path of an image belonging to the exam `exam_code`.
pub fn image_path(exam_code: &str, filename: &str) -> String {
    format!("/{}/images/{}", exam_code, filename)
}

pub fn resolve_images(exam_code: &str, filenames: &[String]) -> Vec<String> {
    filenames.iter().map(|f| image_path(exam_code, f)).collect()
}

/// Builds the presentation of a question.
///
/// Identical inputs always produce identical output; grading relies on this.
pub fn build(bundle: &QuestionBundle, shuffle: bool) -> Result<PresentedQuestion, AppError> {
    let lettering = letter_options(bundle, shuffle)?;
    let exam_code = bundle.exam_code.as_str();

    let options = lettering
        .entries
        .iter()
        .map(|(label, option)| (label.clone(), option.text.clone()))
        .collect();

    let option_images = lettering
        .entries
        .iter()
        .map(|(label, option)| {
            let image = option.image_ref.as_deref().map(|f| image_path(exam_code, f));
            (label.clone(), image)
        })
        .collect();

    let question = &bundle.question;
    Ok(PresentedQuestion {
        id: question.id,
        question: question.text.clone(),
        options,
        option_images,
        correct_answer: lettering.correct_answer,
        explanation: question.explanation.clone().unwrap_or_default(),
        question_images: resolve_images(exam_code, &question.question_images),
        explanation_images: resolve_images(exam_code, &question.explanation_images),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeSet;

    use sqlx::types::Json;

    use super::*;
    use crate::models::question::Question;

    /// Builds a bundle whose options get ids in insertion order.
    pub(crate) fn bundle(question_id: i64, options: &[(&str, bool)]) -> QuestionBundle {
        QuestionBundle {
            question: Question {
                id: question_id,
                test_bank_id: 1,
                text: format!("Question {}", question_id),
                explanation: Some("Because.".to_string()),
                question_images: Json(vec!["q.png".to_string()]),
                explanation_images: Json(vec!["e1.png".to_string(), "e2.png".to_string()]),
            },
            exam_code: "GEO-101".to_string(),
            options: options
                .iter()
                .enumerate()
                .map(|(i, (text, is_correct))| QuestionOption {
                    id: question_id * 100 + i as i64,
                    question_id,
                    text: text.to_string(),
                    is_correct: *is_correct,
                    image_ref: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_unshuffled_presentation_uses_canonical_letters() {
        let b = bundle(7, &[("Paris", true), ("London", false), ("Berlin", false)]);
        let presented = build(&b, false).unwrap();

        assert_eq!(presented.options.get("a").unwrap(), "Paris");
        assert_eq!(presented.options.get("b").unwrap(), "London");
        assert_eq!(presented.options.get("c").unwrap(), "Berlin");
        assert_eq!(presented.correct_answer, "a");
    }

    #[test]
    fn test_presentation_is_deterministic() {
        let b = bundle(42, &[("w", false), ("x", true), ("y", false), ("z", true)]);
        let first = build(&b, true).unwrap();
        let second = build(&b, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_presentation_keeps_every_option() {
        let texts = ["one", "two", "three", "four", "five"];
        let options: Vec<(&str, bool)> = texts.iter().map(|t| (*t, false)).collect();
        for question_id in 1..30 {
            let b = bundle(question_id, &options);
            for shuffle in [false, true] {
                let presented = build(&b, shuffle).unwrap();
                let shown: BTreeSet<&str> = presented.options.values().map(String::as_str).collect();
                assert_eq!(presented.options.len(), texts.len());
                assert_eq!(shown, texts.iter().copied().collect());
            }
        }
    }

    #[test]
    fn test_correct_answer_follows_the_shuffle() {
        for question_id in 1..30 {
            let b = bundle(question_id, &[("A1", true), ("B1", false), ("C1", true), ("D1", false)]);
            let presented = build(&b, true).unwrap();

            let correct: Vec<&str> = presented.correct_answer.split(',').collect();
            assert_eq!(correct.len(), 2);
            let mut sorted = correct.clone();
            sorted.sort();
            assert_eq!(correct, sorted);

            for label in correct {
                let text = presented.options.get(label).unwrap();
                assert!(text == "A1" || text == "C1");
            }
        }
    }

    #[test]
    fn test_correct_answer_follows_position_past_z() {
        let texts: Vec<String> = (0..28).map(|i| format!("opt{}", i)).collect();
        let options: Vec<(&str, bool)> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i == 25 || i == 26))
            .collect();
        let presented = build(&bundle(5, &options), false).unwrap();

        assert_eq!(presented.correct_answer, "z,aa");
        assert_eq!(presented.options.get("aa").unwrap(), "opt26");
    }

    #[test]
    fn test_true_false_keeps_order_when_shuffled() {
        for question_id in 1..30 {
            let b = bundle(question_id, &[("True", false), ("False", true)]);
            let presented = build(&b, true).unwrap();
            assert_eq!(presented.options.labels().collect::<Vec<_>>(), vec!["a", "b"]);
            assert_eq!(presented.options.get("a").unwrap(), "True");
            assert_eq!(presented.correct_answer, "b");
        }
    }

    #[test]
    fn test_images_are_namespaced_by_exam_code() {
        let mut b = bundle(3, &[("x", true), ("y", false)]);
        b.options[0].image_ref = Some("x.png".to_string());
        let presented = build(&b, false).unwrap();

        assert_eq!(presented.question_images, vec!["/GEO-101/images/q.png"]);
        assert_eq!(
            presented.explanation_images,
            vec!["/GEO-101/images/e1.png", "/GEO-101/images/e2.png"]
        );
        assert_eq!(
            presented.option_images.get("a").unwrap().as_deref(),
            Some("/GEO-101/images/x.png")
        );
        assert_eq!(presented.option_images.get("b").unwrap(), &None);
    }

    #[test]
    fn test_missing_explanation_becomes_empty() {
        let mut b = bundle(3, &[("x", true)]);
        b.question.explanation = None;
        assert_eq!(build(&b, false).unwrap().explanation, "");
    }

    #[test]
    fn test_no_options_is_not_presentable() {
        let b = bundle(9, &[]);
        assert!(matches!(build(&b, true), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_options_serialize_in_letter_order() {
        let options: Vec<(String, bool)> = (0..28).map(|i| (format!("opt{}", i), i == 27)).collect();
        let refs: Vec<(&str, bool)> = options.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        let presented = build(&bundle(5, &refs), false).unwrap();

        let json = serde_json::to_string(&presented.options).unwrap();
        assert!(json.starts_with(r#"{"a":"opt0","b":"opt1""#));
        assert!(json.ends_with(r#""aa":"opt26","ab":"opt27"}"#));
        assert_eq!(presented.correct_answer, "ab");
    }
}
