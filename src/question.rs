use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use itertools::Itertools;
use serde::{de::IgnoredAny, Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::Result;

/// A question record from the bank.
///
/// Only `id` is required. Both record layouts are accepted: the flat one
/// (`text`, `correct_answer`, `learningObjective`, `keywords`, `topic`) and
/// the hosted one, where topic and standard hang off `success_criteria`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub question_text: Option<String>,
    /// Older name for `question_text`.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "correct_answer")]
    pub answer: Option<String>,
    #[serde(default)]
    pub answer_data: Option<AnswerData>,
    #[serde(default)]
    pub standard: Option<String>,
    #[serde(default, alias = "learningObjective")]
    pub learning_objective: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub success_criteria: Option<SuccessCriteria>,
    #[serde(default, deserialize_with = "deserialize_dok")]
    pub dok: Option<u8>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default, alias = "keywords", deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnswerData {
    #[serde(default)]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuccessCriteria {
    #[serde(default)]
    pub learning_intentions: Option<LearningIntention>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LearningIntention {
    #[serde(default)]
    pub topics: Option<TopicRecord>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub learning_intention_standards: Vec<IntentionStandard>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TopicRecord {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IntentionStandard {
    #[serde(default)]
    pub standards: Option<StandardRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StandardRecord {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

/// Distinct values available to each filter, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub standards: Vec<String>,
    pub objectives: Vec<String>,
    pub topics: Vec<String>,
}

impl Question {
    /// `question_text`, falling back to the older `text` field.
    pub fn text(&self) -> Option<&str> {
        self.question_text.as_deref().or(self.text.as_deref())
    }

    /// The flat `answer` field, falling back to `answer_data.correct_answer`.
    pub fn correct_answer(&self) -> Option<&str> {
        self.answer.as_deref().or_else(|| {
            self.answer_data
                .as_ref()
                .and_then(|data| data.correct_answer.as_deref())
        })
    }

    /// The flat `topic`, or the title of the learning intention's topic.
    pub fn topic_title(&self) -> Option<&str> {
        non_empty(self.topic.as_deref()).or_else(|| {
            let topic = self.learning_intention()?.topics.as_ref()?;
            non_empty(topic.title.as_deref())
        })
    }

    /// The flat `standard` code, or the description of the first standard
    /// linked to the learning intention.
    pub fn standard_label(&self) -> Option<&str> {
        non_empty(self.standard.as_deref()).or_else(|| {
            let first = self.learning_intention()?.learning_intention_standards.first()?;
            non_empty(first.standards.as_ref()?.description.as_deref())
        })
    }

    fn learning_intention(&self) -> Option<&LearningIntention> {
        self.success_criteria.as_ref()?.learning_intentions.as_ref()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        debug!(count = questions.len(), "decoded question bank");
        Ok(Self { questions })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bank = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), count = bank.len(), "loaded question bank");
        Ok(bank)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let distinct = |field: fn(&Question) -> Option<&str>| {
            self.questions
                .iter()
                .filter_map(field)
                .filter(|value| !value.is_empty())
                .sorted()
                .dedup()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        };

        FilterOptions {
            standards: distinct(|q| q.standard.as_deref()),
            objectives: distinct(|q| q.learning_objective.as_deref()),
            topics: distinct(Question::topic_title),
        }
    }
}

/// Turns a `snake_case` question type into a label: `multiple_choice`
/// becomes `Multiple Choice`.
pub fn format_question_type(question_type: Option<&str>) -> String {
    let Some(question_type) = question_type.filter(|t| !t.is_empty()) else {
        return "N/A".to_owned();
    };

    question_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ")
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

/// DOK levels arrive as numbers or numeric strings; anything else is no
/// level at all.
fn deserialize_dok<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dok {
        Level(u64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Dok>::deserialize(deserializer)? {
        Some(Dok::Level(level)) => u8::try_from(level).ok(),
        Some(Dok::Text(text)) => text.trim().parse().ok(),
        Some(Dok::Other(_)) | None => None,
    })
}

fn deserialize_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    // Tags may be null, and individual tags may be null.
    let tags = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(tags.into_iter().flatten().flatten().collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BANK: &str = r#"[
        {
            "id": 7,
            "question_text": "Solve for x: 3x - 5 = 10",
            "correct_answer": "x = 5",
            "standard": "7.EE.B.4",
            "learning_objective": "Solve linear equations",
            "topic": "Algebra",
            "dok": 2,
            "question_type": "short_answer",
            "tags": ["equation", null]
        },
        {
            "id": "q2",
            "text": "Simplify x^2 + x^2",
            "answer_data": { "correct_answer": "2x^2" },
            "standard": "HSA.APR.A.1",
            "learningObjective": "Add polynomials",
            "keywords": ["polynomial"],
            "topic": "Algebra"
        },
        { "id": "q3", "standard": "", "tags": null }
    ]"#;

    #[test]
    fn test_decode_bank() {
        let bank = QuestionBank::from_json_str(BANK).unwrap();
        assert_eq!(bank.len(), 3);

        let first = bank.get("7").unwrap();
        assert_eq!(first.correct_answer(), Some("x = 5"));
        assert_eq!(first.dok, Some(2));
        assert_eq!(first.tags, vec!["equation"]);

        let second = bank.get("q2").unwrap();
        assert_eq!(second.text(), Some("Simplify x^2 + x^2"));
        assert_eq!(second.correct_answer(), Some("2x^2"));
        assert_eq!(second.learning_objective.as_deref(), Some("Add polynomials"));
        assert_eq!(second.tags, vec!["polynomial"]);

        let third = bank.get("q3").unwrap();
        assert_eq!(third.text(), None);
        assert_eq!(third.correct_answer(), None);
        assert!(third.tags.is_empty());

        assert!(bank.get("missing").is_none());
    }

    #[test]
    fn test_text_and_question_text_together() {
        let bank = QuestionBank::from_json_str(
            r#"[
                { "id": "a", "text": "old", "question_text": "new" },
                { "id": "b", "text": "only old" }
            ]"#,
        )
        .unwrap();
        assert_eq!(bank.get("a").unwrap().text(), Some("new"));
        assert_eq!(bank.get("b").unwrap().text(), Some("only old"));
    }

    #[test]
    fn test_loose_dok_values() {
        let bank = QuestionBank::from_json_str(
            r#"[
                { "id": "a", "dok": "2" },
                { "id": "b", "dok": " 3 " },
                { "id": "c", "dok": "high" },
                { "id": "d", "dok": null },
                { "id": "e", "dok": -1 },
                { "id": "f", "dok": true },
                { "id": "g", "dok": 4 }
            ]"#,
        )
        .unwrap();
        let doks = bank.questions().iter().map(|q| q.dok).collect::<Vec<_>>();
        assert_eq!(doks, vec![Some(2), Some(3), None, None, None, None, Some(4)]);
    }

    #[test]
    fn test_success_criteria_layout() {
        let bank = QuestionBank::from_json_str(
            r#"[
                {
                    "id": 1,
                    "success_criteria": {
                        "learning_intentions": {
                            "topics": { "title": "Algebra" },
                            "learning_intention_standards": [
                                { "standards": { "description": "Solve linear equations" } },
                                { "standards": { "description": "Second standard" } }
                            ]
                        }
                    }
                },
                {
                    "id": 2,
                    "topic": "Geometry",
                    "standard": "7.G.B.4",
                    "success_criteria": {
                        "learning_intentions": {
                            "topics": { "title": "Algebra" },
                            "learning_intention_standards": null
                        }
                    }
                },
                { "id": 3, "success_criteria": { "learning_intentions": null } }
            ]"#,
        )
        .unwrap();

        let hosted = bank.get("1").unwrap();
        assert_eq!(hosted.topic_title(), Some("Algebra"));
        assert_eq!(hosted.standard_label(), Some("Solve linear equations"));

        let flat = bank.get("2").unwrap();
        assert_eq!(flat.topic_title(), Some("Geometry"));
        assert_eq!(flat.standard_label(), Some("7.G.B.4"));

        let bare = bank.get("3").unwrap();
        assert_eq!(bare.topic_title(), None);
        assert_eq!(bare.standard_label(), None);

        assert_eq!(bank.filter_options().topics, vec!["Algebra", "Geometry"]);
    }

    #[test]
    fn test_invalid_bank() {
        let err = QuestionBank::from_json_str(r#"[{ "question_text": "no id" }]"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)), "{err}");
    }

    #[test]
    fn test_filter_options() {
        let bank = QuestionBank::from_json_str(BANK).unwrap();
        assert_eq!(
            bank.filter_options(),
            FilterOptions {
                standards: vec!["7.EE.B.4".to_owned(), "HSA.APR.A.1".to_owned()],
                objectives: vec![
                    "Add polynomials".to_owned(),
                    "Solve linear equations".to_owned(),
                ],
                topics: vec!["Algebra".to_owned()],
            },
        );
    }

    #[test]
    fn test_format_question_type() {
        assert_eq!(format_question_type(Some("multiple_choice")), "Multiple Choice");
        assert_eq!(format_question_type(Some("essay")), "Essay");
        assert_eq!(format_question_type(Some("")), "N/A");
        assert_eq!(format_question_type(None), "N/A");
    }
}
