use crate::question::{Question, QuestionBank};

/// Narrows the bank. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub standard: String,
    pub learning_objective: String,
    pub topic: String,
    /// Case-insensitive substring searched in the text, tags, standard,
    /// learning objective and topic.
    pub keyword: String,
}

impl FilterCriteria {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, question: &Question) -> bool {
        fn exact(wanted: &str, value: Option<&str>) -> bool {
            wanted.is_empty() || value == Some(wanted)
        }

        exact(&self.standard, question.standard.as_deref())
            && exact(&self.learning_objective, question.learning_objective.as_deref())
            && exact(&self.topic, question.topic_title())
            && self.matches_keyword(question)
    }

    fn matches_keyword(&self, question: &Question) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }
        let contains = |value: &str| value.to_lowercase().contains(&keyword);

        [
            question.text(),
            question.standard.as_deref(),
            question.learning_objective.as_deref(),
            question.topic_title(),
        ]
        .into_iter()
        .flatten()
        .any(contains)
            || question.tags.iter().any(|tag| contains(tag.as_str()))
    }

    /// The matching questions, in bank order.
    pub fn apply<'a>(&self, bank: &'a QuestionBank) -> Vec<&'a Question> {
        bank.questions()
            .iter()
            .filter(|question| self.matches(question))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question {
                id: "a".to_owned(),
                question_text: Some("Find the AREA of a circle".to_owned()),
                standard: Some("7.G.B.4".to_owned()),
                topic: Some("Geometry".to_owned()),
                ..Question::default()
            },
            Question {
                id: "b".to_owned(),
                question_text: Some("Solve 3x = 9".to_owned()),
                standard: Some("7.EE.B.4".to_owned()),
                learning_objective: Some("Solve linear equations".to_owned()),
                topic: Some("Algebra".to_owned()),
                tags: vec!["Linear".to_owned()],
                ..Question::default()
            },
            Question {
                id: "c".to_owned(),
                topic: Some("Algebra".to_owned()),
                ..Question::default()
            },
        ])
    }

    fn ids(questions: Vec<&Question>) -> Vec<&str> {
        questions.into_iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_match_all() {
        let bank = bank();
        assert_eq!(ids(FilterCriteria::default().apply(&bank)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exact_fields() {
        let bank = bank();
        let criteria = FilterCriteria {
            topic: "Algebra".to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(criteria.apply(&bank)), vec!["b", "c"]);

        let criteria = FilterCriteria {
            topic: "Algebra".to_owned(),
            standard: "7.EE.B.4".to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(criteria.apply(&bank)), vec!["b"]);

        let criteria = FilterCriteria {
            topic: "algebra".to_owned(),
            ..FilterCriteria::default()
        };
        assert!(criteria.apply(&bank).is_empty());
    }

    #[test]
    fn test_keyword() {
        let bank = bank();
        let search = |keyword: &str| {
            let criteria = FilterCriteria {
                keyword: keyword.to_owned(),
                ..FilterCriteria::default()
            };
            criteria
                .apply(&bank)
                .into_iter()
                .map(|q| q.id.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(search("  area "), vec!["a"]);
        assert_eq!(search("linear"), vec!["b"]);
        assert_eq!(search("ALGEBRA"), vec!["b", "c"]);
        assert_eq!(search("7.g"), vec!["a"]);
        assert_eq!(search("   "), vec!["a", "b", "c"]);
        assert!(search("trigonometry").is_empty());
    }

    #[test]
    fn test_reset() {
        let mut criteria = FilterCriteria {
            keyword: "x".to_owned(),
            topic: "Algebra".to_owned(),
            ..FilterCriteria::default()
        };
        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }
}
