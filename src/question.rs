//! Adapter between declared variables and the prompt collaborator

use crate::definition::{OrderedMap, VariableKind, VariableSpec};

/// A question the prompt layer knows how to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Variable id the answer is bound to
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Text,
    Select { choices: Vec<Choice> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Question {
    pub fn from_spec(id: &str, spec: &VariableSpec) -> Self {
        let kind = match spec.kind {
            VariableKind::Text => QuestionKind::Text,
            VariableKind::Select => QuestionKind::Select {
                choices: spec
                    .choices
                    .iter()
                    .map(|(value, label)| Choice {
                        value: value.to_string(),
                        label: label.clone(),
                    })
                    .collect(),
            },
        };

        Self {
            id: id.to_string(),
            prompt: spec.label.clone().unwrap_or_else(|| id.to_string()),
            kind,
            default: spec.default.clone(),
        }
    }

    /// Choices of a select question; empty for text questions.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            QuestionKind::Text => &[],
            QuestionKind::Select { choices } => choices,
        }
    }
}

/// Questions for every variable declared at a node, in declaration order.
pub fn questions_for(variables: &OrderedMap<VariableSpec>) -> Vec<Question> {
    variables
        .iter()
        .map(|(id, spec)| Question::from_spec(id, spec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_question_uses_id_as_prompt() {
        let q = Question::from_spec("proj", &VariableSpec::text().with_default("app"));
        assert_eq!(q.id, "proj");
        assert_eq!(q.prompt, "proj");
        assert_eq!(q.kind, QuestionKind::Text);
        assert_eq!(q.default.as_deref(), Some("app"));
        assert!(q.choices().is_empty());
    }

    #[test]
    fn test_select_question_keeps_choice_order() {
        let spec = VariableSpec::select([("rs", "Rust"), ("go", "Go")]).with_label("Language");
        let q = Question::from_spec("lang", &spec);

        assert_eq!(q.prompt, "Language");
        let values: Vec<_> = q.choices().iter().map(|c| c.value.as_str()).collect();
        let labels: Vec<_> = q.choices().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(values, vec!["rs", "go"]);
        assert_eq!(labels, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_questions_for_follows_declaration_order() {
        let vars: OrderedMap<VariableSpec> = [
            ("b", VariableSpec::text()),
            ("a", VariableSpec::text()),
        ]
        .into_iter()
        .collect();
        let ids: Vec<_> = questions_for(&vars).into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
