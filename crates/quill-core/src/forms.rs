//! Post submission parsing and field-level validation.
//!
//! The group selection is constrained to real groups: the form renders a
//! choice list from the repository and validation rejects anything outside
//! it. Invalid submissions keep the entered values so nothing is lost on
//! re-render.

use serde::Serialize;
use serde_json::json;

use crate::domain::Group;

pub const TEXT_REQUIRED: &str = "This field is required.";
pub const GROUP_INVALID: &str = "Select a valid choice.";

/// Raw submitted form data. An empty `group` string means "no group"
/// (the blank option of the select).
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub text: String,
    pub group: Option<String>,
}

impl PostInput {
    /// Pre-filled input for editing an existing post.
    pub fn from_existing(text: &str, group_id: Option<i64>) -> Self {
        Self {
            text: text.to_string(),
            group: group_id.map(|id| id.to_string()),
        }
    }
}

/// Field-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.group.is_none()
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub text: String,
    pub group_id: Option<i64>,
}

/// Validate a submission against the set of real groups.
pub fn validate(input: &PostInput, groups: &[Group]) -> Result<ValidatedPost, FormErrors> {
    let mut errors = FormErrors::default();

    let text = input.text.trim();
    if text.is_empty() {
        errors.text = Some(TEXT_REQUIRED);
    }

    let group_id = match input.group.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) if groups.iter().any(|g| g.id == id) => Some(id),
            _ => {
                errors.group = Some(GROUP_INVALID);
                None
            }
        },
    };

    if errors.is_empty() {
        Ok(ValidatedPost {
            text: text.to_string(),
            group_id,
        })
    } else {
        Err(errors)
    }
}

/// Context mapping handed to templates as the `form` key.
pub fn context(input: &PostInput, errors: &FormErrors, groups: &[Group]) -> serde_json::Value {
    let choices: Vec<serde_json::Value> = groups
        .iter()
        .map(|g| json!({ "id": g.id, "title": g.title }))
        .collect();

    json!({
        "text": input.text,
        "group": input.group,
        "errors": errors,
        "group_choices": choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: 1,
            title: "News".to_string(),
            slug: "news".to_string(),
            description: "All the news".to_string(),
        }]
    }

    #[test]
    fn valid_submission_with_group() {
        let input = PostInput {
            text: "  hello  ".to_string(),
            group: Some("1".to_string()),
        };

        let valid = validate(&input, &groups()).unwrap();
        assert_eq!(valid.text, "hello");
        assert_eq!(valid.group_id, Some(1));
    }

    #[test]
    fn empty_group_selection_means_no_group() {
        let input = PostInput {
            text: "hello".to_string(),
            group: Some("".to_string()),
        };

        let valid = validate(&input, &groups()).unwrap();
        assert_eq!(valid.group_id, None);
    }

    #[test]
    fn blank_text_is_rejected() {
        let input = PostInput {
            text: "   ".to_string(),
            group: None,
        };

        let errors = validate(&input, &groups()).unwrap_err();
        assert_eq!(errors.text, Some(TEXT_REQUIRED));
        assert_eq!(errors.group, None);
    }

    #[test]
    fn unknown_or_garbled_group_is_rejected() {
        for raw in ["42", "not-a-number"] {
            let input = PostInput {
                text: "hello".to_string(),
                group: Some(raw.to_string()),
            };

            let errors = validate(&input, &groups()).unwrap_err();
            assert_eq!(errors.group, Some(GROUP_INVALID));
        }
    }

    #[test]
    fn both_fields_can_fail_at_once() {
        let input = PostInput {
            text: "".to_string(),
            group: Some("42".to_string()),
        };

        let errors = validate(&input, &groups()).unwrap_err();
        assert!(errors.text.is_some());
        assert!(errors.group.is_some());
    }
}
