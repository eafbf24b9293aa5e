use serde::{Deserialize, Serialize};

/// Body of `POST /story`. Both fields are always sent, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub choice: String,
    pub addon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl StoryResponse {
    /// Replacement choices, if the backend offered any.
    pub fn new_choices(&self) -> Option<&[String]> {
        self.choices
            .as_deref()
            .filter(|choices| !choices.is_empty())
    }
}

pub fn story_route() -> &'static str {
    "/story"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_choices_decodes() {
        let response: StoryResponse =
            serde_json::from_str(r#"{"story":"A door creaks."}"#).expect("decode");
        assert_eq!(response.story, "A door creaks.");
        assert!(response.new_choices().is_none());
    }

    #[test]
    fn empty_or_null_choices_count_as_absent() {
        let empty: StoryResponse =
            serde_json::from_str(r#"{"story":"x","choices":[]}"#).expect("decode");
        let null: StoryResponse =
            serde_json::from_str(r#"{"story":"x","choices":null}"#).expect("decode");
        assert!(empty.new_choices().is_none());
        assert!(null.new_choices().is_none());
    }

    #[test]
    fn request_always_carries_both_fields() {
        let body = serde_json::to_value(StoryRequest {
            choice: String::new(),
            addon: "look around".into(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"choice": "", "addon": "look around"}));
    }
}
