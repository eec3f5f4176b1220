use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeRequest {
    pub is_super_like: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    pub content: String,
}

/// A reel comment; `parent_id` makes it a reply and is sent as `null` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
    pub parent_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReelReport {
    pub reason: String,
    pub description: String,
}

impl ReelReport {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            description: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Filters for the reel feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReelQuery {
    pub page: Option<u32>,
    pub user_id: Option<u64>,
    pub hashtag: Option<String>,
}

impl ReelQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn by_user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn hashtag(mut self, tag: impl Into<String>) -> Self {
        self.hashtag = Some(tag.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    pub unread_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_comment_sends_null_parent() {
        let c = NewComment {
            content: "nice".into(),
            parent_id: None,
        };
        assert_eq!(
            serde_json::to_value(c).unwrap(),
            json!({"content": "nice", "parent_id": null})
        );
    }

    #[test]
    fn report_description_defaults_to_empty() {
        assert_eq!(
            serde_json::to_value(ReelReport::new("spam")).unwrap(),
            json!({"reason": "spam", "description": ""})
        );
    }
}
