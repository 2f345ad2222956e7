use super::{ListableModel, Listing, SearchField};
use crate::domain::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: String,
    #[serde(skip_serializing, default = "Utc::now")]
    #[schema(read_only)]
    pub created_at: DateTime<Utc>,
    pub version: i32,
}

impl ListableModel for Comment {
    const LISTING: Listing = Listing {
        table: "comments",
        primary_key: "id",
        columns: "id, content, author, created_at, version",
        search_fields: &[
            SearchField { param: "content", column: "content" },
            SearchField { param: "author", column: "author" },
        ],
        sort_safelist: &["id", "author", "created_at", "-id", "-author", "-created_at"],
        default_sort: "id",
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CommentDraft {
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub author: Option<String>,
}

impl Comment {
    pub fn draft(&self) -> CommentDraft {
        CommentDraft {
            content: self.content.clone(),
            author: self.author.clone(),
        }
    }
}

impl CommentDraft {
    pub fn apply(mut self, patch: CommentPatch) -> Self {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        self
    }
}

pub fn validate_comment(v: &mut Validator, c: &CommentDraft) {
    v.check(!c.content.is_empty(), "content", "must be provided");
    v.check(!c.author.is_empty(), "author", "must be provided");
    v.check(c.content.len() <= 100, "content", "must not be more than 100 bytes long");
    v.check(c.author.len() <= 25, "author", "must not be more than 25 bytes long");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_is_not_serialized() {
        let c = Comment {
            id: 7,
            content: "hello".into(),
            author: "bo".into(),
            created_at: Utc::now(),
            version: 1,
        };
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn empty_and_oversized_fields() {
        let mut v = Validator::new();
        validate_comment(
            &mut v,
            &CommentDraft {
                content: String::new(),
                author: "a".repeat(26),
            },
        );
        assert_eq!(v.errors()["content"], "must be provided");
        assert_eq!(v.errors()["author"], "must not be more than 25 bytes long");
    }
}
