use super::{ListableModel, Listing, SearchField};
use crate::domain::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub review_id: i64,
    pub product_id: i64,
    pub author: String,
    pub rating: i32,
    pub comment: String,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub version: i32,
}

impl ListableModel for Review {
    const LISTING: Listing = Listing {
        table: "reviews",
        primary_key: "review_id",
        columns: "review_id, product_id, author, rating, comment, helpful_count, created_at, version",
        search_fields: &[
            SearchField { param: "author", column: "author" },
            SearchField { param: "comment", column: "comment" },
        ],
        sort_safelist: &[
            "review_id",
            "rating",
            "helpful_count",
            "created_at",
            "-review_id",
            "-rating",
            "-helpful_count",
            "-created_at",
        ],
        default_sort: "review_id",
    };
}

/// Fields a client supplies when posting a review. `helpful_count` starts at
/// zero and can only be changed through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: i32,
    pub comment: String,
    #[serde(skip_deserializing)]
    #[schema(read_only)]
    pub helpful_count: i32,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReviewPatch {
    pub author: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub helpful_count: Option<i32>,
}

impl Review {
    pub fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            author: self.author.clone(),
            rating: self.rating,
            comment: self.comment.clone(),
            helpful_count: self.helpful_count,
        }
    }
}

impl ReviewDraft {
    pub fn apply(mut self, patch: ReviewPatch) -> Self {
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        if let Some(helpful_count) = patch.helpful_count {
            self.helpful_count = helpful_count;
        }
        self
    }
}

pub fn validate_review(v: &mut Validator, r: &ReviewDraft) {
    v.check(!r.author.is_empty(), "author", "must be provided");
    v.check(r.author.len() <= 25, "author", "must not be more than 25 bytes long");
    v.check((1..=5).contains(&r.rating), "rating", "must be between 1 and 5");
    v.check(!r.comment.is_empty(), "comment", "must be provided");
    v.check(r.comment.len() <= 500, "comment", "must not be more than 500 bytes long");
    v.check(r.helpful_count >= 0, "helpful_count", "must not be negative");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_in_range() {
        for rating in [0, 6, -1] {
            let draft = ReviewDraft {
                author: "ana".into(),
                rating,
                comment: "fine".into(),
                helpful_count: 0,
            };
            let mut v = Validator::new();
            validate_review(&mut v, &draft);
            assert_eq!(v.errors()["rating"], "must be between 1 and 5");
        }
    }

    #[test]
    fn helpful_count_cannot_be_posted() {
        let res = serde_json::from_str::<ReviewDraft>(
            r#"{"author":"ana","rating":4,"comment":"ok","helpful_count":9}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn patch_can_bump_helpful_count() {
        let draft = ReviewDraft {
            author: "ana".into(),
            rating: 4,
            comment: "ok".into(),
            helpful_count: 1,
        };
        let patch: ReviewPatch = serde_json::from_str(r#"{"helpful_count":2}"#).unwrap();
        let draft = draft.apply(patch);
        assert_eq!(draft.helpful_count, 2);

        let mut v = Validator::new();
        validate_review(&mut v, &draft.clone().apply(ReviewPatch {
            helpful_count: Some(-1),
            ..Default::default()
        }));
        assert_eq!(v.errors()["helpful_count"], "must not be negative");
    }
}
