//! Append-only remarks on listings.
// region:    --- Imports
use crate::catalog::model::Listing;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::identity::model::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    /// Username of the author.
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub fn validate(self) -> AuctionResult<String> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(AuctionError::Validation("Comment cannot be empty.".into()));
        }
        Ok(body.to_string())
    }
}

const INSERT_COMMENT: &str = r#"
    WITH inserted AS (
        INSERT INTO comments (listing_id, author_id, body)
        VALUES ($1, $2, $3)
        RETURNING id, listing_id, author_id, body, created_at
    )
    SELECT i.id, i.listing_id, i.author_id, u.username AS author, i.body, i.created_at
    FROM inserted i
    JOIN users u ON u.id = i.author_id
"#;

/// Append a comment by `author` to `listing`.
pub async fn add_comment(
    db_manager: &DatabaseManager,
    author: &User,
    listing: &Listing,
    body: String,
) -> AuctionResult<Comment> {
    info!(
        "{:<12} --> Comment by {} on '{}'",
        "Command", author.username, listing.title
    );
    let comment = sqlx::query_as::<_, Comment>(INSERT_COMMENT)
        .bind(listing.id)
        .bind(author.id)
        .bind(body)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected() {
        let form = CommentForm { body: " \n ".into() };
        assert!(matches!(form.validate(), Err(AuctionError::Validation(_))));
    }

    #[test]
    fn comment_body_is_trimmed() {
        let form = CommentForm { body: "  nice chair ".into() };
        assert_eq!(form.validate().unwrap(), "nice chair");
    }
}
