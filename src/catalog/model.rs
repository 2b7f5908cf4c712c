use crate::config::{MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, RESERVED_TITLES};
use crate::error::{AuctionError, AuctionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Listing model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starting_bid: i64,
    pub current_bid: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// `None` means the flag was never set; such rows are neither active nor closed.
    pub active: Option<bool>,
    pub owner_id: i64,
    pub highest_bidder_id: Option<i64>,
    pub winner_id: Option<i64>,
    /// Number of accepted bids.
    pub bid_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_active(&self) -> bool {
        self.active == Some(true)
    }
}

/// Listing submission as posted by the create form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListingForm {
    pub title: String,
    pub description: String,
    pub starting_bid: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A listing submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub starting_bid: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl NewListingForm {
    pub fn validate(self) -> AuctionResult<NewListing> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AuctionError::Validation("Title is required.".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AuctionError::Validation(format!(
                "Title must be at most {MAX_TITLE_LEN} characters."
            )));
        }
        if RESERVED_TITLES.contains(&title.as_str()) {
            return Err(AuctionError::Validation(format!(
                "'{title}' is a reserved name, choose another title."
            )));
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(AuctionError::Validation("Description is required.".into()));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AuctionError::Validation(format!(
                "Description must be at most {MAX_DESCRIPTION_LEN} characters."
            )));
        }

        if self.starting_bid < 0 {
            return Err(AuctionError::Validation(
                "Starting bid cannot be negative.".into(),
            ));
        }

        let image_url = non_blank(self.image_url);
        if let Some(raw) = &image_url {
            url::Url::parse(raw)
                .map_err(|_| AuctionError::Validation("Enter a valid image URL.".into()))?;
        }

        let category = non_blank(self.category);
        if category
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_CATEGORY_LEN)
        {
            return Err(AuctionError::Validation(format!(
                "Category must be at most {MAX_CATEGORY_LEN} characters."
            )));
        }

        Ok(NewListing {
            title,
            description,
            starting_bid: self.starting_bid,
            image_url,
            category,
        })
    }
}

/// HTML forms post empty strings for untouched optional inputs.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewListingForm {
        NewListingForm {
            title: "  Chair ".into(),
            description: "A sturdy oak chair".into(),
            starting_bid: 10,
            image_url: Some(String::new()),
            category: Some("  ".into()),
        }
    }

    #[test]
    fn validate_trims_and_drops_blank_optionals() {
        let listing = form().validate().unwrap();
        assert_eq!(listing.title, "Chair");
        assert_eq!(listing.image_url, None);
        assert_eq!(listing.category, None);
    }

    #[test]
    fn validate_rejects_bad_image_url() {
        let mut f = form();
        f.image_url = Some("not a url".into());
        assert!(matches!(f.validate(), Err(AuctionError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_starting_bid_and_long_title() {
        let mut f = form();
        f.starting_bid = -1;
        assert!(f.validate().is_err());

        let mut f = form();
        f.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(f.validate().is_err());
    }

    #[test]
    fn validate_rejects_titles_taken_by_fixed_routes() {
        for reserved in ["inactive", "categories", "create", "login", "watchlist_view"] {
            let mut f = form();
            f.title = format!(" {reserved} ");
            assert!(
                matches!(f.validate(), Err(AuctionError::Validation(_))),
                "{reserved} should be rejected"
            );
        }

        // only exact path matches collide
        let mut f = form();
        f.title = "Inactive".into();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn active_flag_is_tri_state() {
        let mut listing = Listing {
            id: 1,
            title: "Chair".into(),
            description: "oak".into(),
            starting_bid: 10,
            current_bid: 10,
            image_url: None,
            category: None,
            active: None,
            owner_id: 1,
            highest_bidder_id: Some(1),
            winner_id: None,
            bid_count: 0,
            created_at: Utc::now(),
        };
        assert!(!listing.is_active());
        listing.active = Some(true);
        assert!(listing.is_active());
    }
}
