// region:    --- Imports
use crate::error::AuctionError;
use axum::extract::FromRequest;
// endregion: --- Imports

/// `axum::Form` whose rejection is an [`AuctionError::Validation`], so a
/// malformed body gets the same JSON error as any other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AuctionError))]
pub struct Form<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::BidForm;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};

    fn form_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/bid/Chair")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_body_deserializes() {
        let Form(form) = Form::<BidForm>::from_request(form_request("bid=15"), &())
            .await
            .unwrap();
        assert_eq!(form.bid, 15);
    }

    #[tokio::test]
    async fn non_numeric_bid_is_a_validation_error() {
        let err = Form::<BidForm>::from_request(form_request("bid=abc"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AuctionError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let err = Form::<BidForm>::from_request(form_request(""), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AuctionError::Validation(_)));
    }
}
