use super::entity::Review;
use crate::domain::{DomainError, DomainResult};

/// Validates Review invariants. Referential checks (film and user must
/// exist) belong to the service layer, not here.
pub fn validate_review(review: &Review) -> DomainResult<()> {
    if review.content.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Review content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_fails() {
        let review = Review {
            review_id: 0,
            content: "  ".to_string(),
            is_positive: true,
            film_id: 1,
            user_id: 1,
            useful: 0,
        };
        assert!(validate_review(&review).is_err());
    }
}
