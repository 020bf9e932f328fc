// src/services/review_service_tests.rs

use crate::domain::{EventType, Operation};
use crate::error::AppError;
use crate::services::test_fixtures::*;
use crate::services::{CreateReviewRequest, UpdateReviewRequest};

struct Seeded {
    f: Fixture,
    film_id: i64,
    user_id: i64,
}

fn seeded() -> Seeded {
    let f = sqlite_fixture();
    let film = f.state.film_service.create(film_request("Reviewed", 2010)).unwrap();
    let user = f.state.user_service.create(user_request("critic")).unwrap();
    Seeded {
        f,
        film_id: film.id,
        user_id: user.id,
    }
}

fn review_request(film_id: i64, user_id: i64, content: &str) -> CreateReviewRequest {
    CreateReviewRequest {
        content: content.to_string(),
        is_positive: true,
        film_id,
        user_id,
        useful: 0,
    }
}

#[test]
fn create_review_starts_at_zero_useful_and_records_a_feed_event() {
    let s = seeded();

    let review = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "A classic"))
        .unwrap();

    assert!(review.review_id > 0);
    assert_eq!(review.useful, 0);

    let events = s.f.state.user_service.get_feed_events(s.user_id).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::Review);
    assert_eq!(events[0].operation, Operation::Add);
    assert_eq!(events[0].entity_id, review.review_id);
}

#[test]
fn create_review_validates_film_and_user() {
    let s = seeded();

    assert!(matches!(
        s.f.state
            .review_service
            .create_review(review_request(999, s.user_id, "ghost film"))
            .unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        s.f.state
            .review_service
            .create_review(review_request(s.film_id, 999, "ghost user"))
            .unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        s.f.state
            .review_service
            .create_review(review_request(s.film_id, s.user_id, "   "))
            .unwrap_err(),
        AppError::Domain(_)
    ));
}

#[test]
fn useful_score_follows_the_vote_transition_rules() {
    let s = seeded();
    let voter = s.f.state.user_service.create(user_request("voter")).unwrap();

    let review = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "Scored"))
        .unwrap();
    let id = review.review_id;
    let useful = |s: &Seeded| {
        s.f.state
            .review_service
            .get_review_by_id(id)
            .unwrap()
            .useful
    };

    // Fresh like: +1
    s.f.state.review_service.like_review(id, voter.id, true).unwrap();
    assert_eq!(useful(&s), 1);

    // Same polarity again: no-op
    s.f.state.review_service.like_review(id, voter.id, true).unwrap();
    assert_eq!(useful(&s), 1);

    // Flip to dislike: -2 net
    s.f.state.review_service.like_review(id, voter.id, false).unwrap();
    assert_eq!(useful(&s), -1);

    // Removing a like that is not there: no-op
    s.f.state.review_service.remove_like(id, voter.id, true).unwrap();
    assert_eq!(useful(&s), -1);

    // Removing the dislike restores zero
    s.f.state.review_service.remove_like(id, voter.id, false).unwrap();
    assert_eq!(useful(&s), 0);
}

#[test]
fn vote_operations_validate_review_and_user() {
    let s = seeded();

    assert!(matches!(
        s.f.state.review_service.like_review(999, s.user_id, true).unwrap_err(),
        AppError::NotFound(_)
    ));

    let review = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "Voted"))
        .unwrap();
    assert!(matches!(
        s.f.state
            .review_service
            .like_review(review.review_id, 999, true)
            .unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn update_changes_content_and_polarity_but_not_useful() {
    let s = seeded();
    let voter = s.f.state.user_service.create(user_request("upvoter")).unwrap();

    let review = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "First draft"))
        .unwrap();
    s.f.state
        .review_service
        .like_review(review.review_id, voter.id, true)
        .unwrap();

    let updated = s
        .f
        .state
        .review_service
        .update_review(UpdateReviewRequest {
            review_id: review.review_id,
            content: "Second draft".to_string(),
            is_positive: false,
            film_id: s.film_id,
            user_id: s.user_id,
        })
        .unwrap();

    assert_eq!(updated.content, "Second draft");
    assert!(!updated.is_positive);
    // Vote-derived score survives the update
    assert_eq!(updated.useful, 1);

    let events = s.f.state.user_service.get_feed_events(s.user_id).unwrap();
    assert_eq!(events.last().unwrap().operation, Operation::Update);
}

#[test]
fn update_of_unknown_review_is_not_found() {
    let s = seeded();

    let err = s
        .f
        .state
        .review_service
        .update_review(UpdateReviewRequest {
            review_id: 999,
            content: "Ghost".to_string(),
            is_positive: true,
            film_id: s.film_id,
            user_id: s.user_id,
        })
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn reviews_are_ranked_by_useful_score() {
    let s = seeded();
    let other_film = s.f.state.film_service.create(film_request("Also Reviewed", 2011)).unwrap();
    let v1 = s.f.state.user_service.create(user_request("v1")).unwrap();
    let v2 = s.f.state.user_service.create(user_request("v2")).unwrap();

    let low = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "Low"))
        .unwrap();
    let high = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, v1.id, "High"))
        .unwrap();
    let elsewhere = s
        .f
        .state
        .review_service
        .create_review(review_request(other_film.id, v2.id, "Elsewhere"))
        .unwrap();

    s.f.state
        .review_service
        .like_review(high.review_id, v1.id, true)
        .unwrap();
    s.f.state
        .review_service
        .like_review(high.review_id, v2.id, true)
        .unwrap();
    s.f.state
        .review_service
        .like_review(elsewhere.review_id, v1.id, true)
        .unwrap();

    // Global ranking
    let global = s.f.state.review_service.get_reviews(None, 10).unwrap();
    let ids: Vec<i64> = global.iter().map(|r| r.review_id).collect();
    assert_eq!(ids, vec![high.review_id, elsewhere.review_id, low.review_id]);

    // Film-scoped ranking
    let scoped = s.f.state.review_service.get_reviews(Some(s.film_id), 10).unwrap();
    let ids: Vec<i64> = scoped.iter().map(|r| r.review_id).collect();
    assert_eq!(ids, vec![high.review_id, low.review_id]);

    // Count caps the result
    let top_one = s.f.state.review_service.get_reviews(None, 1).unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].review_id, high.review_id);
}

#[test]
fn delete_review_records_the_event_then_removes_the_row() {
    let s = seeded();

    let review = s
        .f
        .state
        .review_service
        .create_review(review_request(s.film_id, s.user_id, "Short-lived"))
        .unwrap();

    s.f.state.review_service.delete_review(review.review_id).unwrap();

    assert!(matches!(
        s.f.state
            .review_service
            .get_review_by_id(review.review_id)
            .unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        s.f.state.review_service.delete_review(review.review_id).unwrap_err(),
        AppError::NotFound(_)
    ));

    let events = s.f.state.user_service.get_feed_events(s.user_id).unwrap();
    let ops: Vec<Operation> = events.iter().map(|e| e.operation).collect();
    assert_eq!(ops, vec![Operation::Add, Operation::Remove]);
}

#[test]
fn both_backends_agree_on_the_review_vote_flow() {
    for f in all_fixtures() {
        let film = f.state.film_service.create(film_request("Parity Review", 2016)).unwrap();
        let author = f.state.user_service.create(user_request("author")).unwrap();
        let voter = f.state.user_service.create(user_request("pvoter")).unwrap();

        let review = f
            .state
            .review_service
            .create_review(review_request(film.id, author.id, "Cross-backend"))
            .unwrap();

        f.state
            .review_service
            .like_review(review.review_id, voter.id, false)
            .unwrap();
        assert_eq!(
            f.state
                .review_service
                .get_review_by_id(review.review_id)
                .unwrap()
                .useful,
            -1
        );

        f.state
            .review_service
            .like_review(review.review_id, voter.id, true)
            .unwrap();
        assert_eq!(
            f.state
                .review_service
                .get_review_by_id(review.review_id)
                .unwrap()
                .useful,
            1
        );
    }
}
