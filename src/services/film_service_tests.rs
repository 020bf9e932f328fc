// src/services/film_service_tests.rs
//
// FilmService behavior against the real SQLite backend, plus parity checks
// for the in-memory backend.

use chrono::NaiveDate;

use crate::domain::film::earliest_release_date;
use crate::domain::{EventType, Operation};
use crate::error::AppError;
use crate::services::test_fixtures::*;
use crate::services::{EntityRef, UpdateFilmRequest};

fn update_request_from(film: &crate::domain::Film) -> UpdateFilmRequest {
    UpdateFilmRequest {
        id: film.id,
        name: film.name.clone(),
        description: film.description.clone(),
        release_date: film.release_date,
        duration: film.duration,
        mpa: Some(EntityRef { id: film.mpa.id }),
        genres: None,
        directors: None,
    }
}

#[test]
fn create_then_find_returns_same_film() {
    let f = sqlite_fixture();

    let created = f.state.film_service.create(film_request("The Matrix", 1999)).unwrap();
    assert!(created.id > 0);

    let found = f.state.film_service.find_by_id(created.id).unwrap();
    assert_eq!(found.name, "The Matrix");
    assert_eq!(found.description, "The Matrix (test)");
    assert_eq!(found.release_date, NaiveDate::from_ymd_opt(1999, 6, 1).unwrap());
    assert_eq!(found.duration, 120);
    assert_eq!(found.mpa.id, 1);
    assert_eq!(found.mpa.name, "G");
}

#[test]
fn create_without_mpa_is_a_validation_error() {
    let f = sqlite_fixture();

    let mut request = film_request("No Rating", 2000);
    request.mpa = None;

    let err = f.state.film_service.create(request).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn create_with_unknown_mpa_is_not_found() {
    let f = sqlite_fixture();

    let mut request = film_request("Bad Rating", 2000);
    request.mpa = Some(EntityRef { id: 999 });

    let err = f.state.film_service.create(request).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn create_with_unknown_genre_is_not_found() {
    let f = sqlite_fixture();

    let mut request = film_request("Bad Genre", 2000);
    request.genres = Some(vec![EntityRef { id: 999 }]);

    let err = f.state.film_service.create(request).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn genres_are_deduplicated_and_sorted_by_id() {
    let f = sqlite_fixture();

    let mut request = film_request("Genre Salad", 2001);
    request.genres = Some(vec![
        EntityRef { id: 3 },
        EntityRef { id: 1 },
        EntityRef { id: 3 },
        EntityRef { id: 2 },
    ]);

    let created = f.state.film_service.create(request).unwrap();
    let ids: Vec<i64> = created.genres.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(created.genres[0].name, "Comedy");
}

#[test]
fn release_date_boundary() {
    let f = sqlite_fixture();

    let mut request = film_request("Workers Leaving the Factory", 1900);
    request.release_date = earliest_release_date();
    assert!(f.state.film_service.create(request).is_ok());

    let mut request = film_request("Before Cinema", 1900);
    request.release_date = earliest_release_date().pred_opt().unwrap();
    let err = f.state.film_service.create(request).unwrap_err();
    assert!(matches!(err, AppError::Domain(_)));
}

#[test]
fn update_of_unknown_film_is_not_found() {
    let f = sqlite_fixture();

    let created = f.state.film_service.create(film_request("Ghost", 2000)).unwrap();
    let mut request = update_request_from(&created);
    request.id = 999;

    let err = f.state.film_service.update(request).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn update_preserves_omitted_collections_and_clears_explicit_empty_ones() {
    let f = sqlite_fixture();

    let director = f
        .state
        .director_service
        .create(crate::services::DirectorRequest {
            id: 0,
            name: "Lana Wachowski".to_string(),
        })
        .unwrap();

    let mut request = film_request("Bound", 1996);
    request.genres = Some(vec![EntityRef { id: 4 }]);
    request.directors = Some(vec![EntityRef { id: director.id }]);
    let created = f.state.film_service.create(request).unwrap();
    assert_eq!(created.genres.len(), 1);
    assert_eq!(created.directors.len(), 1);

    // Omitted collections keep the stored value
    let updated = f.state.film_service.update(update_request_from(&created)).unwrap();
    assert_eq!(updated.genres.len(), 1);
    assert_eq!(updated.directors.len(), 1);

    // Explicit empty sets clear them
    let mut request = update_request_from(&created);
    request.genres = Some(Vec::new());
    request.directors = Some(Vec::new());
    let updated = f.state.film_service.update(request).unwrap();
    assert!(updated.genres.is_empty());
    assert!(updated.directors.is_empty());
}

#[test]
fn add_like_is_idempotent_and_counts_once() {
    let f = sqlite_fixture();

    let film = f.state.film_service.create(film_request("Liked", 2005)).unwrap();
    let user = f.state.user_service.create(user_request("fan")).unwrap();

    f.state.film_service.add_like(film.id, user.id).unwrap();
    // The duplicate must not surface as an error
    f.state.film_service.add_like(film.id, user.id).unwrap();

    let found = f.state.film_service.find_by_id(film.id).unwrap();
    assert_eq!(found.like_count(), 1);

    let popular = f.state.film_service.get_popular_films(10, None, None).unwrap();
    let entry = popular.iter().find(|p| p.id == film.id).unwrap();
    assert_eq!(entry.like_count(), 1);
}

#[test]
fn add_like_requires_existing_film_and_user() {
    let f = sqlite_fixture();

    let film = f.state.film_service.create(film_request("Solo", 2005)).unwrap();
    let user = f.state.user_service.create(user_request("viewer")).unwrap();

    assert!(matches!(
        f.state.film_service.add_like(999, user.id).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        f.state.film_service.add_like(film.id, 999).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn remove_absent_like_is_a_silent_noop() {
    let f = sqlite_fixture();

    let film = f.state.film_service.create(film_request("Unliked", 2006)).unwrap();
    let user = f.state.user_service.create(user_request("passerby")).unwrap();

    f.state.film_service.remove_like(film.id, user.id).unwrap();

    let found = f.state.film_service.find_by_id(film.id).unwrap();
    assert_eq!(found.like_count(), 0);
}

#[test]
fn popular_films_order_and_filters() {
    let f = sqlite_fixture();

    let mut request = film_request("Old Comedy", 1995);
    request.genres = Some(vec![EntityRef { id: 1 }]);
    let old_comedy = f.state.film_service.create(request).unwrap();

    let mut request = film_request("New Comedy", 2010);
    request.genres = Some(vec![EntityRef { id: 1 }]);
    let new_comedy = f.state.film_service.create(request).unwrap();

    let drama = f.state.film_service.create(film_request("Plain Drama", 2010)).unwrap();

    let u1 = f.state.user_service.create(user_request("u1")).unwrap();
    let u2 = f.state.user_service.create(user_request("u2")).unwrap();
    f.state.film_service.add_like(new_comedy.id, u1.id).unwrap();
    f.state.film_service.add_like(new_comedy.id, u2.id).unwrap();
    f.state.film_service.add_like(drama.id, u1.id).unwrap();

    let popular = f.state.film_service.get_popular_films(10, None, None).unwrap();
    let ids: Vec<i64> = popular.iter().map(|p| p.id).collect();
    // Two likes, one like, zero likes; ties impossible here
    assert_eq!(ids, vec![new_comedy.id, drama.id, old_comedy.id]);

    let comedies = f.state.film_service.get_popular_films(10, Some(1), None).unwrap();
    let ids: Vec<i64> = comedies.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![new_comedy.id, old_comedy.id]);

    let comedies_2010 = f
        .state
        .film_service
        .get_popular_films(10, Some(1), Some(2010))
        .unwrap();
    let ids: Vec<i64> = comedies_2010.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![new_comedy.id]);

    // Count caps the result
    let top_one = f.state.film_service.get_popular_films(1, None, None).unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].id, new_comedy.id);
}

#[test]
fn popular_films_rejects_bad_filters() {
    let f = sqlite_fixture();

    assert!(matches!(
        f.state.film_service.get_popular_films(10, Some(999), None).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        f.state.film_service.get_popular_films(10, None, Some(1894)).unwrap_err(),
        AppError::Validation(_)
    ));
    assert!(matches!(
        f.state.film_service.get_popular_films(10, None, Some(3000)).unwrap_err(),
        AppError::Validation(_)
    ));
}

#[test]
fn films_by_director_sorting() {
    let f = sqlite_fixture();

    let director = f
        .state
        .director_service
        .create(crate::services::DirectorRequest {
            id: 0,
            name: "Kathryn Bigelow".to_string(),
        })
        .unwrap();

    let mut request = film_request("Later Film", 2010);
    request.directors = Some(vec![EntityRef { id: director.id }]);
    let later = f.state.film_service.create(request).unwrap();

    let mut request = film_request("Earlier Film", 1991);
    request.directors = Some(vec![EntityRef { id: director.id }]);
    let earlier = f.state.film_service.create(request).unwrap();

    let user = f.state.user_service.create(user_request("cinephile")).unwrap();
    f.state.film_service.add_like(later.id, user.id).unwrap();

    let by_year = f
        .state
        .film_service
        .get_films_by_director(director.id, "year")
        .unwrap();
    let ids: Vec<i64> = by_year.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![earlier.id, later.id]);

    let by_likes = f
        .state
        .film_service
        .get_films_by_director(director.id, "likes")
        .unwrap();
    let ids: Vec<i64> = by_likes.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![later.id, earlier.id]);

    assert!(matches!(
        f.state
            .film_service
            .get_films_by_director(director.id, "rating")
            .unwrap_err(),
        AppError::InvalidArgument(_)
    ));
    assert!(matches!(
        f.state.film_service.get_films_by_director(999, "year").unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn films_by_director_likes_ties_break_by_ascending_id() {
    let f = sqlite_fixture();

    let director = f
        .state
        .director_service
        .create(crate::services::DirectorRequest {
            id: 0,
            name: "Tied Director".to_string(),
        })
        .unwrap();

    let mut ids = Vec::new();
    for name in ["Tie One", "Tie Two", "Tie Three"] {
        let mut request = film_request(name, 2000);
        request.directors = Some(vec![EntityRef { id: director.id }]);
        ids.push(f.state.film_service.create(request).unwrap().id);
    }

    let by_likes = f
        .state
        .film_service
        .get_films_by_director(director.id, "likes")
        .unwrap();
    let sorted: Vec<i64> = by_likes.iter().map(|p| p.id).collect();
    assert_eq!(sorted, ids);
}

#[test]
fn search_films_matches_title_and_director_case_insensitively() {
    let f = sqlite_fixture();

    let director = f
        .state
        .director_service
        .create(crate::services::DirectorRequest {
            id: 0,
            name: "Matrix Reloadedson".to_string(),
        })
        .unwrap();

    let by_title = f.state.film_service.create(film_request("The Matrix", 1999)).unwrap();

    let mut request = film_request("Unrelated Title", 2003);
    request.directors = Some(vec![EntityRef { id: director.id }]);
    let by_director = f.state.film_service.create(request).unwrap();

    f.state.film_service.create(film_request("Something Else", 2005)).unwrap();

    let hits = f.state.film_service.search_films("matrix", "title,director").unwrap();
    let mut ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![by_title.id, by_director.id]);

    let title_only = f.state.film_service.search_films("MATRIX", "title").unwrap();
    let ids: Vec<i64> = title_only.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![by_title.id]);

    let director_only = f.state.film_service.search_films("matrix", " director ").unwrap();
    let ids: Vec<i64> = director_only.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![by_director.id]);

    assert!(matches!(
        f.state.film_service.search_films("matrix", "plot").unwrap_err(),
        AppError::Validation(_)
    ));
}

#[test]
fn common_films_is_the_intersection_of_two_users_likes() {
    let f = sqlite_fixture();

    let shared = f.state.film_service.create(film_request("Shared Taste", 2002)).unwrap();
    let only_a = f.state.film_service.create(film_request("Only A", 2003)).unwrap();

    let a = f.state.user_service.create(user_request("alice")).unwrap();
    let b = f.state.user_service.create(user_request("bob")).unwrap();

    f.state.film_service.add_like(shared.id, a.id).unwrap();
    f.state.film_service.add_like(shared.id, b.id).unwrap();
    f.state.film_service.add_like(only_a.id, a.id).unwrap();

    let common = f.state.film_service.get_all_films_common(a.id, b.id).unwrap();
    let ids: Vec<i64> = common.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![shared.id]);
}

#[test]
fn delete_film_removes_it_and_its_join_rows() {
    let f = sqlite_fixture();

    let mut request = film_request("Doomed", 2004);
    request.genres = Some(vec![EntityRef { id: 2 }]);
    let film = f.state.film_service.create(request).unwrap();
    let user = f.state.user_service.create(user_request("mourner")).unwrap();
    f.state.film_service.add_like(film.id, user.id).unwrap();

    f.state.film_service.delete(film.id).unwrap();

    assert!(matches!(
        f.state.film_service.find_by_id(film.id).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        f.state.film_service.delete(film.id).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn like_operations_record_feed_events() {
    let f = sqlite_fixture();

    let film = f.state.film_service.create(film_request("Logged", 2007)).unwrap();
    let user = f.state.user_service.create(user_request("tracker")).unwrap();

    f.state.film_service.add_like(film.id, user.id).unwrap();
    f.state.film_service.remove_like(film.id, user.id).unwrap();

    let events = f.state.user_service.get_feed_events(user.id).unwrap();
    let kinds: Vec<(EventType, Operation, i64)> = events
        .iter()
        .map(|e| (e.event_type, e.operation, e.entity_id))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (EventType::Like, Operation::Add, film.id),
            (EventType::Like, Operation::Remove, film.id),
        ]
    );
}

#[test]
fn both_backends_agree_on_the_core_film_flow() {
    for f in all_fixtures() {
        let mut request = film_request("Backend Parity", 2015);
        request.genres = Some(vec![EntityRef { id: 2 }, EntityRef { id: 1 }]);
        let film = f.state.film_service.create(request).unwrap();
        let user = f.state.user_service.create(user_request("parity")).unwrap();

        let ids: Vec<i64> = film.genres.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2]);

        f.state.film_service.add_like(film.id, user.id).unwrap();
        f.state.film_service.add_like(film.id, user.id).unwrap();

        let found = f.state.film_service.find_by_id(film.id).unwrap();
        assert_eq!(found.like_count(), 1);

        let popular = f.state.film_service.get_popular_films(10, None, None).unwrap();
        assert_eq!(popular[0].id, film.id);
    }
}

mod feed_mock {
    use std::sync::Arc;

    use mockall::predicate;

    use crate::domain::{EventType, Operation};
    use crate::repositories::feed_event_repository::MockFeedEventRepository;
    use crate::repositories::{
        SqliteDirectorRepository, SqliteFeedEventRepository, SqliteFilmLikeRepository,
        SqliteFilmRepository, SqliteFriendshipRepository, SqliteGenreRepository,
        SqliteMpaRepository, SqliteUserRepository,
    };
    use crate::services::test_fixtures::{film_request, test_pool, user_request};
    use crate::services::{
        DirectorService, FilmService, GenreService, MpaService, UserService,
    };

    /// addLike must emit exactly one LIKE/ADD event for the liking user.
    #[test]
    fn add_like_emits_one_like_add_event() {
        let (pool, _dir) = test_pool();

        let user_service = Arc::new(UserService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteFriendshipRepository::new(pool.clone())),
            Arc::new(SqliteFilmLikeRepository::new(pool.clone())),
            Arc::new(SqliteFilmRepository::new(pool.clone())),
            Arc::new(SqliteFeedEventRepository::new(pool.clone())),
        ));

        let user = user_service.create(user_request("mocked")).unwrap();
        let user_id = user.id;

        let mut mock_feed = MockFeedEventRepository::new();
        mock_feed
            .expect_save()
            .withf(move |event| {
                event.event_type == EventType::Like
                    && event.operation == Operation::Add
                    && event.user_id == user_id
            })
            .times(1)
            .returning(|_| Ok(()));
        mock_feed
            .expect_find_by_user()
            .with(predicate::always())
            .returning(|_| Ok(Vec::new()));

        let film_service = FilmService::new(
            Arc::new(SqliteFilmRepository::new(pool.clone())),
            Arc::new(SqliteFilmLikeRepository::new(pool.clone())),
            Arc::new(mock_feed),
            user_service,
            Arc::new(MpaService::new(Arc::new(SqliteMpaRepository::new(pool.clone())))),
            Arc::new(GenreService::new(Arc::new(SqliteGenreRepository::new(pool.clone())))),
            Arc::new(DirectorService::new(Arc::new(SqliteDirectorRepository::new(pool)))),
        );

        let film = film_service.create(film_request("Mock Feed", 2018)).unwrap();
        film_service.add_like(film.id, user.id).unwrap();
    }
}
