// src/repositories/film_repository.rs
//
// Film persistence, including the genre/director/like join tables.
// Collection loads for film lists are batched into one IN (...) query per
// collection to keep list endpoints at a constant number of round trips.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Row, Transaction};

use crate::db::ConnectionPool;
use crate::domain::{Director, Film, Genre, MpaRating};
use crate::error::{AppError, AppResult};

pub trait FilmRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Film>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Film>>;
    /// Inserts the film row plus its genre/director join rows in one
    /// transaction and returns the stored aggregate with its assigned id.
    fn create(&self, film: &Film) -> AppResult<Film>;
    /// Rewrites the film row and replaces both join tables in one
    /// transaction. The caller passes the full desired state.
    fn update(&self, film: &Film) -> AppResult<Film>;
    fn delete(&self, id: i64) -> AppResult<()>;
    /// Like-count descending, film id ascending; optional genre/year filters.
    fn find_popular(&self, count: i64, genre_id: Option<i64>, year: Option<i32>)
        -> AppResult<Vec<Film>>;
    fn find_by_director(&self, director_id: i64) -> AppResult<Vec<Film>>;
    /// Films liked by both users, most liked first.
    fn find_common(&self, user_id: i64, friend_id: i64) -> AppResult<Vec<Film>>;
    /// Case-insensitive containment search over film titles and/or director
    /// names. With both flags unset the result is empty.
    fn search(&self, query: &str, by_title: bool, by_director: bool) -> AppResult<Vec<Film>>;
}

const FILM_COLUMNS: &str =
    "f.id, f.name, f.description, f.release_date, f.duration, f.mpa_id, m.name AS mpa_name";

const FIND_ALL_SQL: &str = "SELECT f.id, f.name, f.description, f.release_date, f.duration, \
     f.mpa_id, m.name AS mpa_name \
     FROM films f JOIN mpa_ratings m ON f.mpa_id = m.id ORDER BY f.id";

const FIND_BY_ID_SQL: &str = "SELECT f.id, f.name, f.description, f.release_date, f.duration, \
     f.mpa_id, m.name AS mpa_name \
     FROM films f JOIN mpa_ratings m ON f.mpa_id = m.id WHERE f.id = ?1";

const CREATE_SQL: &str =
    "INSERT INTO films (name, description, release_date, duration, mpa_id) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const UPDATE_SQL: &str = "UPDATE films SET name = ?1, description = ?2, release_date = ?3, \
     duration = ?4, mpa_id = ?5 WHERE id = ?6";

const DELETE_SQL: &str = "DELETE FROM films WHERE id = ?1";
const DELETE_GENRES_SQL: &str = "DELETE FROM film_genres WHERE film_id = ?1";
const DELETE_DIRECTORS_SQL: &str = "DELETE FROM film_directors WHERE film_id = ?1";
const INSERT_GENRE_SQL: &str = "INSERT INTO film_genres (film_id, genre_id) VALUES (?1, ?2)";
const INSERT_DIRECTOR_SQL: &str =
    "INSERT INTO film_directors (film_id, director_id) VALUES (?1, ?2)";

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Film - returns rusqlite::Error for query_map compatibility
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let release_date_str: String = row.get("release_date")?;
        let release_date = NaiveDate::parse_from_str(&release_date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Film {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            release_date,
            duration: row.get("duration")?,
            mpa: MpaRating {
                id: row.get("mpa_id")?,
                name: row.get("mpa_name")?,
            },
            genres: Vec::new(),
            directors: Vec::new(),
            likes: BTreeSet::new(),
        })
    }

    fn query_films(
        &self,
        sql: &str,
        query_params: &[&dyn rusqlite::types::ToSql],
    ) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(sql)?;
        let mut films: Vec<Film> = stmt
            .query_map(query_params, Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        self.load_collections(&mut films)?;
        Ok(films)
    }

    /// Batch-load genres, directors and likes for every film in the slice.
    fn load_collections(&self, films: &mut [Film]) -> AppResult<()> {
        if films.is_empty() {
            return Ok(());
        }

        let conn = self.pool.get()?;
        let ids: Vec<i64> = films.iter().map(|f| f.id).collect();
        let marks = placeholders(ids.len());

        let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
        let sql = format!(
            "SELECT fg.film_id, g.id, g.name FROM film_genres fg \
             JOIN genres g ON fg.genre_id = g.id \
             WHERE fg.film_id IN ({}) ORDER BY g.id ASC",
            marks
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Genre {
                    id: row.get(1)?,
                    name: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (film_id, genre) = row?;
            genres.entry(film_id).or_default().push(genre);
        }

        let mut directors: HashMap<i64, Vec<Director>> = HashMap::new();
        let sql = format!(
            "SELECT fd.film_id, d.id, d.name FROM film_directors fd \
             JOIN directors d ON fd.director_id = d.id \
             WHERE fd.film_id IN ({}) ORDER BY d.id ASC",
            marks
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Director {
                    id: row.get(1)?,
                    name: row.get(2)?,
                },
            ))
        })?;
        for row in rows {
            let (film_id, director) = row?;
            directors.entry(film_id).or_default().push(director);
        }

        let mut likes: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        let sql = format!(
            "SELECT film_id, user_id FROM film_likes WHERE film_id IN ({})",
            marks
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (film_id, user_id) = row?;
            likes.entry(film_id).or_default().insert(user_id);
        }

        for film in films.iter_mut() {
            film.genres = genres.remove(&film.id).unwrap_or_default();
            film.directors = directors.remove(&film.id).unwrap_or_default();
            film.likes = likes.remove(&film.id).unwrap_or_default();
        }

        Ok(())
    }

    /// Replace the join rows for a film inside the caller's transaction.
    /// Incoming sets are de-duplicated by id, first occurrence wins; the
    /// canonical ascending-id order is produced by the read path.
    fn replace_collections(
        tx: &Transaction,
        film_id: i64,
        genres: &[Genre],
        directors: &[Director],
    ) -> AppResult<()> {
        tx.execute(DELETE_GENRES_SQL, params![film_id])?;
        let mut seen = BTreeSet::new();
        for genre in genres {
            if seen.insert(genre.id) {
                tx.execute(INSERT_GENRE_SQL, params![film_id, genre.id])?;
            }
        }

        tx.execute(DELETE_DIRECTORS_SQL, params![film_id])?;
        let mut seen = BTreeSet::new();
        for director in directors {
            if seen.insert(director.id) {
                tx.execute(INSERT_DIRECTOR_SQL, params![film_id, director.id])?;
            }
        }

        Ok(())
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn find_all(&self) -> AppResult<Vec<Film>> {
        self.query_films(FIND_ALL_SQL, &[])
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Film>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(FIND_BY_ID_SQL)?;
        let film = match stmt.query_row(params![id], Self::row_to_film) {
            Ok(film) => film,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };
        drop(stmt);
        drop(conn);

        let mut films = vec![film];
        self.load_collections(&mut films)?;
        Ok(films.pop())
    }

    fn create(&self, film: &Film) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            CREATE_SQL,
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                film.duration,
                film.mpa.id,
            ],
        )?;
        let id = tx.last_insert_rowid();

        Self::replace_collections(&tx, id, &film.genres, &film.directors)?;
        tx.commit()?;
        drop(conn);

        self.find_by_id(id)?
            .ok_or_else(|| AppError::not_found("Film", id))
    }

    fn update(&self, film: &Film) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            UPDATE_SQL,
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                film.duration,
                film.mpa.id,
                film.id,
            ],
        )?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Film", film.id));
        }

        Self::replace_collections(&tx, film.id, &film.genres, &film.directors)?;
        tx.commit()?;
        drop(conn);

        self.find_by_id(film.id)?
            .ok_or_else(|| AppError::not_found("Film", film.id))
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        // Join rows cascade with the film row
        let rows_affected = conn.execute(DELETE_SQL, params![id])?;
        if rows_affected == 0 {
            return Err(AppError::not_found("Film", id));
        }

        Ok(())
    }

    fn find_popular(
        &self,
        count: i64,
        genre_id: Option<i64>,
        year: Option<i32>,
    ) -> AppResult<Vec<Film>> {
        let base = format!(
            "SELECT {}, COUNT(l.user_id) AS likes_count \
             FROM films f \
             JOIN mpa_ratings m ON f.mpa_id = m.id \
             LEFT JOIN film_likes l ON f.id = l.film_id",
            FILM_COLUMNS
        );
        let tail = "GROUP BY f.id ORDER BY likes_count DESC, f.id ASC LIMIT";

        match (genre_id, year) {
            (Some(genre_id), Some(year)) => {
                let sql = format!(
                    "{} WHERE EXISTS (SELECT 1 FROM film_genres fg \
                     WHERE fg.film_id = f.id AND fg.genre_id = ?1) \
                     AND CAST(strftime('%Y', f.release_date) AS INTEGER) = ?2 {} ?3",
                    base, tail
                );
                self.query_films(&sql, &[&genre_id, &year, &count])
            }
            (Some(genre_id), None) => {
                let sql = format!(
                    "{} WHERE EXISTS (SELECT 1 FROM film_genres fg \
                     WHERE fg.film_id = f.id AND fg.genre_id = ?1) {} ?2",
                    base, tail
                );
                self.query_films(&sql, &[&genre_id, &count])
            }
            (None, Some(year)) => {
                let sql = format!(
                    "{} WHERE CAST(strftime('%Y', f.release_date) AS INTEGER) = ?1 {} ?2",
                    base, tail
                );
                self.query_films(&sql, &[&year, &count])
            }
            (None, None) => {
                let sql = format!("{} {} ?1", base, tail);
                self.query_films(&sql, &[&count])
            }
        }
    }

    fn find_by_director(&self, director_id: i64) -> AppResult<Vec<Film>> {
        let sql = format!(
            "SELECT {} FROM films f \
             JOIN mpa_ratings m ON f.mpa_id = m.id \
             JOIN film_directors fd ON f.id = fd.film_id \
             WHERE fd.director_id = ?1 ORDER BY f.id",
            FILM_COLUMNS
        );
        self.query_films(&sql, &[&director_id])
    }

    fn find_common(&self, user_id: i64, friend_id: i64) -> AppResult<Vec<Film>> {
        let sql = format!(
            "SELECT {}, COUNT(l.user_id) AS likes_count \
             FROM films f \
             JOIN mpa_ratings m ON f.mpa_id = m.id \
             LEFT JOIN film_likes l ON f.id = l.film_id \
             WHERE f.id IN (SELECT film_id FROM film_likes WHERE user_id = ?1) \
             AND f.id IN (SELECT film_id FROM film_likes WHERE user_id = ?2) \
             GROUP BY f.id ORDER BY likes_count DESC, f.id ASC",
            FILM_COLUMNS
        );
        self.query_films(&sql, &[&user_id, &friend_id])
    }

    fn search(&self, query: &str, by_title: bool, by_director: bool) -> AppResult<Vec<Film>> {
        let pattern = format!("%{}%", query.to_lowercase());

        // COUNT(DISTINCT ...) because the director join can fan out like rows
        let base = format!(
            "SELECT {}, COUNT(DISTINCT l.user_id) AS likes_count \
             FROM films f \
             JOIN mpa_ratings m ON f.mpa_id = m.id \
             LEFT JOIN film_likes l ON f.id = l.film_id",
            FILM_COLUMNS
        );
        let tail = "GROUP BY f.id ORDER BY likes_count DESC, f.id ASC";

        match (by_title, by_director) {
            (true, true) => {
                let sql = format!(
                    "{} LEFT JOIN film_directors fd ON f.id = fd.film_id \
                     LEFT JOIN directors d ON fd.director_id = d.id \
                     WHERE LOWER(f.name) LIKE ?1 OR LOWER(d.name) LIKE ?1 {}",
                    base, tail
                );
                self.query_films(&sql, &[&pattern])
            }
            (true, false) => {
                let sql = format!("{} WHERE LOWER(f.name) LIKE ?1 {}", base, tail);
                self.query_films(&sql, &[&pattern])
            }
            (false, true) => {
                let sql = format!(
                    "{} LEFT JOIN film_directors fd ON f.id = fd.film_id \
                     LEFT JOIN directors d ON fd.director_id = d.id \
                     WHERE LOWER(d.name) LIKE ?1 {}",
                    base, tail
                );
                self.query_films(&sql, &[&pattern])
            }
            (false, false) => Ok(Vec::new()),
        }
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
