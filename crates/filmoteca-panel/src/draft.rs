//! Catalog record form state.
//!
//! A draft holds every editable field of one record plus the pending poster
//! decision. It is seeded either blank (create) or from a fetched record
//! (edit), and `payload()` turns it into the write payload: title is
//! required, the derived genres display string is recomputed from the list,
//! and the boutique brand is dropped whenever the cult flag is off.

use filmoteca_core::constants::{CULT_BRANDS, FILM_TYPES, GENRES, LANGUAGES};
use filmoteca_core::models::{self, Film, FilmPayload};
use filmoteca_core::{AppError, AppResult};

use crate::posters::PosterChange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmDraft {
    /// `None` until the remote store assigns an id on create.
    pub id: Option<String>,
    pub title: String,
    pub year_film: Option<String>,
    pub film_type: Vec<String>,
    pub cult_film: bool,
    pub cult_brand: Option<String>,
    pub genres_list: Vec<String>,
    pub q_disks: i32,
    pub special_edittion: bool,
    pub is_premiere: bool,
    pub original_language: Option<String>,
    pub audio: Option<String>,
    pub subs: Option<String>,
    /// Poster URL the record carried when the draft was opened. Snapshot,
    /// not live: the lifecycle compares against it when cleaning up.
    pub initial_poster_url: Option<String>,
    pub poster_change: PosterChange,
}

impl Default for FilmDraft {
    /// Blank create draft: no poster, no genres, one disk.
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            year_film: None,
            film_type: Vec::new(),
            cult_film: false,
            cult_brand: None,
            genres_list: Vec::new(),
            q_disks: 1,
            special_edittion: false,
            is_premiere: false,
            original_language: None,
            audio: None,
            subs: None,
            initial_poster_url: None,
            poster_change: PosterChange::Keep,
        }
    }
}

impl FilmDraft {
    /// Seed an edit draft from a fetched record.
    pub fn from_film(film: &Film) -> Self {
        Self {
            id: Some(film.id.clone()),
            title: film.title.clone(),
            year_film: film.year_film.clone(),
            film_type: film.film_type.clone(),
            cult_film: film.cult_film,
            cult_brand: film.cult_brand.clone(),
            genres_list: film.genres_list.clone(),
            q_disks: film.q_disks,
            special_edittion: film.special_edittion,
            is_premiere: film.is_premiere,
            original_language: film.original_language.clone(),
            audio: film.audio.clone(),
            subs: film.subs.clone(),
            initial_poster_url: film.poster_url.clone(),
            poster_change: PosterChange::Keep,
        }
    }

    /// Build the write payload with `poster_url` already resolved by the
    /// caller. Validates the draft and recomputes the derived fields.
    pub fn payload(&self, poster_url: Option<String>) -> AppResult<FilmPayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("title is required".to_string()));
        }
        for tag in &self.film_type {
            check_choice("film type", tag, &FILM_TYPES)?;
        }
        for genre in &self.genres_list {
            check_choice("genre", genre, &GENRES)?;
        }
        for language in [&self.original_language, &self.audio, &self.subs]
            .into_iter()
            .flatten()
        {
            check_choice("language", language, &LANGUAGES)?;
        }

        // The brand only means something for cult editions.
        let cult_brand = if self.cult_film {
            self.cult_brand.clone()
        } else {
            None
        };
        if let Some(brand) = &cult_brand {
            check_choice("brand", brand, &CULT_BRANDS)?;
        }

        Ok(FilmPayload {
            title: title.to_string(),
            year_film: self.year_film.clone(),
            film_type: self.film_type.clone(),
            cult_film: self.cult_film,
            cult_brand,
            genres_string: models::genres_string(&self.genres_list),
            genres_list: self.genres_list.clone(),
            q_disks: self.q_disks,
            special_edittion: self.special_edittion,
            is_premiere: self.is_premiere,
            poster_url,
            original_language: self.original_language.clone(),
            audio: self.audio.clone(),
            subs: self.subs.clone(),
        })
    }
}

/// Reject values outside one of the fixed selection lists.
fn check_choice(field: &str, value: &str, allowed: &[&str]) -> AppResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "unknown {}: {}",
            field, value
        )))
    }
}
