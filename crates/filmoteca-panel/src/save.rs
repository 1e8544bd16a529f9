//! Save workflow for catalog records.
//!
//! Create is two-phase because poster keys are namespaced by record id: the
//! record is inserted first (poster null, or an external URL which needs no
//! key), then the staged bytes are uploaded under the assigned id and the
//! poster URL patched in. Phase-two failures leave a usable record and are
//! reported as warnings, never as a failed save; anything that fails before
//! the record exists lands the report in `Failed`. Edit is single-phase: the
//! id already exists, so the poster change is applied first and the full
//! payload written once.

use std::sync::Arc;

use filmoteca_core::models::Film;
use filmoteca_core::{AppError, AppResult};

use crate::draft::FilmDraft;
use crate::posters::{PosterChange, PosterLifecycle};
use crate::store::CatalogStore;

/// Where a submit landed. The not-yet-submitted state is the
/// [`FilmDraft`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Record exists; no poster was requested or phase two failed.
    InsertedNoImage,
    /// Record exists and carries its poster.
    InsertedWithImage,
    /// Submit failed before the record existed (or, on edit, before the
    /// record was written).
    Failed,
}

/// Outcome of one submit.
#[derive(Debug)]
pub struct SaveReport {
    pub state: SaveState,
    /// The saved record; absent when the submit failed outright.
    pub film: Option<Film>,
    /// Non-fatal problems (poster upload/patch/cleanup).
    pub warnings: Vec<String>,
    /// Fatal failure message, set iff `state` is [`SaveState::Failed`].
    pub error: Option<String>,
}

impl SaveReport {
    fn saved(film: Film, state: SaveState, warnings: Vec<String>) -> Self {
        Self {
            state,
            film: Some(film),
            warnings,
            error: None,
        }
    }

    fn failed(err: AppError) -> Self {
        Self {
            state: SaveState::Failed,
            film: None,
            warnings: Vec::new(),
            error: Some(err.client_message()),
        }
    }
}

pub struct SaveWorkflow {
    store: Arc<dyn CatalogStore>,
    posters: PosterLifecycle,
}

impl SaveWorkflow {
    pub fn new(store: Arc<dyn CatalogStore>, posters: PosterLifecycle) -> Self {
        Self { store, posters }
    }

    /// Submit a draft. Routes on whether the draft already has an id.
    pub async fn submit(&self, draft: &FilmDraft) -> SaveReport {
        let result = match &draft.id {
            Some(id) => self.update(id, draft).await,
            None => self.create(draft).await,
        };
        match result {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "record save failed");
                SaveReport::failed(err)
            }
        }
    }

    async fn create(&self, draft: &FilmDraft) -> AppResult<SaveReport> {
        // Phase one: the record itself. An external URL can travel with the
        // insert; staged bytes cannot, their key needs the id.
        let initial_url = match &draft.poster_change {
            PosterChange::External { url } => Some(url.clone()),
            _ => None,
        };
        let payload = draft.payload(initial_url)?;
        let film = self.store.insert(&payload).await?;

        let staged = match &draft.poster_change {
            PosterChange::Upload { data, content_type } => {
                Some((data.clone(), content_type.clone()))
            }
            _ => None,
        };
        let Some((data, content_type)) = staged else {
            let state = if film.poster_url.is_some() {
                SaveState::InsertedWithImage
            } else {
                SaveState::InsertedNoImage
            };
            return Ok(SaveReport::saved(film, state, Vec::new()));
        };

        // Phase two: upload under the assigned id, then patch the URL in.
        // The record is already committed, so failures here downgrade.
        let change = PosterChange::Upload { data, content_type };
        match self.posters.apply(&film.id, &change, None).await {
            Ok(outcome) => {
                let mut warnings = outcome.warnings;
                match self
                    .store
                    .set_poster_url(&film.id, outcome.poster_url.as_deref())
                    .await
                {
                    Ok(film) => Ok(SaveReport::saved(
                        film,
                        SaveState::InsertedWithImage,
                        warnings,
                    )),
                    Err(err) => {
                        tracing::warn!(film_id = %film.id, error = %err, "poster patch failed after insert");
                        warnings.push(format!(
                            "record saved without poster: {}",
                            err.client_message()
                        ));
                        Ok(SaveReport::saved(
                            film,
                            SaveState::InsertedNoImage,
                            warnings,
                        ))
                    }
                }
            }
            Err(err) => {
                tracing::warn!(film_id = %film.id, error = %err, "poster upload failed after insert");
                Ok(SaveReport::saved(
                    film,
                    SaveState::InsertedNoImage,
                    vec![format!(
                        "record saved without poster: {}",
                        err.client_message()
                    )],
                ))
            }
        }
    }

    async fn update(&self, id: &str, draft: &FilmDraft) -> AppResult<SaveReport> {
        let outcome = self
            .posters
            .apply(id, &draft.poster_change, draft.initial_poster_url.as_deref())
            .await?;
        let payload = draft.payload(outcome.poster_url)?;
        let film = self.store.update(id, &payload).await?;
        let state = if film.poster_url.is_some() {
            SaveState::InsertedWithImage
        } else {
            SaveState::InsertedNoImage
        };
        Ok(SaveReport::saved(film, state, outcome.warnings))
    }
}
