//! Game controller: read-modify-write of the shared document.
//!
//! Every mutation loads the current document, derives the next full state
//! with a pure rule function and writes it back with a compare-and-swap on
//! the version it read. Without a caller-supplied version a lost race is
//! re-derived from the fresh document, up to [`MAX_CAS_ATTEMPTS`] times.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state_feed::SyncedState;
use crate::domain::challenge_picker::ChallengePicker;
use crate::domain::decode::{decode_state, encode_state};
use crate::domain::rules;
use crate::domain::setup::GameSetup;
use crate::domain::state::GameState;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::store::{DocumentStore, StoredDocument, WritePrecondition};

pub const MAX_CAS_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub document: StoredDocument,
    pub state: GameState,
}

impl MutationOutcome {
    pub fn version(&self) -> i32 {
        self.document.version
    }
}

pub struct GameController {
    store: Arc<dyn DocumentStore>,
    setup: Arc<GameSetup>,
    picker: Arc<dyn ChallengePicker>,
    path: String,
}

impl GameController {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        setup: Arc<GameSetup>,
        picker: Arc<dyn ChallengePicker>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            setup,
            picker,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn setup(&self) -> &Arc<GameSetup> {
        &self.setup
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Point read of the document. Absent reads as the empty state at version 0.
    pub async fn current(&self) -> Result<SyncedState, AppError> {
        match self.store.load(&self.path).await? {
            Some(doc) => Ok(SyncedState::new(
                doc.version,
                decode_state(&doc.body, &self.setup)?,
            )),
            None => Ok(SyncedState::empty()),
        }
    }

    pub async fn assign_teams(&self, expected: Option<i32>) -> Result<MutationOutcome, AppError> {
        let outcome = self
            .run_mutation("assign_teams", expected, |_| {
                Ok(rules::assign_teams(&self.setup))
            })
            .await?;
        info!(
            version = outcome.version(),
            seekers1 = ?outcome.state.teams.seekers1,
            seekers2 = ?outcome.state.teams.seekers2,
            "Teams assigned"
        );
        Ok(outcome)
    }

    pub async fn move_player(
        &self,
        player: &str,
        destination: &str,
        expected: Option<i32>,
    ) -> Result<MutationOutcome, AppError> {
        let result = self
            .run_mutation("move_player", expected, |doc| {
                let state = self.decode_or_empty(doc)?;
                rules::move_player(
                    &state,
                    &self.setup,
                    player,
                    destination,
                    self.picker.as_ref(),
                )
            })
            .await;

        match &result {
            Ok(outcome) => info!(
                player,
                destination,
                version = outcome.version(),
                "Player moved"
            ),
            Err(e) => debug!(player, destination, error = %e, "Move rejected"),
        }
        result
    }

    pub async fn toggle_challenge(
        &self,
        index: usize,
        expected: Option<i32>,
    ) -> Result<MutationOutcome, AppError> {
        let outcome = self
            .run_mutation("toggle_challenge", expected, |doc| {
                let state = self.decode_or_empty(doc)?;
                rules::toggle_challenge(&state, index)
            })
            .await?;
        info!(
            index,
            completed = outcome.state.challenges.get(index).map(|c| c.completed),
            version = outcome.version(),
            "Challenge toggled"
        );
        Ok(outcome)
    }

    fn decode_or_empty(&self, doc: Option<&StoredDocument>) -> Result<GameState, DomainError> {
        match doc {
            Some(doc) => decode_state(&doc.body, &self.setup),
            None => Ok(GameState::default()),
        }
    }

    async fn run_mutation<F>(
        &self,
        op: &'static str,
        expected: Option<i32>,
        derive: F,
    ) -> Result<MutationOutcome, AppError>
    where
        F: Fn(Option<&StoredDocument>) -> Result<GameState, DomainError>,
    {
        let attempts = if expected.is_some() { 1 } else { MAX_CAS_ATTEMPTS };
        let mut attempt = 0;

        loop {
            attempt += 1;
            let current = self.store.load(&self.path).await?;
            let current_version = current.as_ref().map(|d| d.version).unwrap_or(0);

            if let Some(expected) = expected {
                if expected != current_version {
                    return Err(DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Game state version mismatch: expected {expected}, but stored version is {current_version}"
                        ),
                    )
                    .into());
                }
            }

            let next = derive(current.as_ref())?;
            let body = encode_state(&next)?;
            // Version 0 is the absent document, so the first write is create-only.
            let precondition = WritePrecondition::from_expected(Some(current_version));

            match self.store.save(&self.path, body, precondition).await {
                Ok(document) => {
                    return Ok(MutationOutcome {
                        document,
                        state: next,
                    })
                }
                Err(DomainError::Conflict(kind, detail)) => {
                    if attempt >= attempts {
                        if attempts > 1 {
                            warn!(op, attempts, "Giving up after repeated write conflicts");
                        }
                        return Err(
                            DomainError::conflict(ConflictKind::OptimisticLock, detail).into()
                        );
                    }
                    debug!(op, attempt, ?kind, read_version = current_version, "Write conflict; re-deriving");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
