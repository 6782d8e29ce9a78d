//! Stateful viewers over already-fetched data.
//!
//! A viewer never fetches. The embedding application calls `begin_load` before it
//! starts a request and hands the result to `complete_load` with the returned ticket.
//! Only the newest ticket is applied, so a slow response for a hand the user has
//! already navigated away from cannot overwrite the current one. Cursor moves and
//! zoom changes only recompute from the data already held.

use chrono::{DateTime, Utc};
use handlens_analytics::downsample::chart_range;
use handlens_analytics::highlights::{Detector, InterestingGame};
use handlens_analytics::series::JobScores;
use handlens_analytics::stats::{aggregate, IterationStat};
use handlens_engine::reconstruct::{
    reconstruct_with, ActionLog, Cursor, CursorMode, HandSnapshot, PotScope,
};
use handlens_engine::record::HandRecord;
use handlens_engine::summary::{summarize_at, HandSummary};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::FetchError;
use crate::settings::{SettingsError, ViewerSettings};

pub type SessionId = String;

/// Issued by `begin_load`; identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started after this ticket; the result was dropped
    Stale,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Nothing loaded")]
    NothingLoaded,
    #[error("Session storage poisoned")]
    StoragePoisoned,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Hands out generations and tells whether a ticket is still the newest.
#[derive(Debug, Default)]
struct LoadGate {
    issued: u64,
}

impl LoadGate {
    fn issue(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket {
            generation: self.issued,
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.issued
    }
}

#[derive(Debug)]
struct LoadedHand {
    generation: u64,
    record: Arc<HandRecord>,
    loaded_at: DateTime<Utc>,
}

type SnapshotKey = (u64, Cursor, PotScope);

/// Steps through one recorded hand.
#[derive(Debug)]
pub struct HandViewer {
    id: SessionId,
    settings: ViewerSettings,
    gate: LoadGate,
    loaded: Option<LoadedHand>,
    cursor: Cursor,
    pot_scope: PotScope,
    memo: RwLock<HashMap<SnapshotKey, Arc<HandSnapshot>>>,
}

impl HandViewer {
    pub fn new(settings: ViewerSettings) -> Result<Self, SessionError> {
        settings.validate()?;
        let id = Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, "hand viewer created");
        Ok(Self {
            id,
            cursor: Cursor {
                mode: settings.cursor_mode,
                index: 0,
            },
            pot_scope: settings.pot_scope,
            settings,
            gate: LoadGate::default(),
            loaded: None,
            memo: RwLock::new(HashMap::new()),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.gate.issue();
        tracing::debug!(session_id = %self.id, generation = ticket.generation, "hand load started");
        ticket
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Results for anything but the newest ticket are discarded, errors included. A
    /// failed current load clears the viewer.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<HandRecord, FetchError>,
    ) -> Result<LoadOutcome, SessionError> {
        if !self.gate.is_current(ticket) {
            tracing::debug!(
                session_id = %self.id,
                generation = ticket.generation,
                current = self.gate.issued,
                "discarding stale hand load"
            );
            return Ok(LoadOutcome::Stale);
        }

        self.clear_memo()?;
        match result {
            Ok(record) => {
                tracing::info!(
                    session_id = %self.id,
                    generation = ticket.generation,
                    game_id = record.game_id.as_deref().unwrap_or("-"),
                    actions = record.action_count(),
                    "hand loaded"
                );
                self.loaded = Some(LoadedHand {
                    generation: ticket.generation,
                    record: Arc::new(record),
                    loaded_at: Utc::now(),
                });
                self.cursor = Cursor {
                    mode: self.cursor.mode,
                    index: 0,
                };
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                err.log();
                self.loaded = None;
                Err(SessionError::Fetch(err))
            }
        }
    }

    /// Upload path: validates and decodes `payload` as a fresh load.
    pub fn load_json(&mut self, payload: &str) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_load();
        let result = HandRecord::from_json(payload).map_err(FetchError::from);
        self.complete_load(ticket, result)
    }

    pub fn record(&self) -> Option<Arc<HandRecord>> {
        self.loaded.as_ref().map(|hand| Arc::clone(&hand.record))
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded.as_ref().map(|hand| hand.loaded_at)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn pot_scope(&self) -> PotScope {
        self.pot_scope
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    fn hand(&self) -> Result<&LoadedHand, SessionError> {
        self.loaded.as_ref().ok_or(SessionError::NothingLoaded)
    }

    /// Last cursor index of the current mode.
    pub fn last_index(&self) -> Result<usize, SessionError> {
        let hand = self.hand()?;
        Ok(ActionLog::new(&hand.record).last_index(self.cursor.mode))
    }

    pub fn is_game_end(&self) -> Result<bool, SessionError> {
        Ok(self.cursor.index == self.last_index()?)
    }

    fn move_to(&mut self, index: usize) -> Result<Cursor, SessionError> {
        let last = self.last_index()?;
        self.cursor.index = index.min(last);
        tracing::debug!(
            session_id = %self.id,
            mode = ?self.cursor.mode,
            index = self.cursor.index,
            "cursor moved"
        );
        Ok(self.cursor)
    }

    pub fn step_forward(&mut self) -> Result<Cursor, SessionError> {
        self.move_to(self.cursor.index.saturating_add(1))
    }

    pub fn step_back(&mut self) -> Result<Cursor, SessionError> {
        self.move_to(self.cursor.index.saturating_sub(1))
    }

    pub fn jump_to(&mut self, index: usize) -> Result<Cursor, SessionError> {
        self.move_to(index)
    }

    pub fn jump_to_end(&mut self) -> Result<Cursor, SessionError> {
        let last = self.last_index()?;
        self.move_to(last)
    }

    /// Switches cursor mode, staying at the same point of the hand.
    pub fn set_mode(&mut self, mode: CursorMode) -> Cursor {
        self.cursor = match &self.loaded {
            Some(hand) => ActionLog::new(&hand.record).convert(self.cursor, mode),
            None => Cursor { mode, index: 0 },
        };
        tracing::debug!(session_id = %self.id, mode = ?mode, index = self.cursor.index, "cursor mode changed");
        self.cursor
    }

    pub fn set_pot_scope(&mut self, scope: PotScope) {
        self.pot_scope = scope;
    }

    /// Hand state at the current cursor, memoized per loaded record.
    pub fn snapshot(&self) -> Result<Arc<HandSnapshot>, SessionError> {
        let hand = self.hand()?;
        let key = (hand.generation, self.cursor, self.pot_scope);

        if let Some(hit) = self
            .memo
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?
            .get(&key)
        {
            return Ok(Arc::clone(hit));
        }

        let log = ActionLog::new(&hand.record);
        let snapshot = Arc::new(reconstruct_with(&log, self.cursor, self.pot_scope));
        self.memo
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?
            .insert(key, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Winners and losers, once the cursor has reached the end of the hand.
    pub fn summary(&self) -> Result<Option<HandSummary>, SessionError> {
        let hand = self.hand()?;
        let snapshot = self.snapshot()?;
        Ok(summarize_at(&hand.record, &snapshot))
    }

    pub fn cached_snapshots(&self) -> usize {
        self.memo.read().map(|memo| memo.len()).unwrap_or(0)
    }

    fn clear_memo(&self) -> Result<(), SessionError> {
        self.memo
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?
            .clear();
        Ok(())
    }
}

#[derive(Debug)]
struct LoadedJob {
    scores: Arc<JobScores>,
    stats: Vec<IterationStat>,
    highlights: Vec<InterestingGame>,
    loaded_at: DateTime<Utc>,
}

/// Charts and highlights for one job's score series.
#[derive(Debug)]
pub struct JobViewer {
    id: SessionId,
    settings: ViewerSettings,
    detector: Detector,
    gate: LoadGate,
    loaded: Option<LoadedJob>,
    zoom: Option<Range<usize>>,
}

impl JobViewer {
    pub fn new(settings: ViewerSettings) -> Result<Self, SessionError> {
        settings.validate()?;
        let detector = Detector::new(settings.detector_thresholds())
            .map_err(|err| SettingsError::InvalidValue(err.to_string()))?;
        let id = Uuid::new_v4().to_string();
        tracing::debug!(session_id = %id, "job viewer created");
        Ok(Self {
            id,
            settings,
            detector,
            gate: LoadGate::default(),
            loaded: None,
            zoom: None,
        })
    }

    /// Replaces the detector, e.g. one extended with additional heuristics.
    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.gate.issue();
        tracing::debug!(session_id = %self.id, generation = ticket.generation, "job load started");
        ticket
    }

    /// Applies a fetched series and recomputes statistics and highlights in full.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<JobScores, FetchError>,
    ) -> Result<LoadOutcome, SessionError> {
        if !self.gate.is_current(ticket) {
            tracing::debug!(
                session_id = %self.id,
                generation = ticket.generation,
                current = self.gate.issued,
                "discarding stale job load"
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(scores) => {
                let stats = aggregate(&scores);
                let highlights = self.detector.detect(&stats);
                tracing::info!(
                    session_id = %self.id,
                    generation = ticket.generation,
                    players = scores.series.len(),
                    iterations = stats.len(),
                    highlights = highlights.len(),
                    "job loaded"
                );
                self.loaded = Some(LoadedJob {
                    scores: Arc::new(scores),
                    stats,
                    highlights,
                    loaded_at: Utc::now(),
                });
                self.zoom = None;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                err.log();
                self.loaded = None;
                Err(SessionError::Fetch(err))
            }
        }
    }

    pub fn load_json(&mut self, payload: &str) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_load();
        let result = JobScores::from_json(payload).map_err(FetchError::from);
        self.complete_load(ticket, result)
    }

    fn job(&self) -> Result<&LoadedJob, SessionError> {
        self.loaded.as_ref().ok_or(SessionError::NothingLoaded)
    }

    pub fn scores(&self) -> Option<Arc<JobScores>> {
        self.loaded.as_ref().map(|job| Arc::clone(&job.scores))
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded.as_ref().map(|job| job.loaded_at)
    }

    pub fn bucket_size(&self) -> usize {
        self.settings.bucket_size
    }

    pub fn set_bucket_size(&mut self, bucket_size: usize) -> Result<(), SessionError> {
        if bucket_size == 0 {
            return Err(SettingsError::InvalidValue(
                "bucket_size must be greater than 0".to_string(),
            )
            .into());
        }
        self.settings.bucket_size = bucket_size;
        Ok(())
    }

    pub fn zoom(&self) -> Option<Range<usize>> {
        self.zoom.clone()
    }

    /// Restricts the chart to the hands in `range`.
    pub fn set_zoom(&mut self, range: Range<usize>) {
        tracing::debug!(session_id = %self.id, start = range.start, end = range.end, "zoom changed");
        self.zoom = Some(range);
    }

    pub fn clear_zoom(&mut self) {
        self.zoom = None;
    }

    /// Anchored, downsampled series per player over the zoom window.
    pub fn chart(&self) -> Result<BTreeMap<String, Vec<f64>>, SessionError> {
        let job = self.job()?;
        let bucket = self.settings.bucket_size;
        Ok(job
            .scores
            .series
            .iter()
            .map(|(player, series)| {
                let window = self.zoom.clone().unwrap_or(0..series.len());
                (player.clone(), chart_range(series, window, bucket))
            })
            .collect())
    }

    pub fn iteration_stats(&self) -> Result<&[IterationStat], SessionError> {
        Ok(&self.job()?.stats)
    }

    pub fn highlights(&self) -> Result<&[InterestingGame], SessionError> {
        Ok(&self.job()?.highlights)
    }
}
