// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::domain::blocking::models::BlockRunError;
use crate::domain::filtering::models::AllowList;
use crate::domain::session::models::SessionProperties;
use crate::domain::shared::models::{Identity, RelationType, RunId, UserId};

/// Tunables of the blocking engine. Durations are (de)serialized as milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The number of attempts per target before it is counted as failed.
    pub max_attempts: u32,
    /// The wait before retrying a target that failed with an unclassified error.
    #[serde(with = "duration_ms")]
    pub retry_backoff: Duration,
    /// The wait before retrying a target whose upstream was unavailable.
    #[serde(with = "duration_ms")]
    pub upstream_backoff: Duration,
    /// The delay between two consecutive targets.
    #[serde(with = "duration_ms")]
    pub throttle_delay: Duration,
    /// Submit this many targets per write. `None` or `Some(1)` block one target at a time.
    pub batch_size: Option<usize>,
    /// Work lists longer than this are rejected before a run starts.
    pub max_work_list_len: usize,
    /// Cooldown used when a rate limit carries no usable reset hint.
    #[serde(with = "duration_ms")]
    pub default_cooldown: Duration,
    /// Reset hints further in the future than this are not trusted.
    #[serde(with = "duration_ms")]
    pub max_cooldown: Duration,
    /// How often a paused run checks whether its cooldown elapsed.
    #[serde(with = "duration_ms")]
    pub countdown_tick: Duration,
    /// The maximum number of pages drained per listing.
    pub max_pages: usize,
}

/// A run that is executing or waiting out a cooldown.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub run_id: RunId,
    pub target: UserId,
    pub relation: RelationType,
    pub cancel: CancellationToken,
}

pub struct AppContext {
    pub session: RwLock<Option<SessionProperties>>,
    pub active_runs: Mutex<Vec<ActiveRun>>,
    pub allow_list: AllowList,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Default::default(),
            active_runs: Default::default(),
            allow_list: AllowList::protocol_operators(),
            config,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_backoff: Duration::from_millis(500),
            upstream_backoff: Duration::from_secs(2),
            throttle_delay: Duration::from_millis(100),
            batch_size: None,
            max_work_list_len: 50_000,
            default_cooldown: Duration::from_secs(5 * 60),
            max_cooldown: Duration::from_secs(24 * 60 * 60),
            countdown_tick: Duration::from_secs(1),
            max_pages: 10_000,
        }
    }
}

impl AppContext {
    pub fn connected_account(&self) -> Result<Identity, BlockRunError> {
        self.session
            .read()
            .as_ref()
            .map(|session| session.account.clone())
            .ok_or(BlockRunError::NotConnected)
    }

    pub fn set_session(&self, session: SessionProperties) {
        self.session.write().replace(session);
    }

    pub fn end_session(&self) -> Option<SessionProperties> {
        self.session.write().take()
    }
}

impl AppContext {
    /// Registers `run` and cancels the runs it supersedes, i.e. runs against another target
    /// and an earlier run for the same target and relation.
    pub fn register_run(&self, run: ActiveRun) {
        let mut runs = self.active_runs.lock();

        runs.retain(|active| {
            let superseded = active.target != run.target || active.relation == run.relation;
            if superseded {
                info!(
                    "Cancelling run {} since it was superseded by run {}.",
                    active.run_id, run.run_id
                );
                active.cancel.cancel();
            }
            !superseded
        });

        runs.push(run);
    }

    pub fn finish_run(&self, run_id: &RunId) {
        self.active_runs.lock().retain(|run| &run.run_id != run_id);
    }

    pub fn cancel_runs(&self) {
        for run in self.active_runs.lock().drain(..) {
            info!("Cancelling run {}.", run.run_id);
            run.cancel.cancel();
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis().try_into().unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
