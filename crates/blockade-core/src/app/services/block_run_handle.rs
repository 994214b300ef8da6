// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::domain::blocking::models::{BlockRunError, RunSummary};
use crate::domain::shared::models::{RelationType, RunId, UserId};

/// A run executing in the background.
///
/// Dropping the handle does not cancel the run.
pub struct BlockRunHandle {
    run_id: RunId,
    target: UserId,
    relation: RelationType,
    cancel: CancellationToken,
    result: oneshot::Receiver<Result<RunSummary, BlockRunError>>,
}

impl BlockRunHandle {
    pub(crate) fn new(
        run_id: RunId,
        target: UserId,
        relation: RelationType,
        cancel: CancellationToken,
        result: oneshot::Receiver<Result<RunSummary, BlockRunError>>,
    ) -> Self {
        Self {
            run_id,
            target,
            relation,
            cancel,
            result,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn target(&self) -> &UserId {
        &self.target
    }

    pub fn relation(&self) -> RelationType {
        self.relation
    }

    /// Requests cancellation. A block request that is already in flight still completes
    /// remotely, its result is discarded.
    pub fn cancel(&self) {
        self.cancel.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Waits for the run to end, pauses included.
    pub async fn wait(self) -> Result<RunSummary, BlockRunError> {
        self.result
            .await
            .unwrap_or(Err(BlockRunError::Interrupted))
    }
}
