// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use block_outcome::{BatchBlockOutcome, BlockOutcome};
pub use block_run_error::BlockRunError;
pub use prepared_run::PreparedRun;
pub use progress_event::ProgressEvent;
pub use run_outcome::RunOutcome;
pub use run_state::{PausedRun, RunCounters, RunPhase, RunState};
pub use run_summary::{RunSummary, RunTermination};

mod block_outcome;
mod block_run_error;
mod prepared_run;
mod progress_event;
mod run_outcome;
mod run_state;
mod run_summary;
