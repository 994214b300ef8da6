// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use block_executor::{BlockExecutor, BlockExecutorDependencies};
pub use recovery_controller::{RecoveryController, RecoveryState, Tick};
pub use run_event_sink::RunEventSink;

mod block_executor;
mod recovery_controller;
mod run_event_sink;
