// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use forwarded_capability_provider::ForwardedCapabilityProvider;
pub use remote_run_request::RemoteRunRequest;
pub use run_transport::RunTransport;
pub use serve_block_run::serve_block_run;
pub use server_mediated_block_runner::{
    ServerMediatedBlockRunner, ServerMediatedBlockRunnerDependencies,
};

mod forwarded_capability_provider;
mod remote_run_request;
mod run_transport;
mod serve_block_run;
mod server_mediated_block_runner;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::run_transport::MockRunTransport;
}
