// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynBlockRunner, DynCapabilityProvider,
    DynDirectoryService, DynExclusionSetsRepository, DynRelationshipService, DynRunTransport,
    DynTimeProvider,
};
use crate::app::services::{BulkBlockService, SessionService};
use crate::client::ClientInner;
use crate::domain::blocking::services::impls::{BlockExecutor, BlockExecutorDependencies};
use crate::domain::exclusions::services::ExclusionSetBuilder;
use crate::infra::exclusions::CachingExclusionSetsRepository;
use crate::infra::general::SystemTimeProvider;
use crate::infra::remote::{ServerMediatedBlockRunner, ServerMediatedBlockRunnerDependencies};
use crate::Client;

pub struct UndefinedDirectoryService;
pub struct UndefinedCapabilityProvider;
pub struct UndefinedStrategy;

/// How block requests reach the remote API.
pub enum BlockStrategy {
    /// Issue one request per target from this process.
    Direct(DynRelationshipService),
    /// Have a trusted backend issue the requests and stream progress back.
    ServerMediated(DynRunTransport),
}

pub struct ClientBuilder<D, C, S> {
    app_config: AppConfig,
    capability_provider: C,
    directory_service: D,
    strategy: S,
    time_provider: DynTimeProvider,
}

impl ClientBuilder<UndefinedDirectoryService, UndefinedCapabilityProvider, UndefinedStrategy> {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            app_config: Default::default(),
            capability_provider: UndefinedCapabilityProvider,
            directory_service: UndefinedDirectoryService,
            strategy: UndefinedStrategy,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }
}

impl<C, S> ClientBuilder<UndefinedDirectoryService, C, S> {
    pub fn set_directory_service(
        self,
        directory_service: DynDirectoryService,
    ) -> ClientBuilder<DynDirectoryService, C, S> {
        ClientBuilder {
            app_config: self.app_config,
            capability_provider: self.capability_provider,
            directory_service,
            strategy: self.strategy,
            time_provider: self.time_provider,
        }
    }
}

impl<D, S> ClientBuilder<D, UndefinedCapabilityProvider, S> {
    pub fn set_capability_provider(
        self,
        capability_provider: DynCapabilityProvider,
    ) -> ClientBuilder<D, DynCapabilityProvider, S> {
        ClientBuilder {
            app_config: self.app_config,
            capability_provider,
            directory_service: self.directory_service,
            strategy: self.strategy,
            time_provider: self.time_provider,
        }
    }
}

impl<D, C> ClientBuilder<D, C, UndefinedStrategy> {
    /// Blocks directly against the remote API.
    pub fn set_relationship_service(
        self,
        relationship_service: DynRelationshipService,
    ) -> ClientBuilder<D, C, BlockStrategy> {
        self.set_strategy(BlockStrategy::Direct(relationship_service))
    }

    /// Delegates blocking to a trusted backend.
    pub fn set_run_transport(self, transport: DynRunTransport) -> ClientBuilder<D, C, BlockStrategy> {
        self.set_strategy(BlockStrategy::ServerMediated(transport))
    }

    pub fn set_strategy(self, strategy: BlockStrategy) -> ClientBuilder<D, C, BlockStrategy> {
        ClientBuilder {
            app_config: self.app_config,
            capability_provider: self.capability_provider,
            directory_service: self.directory_service,
            strategy,
            time_provider: self.time_provider,
        }
    }
}

impl<D, C, S> ClientBuilder<D, C, S> {
    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.app_config = config;
        self
    }

    pub fn set_time_provider(mut self, time_provider: DynTimeProvider) -> Self {
        self.time_provider = time_provider;
        self
    }
}

impl ClientBuilder<DynDirectoryService, DynCapabilityProvider, BlockStrategy> {
    pub fn build(self) -> Client {
        let ctx = Arc::new(AppContext::new(self.app_config));

        let exclusion_sets_repo: DynExclusionSetsRepository =
            Arc::new(CachingExclusionSetsRepository::new(ExclusionSetBuilder::new(
                self.directory_service.clone(),
                ctx.config.max_pages,
            )));

        let (block_runner, executor) = match self.strategy {
            BlockStrategy::Direct(relationship_service) => {
                let executor = Arc::new(BlockExecutor::from(BlockExecutorDependencies {
                    capability_provider: self.capability_provider.clone(),
                    ctx: ctx.clone(),
                    exclusion_sets_repo: exclusion_sets_repo.clone(),
                    relationship_service,
                    time_provider: self.time_provider.clone(),
                }));
                let block_runner: DynBlockRunner = executor.clone();
                (block_runner, Some(executor))
            }
            BlockStrategy::ServerMediated(transport) => {
                let block_runner: DynBlockRunner = Arc::new(ServerMediatedBlockRunner::from(
                    ServerMediatedBlockRunnerDependencies {
                        capability_provider: self.capability_provider.clone(),
                        exclusion_sets_repo: exclusion_sets_repo.clone(),
                        transport,
                    },
                ));
                (block_runner, None)
            }
        };

        let dependencies = AppDependencies {
            block_runner,
            capability_provider: self.capability_provider,
            ctx,
            directory_service: self.directory_service,
            exclusion_sets_repo,
            time_provider: self.time_provider,
        };

        let client_inner = Arc::new(ClientInner {
            bulk_block: BulkBlockService::from(&dependencies),
            session: SessionService::from(&dependencies),
            block_runner: dependencies.block_runner.clone(),
            ctx: dependencies.ctx.clone(),
            executor,
        });

        Client::from(client_inner)
    }
}
