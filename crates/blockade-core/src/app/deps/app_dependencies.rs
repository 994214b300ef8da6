// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::domain::blocking::services::{BlockRunner, EventSink, RelationshipService};
use crate::domain::directory::services::DirectoryService;
use crate::domain::exclusions::repos::ExclusionSetsRepository;
use crate::domain::general::services::TimeProvider;
use crate::domain::session::services::CapabilityProvider;
use crate::infra::remote::RunTransport;

pub type DynAppContext = Arc<AppContext>;
pub type DynBlockRunner = Arc<dyn BlockRunner>;
pub type DynCapabilityProvider = Arc<dyn CapabilityProvider>;
pub type DynDirectoryService = Arc<dyn DirectoryService>;
pub type DynEventSink = Arc<dyn EventSink>;
pub type DynExclusionSetsRepository = Arc<dyn ExclusionSetsRepository>;
pub type DynRelationshipService = Arc<dyn RelationshipService>;
pub type DynRunTransport = Arc<dyn RunTransport>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;

pub struct AppDependencies {
    pub block_runner: DynBlockRunner,
    pub capability_provider: DynCapabilityProvider,
    pub ctx: DynAppContext,
    pub directory_service: DynDirectoryService,
    pub exclusion_sets_repo: DynExclusionSetsRepository,
    pub time_provider: DynTimeProvider,
}
