// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::dtos;
pub use app::services;
pub use client::{Client, ClientInner};
pub use client_builder::{
    BlockStrategy, ClientBuilder, UndefinedCapabilityProvider, UndefinedDirectoryService,
    UndefinedStrategy,
};
pub use domain::blocking::services::{BlockRunner, EventSink, RelationshipService};
pub use domain::directory::services::DirectoryService;
pub use domain::general::services::TimeProvider;
pub use domain::session::services::CapabilityProvider;
pub use infra::events::{decode_event, encode_event, CallbackEventSink, ChannelEventSink};
pub use infra::remote::RunTransport;

#[cfg(feature = "test")]
pub mod test;

pub mod app;
mod client;
mod client_builder;

#[cfg(feature = "test")]
pub mod domain;
#[cfg(not(feature = "test"))]
pub(crate) mod domain;

#[cfg(feature = "test")]
pub mod infra;
#[cfg(not(feature = "test"))]
pub(crate) mod infra;
