// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use block_run_handle::BlockRunHandle;
pub use bulk_block_service::BulkBlockService;
pub use session_service::SessionService;

mod block_run_handle;
mod bulk_block_service;
mod session_service;
