// blockade/blockade-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use test_client::{assert_monotonic_progress, test_config, TestClient};

mod test_client;
