// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

/// Short-lived credential that authorizes mutations on behalf of the acting user.
#[derive(Clone)]
pub struct Capability(Arc<SecretString>);

impl Capability {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::new(token.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}

impl Debug for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Capability([REDACTED])")
    }
}
