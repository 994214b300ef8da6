// blockade/blockade-wasm-utils
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use futures::Stream;

use crate::PinnedStream;

impl<T: ?Sized> BlockadeStreamExt for T where T: Stream {}

pub trait BlockadeStreamExt: Stream {
    #[cfg(target_arch = "wasm32")]
    fn pinned(self) -> PinnedStream<Self::Item>
    where
        Self: Sized + 'static,
    {
        Box::pin(self)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn pinned(self) -> PinnedStream<Self::Item>
    where
        Self: Sized + Send + 'static,
    {
        Box::pin(self)
    }
}
