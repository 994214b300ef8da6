// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use paginated_set_fetcher::PaginatedSetFetcher;

mod paginated_set_fetcher;
