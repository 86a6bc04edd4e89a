pub mod app;
pub mod auth;
pub mod error;
mod pagination;

pub use pagination::{DEFAULT_PAGE_SIZE, Page, QueryOpts, SortOrder};
