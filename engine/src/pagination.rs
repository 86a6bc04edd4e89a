use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 25;

const fn default_page() -> i64 {
    1
}

const fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Paging and ordering for list queries.
///
/// `page` is 1-based. Values are signed on purpose: range checks belong to whoever
/// consumes the options, not to deserialization, so a `page=0` or `size=-1` request
/// reaches the layer that reports it.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, PartialEq, Eq)]
#[into_params(parameter_in = Query)]
pub struct QueryOpts {
    /// The page to start the listing with, starting at 1
    #[serde(default = "default_page")]
    pub page: i64,
    /// The max number of items to return
    #[serde(default = "default_size")]
    pub size: i64,
    /// Field to order the results by
    pub sort_by: Option<String>,
    /// Direction of the ordering, defaults to descending when `sort_by` is given
    pub order: Option<SortOrder>,
}

impl Default for QueryOpts {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            sort_by: None,
            order: None,
        }
    }
}

impl QueryOpts {
    pub fn with_default_size(page: i64) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    pub fn with_size(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.order = Some(order);
        self
    }

    /// Number of items to skip to reach `page`. Pages below 1 are treated as the first page.
    pub fn offset(&self) -> u64 {
        let page = self.page.max(1) as u64 - 1;
        page.saturating_mul(self.limit())
    }

    /// Page size clamped to zero.
    pub fn limit(&self) -> u64 {
        self.size.max(0) as u64
    }
}

/// One page of a listing, along with the total number of matching items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, opts: &QueryOpts) -> Self {
        Self {
            items,
            total,
            page: opts.page,
            size: opts.size,
        }
    }

    pub fn empty(opts: &QueryOpts) -> Self {
        Self::new(Vec::new(), 0, opts)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}
