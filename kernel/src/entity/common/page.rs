use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i64);

impl SelectLimit {
    /// Zero or negative falls back to the default page size; large values are capped.
    pub fn new(value: impl Into<i64>) -> Self {
        match value.into() {
            value if value <= 0 => SelectLimit(DEFAULT_LIMIT),
            value => SelectLimit(value.min(MAX_LIMIT)),
        }
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectPage(i64);

impl SelectPage {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectPage(value.into().max(1))
    }

    pub fn offset(&self, limit: &SelectLimit) -> i64 {
        (self.0 - 1).saturating_mul(limit.0)
    }
}

impl Default for SelectPage {
    fn default() -> Self {
        Self::new(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    limit: SelectLimit,
    page: SelectPage,
    total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, limit: SelectLimit, page: SelectPage, total: i64) -> Self {
        Self {
            items,
            limit,
            page,
            total,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn limit(&self) -> &SelectLimit {
        &self.limit
    }

    pub fn page(&self) -> &SelectPage {
        &self.page
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn total_pages(&self) -> i64 {
        let limit = self.limit.0;
        (self.total + limit - 1) / limit
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
