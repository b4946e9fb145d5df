use crate::error::CatalogError;
use crate::store::{Filter, ID_FIELD};

use super::CatalogEntry;

/// Category value that imposes no restriction.
pub const ALL_CATEGORIES: &str = "all";

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter dimensions of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// Exact category match. `None`, `""` and `"all"` mean any category.
    pub category: Option<String>,
    /// Case-insensitive substring of the entry name or `description`.
    /// `None` and `""` mean no search.
    pub search: Option<String>,
}

impl EntryQuery {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self { category, search }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            search: None,
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(search.into()),
        }
    }

    /// The category restriction alone.
    pub fn category_filter(&self) -> Filter {
        category_filter(self.category.as_deref())
    }

    /// category AND (name contains search OR description contains search).
    /// Documents without a `name` are searched by `_id`, matching the name
    /// they are listed under.
    pub fn to_filter(&self) -> Filter {
        let search = match self.search.as_deref() {
            Some(term) if !term.is_empty() => Filter::or(vec![
                Filter::first_contains_ignore_case(["name", ID_FIELD], term),
                Filter::contains_ignore_case("description", term),
            ]),
            _ => Filter::All,
        };
        self.category_filter().and(search)
    }
}

pub(crate) fn category_filter(category: Option<&str>) -> Filter {
    match category {
        Some(c) if !c.is_empty() && c != ALL_CATEGORIES => Filter::eq("category", c),
        _ => Filter::All,
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    /// `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Result<Self, CatalogError> {
        if page == 0 {
            return Err(CatalogError::InvalidPagination(
                "page must be at least 1".into(),
            ));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(CatalogError::InvalidPagination(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of matching entries before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of entries plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPage {
    pub entries: Vec<CatalogEntry>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}
