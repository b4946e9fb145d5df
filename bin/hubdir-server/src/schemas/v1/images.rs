use hubdir_core::catalog::{CatalogEntry, EntryPage, EntryQuery, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of `GET /api/v1/images`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListImagesQuery {
    /// featured, starter, ai, application, base, fips, or `all`.
    pub category: Option<String>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    #[param(minimum = 1, default = 1)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100, default = 50)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ListImagesQuery {
    pub fn entry_query(&self) -> EntryQuery {
        EntryQuery::new(self.category.clone(), self.search.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageListResponse {
    pub images: Vec<CatalogEntry>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl From<EntryPage> for ImageListResponse {
    fn from(page: EntryPage) -> Self {
        Self {
            images: page.entries,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub projects: u64,
    pub versions: u64,
    pub images: u64,
    pub builds: u64,
}
