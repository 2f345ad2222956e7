use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagination summary returned next to every list response as `@metadata`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    pub current_page: u32,
    pub page_size: u32,
    pub first_page: u32,
    pub last_page: u64,
    pub total_records: u64,
}

impl Metadata {
    /// Derives the summary from the total matching-row count.
    ///
    /// An empty result collapses every field to zero. Otherwise the requested
    /// page is echoed unchanged, even when it lies beyond `last_page`.
    pub fn calculate(total_records: u64, page: u32, page_size: u32) -> Self {
        if total_records == 0 || page_size == 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: total_records.div_ceil(u64::from(page_size)),
            total_records,
        }
    }
}
