use serde::{Deserialize, Serialize};

/// Pagination metadata attached to every paged response.
///
/// `has_next` is the authoritative "more rows exist" signal; callers must
/// not derive it from `total` themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// One page of a server-paginated collection, as handed to callers.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// The JSON envelope every response body is wrapped in.
///
/// `data` carries the payload, `meta` is present only on paged endpoints,
/// and exactly one of `message`/`error` accompanies `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub meta: Option<PageMeta>,
    pub message: Option<String>,
    pub error: Option<String>,
}
