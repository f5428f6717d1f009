//! Page-number resolution and page containers.
//!
//! Listing URLs never reject a bad `page` parameter. A missing, non-numeric,
//! or sub-1 value resolves to the first page; a number past the last page
//! clamps to the last page.

use serde::Serialize;
use serde_json::json;

/// Posts per listing page unless configuration overrides it.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A requested page, before the total number of pages is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Leniently parse a raw `page` query parameter.
    pub fn new(raw: Option<&str>, size: u64) -> Self {
        let number = raw
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1);

        Self { number, size }
    }

    pub fn first(size: u64) -> Self {
        Self { number: 1, size }
    }

    /// Resolve the requested number against the actual page count.
    pub fn resolve(&self, num_pages: u64) -> u64 {
        self.number.min(num_pages.max(1))
    }

    /// Offset of the resolved page in the full result set.
    pub fn offset(&self, resolved_number: u64) -> u64 {
        (resolved_number - 1) * self.size
    }
}

/// One page of an ordered result set, plus the paginator totals the
/// presentation layer needs for page links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub number: u64,
    pub object_list: Vec<T>,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip)]
    pub count: u64,
    #[serde(skip)]
    pub num_pages: u64,
    #[serde(skip)]
    pub per_page: u64,
}

impl<T> Page<T> {
    /// Assemble a page from an already-fetched slice and the query totals.
    pub fn assemble(object_list: Vec<T>, number: u64, count: u64, per_page: u64) -> Self {
        let num_pages = count.div_ceil(per_page).max(1);

        Self {
            number,
            object_list,
            has_next: number < num_pages,
            has_previous: number > 1,
            count,
            num_pages,
            per_page,
        }
    }

    /// Slice a full, already-ordered result set. Used by the in-memory
    /// repositories; SQL-backed ones paginate in the query instead.
    pub fn from_vec(items: Vec<T>, request: PageRequest) -> Self {
        let count = items.len() as u64;
        let num_pages = count.div_ceil(request.size).max(1);
        let number = request.resolve(num_pages);
        let offset = request.offset(number) as usize;

        let object_list: Vec<T> = items
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .collect();

        Self::assemble(object_list, number, count, request.size)
    }

    /// Context mapping handed to templates as the `paginator` key.
    pub fn paginator_context(&self) -> serde_json::Value {
        json!({
            "count": self.count,
            "num_pages": self.num_pages,
            "per_page": self.per_page,
        })
    }
}
