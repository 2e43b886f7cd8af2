//! Pagination contract for historical listings
//!
//! - `page_size` is `1..=200`; `0` leaves it to the server (default 20)
//! - `page` is zero-based and has no client-side upper bound
//! - a listing is exhausted when a page comes back empty
//!
//! Time-range endpoints accept at most 24 hours between start and end. The
//! server enforces this (`INVALID_DATE_RANGE`); the client never splits a
//! range on its own. [`TimeRange::daily_windows`] helps callers who want to
//! walk a longer range one window at a time.

use chrono::{DateTime, Duration, Utc};
use cryptocom_types::Params;
use std::future::Future;
use tracing::debug;

use crate::error::{RestError, RestResult};

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i32 = 200;

/// Page size the server applies when none is sent
pub const DEFAULT_PAGE_SIZE: i32 = 20;

/// Longest range a time-range endpoint accepts, in milliseconds
pub const MAX_TIME_RANGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Page selection for a paginated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Zero-based page number
    pub page: i32,
    /// Items per page, `0` for the server default
    pub page_size: i32,
}

impl PageRequest {
    /// First page with the server's default size
    pub fn first() -> Self {
        Self::default()
    }

    /// Page `page` with `page_size` items
    pub fn new(page: i32, page_size: i32) -> Self {
        Self { page, page_size }
    }

    /// Same size, next page number
    ///
    /// Fails once the page number can no longer be represented.
    pub fn next(self) -> RestResult<Self> {
        let page = self
            .page
            .checked_add(1)
            .ok_or_else(|| RestError::invalid_parameter("page", "no page after i32::MAX"))?;
        Ok(Self { page, ..self })
    }

    /// Check bounds before anything is sent
    pub fn validate(&self) -> RestResult<()> {
        validate_page_size(self.page_size)?;
        if self.page < 0 {
            return Err(RestError::invalid_parameter("page", "cannot be less than 0"));
        }
        Ok(())
    }

    /// Write `page` and, when set, `page_size` into `params`
    pub fn apply(&self, params: &mut Params) {
        if self.page_size != 0 {
            params.insert("page_size", self.page_size);
        }
        params.insert("page", self.page);
    }
}

/// Check a page size against `0..=200`
pub fn validate_page_size(page_size: i32) -> RestResult<()> {
    if page_size < 0 {
        return Err(RestError::invalid_parameter(
            "page_size",
            "cannot be less than 0",
        ));
    }
    if page_size > MAX_PAGE_SIZE {
        return Err(RestError::invalid_parameter(
            "page_size",
            format!("cannot be greater than {}", MAX_PAGE_SIZE),
        ));
    }
    Ok(())
}

/// Fetch pages until one comes back empty
///
/// `fetch` is called with page 0, 1, 2, ... of `first`'s size and the items
/// of every page are collected in order. The first error stops the walk.
pub async fn paginate<T, F, Fut>(first: PageRequest, mut fetch: F) -> RestResult<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = RestResult<Vec<T>>>,
{
    first.validate()?;

    let mut items = Vec::new();
    let mut page = first;
    loop {
        let batch = fetch(page).await?;
        if batch.is_empty() {
            debug!(pages = page.page - first.page, "Pagination exhausted");
            return Ok(items);
        }
        items.extend(batch);
        page = page.next()?;
    }
}

/// Start and end of a time-range query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// End
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Range from `start` to `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of the range
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check if the server will accept this range in one request
    pub fn fits_single_request(&self) -> bool {
        self.duration() <= Duration::milliseconds(MAX_TIME_RANGE_MS)
    }

    /// Split into consecutive windows of at most 24 hours
    ///
    /// Windows share their boundaries: each window starts where the previous
    /// one ended. An empty or inverted range yields no windows.
    pub fn daily_windows(&self) -> Vec<TimeRange> {
        let window = Duration::milliseconds(MAX_TIME_RANGE_MS);
        let mut windows = Vec::new();
        let mut start = self.start;
        while start < self.end {
            let end = (start + window).min(self.end);
            windows.push(TimeRange::new(start, end));
            start = end;
        }
        windows
    }
}
