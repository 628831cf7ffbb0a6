//! Limit/offset pagination primitives shared by catalog backend endpoints.
//!
//! Collection endpoints accept a `limit`/`offset` window and reply with an
//! envelope carrying the total row count plus absolute `next`/`previous`
//! links. The window is validated once at the edge so repositories can trust
//! the bounds they receive.

use serde::{Deserialize, Serialize};
use url::Url;

/// Validation failures for a requested pagination window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageParamsError {
    /// `limit` was zero or negative.
    #[error("limit must be positive (got {value})")]
    NonPositiveLimit {
        /// Rejected limit value.
        value: i64,
    },
    /// `limit` exceeded [`PageParams::MAX_LIMIT`].
    #[error("limit must not exceed {max} (got {value})")]
    LimitTooLarge {
        /// Rejected limit value.
        value: i64,
        /// Largest accepted limit.
        max: i64,
    },
    /// `offset` was negative.
    #[error("offset must not be negative (got {value})")]
    NegativeOffset {
        /// Rejected offset value.
        value: i64,
    },
}

/// Validated limit/offset window for a collection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    limit: i64,
    offset: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageParams {
    /// Window size applied when the request names none.
    pub const DEFAULT_LIMIT: i64 = 20;
    /// Largest window size a request may ask for.
    pub const MAX_LIMIT: i64 = 100;

    /// Validate a requested window, applying defaults for absent values.
    ///
    /// # Errors
    ///
    /// Returns [`PageParamsError`] when the limit is non-positive or above
    /// [`Self::MAX_LIMIT`], or when the offset is negative.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageParamsError> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if limit <= 0 {
            return Err(PageParamsError::NonPositiveLimit { value: limit });
        }
        if limit > Self::MAX_LIMIT {
            return Err(PageParamsError::LimitTooLarge {
                value: limit,
                max: Self::MAX_LIMIT,
            });
        }
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(PageParamsError::NegativeOffset { value: offset });
        }
        Ok(Self { limit, offset })
    }

    /// Window size.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows skipped before the window starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Window shifted forward by one page, or `None` past `count`.
    #[must_use]
    pub fn next(&self, count: i64) -> Option<Self> {
        let offset = self.offset.checked_add(self.limit)?;
        (offset < count).then_some(Self {
            limit: self.limit,
            offset,
        })
    }

    /// Window shifted back by one page, or `None` at the start.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        (self.offset > 0).then_some(Self {
            limit: self.limit,
            offset: (self.offset - self.limit).max(0),
        })
    }
}

/// Pagination envelope wrapping one window of results.
///
/// `next` and `previous` are absolute URLs reusing the request URL with only
/// the `limit`/`offset` pair rewritten, so filters survive page navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    /// Total number of rows matching the query, across all windows.
    pub count: i64,
    /// Link to the following window, when one exists.
    pub next: Option<String>,
    /// Link to the preceding window, when one exists.
    pub previous: Option<String>,
    /// Rows inside the requested window.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble an envelope from a window of `results` out of `count` total
    /// rows, deriving navigation links from the request URL.
    pub fn new(count: i64, results: Vec<T>, params: PageParams, request_url: &Url) -> Self {
        Self {
            count,
            next: params
                .next(count)
                .map(|window| window_url(request_url, window)),
            previous: params
                .previous()
                .map(|window| window_url(request_url, window)),
            results,
        }
    }
}

/// Rewrite `limit`/`offset` on `base`, preserving every other query pair.
fn window_url(base: &Url, window: PageParams) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "limit" && key != "offset")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("limit", &window.limit().to_string());
        pairs.append_pair("offset", &window.offset().to_string());
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    //! Unit tests for window validation and envelope link derivation.

    use super::*;
    use rstest::rstest;

    fn request_url(raw: &str) -> Url {
        Url::parse(raw).expect("valid test URL")
    }

    #[rstest]
    fn defaults_apply_when_absent() {
        let params = PageParams::new(None, None).expect("defaults are valid");
        assert_eq!(params.limit(), PageParams::DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(-5))]
    fn rejects_non_positive_limit(#[case] limit: Option<i64>) {
        let err = PageParams::new(limit, None).expect_err("limit rejected");
        assert!(matches!(err, PageParamsError::NonPositiveLimit { .. }));
    }

    #[rstest]
    fn rejects_limit_above_max() {
        let err = PageParams::new(Some(PageParams::MAX_LIMIT + 1), None)
            .expect_err("oversized limit rejected");
        assert_eq!(
            err,
            PageParamsError::LimitTooLarge {
                value: PageParams::MAX_LIMIT + 1,
                max: PageParams::MAX_LIMIT,
            }
        );
    }

    #[rstest]
    fn rejects_negative_offset() {
        let err = PageParams::new(None, Some(-1)).expect_err("negative offset rejected");
        assert_eq!(err, PageParamsError::NegativeOffset { value: -1 });
    }

    #[rstest]
    fn next_stops_at_count() {
        let params = PageParams::new(Some(10), Some(10)).expect("valid window");
        assert!(params.next(20).is_none());
        assert_eq!(
            params.next(21).map(|w| (w.limit(), w.offset())),
            Some((10, 20))
        );
    }

    #[rstest]
    fn previous_clamps_to_zero() {
        let params = PageParams::new(Some(10), Some(4)).expect("valid window");
        assert_eq!(params.previous().map(|w| w.offset()), Some(0));
        let first = PageParams::new(Some(10), Some(0)).expect("valid window");
        assert!(first.previous().is_none());
    }

    #[rstest]
    fn envelope_links_preserve_filters() {
        let params = PageParams::new(Some(2), Some(2)).expect("valid window");
        let url = request_url("http://api.test/api/v1/applications?category=games&limit=2&offset=2");

        let page = Page::new(5, vec!["a", "b"], params, &url);

        let next = page.next.expect("next window exists");
        assert!(next.contains("category=games"));
        assert!(next.contains("limit=2"));
        assert!(next.contains("offset=4"));
        let previous = page.previous.expect("previous window exists");
        assert!(previous.contains("offset=0"));
    }

    #[rstest]
    fn envelope_serializes_null_links_on_single_window() {
        let params = PageParams::default();
        let url = request_url("http://api.test/api/v1/categories");

        let page = Page::new(1, vec!["only"], params, &url);
        let json = serde_json::to_value(&page).expect("serializable envelope");

        assert_eq!(json["count"], 1);
        assert!(json["next"].is_null());
        assert!(json["previous"].is_null());
        assert_eq!(json["results"], serde_json::json!(["only"]));
    }
}
