//! Server pagination contract shared by every list in the admin console.
//!
//! A list view owns a [`PageRequest`], the client turns the raw response
//! envelope into a [`PagedResult`] through a per-collection [`PageShape`],
//! and the table derives everything it renders from a [`Pager`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a collection, plus any extra query filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
    filters: BTreeMap<String, String>,
}

impl PageRequest {
    /// Pages are 1-based and limits are positive; out-of-range values are
    /// clamped rather than rejected.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn first(limit: u32) -> Self {
        Self::new(1, limit)
    }

    pub fn with_filter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Same collection and filters, different page.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Global index of the first row on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Query string pairs in a stable order: page, limit, then filters by
    /// key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(
            self.filters.iter().map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages needed for `total` rows; never less than one.
pub fn page_count(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// A normalized page of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> PagedResult<T> {
    /// Slice a complete collection the server returned in one response.
    pub fn paginate_locally(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len() as u64;
        let start = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(start)
            .take(request.limit() as usize)
            .collect();
        Self {
            items,
            total,
            total_pages: page_count(total, request.limit()),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Names the envelope field that carries a collection's rows.
///
/// Endpoints disagree on both the row key (`users`, `items`, `purchases`,
/// ...) and the count key (`total` vs `totalItems`). Everything downstream
/// of [`PageShape::decode`] only sees a [`PagedResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageShape {
    pub items_key: &'static str,
}

const TOTAL_KEYS: [&str; 2] = ["total", "totalItems"];
const TOTAL_PAGES_KEY: &str = "totalPages";

impl PageShape {
    pub const fn named(items_key: &'static str) -> Self {
        Self { items_key }
    }

    pub fn decode<T: DeserializeOwned>(
        &self,
        body: Value,
        request: &PageRequest,
    ) -> Result<PagedResult<T>, ClientError> {
        let Value::Object(mut envelope) = body else {
            return Err(ClientError::MissingField(self.items_key));
        };
        let rows = match envelope.remove(self.items_key) {
            Some(Value::Null) | None => {
                return Err(ClientError::MissingField(self.items_key));
            }
            Some(rows) => rows,
        };
        let items: Vec<T> = serde_json::from_value(rows)?;

        let total = TOTAL_KEYS
            .iter()
            .find_map(|key| envelope.get(*key).and_then(Value::as_u64));
        let total_pages = envelope
            .get(TOTAL_PAGES_KEY)
            .and_then(Value::as_u64)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX).max(1));

        let seen = request.offset() + items.len() as u64;
        let (total, total_pages) = match (total, total_pages) {
            (Some(total), Some(pages)) => (total, pages),
            (Some(total), None) => (total, page_count(total, request.limit())),
            (None, Some(pages)) if request.page() >= pages => (seen, pages),
            (None, Some(pages)) => {
                (u64::from(pages) * u64::from(request.limit()), pages)
            }
            (None, None) => {
                (seen, page_count(seen, request.limit()).max(request.page()))
            }
        };

        Ok(PagedResult {
            items,
            total,
            total_pages,
        })
    }
}

/// What the body of a paginated table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows,
}

/// Navigation and label arithmetic for a paginated table. Holds no state
/// of its own; the owning list view rebuilds it each render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current_page: u32,
    pub total_pages: u32,
    /// `None` until the first page has arrived.
    pub total_items: Option<u64>,
    pub page_size: u32,
}

impl Pager {
    pub fn new(
        current_page: u32,
        total_pages: u32,
        total_items: Option<u64>,
        page_size: u32,
    ) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages: total_pages.max(1),
            total_items,
            page_size: page_size.max(1),
        }
    }

    /// Controls only appear once there is more than one page worth of rows.
    pub fn shows_controls(&self) -> bool {
        matches!(self.total_items, Some(n) if n > u64::from(self.page_size))
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// A navigation target, or `None` if it is out of range or already
    /// current.
    pub fn target(&self, page: u32) -> Option<u32> {
        (page >= 1 && page <= self.total_pages && page != self.current_page)
            .then_some(page)
    }

    pub fn previous(&self) -> Option<u32> {
        self.target(self.current_page.checked_sub(1)?)
    }

    pub fn next(&self) -> Option<u32> {
        self.target(self.current_page.checked_add(1)?)
    }

    /// First and last global row numbers (1-based) visible on this page.
    pub fn visible_range(&self, rows: usize) -> (u64, u64) {
        if rows == 0 {
            return (0, 0);
        }
        let first = u64::from(self.current_page.saturating_sub(1))
            * u64::from(self.page_size)
            + 1;
        let last = first - 1 + rows as u64;
        let last = match self.total_items {
            Some(total) => last.min(total),
            None => last,
        };
        (first, last)
    }

    pub fn label(&self, rows: usize) -> String {
        let (first, last) = self.visible_range(rows);
        let total = self.total_items.unwrap_or(last);
        format!("Showing {first} to {last} of {total}")
    }

    /// Zero-based position of a row across the whole collection.
    pub fn global_index(&self, local: usize) -> u64 {
        u64::from(self.current_page.saturating_sub(1))
            * u64::from(self.page_size)
            + local as u64
    }

    pub fn body(&self, loading: bool, rows: usize) -> TableBody {
        if self.total_items == Some(0) {
            TableBody::Empty
        } else if loading {
            TableBody::Loading
        } else if rows == 0 {
            TableBody::Empty
        } else {
            TableBody::Rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        n: u64,
    }

    fn rows(count: u64) -> Vec<u64> {
        (0..count).collect()
    }

    #[test]
    fn local_pages_hold_exactly_their_slice() {
        for total in [0u64, 1, 9, 10, 11, 25, 30] {
            for limit in [1u32, 3, 10] {
                let pages = page_count(total, limit);
                for page in 1..=pages {
                    let request = PageRequest::new(page, limit);
                    let result =
                        PagedResult::paginate_locally(rows(total), &request);
                    let start = u64::from(page - 1) * u64::from(limit);
                    let expected_len =
                        u64::from(limit).min(total.saturating_sub(start));
                    assert_eq!(result.items.len() as u64, expected_len);
                    let expected: Vec<u64> =
                        (start..start + expected_len).collect();
                    assert_eq!(result.items, expected);
                    assert_eq!(result.total, total);
                    assert_eq!(result.total_pages, pages);
                }
            }
        }
    }

    #[test]
    fn twenty_five_rows_at_ten_per_page() {
        assert_eq!(page_count(25, 10), 3);
        let past_end = PagedResult::paginate_locally(
            rows(25),
            &PageRequest::new(4, 10),
        );
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_pages, 3);
        assert_eq!(past_end.total, 25);
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(PagedResult::<u64>::empty().total_pages, 1);
    }

    #[test]
    fn request_clamps_and_orders_query() {
        let request = PageRequest::new(0, 0)
            .with_filter("type", "team2")
            .with_filter("isDemo", "true");
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 1);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "1".to_string()),
                ("isDemo".to_string(), "true".to_string()),
                ("type".to_string(), "team2".to_string()),
            ]
        );
        let moved = request.at_page(3);
        assert_eq!(moved.page(), 3);
        assert_eq!(moved.filters(), request.filters());
    }

    #[test]
    fn shape_reads_named_rows_and_either_total_key() {
        let request = PageRequest::new(2, 2);
        let users = PageShape::named("users");
        let decoded: PagedResult<Row> = users
            .decode(
                json!({
                    "success": true,
                    "users": [{"n": 3}],
                    "total": 3,
                    "totalPages": 2,
                }),
                &request,
            )
            .unwrap();
        assert_eq!(decoded.items, vec![Row { n: 3 }]);
        assert_eq!((decoded.total, decoded.total_pages), (3, 2));

        let history = PageShape::named("purchases");
        let decoded: PagedResult<Row> = history
            .decode(
                json!({"purchases": [], "totalItems": 0, "totalPages": 0}),
                &PageRequest::first(10),
            )
            .unwrap();
        assert_eq!((decoded.total, decoded.total_pages), (0, 1));
    }

    #[test]
    fn shape_derives_missing_metadata() {
        let shape = PageShape::named("items");
        let decoded: PagedResult<Row> = shape
            .decode(
                json!({"items": [{"n": 0}, {"n": 1}], "total": 12}),
                &PageRequest::first(5),
            )
            .unwrap();
        assert_eq!(decoded.total_pages, 3);

        let decoded: PagedResult<Row> = shape
            .decode(
                json!({"items": [{"n": 10}], "totalPages": 3}),
                &PageRequest::new(3, 5),
            )
            .unwrap();
        assert_eq!(decoded.total, 11);

        let decoded: PagedResult<Row> = shape
            .decode(json!({"items": [{"n": 0}]}), &PageRequest::first(5))
            .unwrap();
        assert_eq!((decoded.total, decoded.total_pages), (1, 1));
    }

    #[test]
    fn shape_rejects_missing_rows() {
        let err = PageShape::named("users")
            .decode::<Row>(json!({"items": []}), &PageRequest::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField("users")));
    }

    #[test]
    fn boundary_buttons() {
        let first = Pager::new(1, 3, Some(25), 10);
        assert!(!first.can_go_previous());
        assert!(first.can_go_next());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pager::new(3, 3, Some(25), 10);
        assert!(last.can_go_previous());
        assert!(!last.can_go_next());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(2));

        assert_eq!(last.target(3), None);
        assert_eq!(last.target(0), None);
        assert_eq!(last.target(4), None);
        assert_eq!(last.target(1), Some(1));
    }

    #[test]
    fn controls_only_past_one_page() {
        assert!(!Pager::new(1, 1, Some(0), 10).shows_controls());
        assert!(!Pager::new(1, 1, Some(10), 10).shows_controls());
        assert!(Pager::new(1, 2, Some(11), 10).shows_controls());
        assert!(!Pager::new(1, 1, None, 10).shows_controls());
    }

    #[test]
    fn showing_label() {
        let pager = Pager::new(3, 3, Some(25), 10);
        assert_eq!(pager.visible_range(5), (21, 25));
        assert_eq!(pager.label(5), "Showing 21 to 25 of 25");
        assert_eq!(pager.global_index(0), 20);

        let empty = Pager::new(1, 1, Some(0), 10);
        assert_eq!(empty.label(0), "Showing 0 to 0 of 0");
    }

    #[test]
    fn zero_items_is_empty_even_while_loading() {
        let pager = Pager::new(1, 1, Some(0), 10);
        assert_eq!(pager.body(true, 0), TableBody::Empty);
        assert_eq!(pager.body(false, 0), TableBody::Empty);

        let unknown = Pager::new(1, 1, None, 10);
        assert_eq!(unknown.body(true, 0), TableBody::Loading);
        let known = Pager::new(2, 3, Some(25), 10);
        assert_eq!(known.body(true, 10), TableBody::Loading);
        assert_eq!(known.body(false, 10), TableBody::Rows);
    }
}
