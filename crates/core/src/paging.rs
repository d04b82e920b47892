//! Page and sort policy for list endpoints.
//!
//! Requests are checked here, before any query is built, so an oversized
//! page never reaches the database.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// A validated zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Validate raw `page` / `size` query values.
    ///
    /// Missing values fall back to page `0` and [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(0);
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 0 {
            return Err(CoreError::Validation("page must not be negative".into()));
        }
        if size < 1 {
            return Err(CoreError::Validation("size must be at least 1".into()));
        }
        if size > MAX_PAGE_SIZE {
            return Err(CoreError::Validation(format!(
                "size must not exceed {MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self { page, size })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns a measurement list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementSortField {
    Date,
    CreatedAt,
    Weight,
}

impl MeasurementSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Date => "measured_on",
            Self::CreatedAt => "created_at",
            Self::Weight => "weight_kg",
        }
    }
}

/// Ordering of a measurement list. Defaults to newest date first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementSort {
    pub field: MeasurementSortField,
    pub direction: SortDirection,
}

impl Default for MeasurementSort {
    fn default() -> Self {
        Self {
            field: MeasurementSortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl MeasurementSort {
    /// Parse a `sort` query value such as `date`, `date,asc` or `weight,desc`.
    ///
    /// The direction defaults to descending when omitted.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut parts = raw.split(',').map(str::trim);
        let field = match parts.next().unwrap_or_default() {
            "date" | "measured_on" => MeasurementSortField::Date,
            "created_at" => MeasurementSortField::CreatedAt,
            "weight" | "weight_kg" => MeasurementSortField::Weight,
            other => {
                return Err(CoreError::Validation(format!(
                    "unsupported sort field '{other}'"
                )))
            }
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("desc") => SortDirection::Desc,
            Some("asc") => SortDirection::Asc,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "unsupported sort direction '{other}'"
                )))
            }
        };
        if parts.next().is_some() {
            return Err(CoreError::Validation(format!("malformed sort '{raw}'")));
        }
        Ok(Self { field, direction })
    }

    /// `ORDER BY` clause body; ties are broken by id in the same direction.
    pub fn order_by(&self) -> String {
        let dir = self.direction.as_sql();
        format!("{} {dir}, id {dir}", self.field.column())
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        let total_pages = if total_items <= 0 {
            0
        } else {
            (total_items + request.size - 1) / request.size
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_apply_when_missing() {
        let req = PageRequest::new(None, None).unwrap();
        assert_eq!(req.page(), 0);
        assert_eq!(req.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn max_page_size_is_accepted() {
        let req = PageRequest::new(Some(2), Some(MAX_PAGE_SIZE)).unwrap();
        assert_eq!(req.limit(), 500);
        assert_eq!(req.offset(), 1000);
    }

    #[test]
    fn oversized_page_is_rejected() {
        let err = PageRequest::new(Some(0), Some(501)).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("500"));
    }

    #[test]
    fn zero_or_negative_values_are_rejected() {
        assert_matches!(
            PageRequest::new(Some(0), Some(0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PageRequest::new(Some(-1), Some(10)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn sort_defaults_to_date_desc() {
        let sort = MeasurementSort::default();
        assert_eq!(sort.order_by(), "measured_on DESC, id DESC");
        assert_eq!(MeasurementSort::parse("date").unwrap(), sort);
    }

    #[test]
    fn sort_parses_field_and_direction() {
        let sort = MeasurementSort::parse("weight, ASC").unwrap();
        assert_eq!(sort.field, MeasurementSortField::Weight);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(sort.order_by(), "weight_kg ASC, id ASC");
    }

    #[test]
    fn sort_rejects_unknown_input() {
        assert_matches!(
            MeasurementSort::parse("notes;drop table"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            MeasurementSort::parse("date,sideways"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            MeasurementSort::parse("date,asc,extra"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn page_totals_round_up() {
        let req = PageRequest::new(Some(0), Some(10)).unwrap();
        let page = Page::new(vec![1, 2, 3], req, 21);
        assert_eq!(page.total_pages, 3);
        let empty: Page<i32> = Page::new(vec![], req, 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(page.map(|n| n * 2).items, vec![2, 4, 6]);
    }
}
