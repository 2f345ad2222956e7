//! Pagination + sort specification for list endpoints.
//!
//! A [`Filters`] value can only be obtained through [`Filters::validate`], which
//! resolves the requested sort against a fixed, compile-time safelist. The
//! stored sort is always the safelist's own `&'static str`, so the column and
//! direction handed to the SQL builder never originate from the request.

use crate::domain::validator::{permitted_value, Validator};

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Raw, untrusted list parameters as they arrive in the query string.
/// `None` and empty strings both fall back to defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterParams<'a> {
    pub page: Option<&'a str>,
    pub page_size: Option<&'a str>,
    pub sort: Option<&'a str>,
}

/// Validated, immutable page/page-size/sort specification for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    page: u32,
    page_size: u32,
    sort: &'static str,
    sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Applies the pagination rules in a fixed order, recording every failure in
    /// `v`. Returns `None` when at least one rule failed.
    pub fn validate(
        v: &mut Validator,
        params: FilterParams<'_>,
        sort_safelist: &'static [&'static str],
        default_sort: &'static str,
    ) -> Option<Self> {
        let page = parse_positive(v, "page", non_empty(params.page), DEFAULT_PAGE, MAX_PAGE)
            .map(|p| {
                v.check(p <= MAX_PAGE, "page", "must be a maximum of 10 million");
                p
            });
        let page_size = parse_positive(
            v,
            "page_size",
            non_empty(params.page_size),
            DEFAULT_PAGE_SIZE,
            MAX_PAGE_SIZE,
        )
        .map(|p| {
            v.check(p <= MAX_PAGE_SIZE, "page_size", "must be a maximum of 100");
            p
        });

        let requested = non_empty(params.sort).unwrap_or(default_sort);
        let sort = sort_safelist.iter().copied().find(|s| *s == requested);
        v.check(
            permitted_value(requested, sort_safelist),
            "sort",
            "invalid sort value",
        );

        if !v.is_empty() {
            return None;
        }
        match (page, page_size, sort) {
            (Some(page), Some(page_size), Some(sort)) => Some(Self {
                page: u32::try_from(page).ok()?,
                page_size: u32::try_from(page_size).ok()?,
                sort,
                sort_safelist,
            }),
            _ => None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The safelist entry selected by the request, e.g. `"-name"`.
    pub fn sort(&self) -> &'static str {
        self.sort
    }

    /// Column name of the sort entry with any leading `-` stripped.
    pub fn sort_column(&self) -> &'static str {
        debug_assert!(self.sort_safelist.contains(&self.sort));
        self.sort.strip_prefix('-').unwrap_or(self.sort)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a positive integer. Values above `max` are returned as-is so the
/// caller can report the range failure separately.
fn parse_positive(
    v: &mut Validator,
    key: &str,
    raw: Option<&str>,
    default: u32,
    max: i64,
) -> Option<i64> {
    let Some(raw) = raw else {
        return Some(i64::from(default));
    };
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Some(n),
        Ok(_) => {
            v.add_error(key, "must be a positive integer");
            None
        }
        // Digits only but beyond i64: still a positive integer, just out of range.
        Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => Some(max + 1),
        Err(_) => {
            v.add_error(key, "must be a positive integer");
            None
        }
    }
}
