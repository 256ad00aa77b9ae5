//! Pagination arithmetic and link descriptors
//!
//! Everything in this module is a pure function of the request
//! parameters and the matching row count; no I/O happens here.

/// How many numbered links to show on each side of the current page.
const WINDOW: u64 = 3;

/// Parse the raw `page` query parameter.
///
/// Absent, non-numeric, and values below 1 all normalize to page 1.
pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Normalize the raw `search` query parameter.
///
/// The value is trimmed; empty and whitespace-only input means "no
/// search filter".
pub fn normalize_search(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// Derived pagination state for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Effective page, clamped to `[1, total_pages]`
    pub page: u64,
    /// Total page count, at least 1 even when no rows match
    pub total_pages: u64,
    /// Zero-based row skip count for the page query
    pub offset: u64,
}

impl Pagination {
    /// Compute pagination bounds from the matching row count.
    ///
    /// `requested_page` must already be normalized via [`parse_page`];
    /// it is clamped down to the last page when it points past the
    /// end.
    pub fn compute(total: i64, requested_page: u64, limit: u64) -> Self {
        debug_assert!(limit >= 1);
        let total = total.max(0) as u64;
        let total_pages = if total > 0 { total.div_ceil(limit) } else { 1 };
        let page = requested_page.min(total_pages);
        Self {
            page,
            total_pages,
            offset: (page - 1) * limit,
        }
    }
}

/// One entry in the pagination control strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLink {
    /// "Previous" control; disabled on the first page
    Prev { target: u64, disabled: bool },
    /// A numbered page link; the active one is non-navigable
    Number { page: u64, active: bool },
    /// Ellipsis placeholder between the window and the first/last page
    Gap,
    /// "Next" control; disabled on the last page
    Next { target: u64, disabled: bool },
}

/// Build the link descriptors for the pagination strip.
///
/// Returns an empty strip when everything fits on one page. Numbered
/// links cover a window of `WINDOW` pages around the current page,
/// anchored with first/last page links and gap markers when the
/// window does not reach the ends.
pub fn links(page: u64, total_pages: u64) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut out = Vec::new();
    out.push(PageLink::Prev {
        target: page.saturating_sub(1).max(1),
        disabled: page == 1,
    });

    let start = page.saturating_sub(WINDOW).max(1);
    let end = (page + WINDOW).min(total_pages);

    if start > 1 {
        out.push(PageLink::Number {
            page: 1,
            active: false,
        });
        if start > 2 {
            out.push(PageLink::Gap);
        }
    }

    for i in start..=end {
        out.push(PageLink::Number {
            page: i,
            active: i == page,
        });
    }

    if end < total_pages {
        if end < total_pages - 1 {
            out.push(PageLink::Gap);
        }
        out.push(PageLink::Number {
            page: total_pages,
            active: false,
        });
    }

    out.push(PageLink::Next {
        target: (page + 1).min(total_pages),
        disabled: page == total_pages,
    });

    out
}

/// Build the href for a page link, preserving the current search.
///
/// The `search` parameter is omitted entirely when there is no
/// active search.
pub fn page_href(page: u64, search: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(term) = search {
        query.append_pair("search", term);
    }
    query.append_pair("page", &page.to_string());
    format!("?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("2.5")), 1);
    }

    #[test]
    fn test_parse_page_valid() {
        assert_eq!(parse_page(Some("1")), 1);
        assert_eq!(parse_page(Some("42")), 42);
        assert_eq!(parse_page(Some(" 7 ")), 7);
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(None), None);
        assert_eq!(normalize_search(Some("")), None);
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(Some(" hello ")), Some("hello".into()));
    }

    #[test]
    fn test_compute_empty() {
        let p = Pagination::compute(0, 1, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_compute_exact_multiple() {
        let p = Pagination::compute(10, 2, 5);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn test_compute_partial_last_page() {
        let p = Pagination::compute(12, 2, 5);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page, 2);
        assert_eq!(p.offset, 5);
    }

    #[test]
    fn test_compute_clamps_past_end() {
        let p = Pagination::compute(12, 99, 5);
        assert_eq!(p.page, 3);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn test_compute_clamps_to_one_when_empty() {
        let p = Pagination::compute(0, 99, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_links_single_page() {
        assert!(links(1, 1).is_empty());
        assert!(links(1, 0).is_empty());
    }

    #[test]
    fn test_links_three_pages_middle() {
        let l = links(2, 3);
        assert_eq!(
            l,
            vec![
                PageLink::Prev {
                    target: 1,
                    disabled: false
                },
                PageLink::Number {
                    page: 1,
                    active: false
                },
                PageLink::Number {
                    page: 2,
                    active: true
                },
                PageLink::Number {
                    page: 3,
                    active: false
                },
                PageLink::Next {
                    target: 3,
                    disabled: false
                },
            ]
        );
    }

    #[test]
    fn test_links_first_page_prev_disabled() {
        let l = links(1, 2);
        assert_eq!(
            l[0],
            PageLink::Prev {
                target: 1,
                disabled: true
            }
        );
        assert_eq!(
            l[l.len() - 1],
            PageLink::Next {
                target: 2,
                disabled: false
            }
        );
    }

    #[test]
    fn test_links_last_page_next_disabled() {
        let l = links(5, 5);
        assert_eq!(
            l[l.len() - 1],
            PageLink::Next {
                target: 5,
                disabled: true
            }
        );
    }

    #[test]
    fn test_links_window_with_gaps_both_sides() {
        let l = links(10, 20);
        assert_eq!(
            l,
            vec![
                PageLink::Prev {
                    target: 9,
                    disabled: false
                },
                PageLink::Number {
                    page: 1,
                    active: false
                },
                PageLink::Gap,
                PageLink::Number {
                    page: 7,
                    active: false
                },
                PageLink::Number {
                    page: 8,
                    active: false
                },
                PageLink::Number {
                    page: 9,
                    active: false
                },
                PageLink::Number {
                    page: 10,
                    active: true
                },
                PageLink::Number {
                    page: 11,
                    active: false
                },
                PageLink::Number {
                    page: 12,
                    active: false
                },
                PageLink::Number {
                    page: 13,
                    active: false
                },
                PageLink::Gap,
                PageLink::Number {
                    page: 20,
                    active: false
                },
                PageLink::Next {
                    target: 11,
                    disabled: false
                },
            ]
        );
    }

    #[test]
    fn test_links_anchor_without_gap_when_adjacent() {
        // Window start is exactly 2: page 1 anchor, no gap.
        let l = links(5, 20);
        assert_eq!(
            l[1],
            PageLink::Number {
                page: 1,
                active: false
            }
        );
        assert_ne!(l[2], PageLink::Gap);
        // Window end is 8 < 19, so the tail still gets a gap.
        assert!(l.contains(&PageLink::Gap));
    }

    #[test]
    fn test_page_href_with_search() {
        assert_eq!(page_href(2, Some("foo")), "?search=foo&page=2");
        assert_eq!(page_href(1, Some("hello world")), "?search=hello+world&page=1");
    }

    #[test]
    fn test_page_href_without_search() {
        assert_eq!(page_href(3, None), "?page=3");
    }

    #[test]
    fn test_page_href_encodes_reserved_characters() {
        let href = page_href(1, Some("a&b=c"));
        assert_eq!(href, "?search=a%26b%3Dc&page=1");
    }
}
