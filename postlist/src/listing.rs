//! Data preparation for the listing page
//!
//! Runs the two read queries and projects the results into a plain
//! structure the view layer can render without any further logic.

use crate::error::Result;
use crate::model::Post;
use crate::page::{self, PageLink, Pagination};
use crate::store::{PostStore, SearchFilter};

/// Content preview length, in characters (not bytes).
const PREVIEW_CHARS: usize = 200;

/// Raw query parameters for one listing request, as they arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingRequest<'a> {
    pub page: Option<&'a str>,
    pub search: Option<&'a str>,
}

/// Listing behavior derived from the application configuration.
#[derive(Debug, Clone, Copy)]
pub struct ListingOptions {
    pub page_size: u64,
    pub case_insensitive_search: bool,
}

impl From<&crate::config::AppConfig> for ListingOptions {
    fn from(config: &crate::config::AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            case_insensitive_search: config.case_insensitive_search,
        }
    }
}

/// A post projected for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub title: String,
    /// Formatted as `YYYY-MM-DD HH:MM`
    pub created_at: String,
    /// Pre-escaped HTML preview: truncated, escaped, newlines as
    /// `<br>`. The only field the template marks safe.
    pub preview_html: String,
}

/// A pagination link projected for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    /// Empty for non-navigable entries (gaps and the active page)
    pub href: String,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

impl LinkView {
    /// Whether the template should emit an anchor for this entry.
    ///
    /// Disabled Prev/Next controls keep their anchor (Bootstrap
    /// blocks the click); gaps and the active page render as spans.
    pub fn navigable(&self) -> bool {
        !self.href.is_empty() && !self.active
    }
}

/// The plain result structure consumed by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PostListing {
    pub posts: Vec<PostView>,
    /// Current search term; empty when no search is active
    pub search: String,
    pub page: u64,
    pub total_pages: u64,
    pub total: i64,
    pub links: Vec<LinkView>,
}

/// Prepare the listing for one request: count, paginate, fetch,
/// project.
///
/// Consistency between the two queries is best-effort; data changing
/// in between yields at worst an off-by-one page count.
pub async fn prepare_listing(
    store: &mut PostStore,
    request: ListingRequest<'_>,
    options: &ListingOptions,
) -> Result<PostListing> {
    let search = page::normalize_search(request.search);
    let requested_page = page::parse_page(request.page);
    let filter = SearchFilter::new(search.as_deref(), options.case_insensitive_search);

    let total = store.count_posts(&filter).await?;
    let pagination = Pagination::compute(total, requested_page, options.page_size);
    let posts = store
        .fetch_page(&filter, pagination.offset, options.page_size)
        .await?;

    Ok(build_listing(posts, total, pagination, search))
}

/// Pure projection step, separated so pagination and rendering rules
/// are testable without a database.
pub fn build_listing(
    posts: Vec<Post>,
    total: i64,
    pagination: Pagination,
    search: Option<String>,
) -> PostListing {
    let links = page::links(pagination.page, pagination.total_pages)
        .into_iter()
        .map(|link| link_view(link, search.as_deref()))
        .collect();

    PostListing {
        posts: posts.into_iter().map(post_view).collect(),
        search: search.unwrap_or_default(),
        page: pagination.page,
        total_pages: pagination.total_pages,
        total,
        links,
    }
}

fn post_view(post: Post) -> PostView {
    PostView {
        created_at: post.created_at.format("%Y-%m-%d %H:%M").to_string(),
        preview_html: preview_html(&post.content),
        title: post.title,
    }
}

fn link_view(link: PageLink, search: Option<&str>) -> LinkView {
    match link {
        PageLink::Prev { target, disabled } => LinkView {
            href: page::page_href(target, search),
            label: "Previous".to_string(),
            active: false,
            disabled,
        },
        PageLink::Next { target, disabled } => LinkView {
            href: page::page_href(target, search),
            label: "Next".to_string(),
            active: false,
            disabled,
        },
        PageLink::Number { page: n, active } => LinkView {
            href: if active {
                String::new()
            } else {
                page::page_href(n, search)
            },
            label: n.to_string(),
            active,
            disabled: false,
        },
        PageLink::Gap => LinkView {
            href: String::new(),
            label: "\u{2026}".to_string(),
            active: false,
            disabled: true,
        },
    }
}

/// Build the escaped HTML preview of a post's content.
///
/// Truncation counts characters so multi-byte content is never split;
/// the ellipsis is appended only when something was cut off.
fn preview_html(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().nth(PREVIEW_CHARS).is_some() {
        preview.push('\u{2026}');
    }
    escape_html(&preview).replace('\n', "<br>")
}

/// Escape the HTML-significant characters.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
