//! postlist - paginated, searchable blog post listing
//!
//! Renders a single HTML page of blog posts out of a MySQL `posts`
//! table, driven by the `page` and `search` query parameters of one
//! GET request. The store is strictly read-only: a count query, a
//! page query, and server-side templating with escaping.
//!
//! # Structure
//!
//! - [`page`] — pure pagination arithmetic and link descriptors
//! - [`store`] — request-scoped MySQL access with bound parameters
//! - [`listing`] — data preparation producing a plain result structure
//! - [`view`] — stateless askama rendering of that structure
//! - [`handler`] — the axum route tying the steps together

pub mod config;
pub mod error;
pub mod handler;
pub mod listing;
pub mod model;
pub mod page;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use listing::{ListingOptions, ListingRequest, PostListing, PostView};
pub use model::Post;
pub use page::{PageLink, Pagination};
pub use store::{PostStore, SearchFilter};
