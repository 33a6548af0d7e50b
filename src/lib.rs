//! delicious is a client-side binding for the del.icio.us bookmarking service
//!
//! The service hands over already parsed responses, either as element nodes or
//! as raw field mappings. [`PostList`] turns them into a read-only list of
//! posts that can be counted, indexed, walked and filtered by tags or by url.
//!
//! ```
//! use {
//!     delicious::{Delicious, DeliciousCfg, PostFields, PostList},
//!     std::sync::Arc,
//! };
//!
//! let service = Arc::new(Delicious::from_config(&DeliciousCfg::default()));
//! let list = PostList::from_fields(
//!     service,
//!     vec![
//!         PostFields::new("http://a.com", "A").with_tags(["rust"]),
//!         PostFields::new("http://b.org", "B"),
//!     ],
//! )?;
//!
//! assert_eq!(list.with_tag("rust").len(), 1);
//! assert_eq!(list.with_url(r"\.org$")?.get(0)?.title(), "B");
//! # Ok::<(), delicious::DeliciousError>(())
//! ```
#![forbid(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod macros;
pub mod models;
pub mod post;
pub mod post_list;
pub mod utils;

pub use {
    client::{Delicious, ServiceRequest},
    config::DeliciousCfg,
    error::{DeliciousError, Result},
    models::{PostFields, PostNode, PostSource},
    post::{Bookmark, Post, SimplePost},
    post_list::{Cursor, PostList},
};
