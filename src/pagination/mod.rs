//! Pagination module
//!
//! Cursor pagination and after-the-fact continuation of listings.
//!
//! # Overview
//!
//! Listings answer with `{"items": [...], "links": {"next": <url>}}`. The
//! [`Paginator`] follows `links.next` until the caller's count is met and
//! hands back a [`ResultCollection`]. Every entity in it is paired with a
//! [`ContinuationToken`] so more results can be requested later, from the
//! collection or from the token alone, without the entity holding any
//! reference back into the client.

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{Collected, ContinuationToken, PageSource, PaginationState, ResultCollection};
