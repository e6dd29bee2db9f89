//! Pagination types and traits
//!
//! Defines the page source seam, the continuation token handed out next to
//! every listed entity, and the collection type listings return.

use crate::decode::Cursor;
use crate::error::{PartialPaginationError, Result};
use crate::http::{Envelope, HttpClient};
use crate::types::{ApiVersion, AuthFailurePolicy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::ops::Deref;

// ============================================================================
// Page Source
// ============================================================================

/// Anything that can fetch the page a cursor points to
pub trait PageSource {
    /// Fetch the page behind `cursor`
    fn next_page(&self, cursor: &Cursor) -> impl Future<Output = Result<Envelope>>;

    /// How 401 answers are reported
    fn auth_failure_policy(&self) -> AuthFailurePolicy;
}

impl PageSource for HttpClient {
    fn next_page(&self, cursor: &Cursor) -> impl Future<Output = Result<Envelope>> {
        self.follow(cursor)
    }

    fn auth_failure_policy(&self) -> AuthFailurePolicy {
        self.config().auth_failure_policy
    }
}

// ============================================================================
// Continuation Token
// ============================================================================

/// Handle for asking "more like this" after a listing returned.
///
/// Holds the cursor observed after the page its entity came from and the
/// API revision its entities are decoded as. The result kind is carried in
/// the type only; a token never owns or references a collection.
pub struct ContinuationToken<T> {
    cursor: Cursor,
    version: ApiVersion,
    kind: PhantomData<fn() -> T>,
}

impl<T> ContinuationToken<T> {
    pub fn new(cursor: Cursor, version: ApiVersion) -> Self {
        Self {
            cursor,
            version,
            kind: PhantomData,
        }
    }

    /// A token with nowhere to go
    pub fn exhausted(version: ApiVersion) -> Self {
        Self::new(Cursor::empty(), version)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Whether there is no next page to continue with
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_empty()
    }
}

impl<T> Clone for ContinuationToken<T> {
    fn clone(&self) -> Self {
        Self::new(self.cursor.clone(), self.version)
    }
}

impl<T> PartialEq for ContinuationToken<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && self.version == other.version
    }
}

impl<T> fmt::Debug for ContinuationToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuationToken")
            .field("cursor", &self.cursor)
            .field("version", &self.version)
            .field("kind", &std::any::type_name::<T>())
            .finish()
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Tracks one pagination run
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor of the next page; empty once the listing is exhausted
    pub cursor: Cursor,
    /// Follow-up pages fetched after the first one
    pub pages_fetched: u32,
    /// Status of the most recent response
    pub last_status: u16,
    /// Why the run stopped early, if it did
    pub stopped: Option<PartialPaginationError>,
}

impl PaginationState {
    /// Start from the first page of a listing
    pub fn new(cursor: Cursor, status: u16) -> Self {
        Self {
            cursor,
            last_status: status,
            ..Default::default()
        }
    }

    /// Record a page that was appended
    pub fn advance(&mut self, cursor: Cursor, status: u16) {
        self.cursor = cursor;
        self.last_status = status;
        self.pages_fetched += 1;
    }

    /// Record the follow-up that ended the run
    pub fn stop(&mut self, error: PartialPaginationError) {
        if error.status != 0 {
            self.last_status = error.status;
        }
        self.stopped = Some(error);
    }

    pub fn has_next(&self) -> bool {
        !self.cursor.is_empty()
    }
}

// ============================================================================
// Result Collection
// ============================================================================

/// Ordered entities from a paginated listing.
///
/// Each entity keeps the [`ContinuationToken`] of the page it came from.
/// The collection can be extended in place with further pages through
/// [`ResultCollection::fetch_more_pages`].
pub struct ResultCollection<T> {
    pub(super) items: Vec<T>,
    pub(super) tokens: Vec<ContinuationToken<T>>,
    pub(super) version: ApiVersion,
    pub(super) last_status: u16,
    pub(super) partial: Option<PartialPaginationError>,
}

impl<T> ResultCollection<T> {
    /// An empty collection
    pub fn empty(version: ApiVersion) -> Self {
        Self {
            items: Vec::new(),
            tokens: Vec::new(),
            version,
            last_status: 0,
            partial: None,
        }
    }

    /// Build a collection whose entities all continue from `token`
    pub fn from_page(items: Vec<T>, token: ContinuationToken<T>, status: u16) -> Self {
        let tokens = vec![token.clone(); items.len()];
        Self {
            items,
            tokens,
            version: token.version(),
            last_status: status,
            partial: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Token of the entity at `index`
    pub fn token(&self, index: usize) -> Option<&ContinuationToken<T>> {
        self.tokens.get(index)
    }

    /// Token of the last entity; this is where the listing continues
    pub fn last_token(&self) -> Option<&ContinuationToken<T>> {
        self.tokens.last()
    }

    /// Entities paired with their tokens
    pub fn iter_with_tokens(&self) -> impl Iterator<Item = (&T, &ContinuationToken<T>)> {
        self.items.iter().zip(&self.tokens)
    }

    /// Status of the last response that shaped this collection
    pub fn last_status(&self) -> u16 {
        self.last_status
    }

    /// Why pagination stopped before the requested count, if it did
    pub fn partial_error(&self) -> Option<&PartialPaginationError> {
        self.partial.as_ref()
    }

    pub fn is_partial(&self) -> bool {
        self.partial.is_some()
    }

    /// Whether the last entity has a page to continue with
    pub fn has_more(&self) -> bool {
        self.last_token().is_some_and(|t| !t.is_exhausted())
    }

    /// Append another collection, keeping its tokens and status
    pub fn extend(&mut self, other: ResultCollection<T>) {
        self.items.extend(other.items);
        self.tokens.extend(other.tokens);
        self.last_status = other.last_status;
        if other.partial.is_some() {
            self.partial = other.partial;
        }
    }

    pub(super) fn mark_partial(&mut self, error: PartialPaginationError) {
        if error.status != 0 {
            self.last_status = error.status;
        }
        self.partial = Some(error);
    }
}

impl<T> Deref for ResultCollection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for ResultCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Clone> Clone for ResultCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            tokens: self.tokens.clone(),
            version: self.version,
            last_status: self.last_status,
            partial: self.partial.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ResultCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCollection")
            .field("items", &self.items)
            .field("last_status", &self.last_status)
            .field("partial", &self.partial)
            .field("has_more", &self.has_more())
            .finish()
    }
}

// Serialized as the bare list of entities
impl<T: Serialize> Serialize for ResultCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

// ============================================================================
// Collected
// ============================================================================

/// What a listing call produced.
///
/// Endpoints that answer with a single object instead of an `items` page
/// yield [`Collected::One`].
#[derive(Debug)]
pub enum Collected<T> {
    Many(ResultCollection<T>),
    One(T),
}

impl<T> Collected<T> {
    /// View the result as a collection; a single object becomes a
    /// collection of one with nowhere to continue
    pub fn into_collection(self, version: ApiVersion) -> ResultCollection<T> {
        match self {
            Collected::Many(collection) => collection,
            Collected::One(item) => {
                ResultCollection::from_page(vec![item], ContinuationToken::exhausted(version), 200)
            }
        }
    }

    /// The single object, if this was not a page
    pub fn into_one(self) -> Option<T> {
        match self {
            Collected::One(item) => Some(item),
            Collected::Many(_) => None,
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Collected::Many(_))
    }
}
