//! Cursor pagination
//!
//! Follows the `links.next` cursor of a listing until enough items are
//! collected, the cursor runs out, or a follow-up page fails or comes back
//! empty. Pages are fetched strictly one after another.

use super::types::{Collected, ContinuationToken, PageSource, PaginationState, ResultCollection};
use crate::decode::{Cursor, FromJson};
use crate::error::{ApiResult, Error, PartialPaginationError, Result, StopReason};
use crate::http::{classify, Envelope};
use crate::types::{ApiVersion, AuthFailurePolicy};
use serde_json::Value;
use tracing::{debug, warn};

/// Stateless cursor paginator for one API revision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paginator {
    version: ApiVersion,
}

impl Paginator {
    /// Paginate entities decoded as served by `version`
    pub fn new(version: ApiVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Collect up to `desired` entities starting from a first response.
    ///
    /// A failed first response is classified and returned as the inner
    /// error without any follow-up. A body without `items` decodes as a
    /// single object. Follow-up failures end the run and annotate the
    /// collection instead of failing it. With `desired == 0` only the first
    /// page is decoded, untruncated.
    ///
    /// Items of the first page that do not decode fail the call. On a
    /// follow-up page they end the run like a failed page: entities from
    /// earlier pages are kept and the cursor still points at that page.
    /// Items past `desired` are never decoded.
    pub async fn collect_up_to<T, S>(
        &self,
        source: &S,
        first: Envelope,
        desired: usize,
    ) -> Result<ApiResult<Collected<T>>>
    where
        T: FromJson,
        S: PageSource,
    {
        if !first.success() {
            return classify(&first, source.auth_failure_policy()).map(Err);
        }

        let body = first
            .json_body()
            .ok_or_else(|| Error::decode("expected a JSON listing, got a binary body"))?;

        if !first.has_items() {
            return T::from_json_versioned(body, self.version).map(|one| Ok(Collected::One(one)));
        }

        let wanted = if desired > 0 { desired } else { usize::MAX };
        let mut entities = self.decode_items::<T>(first.items(), wanted)?;
        let mut state = PaginationState::new(first.next_cursor(), first.http_status());

        while !entities.is_empty() && entities.len() < desired && state.has_next() {
            let page = match fetch_page(source, &state.cursor).await {
                Ok(page) => page,
                Err(stop) => {
                    stop_early(&mut state, stop, entities.len(), desired);
                    break;
                }
            };

            match self.decode_items::<T>(page.items(), desired - entities.len()) {
                Ok(decoded) => {
                    debug!(
                        "Fetched page {} with {} items",
                        state.pages_fetched + 2,
                        page.items().len()
                    );
                    entities.extend(decoded);
                    state.advance(page.next_cursor(), page.http_status());
                }
                Err(e) => {
                    let stop = PartialPaginationError {
                        status: page.http_status(),
                        success: true,
                        reason: StopReason::FailedPage,
                        error: None,
                        cause: Some(e.to_string()),
                    };
                    stop_early(&mut state, stop, entities.len(), desired);
                    break;
                }
            }
        }

        let token = ContinuationToken::new(state.cursor, self.version);
        let mut collection = ResultCollection::from_page(entities, token, state.last_status);
        if let Some(stop) = state.stopped {
            collection.mark_partial(stop);
        }

        Ok(Ok(Collected::Many(collection)))
    }

    /// Decode at most `limit` items of one page
    fn decode_items<T: FromJson>(&self, items: &[Value], limit: usize) -> Result<Vec<T>> {
        items
            .iter()
            .take(limit)
            .map(|item| T::from_json_versioned(item, self.version))
            .collect()
    }

    /// Fetch the page after `token` and decode it.
    ///
    /// An exhausted token yields an empty collection without a request.
    pub async fn continue_with<T, S>(
        source: &S,
        token: &ContinuationToken<T>,
    ) -> Result<ApiResult<ResultCollection<T>>>
    where
        T: FromJson,
        S: PageSource,
    {
        if token.is_exhausted() {
            return Ok(Ok(ResultCollection::empty(token.version())));
        }

        let envelope = source.next_page(token.cursor()).await?;
        let paginator = Self::new(token.version());

        Ok(paginator
            .collect_up_to(source, envelope, 0)
            .await?
            .map(|collected| collected.into_collection(token.version())))
    }
}

/// Fetch one follow-up page, turning every way it can fail into a stop
async fn fetch_page<S: PageSource>(
    source: &S,
    cursor: &Cursor,
) -> std::result::Result<Envelope, PartialPaginationError> {
    let page = match source.next_page(cursor).await {
        Ok(page) => page,
        Err(e) => {
            let reason = if e.is_transport() {
                StopReason::Transport
            } else {
                StopReason::FailedPage
            };
            return Err(PartialPaginationError {
                status: 0,
                success: false,
                reason,
                error: None,
                cause: Some(e.to_string()),
            });
        }
    };

    if !page.success() {
        // Mid-run failures are data, including a 401
        let error = classify(&page, AuthFailurePolicy::ReturnValue).ok();
        return Err(PartialPaginationError {
            status: page.http_status(),
            success: false,
            reason: StopReason::FailedPage,
            error,
            cause: None,
        });
    }

    if page.items().is_empty() {
        return Err(PartialPaginationError {
            status: page.http_status(),
            success: true,
            reason: StopReason::EmptyPage,
            error: None,
            cause: None,
        });
    }

    Ok(page)
}

fn stop_early(
    state: &mut PaginationState,
    stop: PartialPaginationError,
    collected: usize,
    desired: usize,
) {
    warn!(
        "Pagination stopped after {} items ({} requested): {}",
        collected, desired, stop
    );
    state.stop(stop);
}

// ============================================================================
// Continuation on collections
// ============================================================================

impl<T: FromJson> ResultCollection<T> {
    /// The page after the last entity.
    ///
    /// Empty collections, and collections whose last page had no next
    /// cursor, continue to an empty collection.
    pub async fn continue_search<S: PageSource>(
        &self,
        source: &S,
    ) -> Result<ApiResult<ResultCollection<T>>> {
        match self.last_token() {
            Some(token) => Paginator::continue_with(source, token).await,
            None => Ok(Ok(ResultCollection::empty(self.version))),
        }
    }

    /// Append up to `pages` further pages, returning how many were added.
    ///
    /// Stops at the first page that is empty or fails; a failure is
    /// recorded in [`ResultCollection::partial_error`]. Only errors that
    /// would fail any call, such as a 401 under the raising policy, are
    /// returned as `Err`.
    pub async fn fetch_more_pages<S: PageSource>(
        &mut self,
        source: &S,
        pages: usize,
    ) -> Result<usize> {
        let mut added = 0;

        for _ in 0..pages {
            match self.continue_search(source).await {
                Ok(Ok(next)) if next.is_empty() => break,
                Ok(Ok(next)) => {
                    let stopped = next.is_partial();
                    self.extend(next);
                    added += 1;
                    if stopped {
                        break;
                    }
                }
                Ok(Err(api)) => {
                    self.mark_partial(PartialPaginationError {
                        status: api.status_code,
                        success: false,
                        reason: StopReason::FailedPage,
                        error: Some(api),
                        cause: None,
                    });
                    break;
                }
                Err(e) if e.is_transport() => {
                    self.mark_partial(PartialPaginationError {
                        status: 0,
                        success: false,
                        reason: StopReason::Transport,
                        error: None,
                        cause: Some(e.to_string()),
                    });
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(added)
    }
}
