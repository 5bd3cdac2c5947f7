//! Shared types and streaming infrastructure for the YouTube API client.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

type OneFuturePage<'a, F, T, E> =
    Pin<Box<dyn Future<Output = Result<(F, (VecDeque<T>, Option<String>)), E>> + 'a + Send>>;

/// A paginated stream that fetches subsequent pages from a YouTube API list endpoint on demand.
///
/// Items are yielded one by one; the next page is requested only once the current page is
/// exhausted. An empty continuation token is treated the same as a missing one and ends the
/// stream. The first error is yielded and then the stream ends.
pub struct PagedStream<'a, T, F, E> {
    /// Current batch of items from the most recent API response
    current_items: VecDeque<T>,
    /// Future representing the currently pending API request, if any
    pending_request: Option<OneFuturePage<'a, F, T, E>>,
    /// Whether we've reached the end of all available data
    is_done: bool,
}

impl<'a, T, F, E> PagedStream<'a, T, F, E> {
    /// Create a new `PagedStream` whose first page is fetched with no page token.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = Result<(VecDeque<T>, Option<String>), E>> + Send + 'a,
    {
        let first_page = async move {
            let results = fetcher(None).await?;
            Ok::<_, E>((fetcher, results))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            current_items: VecDeque::new(),
            is_done: false,
        }
    }
}

impl<'a, T: Unpin, F, E> Unpin for PagedStream<'a, T, F, E> {}

impl<'a, T: Unpin, F, Fut, E> Stream for PagedStream<'a, T, F, E>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = Result<(VecDeque<T>, Option<String>), E>> + Send + 'a,
    E: 'a,
{
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);

                    match next_token.filter(|token| !token.is_empty()) {
                        Some(next_token) => {
                            // queued, but not polled until the current batch is drained
                            self.pending_request = Some(Box::pin(async move {
                                let results = fetcher(Some(next_token)).await?;
                                Ok::<_, E>((fetcher, results))
                            }));
                        }
                        None => {
                            self.is_done = true;
                            self.pending_request = None;
                        }
                    }
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}
