//! Cancellation helpers for in-flight requests and part streams.

use crate::core::SdkError;
use futures_core::Stream;
use futures_util::StreamExt;
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// Await `fut` unless `token` fires first, in which case the future is
/// dropped (closing any pending connection) and `Cancelled` is returned.
pub async fn run_cancellable<F, T>(token: Option<&CancellationToken>, fut: F) -> Result<T, SdkError>
where
    F: Future<Output = Result<T, SdkError>>,
{
    let Some(token) = token else {
        return fut.await;
    };
    if token.is_cancelled() {
        return Err(SdkError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SdkError::Cancelled),
        res = fut => res,
    }
}

/// Wrap a fallible stream so that cancelling `token` yields a single
/// `Err(Cancelled)` and then ends the stream.
pub fn cancellable_stream<T>(
    stream: Pin<Box<dyn Stream<Item = Result<T, SdkError>> + Send>>,
    token: Option<CancellationToken>,
) -> Pin<Box<dyn Stream<Item = Result<T, SdkError>> + Send>>
where
    T: Send + 'static,
{
    let Some(token) = token else {
        return stream;
    };
    let mut inner = stream;
    Box::pin(async_stream::stream! {
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    yield Err(SdkError::Cancelled);
                    break;
                }
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    })
}
