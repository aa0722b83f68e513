use crate::streaming_sse::{SseDecoder, SseEvent};
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

/// Decode a byte stream into SSE events.
///
/// The first transport error is yielded and ends the stream; a trailing
/// unterminated event is flushed when the source ends cleanly.
pub fn sse_events<S, E>(bytes: S) -> impl Stream<Item = Result<SseEvent, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    async_stream::try_stream! {
        let mut decoder = SseDecoder::new();
        futures_util::pin_mut!(bytes);
        while let Some(chunk) = bytes.next().await {
            let chunk = chunk?;
            for ev in decoder.push(&chunk) {
                yield ev;
            }
        }
        for ev in decoder.finish() {
            yield ev;
        }
    }
}
