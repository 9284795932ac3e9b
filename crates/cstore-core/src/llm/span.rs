use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;

use cstore_types::llm::{LlmError, StreamEvent};

use super::client::CompletionStream;

/// Stream wrapper that enters a tracing span on each poll.
///
/// Keeps the `gen_ai.chat` span active for the lifetime of the stream so
/// events logged by the provider adapter nest under it.
pub struct StreamInSpan {
    inner: CompletionStream,
    span: tracing::Span,
}

impl StreamInSpan {
    pub fn new(inner: CompletionStream, span: tracing::Span) -> Self {
        Self { inner, span }
    }
}

impl Stream for StreamInSpan {
    type Item = Result<StreamEvent, LlmError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // Both fields are Unpin (`inner` is already boxed).
        let this = self.get_mut();
        let _enter = this.span.enter();
        this.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_stream_in_span_forwards_items() {
        let inner: CompletionStream = Box::pin(async_stream::stream! {
            yield Ok(StreamEvent::TextDelta { text: "a".to_string() });
            yield Ok(StreamEvent::Done);
        });
        let mut wrapped = StreamInSpan::new(inner, tracing::info_span!("test"));

        assert_eq!(
            wrapped.next().await.unwrap().unwrap(),
            StreamEvent::TextDelta {
                text: "a".to_string()
            }
        );
        assert_eq!(wrapped.next().await.unwrap().unwrap(), StreamEvent::Done);
        assert!(wrapped.next().await.is_none());
    }
}
