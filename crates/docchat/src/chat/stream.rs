//! Streaming responder
//!
//! Re-emits an already-complete answer as an ordered sequence of paced token
//! events for perceived incremental delivery. The answer content is fixed
//! before streaming starts; this component only paces redelivery. Once
//! started, emission runs to completion even if nobody is listening.

use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::Error;
use crate::types::response::{ChatResponse, StreamEvent};

/// Split an answer into small multi-word fragments
///
/// Words, single spaces, and newlines are tokenized separately, then grouped
/// into fragments of roughly `words_per_fragment` words with their
/// surrounding whitespace. Concatenating the fragments reproduces the answer
/// exactly.
pub fn split_into_fragments(text: &str, words_per_fragment: usize) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch == ' ' || ch == '\n' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            words.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut fragments = Vec::new();
    let mut fragment = String::new();
    let mut count = 0;

    for word in words {
        let is_separator = word == " " || word == "\n";
        fragment.push_str(&word);
        if !is_separator {
            count += 1;
        }
        if count >= words_per_fragment {
            fragments.push(std::mem::take(&mut fragment));
            count = 0;
        }
    }
    if !fragment.is_empty() {
        fragments.push(fragment);
    }

    fragments
}

/// Emit a completed answer as a paced event stream
///
/// One `Token` event per fragment with `delay` between events, then exactly
/// one terminal `Done` event. The emitting task holds its worker for the
/// whole emission and ignores receiver disconnection.
pub fn stream_events(
    response: ChatResponse,
    delay: Duration,
    words_per_fragment: usize,
) -> impl Stream<Item = StreamEvent> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        for fragment in split_into_fragments(&response.response, words_per_fragment) {
            let _ = tx.send(StreamEvent::Token { content: fragment }).await;
            tokio::time::sleep(delay).await;
        }

        let _ = tx
            .send(StreamEvent::Done {
                response: response.response,
                session_id: response.session_id,
                answer_found: response.answer_found,
                citations: response.citations,
            })
            .await;
    });

    ReceiverStream::new(rx)
}

/// Single-event stream for a failure before any token was emitted
pub fn error_stream(error: &Error) -> impl Stream<Item = StreamEvent> {
    tokio_stream::once(StreamEvent::Error {
        message: error.to_string(),
        code: error.code().to_string(),
    })
}
