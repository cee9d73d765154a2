use crate::backend_client::{ByteStream, QueryError};
use futures::stream::{self, BoxStream};
use futures::StreamExt;

/// Decoded text fragments of a streamed answer. Finite and single-pass.
pub type FragmentStream = BoxStream<'static, Result<String, QueryError>>;

/// Incremental UTF-8 decoder that carries an incomplete code point over to the next chunk.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut decoded = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    self.pending.clear();
                    break;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    decoded.push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match err.error_len() {
                        Some(invalid) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + invalid);
                        }
                        None => {
                            self.pending.drain(..valid_up_to);
                            break;
                        }
                    }
                }
            }
        }

        decoded
    }

    /// Whatever is still buffered once the body has ended.
    pub fn flush(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}

/// Turns a raw body into text fragments. Empty chunks produce nothing, and the
/// stream stops at the first transport error.
pub fn text_fragments(bytes: ByteStream) -> FragmentStream {
    stream::unfold(Some((bytes, Utf8Decoder::new())), |state| async move {
        let (mut bytes, mut decoder) = state?;
        loop {
            match bytes.next().await {
                Some(Ok(chunk)) => {
                    let text = decoder.decode(&chunk);
                    if !text.is_empty() {
                        return Some((Ok(text), Some((bytes, decoder))));
                    }
                }
                Some(Err(err)) => return Some((Err(err), None)),
                None => {
                    let tail = decoder.flush();
                    if tail.is_empty() {
                        return None;
                    }
                    return Some((Ok(tail), None));
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn body(chunks: Vec<Result<&'static str, QueryError>>) -> ByteStream {
        stream::iter(
            chunks
                .into_iter()
                .map(|chunk| chunk.map(|text| Bytes::from_static(text.as_bytes())))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    #[test]
    fn decoder_holds_split_code_point() {
        let mut decoder = Utf8Decoder::new();
        let snowman = "☃".as_bytes();
        assert_eq!(decoder.decode(&snowman[..1]), "");
        assert_eq!(decoder.decode(&snowman[1..]), "☃");
        assert_eq!(decoder.flush(), "");
    }

    #[test]
    fn decoder_replaces_invalid_bytes() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"ok\xffok"), "ok\u{FFFD}ok");
    }

    #[test]
    fn decoder_flushes_truncated_tail_lossily() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(&"é".as_bytes()[..1]), "");
        assert_eq!(decoder.flush(), "\u{FFFD}");
    }

    #[tokio::test]
    async fn fragments_keep_arrival_order() {
        let fragments: Vec<_> = text_fragments(body(vec![Ok("Hel"), Ok("lo, "), Ok("world")]))
            .collect()
            .await;
        let fragments: Vec<String> = fragments.into_iter().map(Result::unwrap).collect();
        assert_eq!(fragments, vec!["Hel", "lo, ", "world"]);
        assert_eq!(fragments.concat(), "Hello, world");
    }

    #[tokio::test]
    async fn empty_chunks_are_skipped() {
        let fragments: Vec<_> = text_fragments(body(vec![Ok(""), Ok("a"), Ok(""), Ok("b")]))
            .collect()
            .await;
        assert_eq!(fragments.len(), 2);
    }

    #[tokio::test]
    async fn stream_ends_after_error() {
        let broken = QueryError::Connection {
            reason: "reset".to_string(),
        };
        let fragments: Vec<_> = text_fragments(body(vec![
            Ok("partial"),
            Err(broken.clone()),
            Ok("never seen"),
        ]))
        .collect()
        .await;
        assert_eq!(fragments, vec![Ok("partial".to_string()), Err(broken)]);
    }
}
