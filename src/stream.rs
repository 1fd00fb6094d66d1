//! Streaming decoder for the daily price snapshot.
//!
//! `AllPricesToday.json` is far too large to materialize, so this module
//! walks the byte stream one top-level entry at a time: it expects the
//! `{ "meta": ..., "data": { uuid: record, ... } }` envelope, skips
//! everything outside `data` without buffering, and yields each
//! `(card uuid, raw price record)` pair as soon as that record's bytes are
//! complete. Peak memory is bounded by one record regardless of document
//! size.
//!
//! The sequence is pull-based and non-restartable: nothing past the current
//! entry is parsed until the caller asks for it, and dropping the stream
//! drops the underlying connection.

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::io::StreamReader;

use crate::error::{IngestError, Result};

const BUF_READER_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// PriceStream
// ---------------------------------------------------------------------------

/// Lazy, single-pass sequence of `(card uuid, raw price record)` pairs.
pub struct PriceStream<R> {
    reader: R,
    phase: Phase,
    value_buf: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Envelope `{` not yet consumed.
    Init,
    /// Inside the top-level object, before a key, `,`, or `}`.
    Top,
    /// Inside the `data` object, before a uuid key, `,`, or `}`.
    Data,
    Done,
}

impl<R: AsyncBufRead + Unpin> PriceStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            phase: Phase::Init,
            value_buf: Vec::new(),
        }
    }

    /// Pull the next `(uuid, record)` pair.
    ///
    /// `Some(Err(MalformedRecord))` covers a single undecodable record; the
    /// stream remains usable and the caller decides whether to skip or halt.
    /// Any envelope-level failure yields `Some(Err(MalformedPayload))` and
    /// fuses the stream. `None` means clean exhaustion.
    pub async fn next_entry(&mut self) -> Option<Result<(String, Value)>> {
        match self.advance().await {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                if !e.is_record_level() {
                    self.phase = Phase::Done;
                }
                Some(Err(e))
            }
        }
    }

    async fn advance(&mut self) -> Result<Option<(String, Value)>> {
        loop {
            match self.phase {
                Phase::Init => {
                    skip_ws(&mut self.reader).await?;
                    expect_byte(&mut self.reader, b'{', "price snapshot is not a JSON object")
                        .await?;
                    self.phase = Phase::Top;
                }
                Phase::Top => match next_significant(&mut self.reader).await? {
                    b'}' => {
                        self.reader.consume(1);
                        self.phase = Phase::Done;
                        return Ok(None);
                    }
                    b',' => self.reader.consume(1),
                    b'"' => {
                        let key = read_string_token(&mut self.reader).await?;
                        skip_ws(&mut self.reader).await?;
                        expect_byte(&mut self.reader, b':', "expected ':' after key").await?;
                        skip_ws(&mut self.reader).await?;
                        if key == "data" {
                            expect_byte(
                                &mut self.reader,
                                b'{',
                                "'data' value is not an object",
                            )
                            .await?;
                            self.phase = Phase::Data;
                        } else {
                            // meta and any future siblings: walk past, no buffering
                            copy_value(&mut self.reader, &mut self.value_buf, false).await?;
                        }
                    }
                    other => {
                        return Err(envelope_err(format!(
                            "unexpected byte {:?} in price envelope",
                            other as char
                        )))
                    }
                },
                Phase::Data => match next_significant(&mut self.reader).await? {
                    b'}' => {
                        self.reader.consume(1);
                        self.phase = Phase::Top;
                    }
                    b',' => self.reader.consume(1),
                    b'"' => {
                        let uuid = read_string_token(&mut self.reader).await?;
                        skip_ws(&mut self.reader).await?;
                        expect_byte(&mut self.reader, b':', "expected ':' after card uuid")
                            .await?;
                        skip_ws(&mut self.reader).await?;
                        self.value_buf.clear();
                        copy_value(&mut self.reader, &mut self.value_buf, true).await?;
                        return match serde_json::from_slice(&self.value_buf) {
                            Ok(value) => Ok(Some((uuid, value))),
                            Err(e) => Err(IngestError::MalformedRecord(format!(
                                "price record for {}: {}",
                                uuid, e
                            ))),
                        };
                    }
                    other => {
                        return Err(envelope_err(format!(
                            "unexpected byte {:?} in price data object",
                            other as char
                        )))
                    }
                },
                Phase::Done => return Ok(None),
            }
        }
    }
}

/// Adapt a provider byte stream (e.g. `reqwest::Response::bytes_stream`) into
/// a buffered `PriceStream`.
pub fn from_byte_stream<S>(stream: S) -> PriceStream<impl AsyncBufRead + Unpin>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send + 'static,
{
    let reader = StreamReader::new(Box::pin(stream.map_err(std::io::Error::other)));
    PriceStream::new(BufReader::with_capacity(BUF_READER_SIZE, reader))
}

// ---------------------------------------------------------------------------
// Byte-level scanning helpers
// ---------------------------------------------------------------------------

fn envelope_err(msg: impl Into<String>) -> IngestError {
    IngestError::MalformedPayload(msg.into())
}

async fn peek_byte<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<u8>> {
    let buf = reader.fill_buf().await?;
    Ok(buf.first().copied())
}

async fn skip_ws<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<()> {
    while let Some(b) = peek_byte(reader).await? {
        if !b.is_ascii_whitespace() {
            break;
        }
        reader.consume(1);
    }
    Ok(())
}

/// Skip whitespace and peek the next significant byte without consuming it.
async fn next_significant<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<u8> {
    skip_ws(reader).await?;
    peek_byte(reader)
        .await?
        .ok_or_else(|| envelope_err("unexpected end of price stream"))
}

async fn expect_byte<R: AsyncBufRead + Unpin>(reader: &mut R, want: u8, msg: &str) -> Result<()> {
    match peek_byte(reader).await? {
        Some(b) if b == want => {
            reader.consume(1);
            Ok(())
        }
        _ => Err(envelope_err(msg)),
    }
}

/// Read a JSON string token (opening quote expected next) and decode its
/// escapes via serde_json.
async fn read_string_token<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::with_capacity(48);
    copy_string(reader, &mut raw, true).await?;
    serde_json::from_slice(&raw).map_err(|e| envelope_err(format!("invalid object key: {}", e)))
}

/// Copy one complete JSON string, including quotes, honoring escapes.
async fn copy_string<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    out: &mut Vec<u8>,
    keep: bool,
) -> Result<()> {
    expect_byte(reader, b'"', "expected string").await?;
    if keep {
        out.push(b'"');
    }
    let mut escaped = false;
    loop {
        let b = peek_byte(reader)
            .await?
            .ok_or_else(|| envelope_err("unterminated string in price stream"))?;
        reader.consume(1);
        if keep {
            out.push(b);
        }
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return Ok(());
        }
    }
}

/// Copy one complete JSON value (object, array, string, or scalar). With
/// `keep == false` the value is walked but not retained.
async fn copy_value<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    out: &mut Vec<u8>,
    keep: bool,
) -> Result<()> {
    match peek_byte(reader)
        .await?
        .ok_or_else(|| envelope_err("unexpected end of price stream"))?
    {
        b'"' => copy_string(reader, out, keep).await,
        b'{' | b'[' => copy_container(reader, out, keep).await,
        _ => copy_scalar(reader, out, keep).await,
    }
}

async fn copy_container<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    out: &mut Vec<u8>,
    keep: bool,
) -> Result<()> {
    let mut depth: usize = 0;
    loop {
        let b = peek_byte(reader)
            .await?
            .ok_or_else(|| envelope_err("unterminated container in price stream"))?;
        match b {
            b'"' => {
                copy_string(reader, out, keep).await?;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| envelope_err("unbalanced brackets in price stream"))?;
            }
            _ => {}
        }
        reader.consume(1);
        if keep {
            out.push(b);
        }
        if depth == 0 {
            return Ok(());
        }
    }
}

async fn copy_scalar<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    out: &mut Vec<u8>,
    keep: bool,
) -> Result<()> {
    loop {
        match peek_byte(reader).await? {
            None => return Ok(()),
            Some(b) if b == b',' || b == b'}' || b == b']' || b.is_ascii_whitespace() => {
                return Ok(())
            }
            Some(b) => {
                reader.consume(1);
                if keep {
                    out.push(b);
                }
            }
        }
    }
}
