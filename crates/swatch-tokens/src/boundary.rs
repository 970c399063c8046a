//! Host boundary — the messages the engine exchanges with the design tool.
//!
//! # Writes
//!
//! Writes are fire-and-forget [`HostMessage`]s pushed into a [`HostSink`].
//! The engine never waits on a write. Token values are validated against
//! the hex grammar before they leave; anything else is dropped with a
//! warning so the host never sees a malformed value.
//!
//! # Reads
//!
//! Reads are correlated request/response pairs over channels. A
//! [`TokenReader`] sends a [`TokenQuery`] and blocks on `recv_timeout`
//! until a [`ValueResponse`] matching all four identifying fields arrives.
//! Responses for other queries are discarded. When the timeout elapses the
//! read fails with [`BoundaryError::Timeout`].

use std::io::Write;
use std::sync::LazyLock;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};
use swatch_color::Color;

use crate::BoundaryError;
use crate::model::Mode;

/// Collection every background token lives in.
pub const COLLECTION: &str = "Modes";

/// Prefix of every background group path on the host.
pub const GROUP_PREFIX: &str = "Backgrounds/";

static TOKEN_VALUE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3,4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").ok()
});

/// Whether `value` is a hex color the host accepts as a token value.
#[must_use]
pub fn is_valid_token_value(value: &str) -> bool {
    TOKEN_VALUE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Host path of a group: `Backgrounds/<group>`.
#[must_use]
pub fn group_path(group: &str) -> String {
    format!("{GROUP_PREFIX}{group}")
}

// ---------------------------------------------------------------------------
// Write protocol
// ---------------------------------------------------------------------------

/// One token write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub collection: String,
    pub group: String,
    pub mode: Mode,
    pub variable: String,
    pub value: String,
}

impl TokenUpdate {
    /// A write to `Modes/Backgrounds/<group>`.
    #[must_use]
    pub fn new(group: &str, mode: Mode, variable: &str, value: &str) -> Self {
        Self {
            collection: COLLECTION.to_owned(),
            group: group_path(group),
            mode,
            variable: variable.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Every message the engine sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    UpdateToken(TokenUpdate),
    UpdatePageBackgrounds { color: Color },
    RunFontPairings,
    UpdateNavbar { group: String },
}

/// Destination for host messages.
///
/// Implementations must not block; the engine treats every send as
/// fire-and-forget.
pub trait HostSink {
    fn send(&mut self, message: HostMessage);
}

impl HostSink for Vec<HostMessage> {
    fn send(&mut self, message: HostMessage) {
        self.push(message);
    }
}

impl<S: HostSink + ?Sized> HostSink for &mut S {
    fn send(&mut self, message: HostMessage) {
        (**self).send(message);
    }
}

/// Writes each message as one line of JSON.
///
/// The first failure is kept and every later send becomes a no-op;
/// [`finish`](Self::finish) reports it.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
    error: Option<BoundaryError>,
}

impl<W: Write> JsonLinesSink<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Messages written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the writer, or the first error seen.
    ///
    /// # Errors
    ///
    /// Returns the first encode or I/O failure from any send, or the
    /// flush failure.
    pub fn finish(mut self) -> Result<W, BoundaryError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, message: &HostMessage) -> Result<(), BoundaryError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> HostSink for JsonLinesSink<W> {
    fn send(&mut self, message: HostMessage) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(&message) {
            Ok(()) => self.written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Read protocol
// ---------------------------------------------------------------------------

/// Timing for boundary reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoundaryConfig {
    /// How long a read waits for its matching response.
    #[serde(with = "millis")]
    pub read_timeout: Duration,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(5),
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// A request for one token's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    pub collection: String,
    pub group: String,
    pub mode: Mode,
    pub variable: String,
    pub request_id: u64,
}

/// The host's answer to a [`TokenQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub collection: String,
    pub group: String,
    pub mode: Mode,
    pub variable: String,
    pub value: String,
}

impl ValueResponse {
    /// A `"value"` response for the slot `query` names.
    #[must_use]
    pub fn answering(query: &TokenQuery, value: &str) -> Self {
        Self {
            kind: "value".to_owned(),
            collection: query.collection.clone(),
            group: query.group.clone(),
            mode: query.mode,
            variable: query.variable.clone(),
            value: value.to_owned(),
        }
    }

    /// Whether this response answers `query` (all four fields match).
    #[must_use]
    pub fn answers(&self, query: &TokenQuery) -> bool {
        self.kind == "value"
            && self.collection == query.collection
            && self.group == query.group
            && self.mode == query.mode
            && self.variable == query.variable
    }
}

/// Blocking, timeout-bounded reader of host token values.
#[derive(Debug)]
pub struct TokenReader {
    requests: Sender<TokenQuery>,
    responses: Receiver<ValueResponse>,
    config: BoundaryConfig,
    next_request_id: u64,
}

impl TokenReader {
    pub fn new(requests: Sender<TokenQuery>, responses: Receiver<ValueResponse>) -> Self {
        Self::with_config(requests, responses, BoundaryConfig::default())
    }

    pub const fn with_config(
        requests: Sender<TokenQuery>,
        responses: Receiver<ValueResponse>,
        config: BoundaryConfig,
    ) -> Self {
        Self {
            requests,
            responses,
            config,
            next_request_id: 0,
        }
    }

    /// Read the current value of `variable` in `Backgrounds/<group>`.
    ///
    /// # Errors
    ///
    /// - [`BoundaryError::Disconnected`] if either channel is closed.
    /// - [`BoundaryError::Timeout`] if no matching response arrives in time.
    /// - [`BoundaryError::InvalidValue`] if the host answers with a
    ///   non-hex value.
    pub fn read(
        &mut self,
        group: &str,
        mode: Mode,
        variable: &str,
    ) -> Result<Color, BoundaryError> {
        let query = TokenQuery {
            collection: COLLECTION.to_owned(),
            group: group_path(group),
            mode,
            variable: variable.to_owned(),
            request_id: self.next_request_id,
        };
        self.next_request_id += 1;

        self.requests
            .send(query.clone())
            .map_err(|_| BoundaryError::Disconnected)?;

        let deadline = Instant::now() + self.config.read_timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(response) if response.answers(&query) => {
                    return Color::hex(&response.value)
                        .filter(|_| is_valid_token_value(&response.value))
                        .ok_or(BoundaryError::InvalidValue {
                            variable: query.variable,
                            value: response.value,
                        });
                }
                Ok(other) => {
                    tracing::debug!(
                        group = %other.group,
                        variable = %other.variable,
                        "discarding unmatched value response"
                    );
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(BoundaryError::Timeout {
                        variable: query.variable,
                        waited: self.config.read_timeout,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(BoundaryError::Disconnected),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use pretty_assertions::assert_eq;

    // ── Value grammar ───────────────────────────────────────────────

    #[test]
    fn accepts_every_hex_width() {
        for v in ["#FFF", "#ffff", "#3366CC", "#3366cc80"] {
            assert!(is_valid_token_value(v), "{v}");
        }
    }

    #[test]
    fn rejects_non_hex() {
        for v in ["", "#", "#12", "#12345", "#1234567", "3366CC", "#GGGGGG", "red", "#3366CC "] {
            assert!(!is_valid_token_value(v), "{v:?}");
        }
    }

    // ── Messages ────────────────────────────────────────────────────

    #[test]
    fn update_targets_backgrounds_group() {
        let u = TokenUpdate::new("Primary-Light", Mode::AaDark, "Surface", "#FFFFFF");
        assert_eq!(u.collection, "Modes");
        assert_eq!(u.group, "Backgrounds/Primary-Light");
    }

    #[test]
    fn messages_are_internally_tagged() {
        let update = TokenUpdate::new("Default", Mode::AaLight, "Surface", "#FFFFFF");
        let msg = HostMessage::UpdateToken(update);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "update-token");
        assert_eq!(json["group"], "Backgrounds/Default");
        assert_eq!(json["mode"], "AA-light");

        let page = HostMessage::UpdatePageBackgrounds { color: Color::WHITE };
        let json = serde_json::to_value(page).unwrap();
        assert_eq!(json["type"], "update-page-backgrounds");
        assert_eq!(json["color"], "#FFFFFF");

        let json = serde_json::to_value(HostMessage::RunFontPairings).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "run-font-pairings" }));
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<HostMessage> = Vec::new();
        sink.send(HostMessage::RunFontPairings);
        (&mut sink).send(HostMessage::UpdateNavbar { group: "Default".into() });
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_message() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.send(HostMessage::RunFontPairings);
        sink.send(HostMessage::UpdateNavbar { group: "Default".into() });
        assert_eq!(sink.written(), 2);

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"{"type":"update-navbar","group":"Default"}"#);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_lines_sink_keeps_first_error() {
        let mut sink = JsonLinesSink::new(Broken);
        sink.send(HostMessage::RunFontPairings);
        sink.send(HostMessage::RunFontPairings);
        assert_eq!(sink.written(), 0);
        assert!(sink.finish().is_err());
    }

    // ── Reads ───────────────────────────────────────────────────────

    fn short() -> BoundaryConfig {
        BoundaryConfig {
            read_timeout: Duration::from_millis(200),
        }
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        assert_eq!(BoundaryConfig::default().read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn read_returns_matching_value() {
        let (req_tx, req_rx) = mpsc::channel::<TokenQuery>();
        let (resp_tx, resp_rx) = mpsc::channel();
        let host = thread::spawn(move || {
            let q = req_rx.recv().unwrap();
            resp_tx.send(ValueResponse::answering(&q, "#3366CC")).unwrap();
        });

        let mut reader = TokenReader::with_config(req_tx, resp_rx, short());
        let value = reader.read("Default", Mode::AaLight, "Surface").unwrap();
        assert_eq!(value, Color::rgb8(0x33, 0x66, 0xCC));
        host.join().unwrap();
    }

    #[test]
    fn read_discards_unmatched_responses() {
        let (req_tx, req_rx) = mpsc::channel::<TokenQuery>();
        let (resp_tx, resp_rx) = mpsc::channel();
        let host = thread::spawn(move || {
            let q = req_rx.recv().unwrap();
            let mut wrong_mode = ValueResponse::answering(&q, "#000000");
            wrong_mode.mode = Mode::AaDark;
            let mut wrong_var = ValueResponse::answering(&q, "#000000");
            wrong_var.variable = "Container".into();
            resp_tx.send(wrong_mode).unwrap();
            resp_tx.send(wrong_var).unwrap();
            resp_tx.send(ValueResponse::answering(&q, "#FFFFFF")).unwrap();
        });

        let mut reader = TokenReader::with_config(req_tx, resp_rx, short());
        assert_eq!(reader.read("Default", Mode::AaLight, "Surface").unwrap(), Color::WHITE);
        host.join().unwrap();
    }

    #[test]
    fn read_times_out() {
        let (req_tx, _req_rx) = mpsc::channel::<TokenQuery>();
        let (_resp_tx, resp_rx) = mpsc::channel::<ValueResponse>();
        let mut reader = TokenReader::with_config(
            req_tx,
            resp_rx,
            BoundaryConfig {
                read_timeout: Duration::from_millis(20),
            },
        );
        let err = reader.read("Default", Mode::AaLight, "Surface").unwrap_err();
        assert!(matches!(err, BoundaryError::Timeout { .. }), "{err}");
    }

    #[test]
    fn read_reports_disconnect() {
        let (req_tx, req_rx) = mpsc::channel::<TokenQuery>();
        let (resp_tx, resp_rx) = mpsc::channel::<ValueResponse>();
        drop(resp_tx);
        let mut reader = TokenReader::with_config(req_tx, resp_rx, short());
        let err = reader.read("Default", Mode::AaLight, "Surface").unwrap_err();
        assert!(matches!(err, BoundaryError::Disconnected));

        drop(req_rx);
        let err = reader.read("Default", Mode::AaLight, "Surface").unwrap_err();
        assert!(matches!(err, BoundaryError::Disconnected));
    }

    #[test]
    fn read_rejects_invalid_value() {
        let (req_tx, req_rx) = mpsc::channel::<TokenQuery>();
        let (resp_tx, resp_rx) = mpsc::channel();
        let host = thread::spawn(move || {
            let q = req_rx.recv().unwrap();
            resp_tx.send(ValueResponse::answering(&q, "tomato")).unwrap();
        });

        let mut reader = TokenReader::with_config(req_tx, resp_rx, short());
        let err = reader.read("Default", Mode::AaLight, "Surface").unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidValue { .. }));
        host.join().unwrap();
    }

    #[test]
    fn request_ids_increase() {
        let (req_tx, req_rx) = mpsc::channel::<TokenQuery>();
        let (_resp_tx, resp_rx) = mpsc::channel::<ValueResponse>();
        let mut reader = TokenReader::with_config(
            req_tx,
            resp_rx,
            BoundaryConfig {
                read_timeout: Duration::from_millis(1),
            },
        );
        let _ = reader.read("Default", Mode::AaLight, "Surface");
        let _ = reader.read("Default", Mode::AaLight, "Surface");
        let ids: Vec<_> = req_rx.try_iter().map(|q| q.request_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
