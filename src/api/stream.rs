//! Live log and shell streams.
//!
//! A [`StreamHandle`] owns one WebSocket and the task pumping it. A
//! [`StreamSlot`] holds at most one handle per dialog and closes the old
//! stream before opening a new one. [`StreamSession`] is the text the dialog
//! renders, driven by the [`StreamEvent`]s the pump emits.

use dioxus::logger::tracing;
use futures::{SinkExt, StreamExt};
use regex::Regex;
use reqwest::Url;
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::contexts::{ApiError, ApiResult};

/// How long a closing stream waits for the server's close reply
const CLOSE_GRACE_PERIOD: Duration = Duration::from_secs(2);

static ANSI_ESCAPE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").ok());

/// Remove `ESC [ params letter` control sequences
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    match ANSI_ESCAPE.as_ref() {
        Some(pattern) => pattern.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

/// Text carried by a frame; binary frames are decoded as lossy UTF-8
pub fn frame_text(message: Message) -> Option<String> {
    match message {
        Message::Text(text) => Some(text),
        Message::Binary(data) => Some(String::from_utf8_lossy(&data).into_owned()),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}

/// Append-only text that keeps at most `limit` bytes, dropping the oldest
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    text: String,
    limit: usize,
}

impl TextBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            text: String::new(),
            limit: limit.max(1),
        }
    }

    pub fn push_str(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        if self.text.len() > self.limit {
            let mut cut = self.text.len() - self.limit;
            while !self.text.is_char_boundary(cut) {
                cut += 1;
            }
            self.text.drain(..cut);
        }
    }

    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Logs,
    Terminal,
}

impl StreamKind {
    fn closed_notice(&self) -> &'static str {
        match self {
            StreamKind::Logs => "\nLog stream disconnected\n",
            StreamKind::Terminal => "\r\nConnection closed\r\n",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            StreamKind::Logs => "Failed to connect to log stream",
            StreamKind::Terminal => "Failed to connect to terminal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnected,
}

/// What the pump task reports back to the dialog
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Opened,
    Chunk(String),
    Closed,
    Failed(String),
}

/// Buffer, connection state and error of one dialog
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSession {
    kind: StreamKind,
    target: String,
    buffer: TextBuffer,
    state: ConnectionState,
    error: Option<String>,
}

impl StreamSession {
    pub fn new(kind: StreamKind, buffer_limit: usize) -> Self {
        Self {
            kind,
            target: String::new(),
            buffer: TextBuffer::new(buffer_limit),
            state: ConnectionState::Idle,
            error: None,
        }
    }

    /// Mark a connection attempt to `target` (shown as "pod/container")
    pub fn begin_connect(&mut self, target: impl Into<String>) {
        self.target = target.into();
        self.state = ConnectionState::Connecting;
        self.error = None;
    }

    pub fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Opened => {
                self.state = ConnectionState::Connected;
                match self.kind {
                    StreamKind::Logs => self.buffer.set("Streaming logs...\n"),
                    StreamKind::Terminal => self.buffer.push_str(&format!("Connected to {}\r\n", self.target)),
                }
            }
            StreamEvent::Chunk(text) => self.buffer.push_str(&strip_ansi(&text)),
            StreamEvent::Closed => {
                self.state = ConnectionState::Disconnected;
                self.buffer.push_str(self.kind.closed_notice());
            }
            StreamEvent::Failed(reason) => {
                tracing::warn!("{} stream to {} failed: {}", self.kind_label(), self.target, reason);
                self.state = ConnectionState::Disconnected;
                self.error = Some(self.kind.failure_message().to_string());
            }
        }
    }

    /// Empty the buffer without touching the connection
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Back to a fresh session, as when the dialog closes
    pub fn reset(&mut self) {
        self.target.clear();
        self.buffer.clear();
        self.state = ConnectionState::Idle;
        self.error = None;
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Connected or still connecting; selectors stay locked meanwhile
    pub fn is_active(&self) -> bool {
        matches!(self.state, ConnectionState::Connecting | ConnectionState::Connected)
    }

    fn kind_label(&self) -> &'static str {
        match self.kind {
            StreamKind::Logs => "Log",
            StreamKind::Terminal => "Terminal",
        }
    }
}

enum Command {
    Send(String),
    Close,
}

/// One live WebSocket and the task pumping it
pub struct StreamHandle {
    commands: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl StreamHandle {
    /// Start connecting to `url`. Progress arrives on the returned receiver.
    pub fn open(url: Url) -> (Self, mpsc::UnboundedReceiver<StreamEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(pump(url, command_rx, event_tx));

        (
            Self {
                commands: command_tx,
                task: Some(task),
            },
            event_rx,
        )
    }

    /// Send one line of input followed by a carriage return
    pub fn send_line(&self, line: &str) -> ApiResult<()> {
        self.commands
            .send(Command::Send(format!("{}\r", line)))
            .map_err(|_| ApiError::Stream("stream is closed".to_string()))
    }

    /// Close the socket and wait for the pump task to finish
    pub async fn close(mut self) {
        let _ = self.commands.send(Command::Close);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Stream task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn pump(url: Url, mut commands: mpsc::UnboundedReceiver<Command>, events: mpsc::UnboundedSender<StreamEvent>) {
    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _)) => socket,
        Err(e) => {
            tracing::error!("Failed to open stream {}: {}", url, e);
            let _ = events.send(StreamEvent::Failed(e.to_string()));
            return;
        }
    };

    tracing::info!("Stream opened: {}", url);
    let _ = events.send(StreamEvent::Opened);
    let (mut sink, mut frames) = socket.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(text)) => {
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        let _ = events.send(StreamEvent::Failed(e.to_string()));
                        return;
                    }
                }
                Some(Command::Close) | None => {
                    let _ = sink.close().await;
                    let _ = tokio::time::timeout(CLOSE_GRACE_PERIOD, async {
                        while let Some(Ok(_)) = frames.next().await {}
                    })
                    .await;
                    tracing::info!("Stream closed: {}", url);
                    let _ = events.send(StreamEvent::Closed);
                    return;
                }
            },
            frame = frames.next() => match frame {
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Stream closed by server: {}", url);
                    let _ = events.send(StreamEvent::Closed);
                    return;
                }
                Some(Ok(message)) => {
                    if let Some(text) = frame_text(message) {
                        let _ = events.send(StreamEvent::Chunk(text));
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("Stream {} failed: {}", url, e);
                    let _ = events.send(StreamEvent::Failed(e.to_string()));
                    return;
                }
            },
        }
    }
}

/// Holds the single live stream of a dialog
#[derive(Clone, Default)]
pub struct StreamSlot {
    inner: Arc<Mutex<Option<StreamHandle>>>,
}

impl StreamSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any existing stream, then open a new one to `url`
    pub async fn open(&self, url: Url) -> mpsc::UnboundedReceiver<StreamEvent> {
        let mut current = self.inner.lock().await;
        if let Some(previous) = current.take() {
            previous.close().await;
        }

        let (handle, events) = StreamHandle::open(url);
        *current = Some(handle);
        events
    }

    pub async fn send_line(&self, line: &str) -> ApiResult<()> {
        match self.inner.lock().await.as_ref() {
            Some(handle) => handle.send_line(line),
            None => Err(ApiError::Stream("not connected".to_string())),
        }
    }

    pub async fn close(&self) {
        let handle = self.inner.lock().await.take();
        if let Some(handle) = handle {
            handle.close().await;
        }
    }

    /// Close from a synchronous context such as a component teardown.
    /// Closes gracefully when a runtime is available, otherwise aborts.
    pub fn shutdown(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let slot = self.clone();
                runtime.spawn(async move { slot.close().await });
            }
            Err(_) => {
                if let Ok(mut current) = self.inner.try_lock() {
                    current.take();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    async fn next_event(events: &mut mpsc::UnboundedReceiver<StreamEvent>) -> StreamEvent {
        tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("timed out waiting for a stream event")
            .expect("event channel closed")
    }

    async fn listener() -> (TcpListener, Url) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("ws://{}/stream", listener.local_addr().unwrap())).unwrap();
        (listener, url)
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[32mINFO\x1b[0m ready"), "INFO ready");
        assert_eq!(strip_ansi("\x1b[1;31merror\x1b[m"), "error");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_frame_text_decodes_binary_lossily() {
        assert_eq!(frame_text(Message::Binary(b"hi\n".to_vec())), Some("hi\n".to_string()));
        assert_eq!(frame_text(Message::Binary(vec![0x66, 0xff])), Some("f\u{fffd}".to_string()));
        assert_eq!(frame_text(Message::Ping(vec![])), None);
    }

    #[test]
    fn test_buffer_drops_oldest_text() {
        let mut buffer = TextBuffer::new(8);
        buffer.push_str("abcdef");
        buffer.push_str("ghij");
        assert_eq!(buffer.as_str(), "cdefghij");

        // never splits a multi-byte character
        let mut buffer = TextBuffer::new(4);
        buffer.push_str("aé€");
        assert_eq!(buffer.as_str(), "€");
    }

    #[test]
    fn test_log_session_lifecycle() {
        let mut session = StreamSession::new(StreamKind::Logs, 1024);
        session.begin_connect("web-1/nginx");
        assert!(session.is_active());

        session.apply(StreamEvent::Opened);
        assert_eq!(session.text(), "Streaming logs...\n");
        assert_eq!(session.state(), ConnectionState::Connected);

        session.apply(StreamEvent::Chunk("\x1b[33mGET /\x1b[0m 200\n".to_string()));
        assert_eq!(session.text(), "Streaming logs...\nGET / 200\n");
        assert_eq!(session.buffer().line_count(), 2);

        session.apply(StreamEvent::Closed);
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(session.text().ends_with("\nLog stream disconnected\n"));

        session.clear();
        assert!(session.text().is_empty());
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_terminal_session_messages() {
        let mut session = StreamSession::new(StreamKind::Terminal, 1024);
        session.begin_connect("web-1/nginx");
        session.apply(StreamEvent::Opened);
        session.apply(StreamEvent::Closed);

        assert_eq!(session.text(), "Connected to web-1/nginx\r\n\r\nConnection closed\r\n");
    }

    #[test]
    fn test_failure_sets_single_error() {
        let mut session = StreamSession::new(StreamKind::Terminal, 1024);
        session.begin_connect("web-1/nginx");
        session.apply(StreamEvent::Failed("refused".to_string()));
        session.apply(StreamEvent::Failed("refused again".to_string()));

        assert_eq!(session.error(), Some("Failed to connect to terminal"));
        assert!(!session.is_active());

        session.begin_connect("web-1/nginx");
        assert_eq!(session.error(), None);

        session.reset();
        assert_eq!(session.state(), ConnectionState::Idle);
        assert!(session.text().is_empty());
    }

    #[tokio::test]
    async fn test_stream_receives_frames_and_sends_lines() {
        let (listener, url) = listener().await;
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            ws.send(Message::Binary(b"\x1b[32mhello\x1b[0m\n".to_vec())).await.unwrap();
            while let Some(Ok(message)) = ws.next().await {
                if let Message::Text(text) = message {
                    seen_tx.send(text).unwrap();
                }
            }
        });

        let (handle, mut events) = StreamHandle::open(url);
        assert_eq!(next_event(&mut events).await, StreamEvent::Opened);
        assert_eq!(
            next_event(&mut events).await,
            StreamEvent::Chunk("\x1b[32mhello\x1b[0m\n".to_string())
        );

        handle.send_line("ls -la").unwrap();
        let received = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv()).await.unwrap();
        assert_eq!(received.as_deref(), Some("ls -la\r"));

        handle.close().await;
        assert_eq!(next_event(&mut events).await, StreamEvent::Closed);
    }

    #[tokio::test]
    async fn test_server_close_is_reported() {
        let (listener, url) = listener().await;

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            ws.close(None).await.unwrap();
            while ws.next().await.is_some() {}
        });

        let (_handle, mut events) = StreamHandle::open(url);
        assert_eq!(next_event(&mut events).await, StreamEvent::Opened);
        assert_eq!(next_event(&mut events).await, StreamEvent::Closed);
    }

    #[tokio::test]
    async fn test_unreachable_server_fails() {
        let (listener, url) = listener().await;
        drop(listener);

        let (_handle, mut events) = StreamHandle::open(url);
        assert!(matches!(next_event(&mut events).await, StreamEvent::Failed(_)));
    }

    #[tokio::test]
    async fn test_second_open_closes_first() {
        let (listener, url) = listener().await;
        let (log_tx, mut log_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            for index in 1..=2 {
                let (tcp, _) = listener.accept().await.unwrap();
                let mut ws = accept_async(tcp).await.unwrap();
                log_tx.send(format!("opened-{}", index)).unwrap();

                let log_tx = log_tx.clone();
                tokio::spawn(async move {
                    while let Some(Ok(message)) = ws.next().await {
                        if message.is_close() {
                            log_tx.send(format!("closed-{}", index)).unwrap();
                        }
                    }
                });
            }
        });

        let slot = StreamSlot::new();

        let mut first = slot.open(url.clone()).await;
        assert_eq!(next_event(&mut first).await, StreamEvent::Opened);

        let mut second = slot.open(url).await;
        assert_eq!(next_event(&mut first).await, StreamEvent::Closed);
        assert_eq!(next_event(&mut second).await, StreamEvent::Opened);

        let mut order = Vec::new();
        for _ in 0..3 {
            let entry = tokio::time::timeout(Duration::from_secs(5), log_rx.recv()).await.unwrap();
            order.push(entry.unwrap());
        }
        assert_eq!(order, vec!["opened-1", "closed-1", "opened-2"]);

        slot.close().await;
        assert_eq!(next_event(&mut second).await, StreamEvent::Closed);
    }

    #[tokio::test]
    async fn test_terminal_output_survives_disconnect() {
        let (listener, url) = listener().await;

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            ws.send(Message::Text("/ # ls\r\nbin  etc\r\n".to_string())).await.unwrap();
            while let Some(Ok(message)) = ws.next().await {
                if message.is_close() {
                    break;
                }
            }
        });

        let mut session = StreamSession::new(StreamKind::Terminal, 4096);
        session.begin_connect("web-1/nginx");

        let slot = StreamSlot::new();
        let mut events = slot.open(url).await;
        session.apply(next_event(&mut events).await);
        session.apply(next_event(&mut events).await);

        slot.close().await;
        let closed = next_event(&mut events).await;
        assert_eq!(closed, StreamEvent::Closed);
        session.apply(closed);

        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(
            session.text(),
            "Connected to web-1/nginx\r\n/ # ls\r\nbin  etc\r\n\r\nConnection closed\r\n"
        );
        assert!(!session.is_active());
    }
}

