//! Structured logging with page context.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::now_micros;
use crate::SessionTag;

/// Extra key/value data on an entry, kept sorted by key.
pub type Fields = BTreeMap<String, Value>;

/// Severity of an entry; ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// One emitted record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Page-load tag for correlation.
    pub session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(flatten)]
    pub fields: Fields,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// One-line JSON; falls back to the bare message if encoding fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] component: message (Nus) | k=v k=v`
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] ", self.level);
        if let Some(component) = &self.component {
            line.push_str(component);
            line.push_str(": ");
        }
        line.push_str(&self.message);

        if let Some(us) = self.elapsed_us {
            line.push_str(&format!(" ({}us)", us));
        }

        if !self.fields.is_empty() {
            let pairs: Vec<String> = self
                .fields
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            line.push_str(" | ");
            line.push_str(&pairs.join(" "));
        }

        line
    }
}

/// How entries are rendered before they are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Human,
}

/// Where entries go.
#[derive(Debug, Clone, Default)]
enum Sink {
    /// Stderr natively, the browser console under `web`.
    #[default]
    Platform,
    /// Kept in memory for inspection.
    Capture(Rc<RefCell<Vec<LogEntry>>>),
}

/// Logger bound to one page load.
///
/// Clones share the session tag, start time and sink.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    session: SessionTag,
    component: Option<String>,
    start_us: Option<u64>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Sink,
}

impl StructuredLogger {
    pub fn new(session: SessionTag) -> Self {
        Self {
            session,
            component: None,
            start_us: now_micros(),
            min_level: LogLevel::default(),
            format: LogFormat::default(),
            sink: Sink::Platform,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Keep entries in memory instead of writing them.
    ///
    /// Returns the logger and a handle to the captured entries.
    pub fn capturing(mut self) -> (Self, Rc<RefCell<Vec<LogEntry>>>) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        self.sink = Sink::Capture(Rc::clone(&buffer));
        (self, buffer)
    }

    /// A logger for another component of the same page.
    pub fn for_component(&self, component: impl Into<String>) -> Self {
        self.clone().with_component(component)
    }

    pub fn debug(&self, message: &str) {
        self.at(LogLevel::Debug, message).emit();
    }

    pub fn info(&self, message: &str) {
        self.at(LogLevel::Info, message).emit();
    }

    pub fn warn(&self, message: &str) {
        self.at(LogLevel::Warn, message).emit();
    }

    /// Start an entry at `level`; nothing is written until [`LogBuilder::emit`].
    pub fn at(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: Fields::new(),
        }
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Warn, message)
    }

    /// Whether entries at `level` would be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn session(&self) -> &SessionTag {
        &self.session
    }

    /// Microseconds since this logger was created, when a clock exists.
    pub fn elapsed_us(&self) -> Option<u64> {
        let start = self.start_us?;
        now_micros().map(|now| now.saturating_sub(start))
    }

    fn write(&self, level: LogLevel, message: String, fields: Fields) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message,
            session: self.session.to_string(),
            component: self.component.clone(),
            fields,
            elapsed_us: self.elapsed_us(),
        };

        match &self.sink {
            Sink::Capture(buffer) => buffer.borrow_mut().push(entry),
            Sink::Platform => {
                let line = match self.format {
                    LogFormat::Json => entry.to_json(),
                    LogFormat::Human => entry.to_human(),
                };
                emit(level, &line);
            }
        }
    }
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{}", line);
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Error => web_sys::console::error_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Info => web_sys::console::info_1(&value),
        LogLevel::Debug | LogLevel::Trace => web_sys::console::debug_1(&value),
    }
}

/// An entry under construction.
#[must_use = "entries are only written by `emit`"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: Fields,
}

/// Top-level keys of a serialized [`LogEntry`].
const RESERVED_KEYS: [&str; 5] = ["level", "message", "session", "component", "elapsed_us"];

/// Field key as written; reserved names get a `field_` prefix.
fn field_key(key: &str) -> String {
    if RESERVED_KEYS.contains(&key) {
        format!("field_{}", key)
    } else {
        key.to_string()
    }
}

impl LogBuilder<'_> {
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field_key(key), Value::String(value.into()));
        self
    }

    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(field_key(key), Value::from(value));
        self
    }

    pub fn emit(self) {
        self.logger.write(self.level, self.message, self.fields);
    }
}
