// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports plain text and JSON lines; every executed command is echoed.

use serde::Serialize;
use std::time::Instant;

use crate::command::Command;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Plain lines, suitable for build logs
    #[default]
    Normal,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print an informational message.
    pub fn progress(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message}"),
            OutputMode::Json => self.emit_stdout("progress", message),
        }
    }

    /// Echo a command line before it runs.
    pub fn trace(&self, command: &Command) {
        match self.mode {
            OutputMode::Normal => println!("+ {command}"),
            OutputMode::Json => self.emit_stdout("exec", &command.to_string()),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Json => {
                if let Some(json) = self.event_json("warning", message) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Json => self.emit_stdout("success", message),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Error: {message}"),
            OutputMode::Json => {
                if let Some(json) = self.event_json("error", message) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_stdout(&self, event: &str, message: &str) {
        if let Some(json) = self.event_json(event, message) {
            println!("{json}");
        }
    }

    fn event_json(&self, event: &str, message: &str) -> Option<String> {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.start_time.map(|_| self.elapsed_secs()),
        };
        serde_json::to_string(&event).ok()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(OutputMode::Normal)
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
