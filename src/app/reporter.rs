use crate::app::models::EmitEvent;
use std::io::{self, Write};

/// Receives emitter progress events synchronously, in order.
pub trait EventSink {
    fn on_event(&mut self, event: &EmitEvent);
}

/// Prints the operator-facing progress lines.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(event: &EmitEvent) -> Option<String> {
        match event {
            EmitEvent::RunStarted { total } => Some(format!("Creating {} files...", total)),
            EmitEvent::EntryStarted { path } => {
                log::debug!("Starting {}", path.display());
                None
            }
            EmitEvent::EntryWritten { path, bytes } => {
                log::debug!("Wrote {} bytes to {}", bytes, path.display());
                Some(format!("✓ {}", path.display()))
            }
            EmitEvent::RunCompleted { .. } => Some("Done!".to_string()),
            EmitEvent::RunFailed { path, error } => {
                log::debug!("Stopped at {}: {}", path.display(), error);
                None
            }
        }
    }
}

impl<W: Write> EventSink for ConsoleReporter<W> {
    fn on_event(&mut self, event: &EmitEvent) {
        let Some(line) = Self::line(event) else {
            return;
        };
        if let Err(err) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            log::warn!("Failed to write progress line: {}", err);
        }
    }
}

/// Keeps every event for later inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct EventRecorder {
    pub events: Vec<EmitEvent>,
}

#[cfg(test)]
impl EventSink for EventRecorder {
    fn on_event(&mut self, event: &EmitEvent) {
        self.events.push(event.clone());
    }
}
