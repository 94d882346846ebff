use std::io::Write;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("couldn't ring bell: {0}")]
    Bell(#[source] std::io::Error),
    #[error("couldn't post notification: {0}")]
    Notification(#[source] std::io::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlertConfig {
    pub bell: bool,
    pub notification: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bell: true,
            notification: true,
        }
    }
}

/// Where completion alerts go.
pub trait AlertSink {
    fn ring(&mut self) -> Result<(), AlertError>;
    fn notify(&mut self, message: &str) -> Result<(), AlertError>;
}

/// Rings the terminal bell and prints the notification on its own line.
pub struct TerminalAlerts<W: Write> {
    out: W,
}

impl<W: Write> TerminalAlerts<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AlertSink for TerminalAlerts<W> {
    fn ring(&mut self) -> Result<(), AlertError> {
        self.out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush())
            .map_err(AlertError::Bell)
    }

    fn notify(&mut self, message: &str) -> Result<(), AlertError> {
        writeln!(self.out, "*** {} ***", message)
            .and_then(|_| self.out.flush())
            .map_err(AlertError::Notification)
    }
}

/// Fire every enabled alert. Failures are logged and dropped: by the time an
/// alert fires the countdown has already completed.
pub fn fire_alert(config: &AlertConfig, sink: &mut dyn AlertSink, message: &str) {
    if config.bell {
        if let Err(e) = sink.ring() {
            log::warn!("alert bell failed: {}", e);
        }
    }
    if config.notification {
        if let Err(e) = sink.notify(message) {
            log::warn!("alert notification failed: {}", e);
        }
    }
}
