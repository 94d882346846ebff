mod alerts;
mod commands;
mod config;
mod countdown;
mod stopwatch;
mod theme;
mod ui;
mod widget;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use timer_core::{Mode, TickOutcome, TickSource};
use tracing_subscriber::EnvFilter;

use crate::alerts::{fire_alert, AlertConfig, AlertSink, TerminalAlerts};
use crate::commands::{parse_command, Command, HELP_TEXT};
use crate::config::{Cli, ConfigError};
use crate::widget::Widget;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("event channel closed")]
    Disconnected,
}

#[derive(Debug)]
enum AppMsg {
    Line(String),
    Pump,
    Quit,
}

#[derive(Debug)]
enum PumpCtl {
    Start(u64),
    Stop,
    Quit,
}

/// Engine-facing end of the pump thread.
struct PumpHandle {
    ctl: Sender<PumpCtl>,
    interval_ms: u64,
    running: bool,
}

impl PumpHandle {
    fn shutdown(&self) {
        self.ctl.send(PumpCtl::Quit).ok();
    }
}

impl TickSource for PumpHandle {
    fn activate(&mut self) {
        if !self.running {
            self.running = true;
            self.ctl.send(PumpCtl::Start(self.interval_ms)).ok();
        }
    }

    fn deactivate(&mut self) {
        if self.running {
            self.running = false;
            self.ctl.send(PumpCtl::Stop).ok();
        }
    }
}

struct App<W: Write> {
    widget: Widget<PumpHandle>,
    alert_config: AlertConfig,
    alerts: Box<dyn AlertSink>,
    out: W,
    help_visible: bool,
    status: Option<String>,
}

impl<W: Write> App<W> {
    fn redraw(&mut self) -> Result<(), AppError> {
        let frame = if self.help_visible {
            ui::draw_help(HELP_TEXT)
        } else {
            ui::draw_widget(&self.widget, self.status.as_deref())
        };
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn handle_pump(&mut self) -> Result<(), AppError> {
        if self.widget.on_tick() == TickOutcome::Completed {
            log::info!("countdown complete");
            self.status = Some("Time's up!".to_string());
            fire_alert(&self.alert_config, self.alerts.as_mut(), "Time's up!");
        }
        if !self.help_visible {
            self.redraw()?;
        }
        Ok(())
    }

    /// Returns false once the user asks to quit.
    fn handle_line(&mut self, line: &str) -> Result<bool, AppError> {
        if self.help_visible {
            self.help_visible = false;
            self.redraw()?;
            return Ok(true);
        }

        self.status = None;
        match parse_command(line) {
            Ok(Command::StartStop) => self.widget.start_stop(),
            Ok(Command::Reset) => self.widget.reset(),
            Ok(Command::Lap) => self.widget.lap(),
            Ok(Command::SwitchMode) => self.widget.switch_mode(),
            Ok(Command::ToggleTheme) => self.widget.toggle_theme(),
            Ok(Command::Edit(field, text)) => {
                if !self.widget.edit_field(field, &text) {
                    self.status = Some(format!("{:?} not changed", field));
                }
            }
            Ok(Command::Help) => self.help_visible = true,
            Ok(Command::Quit) => return Ok(false),
            Err(msg) => self.status = Some(msg),
        }
        self.redraw()?;
        Ok(true)
    }
}

fn pump_thread(ctl: Receiver<PumpCtl>, main: Sender<AppMsg>) {
    let mut interval_ms = timer_core::TICK_MS;
    let mut running = false;

    loop {
        if running {
            thread::sleep(Duration::from_millis(interval_ms));
            if main.send(AppMsg::Pump).is_err() {
                break;
            }
        }

        // Non-blocking when running, blocking when stopped
        let msg = if running {
            ctl.try_recv().ok()
        } else {
            match ctl.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            }
        };

        match msg {
            Some(PumpCtl::Start(ms)) => {
                interval_ms = ms.max(1);
                running = true;
            }
            Some(PumpCtl::Stop) => running = false,
            Some(PumpCtl::Quit) => break,
            None => {}
        }
    }
    log::debug!("pump thread exiting");
}

fn input_thread(main: Sender<AppMsg>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if main.send(AppMsg::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        }
    }
    main.send(AppMsg::Quit).ok();
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = Cli::parse().settings()?;
    log::info!("starting in {:?} mode, tick {} ms", settings.mode, settings.tick_ms);

    let (main_tx, main_rx) = mpsc::channel();
    let (pump_tx, pump_rx) = mpsc::channel();

    let pump_main = main_tx.clone();
    thread::Builder::new()
        .name("pump".into())
        .spawn(move || pump_thread(pump_rx, pump_main))?;
    thread::Builder::new()
        .name("input".into())
        .spawn(move || input_thread(main_tx))?;

    let pump = PumpHandle {
        ctl: pump_tx,
        interval_ms: settings.tick_ms,
        running: false,
    };
    let mut widget = Widget::new(settings.mode, pump, settings.tick_ms, settings.theme);
    if let (Mode::Timer, Some((h, m, s))) = (settings.mode, settings.countdown) {
        widget.engine.set_countdown(h, m, s);
    }

    let mut app = App {
        widget,
        alert_config: settings.alerts,
        alerts: Box::new(TerminalAlerts::new(io::stdout())),
        out: io::stdout(),
        help_visible: false,
        status: None,
    };
    app.redraw()?;

    loop {
        match main_rx.recv().map_err(|_| AppError::Disconnected)? {
            AppMsg::Pump => app.handle_pump()?,
            AppMsg::Line(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            AppMsg::Quit => break,
        }
    }

    app.widget.engine.stop();
    app.widget.engine.ticks().shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertError;
    use timer_core::TICK_MS;

    struct MuteSink;

    impl AlertSink for MuteSink {
        fn ring(&mut self) -> Result<(), AlertError> {
            Err(AlertError::Bell(io::Error::other("muted")))
        }

        fn notify(&mut self, _message: &str) -> Result<(), AlertError> {
            Err(AlertError::Notification(io::Error::other("muted")))
        }
    }

    fn app(mode: Mode) -> (App<Vec<u8>>, Receiver<PumpCtl>) {
        let (tx, rx) = mpsc::channel();
        let pump = PumpHandle {
            ctl: tx,
            interval_ms: TICK_MS,
            running: false,
        };
        let app = App {
            widget: Widget::new(mode, pump, TICK_MS, Default::default()),
            alert_config: AlertConfig::default(),
            alerts: Box::new(MuteSink),
            out: Vec::new(),
            help_visible: false,
            status: None,
        };
        (app, rx)
    }

    #[test]
    fn test_pump_follows_running_state() {
        let (mut app, rx) = app(Mode::Stopwatch);
        assert!(app.handle_line("").unwrap());
        assert!(matches!(rx.try_recv(), Ok(PumpCtl::Start(TICK_MS))));

        // Second start request is a stop, never a duplicate pump
        assert!(app.handle_line("s").unwrap());
        assert!(matches!(rx.try_recv(), Ok(PumpCtl::Stop)));
        assert!(rx.try_recv().is_err());

        app.handle_line("r").unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_completion_stops_pump_despite_alert_failure() {
        let (mut app, rx) = app(Mode::Timer);
        app.handle_line("set s 1").unwrap();
        app.handle_line("").unwrap();
        assert!(matches!(rx.try_recv(), Ok(PumpCtl::Start(_))));

        for _ in 0..100 {
            app.handle_pump().unwrap();
        }
        assert!(app.widget.engine.is_completed());
        assert!(matches!(rx.try_recv(), Ok(PumpCtl::Stop)));
        assert_eq!(app.status.as_deref(), Some("Time's up!"));
    }

    #[test]
    fn test_help_and_quit() {
        let (mut app, _rx) = app(Mode::Stopwatch);
        app.handle_line("?").unwrap();
        assert!(app.help_visible);
        assert!(String::from_utf8_lossy(&app.out).contains("LAPWATCH HELP"));

        // Any line closes help
        app.handle_line("q").unwrap();
        assert!(!app.help_visible);
        assert!(!app.handle_line("q").unwrap());
    }

    #[test]
    fn test_bad_command_reported() {
        let (mut app, _rx) = app(Mode::Stopwatch);
        assert!(app.handle_line("jump").unwrap());
        assert!(app.status.as_deref().unwrap_or("").contains("jump"));
    }
}
