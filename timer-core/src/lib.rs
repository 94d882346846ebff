//! Pure timing logic library with no platform dependencies.
//!
//! The engine never reads a clock. It is advanced by an external periodic
//! trigger calling [`TimerEngine::tick`], and it tells that trigger when to
//! run through the [`TickSource`] it owns.

use std::fmt;

/// Reference tick quantum, also the pump interval.
pub const TICK_MS: u64 = 10;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    #[default]
    Stopwatch,
    Timer,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Idle,
    Running,
    Completed,
}

/// Result of feeding one tick to the engine.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Ignored,
    Advanced,
    /// The countdown just reached zero. Returned once per run.
    Completed,
}

/// The periodic trigger that drives [`TimerEngine::tick`].
///
/// `activate` is called when the engine starts running and `deactivate` when
/// it stops for any reason, so a source never outlives the run it serves.
pub trait TickSource {
    fn activate(&mut self);
    fn deactivate(&mut self);
}

/// No-op source for callers that tick the engine by hand.
impl TickSource for () {
    fn activate(&mut self) {}
    fn deactivate(&mut self) {}
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct EngineState {
    /// Elapsed time in stopwatch mode, remaining time in timer mode.
    pub time_ms: u64,
    pub mode: Mode,
    pub is_running: bool,
    pub is_completed: bool,
    pub laps: Vec<u64>,
    pub countdown_target_ms: u64,
}

pub struct TimerEngine<T: TickSource> {
    state: EngineState,
    ticks: T,
}

impl<T: TickSource> TimerEngine<T> {
    pub fn new(mode: Mode, ticks: T) -> Self {
        Self {
            state: EngineState {
                mode,
                ..EngineState::default()
            },
            ticks,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn time_ms(&self) -> u64 {
        self.state.time_ms
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed
    }

    pub fn laps(&self) -> &[u64] {
        &self.state.laps
    }

    pub fn countdown_target_ms(&self) -> u64 {
        self.state.countdown_target_ms
    }

    pub fn status(&self) -> TimerState {
        if self.state.is_running {
            TimerState::Running
        } else if self.state.is_completed {
            TimerState::Completed
        } else {
            TimerState::Idle
        }
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    /// Begin counting. A timer with nothing left to count down stays idle.
    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        if self.state.mode == Mode::Timer && self.state.time_ms == 0 {
            return;
        }
        self.state.is_running = true;
        self.state.is_completed = false;
        self.ticks.activate();
    }

    pub fn stop(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        self.ticks.deactivate();
    }

    /// Stop, drop all laps and rewind to zero (stopwatch) or to the last
    /// configured countdown (timer).
    pub fn reset(&mut self) {
        self.stop();
        self.state.is_completed = false;
        self.state.laps.clear();
        self.state.time_ms = match self.state.mode {
            Mode::Stopwatch => 0,
            Mode::Timer => self.state.countdown_target_ms,
        };
    }

    /// Switch counting direction. Always leaves the engine idle and rewound,
    /// with no countdown configured.
    pub fn set_mode(&mut self, mode: Mode) {
        self.stop();
        self.state.mode = mode;
        self.state.countdown_target_ms = 0;
        self.reset();
    }

    /// Configure the countdown and load it into the display value.
    ///
    /// Permitted while running, in which case the display jumps.
    pub fn set_countdown(&mut self, hours: u32, minutes: u32, seconds: u32) {
        let total_secs = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
        self.state.countdown_target_ms = total_secs * MS_PER_SECOND;
        self.state.time_ms = self.state.countdown_target_ms;
        self.state.is_completed = false;
    }

    pub fn record_lap(&mut self) {
        if self.state.mode == Mode::Stopwatch && self.state.is_running {
            self.state.laps.push(self.state.time_ms);
        }
    }

    pub fn tick(&mut self, delta_ms: u64) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Ignored;
        }
        match self.state.mode {
            Mode::Stopwatch => {
                self.state.time_ms = self.state.time_ms.saturating_add(delta_ms);
                TickOutcome::Advanced
            }
            Mode::Timer => {
                if self.state.time_ms <= delta_ms {
                    self.state.time_ms = 0;
                    self.state.is_running = false;
                    self.state.is_completed = true;
                    self.ticks.deactivate();
                    TickOutcome::Completed
                } else {
                    self.state.time_ms -= delta_ms;
                    TickOutcome::Advanced
                }
            }
        }
    }
}

/// Display fields of a duration. Sub-second precision is truncated to
/// hundredths, never rounded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeFields {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub hundredths: u64,
}

impl TimeFields {
    /// Hours, minutes, seconds and hundredths, each at least two digits.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
            format!("{:02}", self.hundredths),
        ]
    }

    pub fn hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for TimeFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hours, self.minutes, self.seconds, self.hundredths
        )
    }
}

pub fn format_time(ms: u64) -> TimeFields {
    TimeFields {
        hours: ms / MS_PER_HOUR,
        minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        hundredths: (ms % MS_PER_SECOND) / 10,
    }
}

/// Format milliseconds as "HH:MM:SS"
pub fn format_hms(ms: u64) -> String {
    format_time(ms).hms()
}

/// Format milliseconds as "HH:MM:SS.cs" (centiseconds)
pub fn format_hms_cs(ms: u64) -> String {
    format_time(ms).to_string()
}
