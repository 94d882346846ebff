use timer_core::{Mode, TickOutcome, TickSource, TimerEngine};

use crate::countdown::{CountdownInputs, Field};
use crate::theme::Theme;

/// One widget session: the engine plus the state the card keeps around it.
pub struct Widget<T: TickSource> {
    pub engine: TimerEngine<T>,
    pub inputs: CountdownInputs,
    pub theme: Theme,
    tick_ms: u64,
}

impl<T: TickSource> Widget<T> {
    pub fn new(mode: Mode, ticks: T, tick_ms: u64, theme: Theme) -> Self {
        Self {
            engine: TimerEngine::new(mode, ticks),
            inputs: CountdownInputs::new(),
            theme,
            tick_ms,
        }
    }

    /// Start/stop button. A fresh timer takes its duration from the input
    /// fields and refuses to start if they are all empty.
    pub fn start_stop(&mut self) {
        if self.engine.is_running() {
            self.engine.stop();
            log::debug!("stopped at {} ms", self.engine.time_ms());
            return;
        }
        if self.engine.mode() == Mode::Timer && self.engine.time_ms() == 0 {
            if self.inputs.is_zero() {
                log::debug!("no countdown set, not starting");
                return;
            }
            let (h, m, s) = self.inputs.hms();
            self.engine.set_countdown(h, m, s);
        }
        self.engine.start();
        log::debug!("started {:?} at {} ms", self.engine.mode(), self.engine.time_ms());
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.inputs.clear();
    }

    pub fn lap(&mut self) {
        self.engine.record_lap();
    }

    pub fn switch_mode(&mut self) {
        let next = match self.engine.mode() {
            Mode::Stopwatch => Mode::Timer,
            Mode::Timer => Mode::Stopwatch,
        };
        self.engine.set_mode(next);
        self.inputs.clear();
        log::info!("switched to {:?}", next);
    }

    /// Countdown fields are locked while running. Returns whether the edit
    /// was applied.
    pub fn edit_field(&mut self, field: Field, text: &str) -> bool {
        if self.engine.is_running() {
            return false;
        }
        self.inputs.edit(field, text)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Feed one pump beat to the engine.
    pub fn on_tick(&mut self) -> TickOutcome {
        self.engine.tick(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timer_core::TICK_MS;

    fn widget(mode: Mode) -> Widget<()> {
        Widget::new(mode, (), TICK_MS, Theme::Light)
    }

    #[test]
    fn test_stopwatch_session() {
        let mut w = widget(Mode::Stopwatch);
        w.start_stop();
        for _ in 0..123 {
            w.on_tick();
        }
        w.lap();
        w.start_stop();
        assert_eq!(w.engine.time_ms(), 1_230);
        assert_eq!(w.engine.laps(), &[1_230]);

        // Lap button does nothing while stopped
        w.lap();
        assert_eq!(w.engine.laps().len(), 1);

        w.reset();
        assert_eq!(w.engine.time_ms(), 0);
        assert!(w.engine.laps().is_empty());
    }

    #[test]
    fn test_timer_refuses_to_start_empty() {
        let mut w = widget(Mode::Timer);
        w.start_stop();
        assert!(!w.engine.is_running());
    }

    #[test]
    fn test_timer_starts_from_inputs() {
        let mut w = widget(Mode::Timer);
        assert!(w.edit_field(Field::Seconds, "3"));
        w.start_stop();
        assert!(w.engine.is_running());
        assert_eq!(w.engine.countdown_target_ms(), 3_000);

        // Fields are locked while counting down
        assert!(!w.edit_field(Field::Seconds, "9"));

        let mut outcome = TickOutcome::Advanced;
        for _ in 0..300 {
            outcome = w.on_tick();
        }
        assert_eq!(outcome, TickOutcome::Completed);
        assert!(w.engine.is_completed());
        assert_eq!(w.on_tick(), TickOutcome::Ignored);
    }

    #[test]
    fn test_paused_timer_resumes_without_rereading_inputs() {
        let mut w = widget(Mode::Timer);
        w.edit_field(Field::Minutes, "1");
        w.start_stop();
        w.on_tick();
        w.start_stop();
        w.edit_field(Field::Minutes, "5");
        w.start_stop();
        assert_eq!(w.engine.time_ms(), 60_000 - TICK_MS);
    }

    #[test]
    fn test_reset_clears_inputs_and_restores_target() {
        let mut w = widget(Mode::Timer);
        w.edit_field(Field::Minutes, "1");
        w.start_stop();
        for _ in 0..1_800 {
            w.on_tick();
        }
        assert_eq!(w.engine.time_ms(), 42_000);
        w.reset();
        assert_eq!(w.engine.time_ms(), 60_000);
        assert!(w.inputs.is_zero());
    }

    #[test]
    fn test_switch_mode() {
        let mut w = widget(Mode::Stopwatch);
        w.start_stop();
        w.on_tick();
        w.lap();
        w.switch_mode();
        assert_eq!(w.engine.mode(), Mode::Timer);
        assert!(!w.engine.is_running());
        assert_eq!(w.engine.time_ms(), 0);
        assert!(w.engine.laps().is_empty());

        w.edit_field(Field::Hours, "2");
        w.switch_mode();
        assert_eq!(w.engine.mode(), Mode::Stopwatch);
        assert!(w.inputs.is_zero());
    }

    #[test]
    fn test_toggle_theme() {
        let mut w = widget(Mode::Stopwatch);
        w.toggle_theme();
        assert_eq!(w.theme, Theme::Dark);
    }
}
