use clap::{Parser, ValueEnum};
use thiserror::Error;
use timer_core::{Mode, TICK_MS};

use crate::alerts::AlertConfig;
use crate::countdown::parse_hms;
use crate::theme::Theme;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid countdown '{0}', expected [[HH:]MM:]SS")]
    Countdown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Stopwatch,
    Timer,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Stopwatch => Mode::Stopwatch,
            ModeArg::Timer => Mode::Timer,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Stopwatch and countdown timer for the terminal")]
pub struct Cli {
    /// Mode to open in
    #[arg(long, value_enum, default_value_t = ModeArg::Stopwatch)]
    pub mode: ModeArg,

    /// Tick quantum and refresh interval in milliseconds
    #[arg(long, default_value_t = TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Preset countdown duration, [[HH:]MM:]SS
    #[arg(long)]
    pub countdown: Option<String>,

    /// Start with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Don't ring the terminal bell when a countdown finishes
    #[arg(long)]
    pub no_bell: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    pub tick_ms: u64,
    pub countdown: Option<(u32, u32, u32)>,
    pub theme: Theme,
    pub alerts: AlertConfig,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let countdown = match &self.countdown {
            Some(text) => {
                Some(parse_hms(text).ok_or_else(|| ConfigError::Countdown(text.clone()))?)
            }
            None => None,
        };
        Ok(Settings {
            mode: self.mode.into(),
            tick_ms: self.tick_ms,
            countdown,
            theme: Theme::from_dark(self.dark),
            alerts: AlertConfig {
                bell: !self.no_bell,
                ..AlertConfig::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lapwatch").chain(args.iter().copied()))
            .expect("args should parse")
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&[]).settings().unwrap();
        assert_eq!(settings.mode, Mode::Stopwatch);
        assert_eq!(settings.tick_ms, TICK_MS);
        assert_eq!(settings.countdown, None);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.alerts.bell);
    }

    #[test]
    fn test_timer_with_countdown() {
        let settings = parse(&["--mode", "timer", "--countdown", "1:30", "--dark", "--no-bell"])
            .settings()
            .unwrap();
        assert_eq!(settings.mode, Mode::Timer);
        assert_eq!(settings.countdown, Some((0, 1, 30)));
        assert_eq!(settings.theme, Theme::Dark);
        assert!(!settings.alerts.bell);
        assert!(settings.alerts.notification);
    }

    #[test]
    fn test_bad_countdown() {
        let err = parse(&["--countdown", "soon"]).settings().unwrap_err();
        assert_eq!(err, ConfigError::Countdown("soon".to_string()));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(Cli::try_parse_from(["lapwatch", "--tick-ms", "0"]).is_err());
    }
}
