use std::fmt::Write;

use timer_core::{format_hms, format_hms_cs, Mode, TickSource};

use crate::countdown::Field;
use crate::stopwatch::lap_lines;
use crate::theme::RESET;
use crate::widget::Widget;

const CLEAR: &str = "\x1b[2J\x1b[H";

pub fn clear_screen(out: &mut String) {
    out.push_str(CLEAR);
}

pub fn draw_widget<T: TickSource>(widget: &Widget<T>, status: Option<&str>) -> String {
    let palette = widget.theme.palette();
    let engine = widget.engine.state();
    let mut out = String::new();
    clear_screen(&mut out);
    // RESET drops the background too, so every segment closes back onto it
    let end = [RESET, palette.base].concat();
    out.push_str(palette.base);

    let title = match engine.mode {
        Mode::Stopwatch => "Stopwatch",
        Mode::Timer => "Timer",
    };
    writeln!(out, "{}{}{}", palette.text, title, end).ok();
    out.push('\n');

    let time_color = if engine.is_completed { palette.accent } else { palette.text };
    match engine.mode {
        Mode::Stopwatch => {
            writeln!(out, "  {}{}{}", time_color, format_hms_cs(engine.time_ms), end).ok();
            let laps = lap_lines(&engine.laps);
            if !laps.is_empty() {
                out.push('\n');
                for line in laps {
                    writeln!(out, "  {}{}{}", palette.muted, line, end).ok();
                }
            }
        }
        Mode::Timer => {
            writeln!(out, "  {}{}{}", time_color, format_hms(engine.time_ms), end).ok();
            out.push('\n');
            let lock = if engine.is_running { " (locked)" } else { "" };
            writeln!(
                out,
                "  {}{} : {} : {}{}{}",
                palette.muted,
                widget.inputs.display(Field::Hours),
                widget.inputs.display(Field::Minutes),
                widget.inputs.display(Field::Seconds),
                lock,
                end
            )
            .ok();
            writeln!(out, "  {}Hours Min  Sec{}", palette.muted, end).ok();
        }
    }

    out.push('\n');
    let start_label = if engine.is_running { "[s] Stop" } else { "[s] Start" };
    let mut controls = format!("{}  [r] Reset", start_label);
    if engine.mode == Mode::Stopwatch && engine.is_running {
        controls.push_str("  [l] Lap");
    }
    controls.push_str("  [m] Mode  [?] Help");
    writeln!(out, "{}{}{}", palette.text, controls, end).ok();

    if let Some(msg) = status {
        writeln!(out, "{}{}{}", palette.accent, msg, end).ok();
    }
    out.push_str(RESET);
    out
}

pub fn draw_help(help_text: &str) -> String {
    let mut out = String::new();
    clear_screen(&mut out);
    for line in help_text.lines() {
        writeln!(out, "{}", line).ok();
    }
    out.push('\n');
    out.push_str("Press Enter to close\n");
    out
}
