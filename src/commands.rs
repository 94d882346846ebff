use crate::countdown::Field;

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StartStop,
    Reset,
    Lap,
    SwitchMode,
    ToggleTheme,
    Edit(Field, String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(Command::StartStop);
    };
    let cmd = match word {
        "s" | "start" | "stop" => Command::StartStop,
        "r" | "reset" => Command::Reset,
        "l" | "lap" => Command::Lap,
        "m" | "mode" => Command::SwitchMode,
        "d" | "dark" | "theme" => Command::ToggleTheme,
        "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "set" => {
            let field = match words.next() {
                Some("h") | Some("hours") => Field::Hours,
                Some("m") | Some("min") | Some("minutes") => Field::Minutes,
                Some("s") | Some("sec") | Some("seconds") => Field::Seconds,
                Some(other) => return Err(format!("unknown field '{}'", other)),
                None => return Err("usage: set h|m|s <value>".to_string()),
            };
            let text = words.collect::<Vec<_>>().join(" ");
            Command::Edit(field, text)
        }
        other => return Err(format!("unknown command '{}', ? for help", other)),
    };
    Ok(cmd)
}

pub const HELP_TEXT: &str = "LAPWATCH HELP\n\n\
     Enter  Start/Stop\n\
     s      Start/Stop\n\
     r      Reset\n\
     l      Record lap (stopwatch)\n\
     m      Switch stopwatch/timer\n\
     d      Toggle dark theme\n\
     set h|m|s <n>  Countdown field\n\
     ?      Help\n\
     q      Quit";
