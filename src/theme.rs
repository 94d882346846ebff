#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// ANSI escape sequences for one theme.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub base: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
}

pub const RESET: &str = "\x1b[0m";

const LIGHT: Palette = Palette {
    base: "\x1b[47m",
    text: "\x1b[30m",
    accent: "\x1b[35m",
    muted: "\x1b[90m",
};

const DARK: Palette = Palette {
    base: "\x1b[40m",
    text: "\x1b[97m",
    accent: "\x1b[96m",
    muted: "\x1b[37m",
};

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}
