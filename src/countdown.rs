const MAX_HOURS: u32 = 23;
const MAX_MINUTES: u32 = 59;
const MAX_SECONDS: u32 = 59;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    fn max(self) -> u32 {
        match self {
            Field::Hours => MAX_HOURS,
            Field::Minutes => MAX_MINUTES,
            Field::Seconds => MAX_SECONDS,
        }
    }
}

/// The three duration fields shown in timer mode. An empty field counts as
/// zero.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CountdownInputs {
    hours: Option<u32>,
    minutes: Option<u32>,
    seconds: Option<u32>,
}

impl CountdownInputs {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, field: Field) -> &mut Option<u32> {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    pub fn get(&self, field: Field) -> Option<u32> {
        match field {
            Field::Hours => self.hours,
            Field::Minutes => self.minutes,
            Field::Seconds => self.seconds,
        }
    }

    /// Apply raw text typed into a field. Text with no number, or zero,
    /// empties the field; a negative number or one past the field's limit is
    /// rejected.
    /// Returns whether the field was updated.
    pub fn edit(&mut self, field: Field, text: &str) -> bool {
        match parse_field(text) {
            None => {
                *self.slot(field) = None;
                true
            }
            Some(value) if (1..=i64::from(field.max())).contains(&value) => {
                *self.slot(field) = Some(value as u32);
                true
            }
            Some(_) => false,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn hms(&self) -> (u32, u32, u32) {
        (
            self.hours.unwrap_or(0),
            self.minutes.unwrap_or(0),
            self.seconds.unwrap_or(0),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.hms() == (0, 0, 0)
    }

    /// Field text for display, "--" when empty.
    pub fn display(&self, field: Field) -> String {
        match self.get(field) {
            Some(v) => format!("{:02}", v),
            None => "--".to_string(),
        }
    }
}

/// Leading integer parse with an optional sign; zero reads as empty.
/// Overlong digit runs saturate so they still count as out of range.
fn parse_field(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    match value {
        0 => None,
        v if negative => Some(-v),
        v => Some(v),
    }
}

/// Parse "[[HH:]MM:]SS" into (hours, minutes, seconds).
pub fn parse_hms(s: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = s.split(':').collect();
    let mut nums = Vec::with_capacity(parts.len());
    for p in &parts {
        nums.push(p.trim().parse::<u32>().ok()?);
    }
    match nums.as_slice() {
        [s] => Some((0, 0, *s)),
        [m, s] => Some((0, *m, *s)),
        [h, m, s] => Some((*h, *m, *s)),
        _ => None,
    }
}
