use timer_core::format_hms_cs;

/// Rows of the lap list visible at once.
pub const VISIBLE_LAPS: usize = 8;

/// "Lap N  HH:MM:SS.cc" rows for the newest `VISIBLE_LAPS` laps, numbered
/// from 1 in recording order.
pub fn lap_lines(laps: &[u64]) -> Vec<String> {
    let skip = laps.len().saturating_sub(VISIBLE_LAPS);
    laps.iter()
        .enumerate()
        .skip(skip)
        .map(|(i, &lap)| format!("Lap {}  {}", i + 1, format_hms_cs(lap)))
        .collect()
}
