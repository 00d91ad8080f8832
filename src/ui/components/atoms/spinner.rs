const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Cycles through frames every 150ms, matching the redraw deadline.
pub fn spinner_char(time_ms: u128) -> &'static str {
    SPINNER_FRAMES[(time_ms / 150) as usize % SPINNER_FRAMES.len()]
}
