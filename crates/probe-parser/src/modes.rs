//! Supported-modes parser.

use std::sync::OnceLock;

use devcap_device_model::{Mode, Resolution};
use regex::Regex;

fn mode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?<width>\d{3,4})x(?<height>\d{3,4})@\[(?<min>[\d.]+) (?<max>[\d.]+)\]fps",
        )
        .expect("mode pattern is valid")
    })
}

/// Extract every mode occurrence, in scan order.
///
/// Duplicates are kept. Occurrences whose numbers do not form a valid mode
/// (unparsable or inverted framerates) are skipped.
pub fn parse_modes(text: &str) -> Vec<Mode> {
    let mut modes = Vec::new();

    for line in text.lines() {
        for caps in mode_pattern().captures_iter(line) {
            match build_mode(&caps) {
                Some(mode) => modes.push(mode),
                None => tracing::debug!(occurrence = &caps[0], "Ignoring malformed mode"),
            }
        }
    }

    modes
}

fn build_mode(caps: &regex::Captures<'_>) -> Option<Mode> {
    let width = caps["width"].parse().ok()?;
    let height = caps["height"].parse().ok()?;
    let min: f64 = caps["min"].parse().ok()?;
    let max: f64 = caps["max"].parse().ok()?;
    Mode::new(Resolution::new(width, height), min, max).ok()
}

/// Sort modes ascending by width. Stable: equal widths keep their order.
pub fn sort_modes(modes: &mut [Mode]) {
    modes.sort_by_key(Mode::width);
}
