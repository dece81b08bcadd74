//! Console tables and the progress bar.

use std::fmt::Write;

use devcap_capture_engine::CaptureProgress;
use devcap_device_model::Mode;

/// Box-drawn table of modes: index, resolution, framerate range.
pub fn modes_table(modes: &[Mode]) -> String {
    let mut out = String::new();
    out.push_str("┌─────────────────────────────────────────────┐\n");
    out.push_str("│                   Modes                     │\n");
    out.push_str("├───────┬────────────┬────────────────────────┤\n");
    out.push_str("│ Index │ Resolution │       Framerate        │\n");
    out.push_str("├───────┼────────────┼────────────────────────┤\n");
    for (i, mode) in modes.iter().enumerate() {
        let _ = writeln!(
            out,
            "│   {:<4}│ {:<11}│ {:<23}│",
            i,
            mode.resolution().to_string(),
            mode.framerate()
        );
    }
    out.push_str("└───────┴────────────┴────────────────────────┘\n");
    out
}

/// Box-drawn table of pixel formats.
pub fn pixel_formats_table(formats: &[String]) -> String {
    let mut out = String::new();
    out.push_str("┌─────────────────┐\n");
    out.push_str("│  Pixel Format   │\n");
    out.push_str("├───────┬─────────┤\n");
    out.push_str("│ Index │  Name   │\n");
    out.push_str("├───────┼─────────┤\n");
    for (i, format) in formats.iter().enumerate() {
        let _ = writeln!(out, "│    {:<3}│ {:<8}│", i, format);
    }
    out.push_str("└───────┴─────────┘\n");
    out
}

/// Two lines: the bar with its percentage, then the capture label.
///
/// The bar is six cells wider than the label.
pub fn progress_lines(progress: &CaptureProgress) -> String {
    let bar_size = progress.label.chars().count() + 6;
    let filled = ((bar_size as f64) * progress.fraction()).round() as usize;
    let filled = filled.min(bar_size);

    format!(
        "{}{} {}%\n   {}   \n",
        "▓".repeat(filled),
        "░".repeat(bar_size - filled),
        progress.percent,
        progress.label
    )
}
