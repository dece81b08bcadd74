//! Pixel format parser.

use std::sync::OnceLock;

use regex::Regex;

/// Lines containing any of these are status chatter, never format entries.
pub const NOISE_MARKERS: [&str; 4] = ["Selected", "Supported", "Overriding", "probesize"];

fn format_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[avfoundation @ [a-z0-9]+\](?<format>[ a-z0-9]+)")
            .expect("pixel format pattern is valid")
    })
}

/// Extract pixel format names in listing order, duplicates included.
pub fn parse_pixel_formats(text: &str) -> Vec<String> {
    let mut formats = Vec::new();

    for line in text.lines() {
        if NOISE_MARKERS.iter().any(|marker| line.contains(marker)) {
            continue;
        }
        for caps in format_pattern().captures_iter(line) {
            let format = caps["format"].trim();
            if !format.is_empty() {
                formats.push(format.to_string());
            }
        }
    }

    formats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tagged_formats_and_skips_noise() {
        let text = "\
[avfoundation @ 0x7fa1d2e04a00] Selected pixel format (yuv420p) is not supported by the input device.
[avfoundation @ 0x7fa1d2e04a00] Supported pixel formats:
[avfoundation @ 0x7fa1d2e04a00]   uyvy422
[avfoundation @ 0x7fa1d2e04a00]   yuyv422
[avfoundation @ 0x7fa1d2e04a00]   nv12
[avfoundation @ 0x7fa1d2e04a00] Overriding selected pixel format to use uyvy422 instead.
0: Input/output error";
        assert_eq!(parse_pixel_formats(text), vec!["uyvy422", "yuyv422", "nv12"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let text = "[avfoundation @ 0x1] nv12\n[avfoundation @ 0x1] 0rgb\n[avfoundation @ 0x1] nv12";
        assert_eq!(parse_pixel_formats(text), vec!["nv12", "0rgb", "nv12"]);
    }

    #[test]
    fn skips_probesize_chatter() {
        let text = "[avfoundation @ 0x1] stream 0: not enough frames to estimate rate; consider increasing probesize";
        assert!(parse_pixel_formats(text).is_empty());
    }

    #[test]
    fn untagged_lines_are_ignored() {
        assert!(parse_pixel_formats("").is_empty());
        assert!(parse_pixel_formats("   uyvy422\nnv12").is_empty());
    }
}
