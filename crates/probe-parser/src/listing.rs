//! Device listing parser.

use std::sync::OnceLock;

use devcap_device_model::{DeviceKind, DeviceRecord};
use regex::Regex;

/// Line announcing the start of the video device section.
pub const VIDEO_SECTION_MARKER: &str = "AVFoundation video devices:";

/// Line announcing the start of the audio device section.
pub const AUDIO_SECTION_MARKER: &str = "AVFoundation audio devices:";

/// Devices whose name contains this are screen-capture pseudo devices and
/// are never listed.
pub const SCREEN_DEVICE_MARKER: &str = "screen";

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(?<index>\d+)\] (?<name>.+)").expect("device entry pattern is valid")
    })
}

/// Parse a device listing into records, in listing order.
///
/// Entries seen before any section marker carry no kind. Lines that are
/// neither markers nor entries are ignored.
pub fn parse_device_list(text: &str) -> Vec<DeviceRecord> {
    let mut records = Vec::new();
    let mut current: Option<DeviceKind> = None;

    for line in text.lines() {
        if line.contains(VIDEO_SECTION_MARKER) {
            current = Some(DeviceKind::Video);
            continue;
        }
        if line.contains(AUDIO_SECTION_MARKER) {
            current = Some(DeviceKind::Audio);
            continue;
        }

        let Some(caps) = entry_pattern().captures(line) else {
            continue;
        };
        let name = &caps["name"];
        if name.contains(SCREEN_DEVICE_MARKER) {
            tracing::debug!(name, "Skipping screen capture device");
            continue;
        }

        records.push(DeviceRecord::new(&caps["index"], name, current));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_video_and_audio_sections() {
        let text = "AVFoundation video devices:\n[0] Built-in Camera\nAVFoundation audio devices:\n[1] Built-in Mic";
        let records = parse_device_list(text);
        assert_eq!(
            records,
            vec![
                DeviceRecord::new("0", "Built-in Camera", Some(DeviceKind::Video)),
                DeviceRecord::new("1", "Built-in Mic", Some(DeviceKind::Audio)),
            ]
        );
    }

    #[test]
    fn entries_before_any_marker_have_no_kind() {
        let records = parse_device_list("[3] Mystery Device\nAVFoundation video devices:\n[0] Cam");
        assert_eq!(records[0], DeviceRecord::new("3", "Mystery Device", None));
        assert_eq!(records[1].kind, Some(DeviceKind::Video));
    }

    #[test]
    fn screen_devices_are_dropped() {
        let text = "AVFoundation video devices:\n[0] Cam\n[1] Capture screen 0\n[2] Other";
        let names: Vec<_> = parse_device_list(text)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Cam", "Other"]);
    }

    #[test]
    fn screen_filter_is_case_sensitive() {
        let records = parse_device_list("AVFoundation video devices:\n[4] Screen Recorder Cam");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn tool_prefixed_lines_still_match() {
        let text = "[AVFoundation indev @ 0x7f9b1c004f40] AVFoundation video devices:\n\
                    [AVFoundation indev @ 0x7f9b1c004f40] [0] FaceTime HD Camera";
        let records = parse_device_list(text);
        assert_eq!(
            records,
            vec![DeviceRecord::new("0", "FaceTime HD Camera", Some(DeviceKind::Video))]
        );
    }

    #[test]
    fn empty_and_noise_input_yield_nothing() {
        assert!(parse_device_list("").is_empty());
        assert!(parse_device_list("ffmpeg version 6.0\n: Input/output error\n").is_empty());
    }

    proptest! {
        #[test]
        fn screen_named_entries_never_survive(
            names in proptest::collection::vec("[A-Za-z ]{0,12}(screen)?[A-Za-z ]{0,12}", 0..8)
        ) {
            let mut text = String::from("AVFoundation video devices:\n");
            for (i, name) in names.iter().enumerate() {
                text.push_str(&format!("[{i}] x{name}\n"));
            }
            for record in parse_device_list(&text) {
                prop_assert!(!record.name.contains(SCREEN_DEVICE_MARKER));
            }
        }
    }
}
