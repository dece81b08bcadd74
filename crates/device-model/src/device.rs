//! Device identity as reported by the media tool's device listing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which section of the device listing a device appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Video,
    Audio,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => f.write_str("video"),
            Self::Audio => f.write_str("audio"),
        }
    }
}

/// One entry of a device listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Identifier the media tool expects back, kept verbatim.
    pub index: String,
    /// Display name.
    pub name: String,
    /// `None` when the entry preceded any section marker.
    pub kind: Option<DeviceKind>,
}

impl DeviceRecord {
    pub fn new(index: impl Into<String>, name: impl Into<String>, kind: Option<DeviceKind>) -> Self {
        Self {
            index: index.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == Some(DeviceKind::Video)
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.index, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_video_section_entries_are_video() {
        assert!(DeviceRecord::new("0", "FaceTime HD Camera", Some(DeviceKind::Video)).is_video());
        assert!(!DeviceRecord::new("0", "MacBook Pro Microphone", Some(DeviceKind::Audio)).is_video());
        assert!(!DeviceRecord::new("3", "Orphan", None).is_video());
    }

    #[test]
    fn displays_index_and_name() {
        let record = DeviceRecord::new("1", "Capture screen 0", Some(DeviceKind::Video));
        assert_eq!(record.to_string(), "[1] Capture screen 0");
        assert_eq!(DeviceKind::Audio.to_string(), "audio");
    }
}
