//! Named device profiles.
//!
//! Some cameras have clocks that drift by a known, constant amount, or
//! write EXIF dates that are less trustworthy than the file's own mtime.
//! A profile bundles those quirks under a short name.

use serde::Serialize;

/// Per-device overrides for timestamp resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    /// Whether photo timestamps should come from EXIF
    pub uses_embedded_metadata: bool,
    /// Clock correction applied to photos, in minutes
    pub photo_offset_minutes: i32,
    /// Clock correction for videos, in minutes (recorded, not applied)
    pub video_offset_minutes: i32,
}

const PROFILES: &[(&str, DeviceProfile)] = &[
    (
        "nexus5x",
        DeviceProfile {
            uses_embedded_metadata: false,
            photo_offset_minutes: 60,
            video_offset_minutes: 120,
        },
    ),
    (
        "canon-s120",
        DeviceProfile {
            uses_embedded_metadata: false,
            photo_offset_minutes: 0,
            video_offset_minutes: 0,
        },
    ),
];

/// Look up a profile by name. Names are matched exactly.
pub fn profile_by_name(name: &str) -> Option<(&'static str, DeviceProfile)> {
    PROFILES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(key, profile)| (*key, *profile))
}

/// All known profiles, in table order
pub fn all_profiles() -> impl Iterator<Item = (&'static str, DeviceProfile)> {
    PROFILES.iter().map(|(key, profile)| (*key, *profile))
}
