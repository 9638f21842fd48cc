// ABOUTME: Four-part version numbers and build date inference
// ABOUTME: Derives a build timestamp from version components with file time and sentinel fallbacks

use chrono::{DateTime, Datelike, Duration, Local, NaiveDateTime, Offset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Versions with a build component below this many days are not date-stamped.
pub const MIN_BUILD_DAYS: u32 = 730;

/// Returned when neither the version nor the executable yields a build date.
pub const UNKNOWN_BUILD_DATE: NaiveDateTime = NaiveDateTime::MAX;

/// Seconds between the Unix epoch and 2000-01-01 00:00:00.
const VERSION_EPOCH_OFFSET_SECS: i64 = 946_684_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a dotted version string. Missing or non-numeric components are zero,
    /// and semver pre-release or build metadata suffixes are ignored.
    pub fn parse(input: &str) -> Self {
        let core = input
            .trim()
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        let mut parts = [0u32; 4];
        for (slot, component) in parts.iter_mut().zip(core.split('.')) {
            *slot = component.trim().parse().unwrap_or(0);
        }

        Self::new(parts[0], parts[1], parts[2], parts[3])
    }

    /// The timestamp encoded in the build and revision components, if representable.
    pub fn encoded_timestamp(&self) -> Option<NaiveDateTime> {
        let epoch = NaiveDateTime::default() + Duration::seconds(VERSION_EPOCH_OFFSET_SECS);
        epoch
            .checked_add_signed(Duration::days(i64::from(self.build)))?
            .checked_add_signed(Duration::seconds(i64::from(self.revision) * 2))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Whether the local time zone is currently observing daylight saving time.
///
/// Chrono exposes offsets but not DST rules, so the standard offset is taken to be
/// the smaller of the January and July offsets of the current year.
pub fn daylight_saving_active(now: &DateTime<Local>) -> bool {
    let year = now.year();
    let offset_at = |month: u32| {
        Local
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .map(|dt| dt.offset().fix().local_minus_utc())
    };

    match (offset_at(1), offset_at(7)) {
        (Some(january), Some(july)) => {
            dst_from_offsets(january, july, now.offset().fix().local_minus_utc())
        }
        _ => false,
    }
}

/// DST applies when the current UTC offset (seconds) is ahead of the standard one,
/// the smaller of the January and July offsets. Zones with equal offsets never observe it.
pub fn dst_from_offsets(january: i32, july: i32, now: i32) -> bool {
    january != july && now > january.min(july)
}

/// Infer a build date from `version`.
///
/// The encoded timestamp is used only when it is not in the future, the build
/// component is at least [`MIN_BUILD_DAYS`] and the revision is non-zero. Otherwise
/// `file_time` is consulted, and if that fails too [`UNKNOWN_BUILD_DATE`] is returned.
pub fn infer_build_date<F>(
    version: &Version,
    now: NaiveDateTime,
    daylight_saving: bool,
    file_time: F,
) -> NaiveDateTime
where
    F: FnOnce() -> io::Result<NaiveDateTime>,
{
    let candidate = version.encoded_timestamp().map(|timestamp| {
        if daylight_saving {
            timestamp + Duration::hours(1)
        } else {
            timestamp
        }
    });

    if let Some(candidate) = candidate {
        if candidate <= now && version.build >= MIN_BUILD_DAYS && version.revision != 0 {
            return candidate;
        }
    }

    debug!(
        "Version {} does not encode a usable build date, using file time",
        version
    );

    match file_time() {
        Ok(modified) => modified,
        Err(e) => {
            debug!("Build date file time lookup failed: {}", e);
            UNKNOWN_BUILD_DATE
        }
    }
}

/// Infer the build date of the running executable using the current local clock.
pub fn build_date(version: &Version) -> NaiveDateTime {
    let now = Local::now();
    infer_build_date(
        version,
        now.naive_local(),
        daylight_saving_active(&now),
        executable_modified,
    )
}

/// Last write time of the running executable, in local time.
pub fn executable_modified() -> io::Result<NaiveDateTime> {
    let exe = std::env::current_exe()?;
    file_modified(&exe)
}

pub fn file_modified(path: &Path) -> io::Result<NaiveDateTime> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

pub fn format_build_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
