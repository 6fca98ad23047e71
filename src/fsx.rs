//! Cross-platform file-timestamp wrapper.
//!
//! Windows exposes a writable creation time, which is what the export's
//! `photoTakenTime` maps onto. Unix-like systems have no settable birth
//! time, so the modification time is the closest equivalent and is what gets
//! restored there. Call-sites stay identical across OSes.
//!
//! The native handle is acquired, mutated, and released inside one scope;
//! dropping the `File` closes it on every exit path, including errors.

use std::fs::{FileTimes, OpenOptions};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Converts Unix epoch seconds (possibly pre-1970) to a `SystemTime`.
fn system_time_from_epoch(secs: i64) -> SystemTime {
    if secs >= 0 {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        SystemTime::UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

#[cfg(windows)]
/// Sets the creation time of the file at `path` to `epoch_secs`.
pub fn set_creation_time(path: &Path, epoch_secs: i64) -> io::Result<()> {
    use std::os::windows::fs::FileTimesExt;

    let file = OpenOptions::new().write(true).open(path)?;
    file.set_times(FileTimes::new().set_created(system_time_from_epoch(epoch_secs)))
}

#[cfg(not(windows))]
/// Sets the modification time of the file at `path` to `epoch_secs`.
/// Unix has no writable creation time, so mtime stands in for it.
pub fn set_creation_time(path: &Path, epoch_secs: i64) -> io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_times(FileTimes::new().set_modified(system_time_from_epoch(epoch_secs)))
}

/// Reapplies a snapshot of a file's timestamps to `path`.
///
/// An atomic replace swaps the underlying file, which would otherwise discard
/// timestamps that were already restored from a sidecar.
pub fn restore_file_times(path: &Path, snapshot: &std::fs::Metadata) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(modified) = snapshot.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = snapshot.accessed() {
        times = times.set_accessed(accessed);
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::FileTimesExt;
        if let Ok(created) = snapshot.created() {
            times = times.set_created(created);
        }
    }
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_conversion_round_trips() {
        let t = system_time_from_epoch(1_609_459_200);
        assert_eq!(
            t.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs(),
            1_609_459_200
        );
    }

    #[test]
    fn pre_epoch_seconds_are_valid() {
        let t = system_time_from_epoch(-86_400);
        assert_eq!(
            SystemTime::UNIX_EPOCH.duration_since(t).unwrap().as_secs(),
            86_400
        );
    }

    #[test]
    fn sets_time_through_a_scoped_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"payload").unwrap();

        set_creation_time(&path, 1_609_459_200).unwrap();

        #[cfg(not(windows))]
        {
            let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
            assert_eq!(
                modified
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .unwrap()
                    .as_secs(),
                1_609_459_200
            );
        }
    }

    #[test]
    fn restores_snapshot_times_after_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"original").unwrap();
        set_creation_time(&path, 1_609_459_200).unwrap();
        let snapshot = std::fs::metadata(&path).unwrap();

        // Simulate an atomic replace: fresh file, fresh timestamps.
        std::fs::write(&path, b"patched").unwrap();
        restore_file_times(&path, &snapshot).unwrap();

        #[cfg(not(windows))]
        {
            let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
            assert_eq!(
                modified
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .unwrap()
                    .as_secs(),
                1_609_459_200
            );
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(set_creation_time(&dir.path().join("absent.jpg"), 0).is_err());
    }
}
