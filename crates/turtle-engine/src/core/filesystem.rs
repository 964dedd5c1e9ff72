//! File and directory helpers for game code.
//!
//! Thin wrappers over `std::fs` that take paths relative to the working
//! directory and report failures as `io::Error`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What a path points at. Symlinks are reported as such, not followed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// Result of [`info`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathInfo {
    pub exists: bool,
    pub kind: Option<FileType>,
    /// Bytes; files only.
    pub size: Option<u64>,
    /// Last write time; files only.
    pub modified: Option<SystemTime>,
}

pub fn read(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Creates or truncates `path`.
pub fn write(path: impl AsRef<Path>, data: &str) -> io::Result<()> {
    fs::write(path, data)
}

/// Appends to `path`, creating it if needed.
pub fn append(path: impl AsRef<Path>, data: &str) -> io::Result<()> {
    OpenOptions::new().create(true).append(true).open(path)?.write_all(data.as_bytes())
}

/// File contents split into lines without their terminators.
pub fn lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    Ok(read(path)?.lines().map(str::to_owned).collect())
}

/// Creates `path` and any missing parents.
pub fn create_directory(path: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Deletes a file, a symlink, or a directory with everything in it.
///
/// Returns `Ok(false)` if nothing was there.
pub fn remove(path: impl AsRef<Path>) -> io::Result<bool> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    log::debug!("removed {}", path.display());
    Ok(true)
}

/// Entries of `dir`, sorted by path.
pub fn directory_items(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut items = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    items.sort();
    Ok(items)
}

/// Describes `path`. A missing or unreadable path reports `exists: false`.
pub fn info(path: impl AsRef<Path>) -> PathInfo {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return PathInfo::default();
    };
    let kind = if meta.file_type().is_symlink() {
        FileType::Symlink
    } else if meta.is_dir() {
        FileType::Directory
    } else {
        FileType::File
    };
    let is_file = meta.is_file();
    PathInfo {
        exists: true,
        kind: Some(kind),
        size: is_file.then(|| meta.len()),
        modified: if is_file { meta.modified().ok() } else { None },
    }
}

/// Absolute form of `path`. The path does not need to exist.
pub fn real_directory(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

pub fn working_directory() -> io::Result<PathBuf> {
    std::env::current_dir()
}

/// The user's home directory.
pub fn user_directory() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Per-user application settings root (`%APPDATA%`, `~/.config`,
/// `~/Library/Application Support`).
pub fn appdata_directory() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh directory under the system temp dir, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("turtle-fs-{name}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn write_append_read_and_lines() {
        let dir = Scratch::new("rw");
        let file = dir.path("save.txt");

        write(&file, "level=1\n").unwrap();
        append(&file, "score=40\r\n").unwrap();
        assert_eq!(read(&file).unwrap(), "level=1\nscore=40\r\n");
        assert_eq!(lines(&file).unwrap(), ["level=1", "score=40"]);

        write(&file, "reset").unwrap();
        assert_eq!(read(&file).unwrap(), "reset");
    }

    #[test]
    fn append_creates_missing_file() {
        let dir = Scratch::new("append");
        let file = dir.path("log.txt");
        append(&file, "a").unwrap();
        append(&file, "b").unwrap();
        assert_eq!(read(&file).unwrap(), "ab");
    }

    #[test]
    fn reading_missing_file_is_not_found() {
        let dir = Scratch::new("missing");
        let err = read(dir.path("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    // ── directories ───────────────────────────────────────────────────────

    #[test]
    fn create_list_and_remove_recursively() {
        let dir = Scratch::new("tree");
        let nested = dir.path("saves/slot1");
        create_directory(&nested).unwrap();
        write(nested.join("a.txt"), "1").unwrap();
        write(dir.path("saves/b.txt"), "2").unwrap();

        assert_eq!(
            directory_items(dir.path("saves")).unwrap(),
            [dir.path("saves/b.txt"), dir.path("saves/slot1")]
        );

        assert!(remove(dir.path("saves")).unwrap());
        assert!(!info(dir.path("saves")).exists);
        assert!(!remove(dir.path("saves")).unwrap());
    }

    #[test]
    fn info_describes_files_and_directories() {
        let dir = Scratch::new("info");
        let file = dir.path("data.bin");
        write(&file, "12345").unwrap();

        let f = info(&file);
        assert!(f.exists);
        assert_eq!(f.kind, Some(FileType::File));
        assert_eq!(f.size, Some(5));
        assert!(f.modified.is_some());

        let d = info(&dir.0);
        assert_eq!(d.kind, Some(FileType::Directory));
        assert_eq!(d.size, None);

        assert_eq!(info(dir.path("absent")), PathInfo::default());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_reported_not_followed() {
        let dir = Scratch::new("link");
        let target = dir.path("target");
        create_directory(&target).unwrap();
        let link = dir.path("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(info(&link).kind, Some(FileType::Symlink));
        assert!(remove(&link).unwrap());
        assert!(info(&target).exists);
    }

    #[test]
    fn real_directory_is_absolute() {
        let abs = real_directory("assets/player.png").unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("assets/player.png"));
        assert_eq!(abs, working_directory().unwrap().join("assets/player.png"));
    }
}
