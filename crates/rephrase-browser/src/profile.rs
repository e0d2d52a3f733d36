use crate::Result;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// Entries left out of a scratch copy: caches and the lock files a running
/// Chrome holds on its profile.
pub const SCRATCH_IGNORE: [&str; 11] = [
    "Cache",
    "Code Cache",
    "GPUCache",
    "ShaderCache",
    "Service Worker",
    "CacheStorage",
    "SingletonLock",
    "SingletonSocket",
    "SingletonCookie",
    "RunningChromeVersion",
    "lockfile",
];

/// Manages the Chrome user-data directory a session launches with
#[derive(Debug)]
pub struct ProfileManager {
    path: PathBuf,
    /// Directory removed on cleanup, if this profile owns one
    owned_root: Option<PathBuf>,
}

impl ProfileManager {
    /// Create an empty throwaway profile
    pub fn temporary() -> Result<Self> {
        let path = tempfile::tempdir()?.keep();

        Ok(Self {
            owned_root: Some(path.clone()),
            path,
        })
    }

    /// Use a profile directory in place, creating it if needed
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            fs::create_dir_all(&path)?;
        }

        Ok(Self {
            path,
            owned_root: None,
        })
    }

    /// Copy `source` into a fresh scratch location and use the copy.
    ///
    /// Cache and lock entries are skipped so the copy works while Chrome is
    /// running on the original. The copy is removed on cleanup or drop.
    pub fn scratch_copy(source: &Path) -> Result<Self> {
        let root = tempfile::tempdir()?.keep();
        let path = root.join("User Data");
        let ignore = ignore_patterns();

        tracing::info!(
            "Copying profile from {} to {}",
            source.display(),
            path.display()
        );

        match copy_tree(source, &path, &ignore) {
            Ok(bytes) => tracing::info!("Copied {} KiB of profile data", bytes / 1024),
            Err(e) => {
                let _ = fs::remove_dir_all(&root);
                return Err(e.into());
            }
        }

        Ok(Self {
            path,
            owned_root: Some(root),
        })
    }

    /// Chrome's user-data directory for the current platform
    pub fn default_user_data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        return dirs::data_local_dir().map(|d| d.join("Google").join("Chrome").join("User Data"));

        #[cfg(target_os = "macos")]
        return dirs::data_dir().map(|d| d.join("Google").join("Chrome"));

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        return dirs::config_dir().map(|d| d.join("google-chrome"));
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the directory is removed on cleanup
    pub fn is_temporary(&self) -> bool {
        self.owned_root.is_some()
    }

    /// Remove an owned profile directory now
    pub fn cleanup(mut self) -> Result<()> {
        if let Some(root) = self.owned_root.take() {
            if root.exists() {
                tracing::info!("Removing scratch profile at {}", root.display());
                fs::remove_dir_all(&root)?;
            }
        }
        Ok(())
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if let Some(root) = self.owned_root.take() {
            if root.exists() {
                let _ = fs::remove_dir_all(&root);
            }
        }
    }
}

fn ignore_patterns() -> Vec<Pattern> {
    SCRATCH_IGNORE
        .iter()
        .filter_map(|name| Pattern::new(name).ok())
        .collect()
}

/// Copy `source` into `target`, returning the number of bytes copied
fn copy_tree(source: &Path, target: &Path, ignore: &[Pattern]) -> std::io::Result<u64> {
    fs::create_dir_all(target)?;
    let mut copied = 0;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();

        if ignore.iter().any(|p| p.matches(&name_str)) {
            tracing::debug!("Skipping {}", entry.path().display());
            continue;
        }

        let file_type = entry.file_type()?;
        let dest = target.join(&name);

        if file_type.is_dir() {
            copied += copy_tree(&entry.path(), &dest, ignore)?;
        } else if file_type.is_file() {
            copied += fs::copy(entry.path(), &dest)?;
        }
        // Symlinks in a profile point at live Chrome state; leave them out
    }

    Ok(copied)
}
