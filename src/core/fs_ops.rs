// src/core/fs_ops.rs
//! File system helpers shared by the profile store, packager and renderer

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::app_log;

const JSON_INDENT: &[u8] = b"    ";

pub struct FsOps;

impl FsOps {
    /// Create `path` and its parents if missing. Existing directories are fine.
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(debug, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write `content`, creating the parent directory first.
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(debug, "Written file: {}", path.display());
        Ok(())
    }

    /// Pretty-print `value` as JSON with a 4-space indent into `path`.
    pub async fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .with_context(|| format!("Failed to serialize JSON for {}", path.display()))?;

        let json = String::from_utf8(buffer)
            .with_context(|| format!("Serialized JSON for {} is not UTF-8", path.display()))?;
        Self::write_file_safe(path, &json).await
    }

    pub async fn copy_file(src: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::copy(src, dest).await.with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dest.display())
        })?;

        app_log!(debug, "Copied {} to {}", src.display(), dest.display());
        Ok(())
    }

    /// Copy every file under `src` into `dest`, recursing into subdirectories.
    pub async fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
        let mut pending = vec![(src.to_path_buf(), dest.to_path_buf())];

        while let Some((from, to)) = pending.pop() {
            Self::ensure_dir_exists(&to).await?;

            let mut entries = fs::read_dir(&from)
                .await
                .with_context(|| format!("Failed to read directory: {}", from.display()))?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let target = to.join(entry.file_name());
                if path.is_dir() {
                    pending.push((path, target));
                } else {
                    Self::copy_file(&path, &target).await?;
                }
            }
        }

        Ok(())
    }

    /// Resolve `relative` against `base` unless it is already absolute.
    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }
}
