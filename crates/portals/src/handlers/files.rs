//! File, folder, and save-target choosers.
//!
//! All of these ride on the zenity file-selection dialog. Dismissing a
//! chooser is a non-event (`Cancelled`): the selection entry only appears
//! in the diagnostics log when something was actually picked.

use std::path::Path;

use async_trait::async_trait;
use portal_bridge_core::Outcome;

use crate::error::PortalResult;
use crate::os::dialogs::DialogChoice;
use crate::os::{self, dialogs};
use crate::traits::{Portal, PortalContext, Probe};

async fn dialog_probe(unsupported: &str) -> Probe {
    if os::command_exists("zenity").await {
        Probe::Available
    } else {
        Probe::Unsupported(unsupported.to_string())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Count the immediate entries of a directory.
async fn count_dir_entries(path: &Path) -> PortalResult<usize> {
    let mut read_dir = tokio::fs::read_dir(path).await?;
    let mut count = 0;
    while read_dir.next_entry().await?.is_some() {
        count += 1;
    }
    Ok(count)
}

/// Count files below a directory, descending into subdirectories. Symlinks
/// are counted as files, never followed.
async fn count_files_recursive(root: &Path) -> PortalResult<usize> {
    let mut pending = vec![root.to_path_buf()];
    let mut count = 0usize;
    while let Some(dir) = pending.pop() {
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(_) => continue,
        };
        while let Some(entry) = read_dir.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else {
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Legacy file chooser.
pub struct FilePortal;

#[async_trait]
impl Portal for FilePortal {
    fn id(&self) -> &'static str {
        "file"
    }

    async fn probe(&self) -> Probe {
        dialog_probe("File selection dialog unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_file().await? {
            DialogChoice::Selected(path) => Ok(Outcome::Success(format!(
                "File selected: {}",
                display_name(&path)
            ))),
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

/// Modern fs-access style picker.
pub struct FsOpenPortal;

#[async_trait]
impl Portal for FsOpenPortal {
    fn id(&self) -> &'static str {
        "fs_open"
    }

    async fn probe(&self) -> Probe {
        dialog_probe("File System Access API (Open) unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_file().await? {
            DialogChoice::Selected(path) => Ok(Outcome::Success(format!(
                "File Access Granted: {}",
                display_name(&path)
            ))),
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

/// Directory picker with enumeration: a two-phase dispatch that records the
/// access grant and then the entry count.
pub struct FolderPortal;

#[async_trait]
impl Portal for FolderPortal {
    fn id(&self) -> &'static str {
        "folder"
    }

    async fn probe(&self) -> Probe {
        dialog_probe("File System Access API (Directory) unsupported.").await
    }

    async fn invoke(&self, ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_directory().await? {
            DialogChoice::Selected(path) => {
                ctx.log
                    .append(format!("Directory Access Granted: {}", display_name(&path)));
                let entries = count_dir_entries(&path).await?;
                Ok(Outcome::Success(format!(
                    "Enumerated {entries} entries in {}.",
                    display_name(&path)
                )))
            }
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

/// Legacy directory picker: reports a recursive file count only.
pub struct FolderLegacyPortal;

#[async_trait]
impl Portal for FolderLegacyPortal {
    fn id(&self) -> &'static str {
        "folder_legacy"
    }

    async fn probe(&self) -> Probe {
        dialog_probe("Directory selection dialog unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_directory().await? {
            DialogChoice::Selected(path) => {
                let files = count_files_recursive(&path).await?;
                Ok(Outcome::Success(format!(
                    "Folder selected (Legacy): {files} files."
                )))
            }
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

/// Save-target chooser.
pub struct SavePortal;

#[async_trait]
impl Portal for SavePortal {
    fn id(&self) -> &'static str {
        "save"
    }

    async fn probe(&self) -> Probe {
        dialog_probe("File System Access API (Save) unsupported.").await
    }

    async fn invoke(&self, _ctx: &PortalContext) -> PortalResult<Outcome> {
        match dialogs::pick_save_target().await? {
            DialogChoice::Selected(path) => Ok(Outcome::Success(format!(
                "Save Target Selected: {}",
                display_name(&path)
            ))),
            DialogChoice::Dismissed => Ok(Outcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dir_entry_counting() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("a.txt"), "a").await.unwrap();
        tokio::fs::write(dir.path().join("b.txt"), "b").await.unwrap();
        tokio::fs::create_dir(dir.path().join("nested")).await.unwrap();
        assert_eq!(count_dir_entries(dir.path()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn recursive_file_counting_descends() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("a.txt"), "a").await.unwrap();
        let nested = dir.path().join("nested");
        tokio::fs::create_dir(&nested).await.unwrap();
        tokio::fs::write(nested.join("b.txt"), "b").await.unwrap();
        tokio::fs::write(nested.join("c.txt"), "c").await.unwrap();
        assert_eq!(count_files_recursive(dir.path()).await.unwrap(), 3);
    }
}
