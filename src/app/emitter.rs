use crate::app::error::EmitError;
use crate::app::models::{EmitEvent, EntrySet, OutputEntry};
use crate::app::reporter::EventSink;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

pub struct ConfigEmitter;

impl ConfigEmitter {
    /// Writes every entry under `base_dir` in insertion order and returns how many were written.
    ///
    /// Stops at the first failure. Entries written before it are left in place.
    pub fn emit(
        base_dir: &Path,
        entries: &EntrySet,
        sink: &mut dyn EventSink,
    ) -> Result<usize, EmitError> {
        sink.on_event(&EmitEvent::RunStarted {
            total: entries.len(),
        });

        if entries.is_empty() {
            log::warn!("No files to write under {}", base_dir.display());
        }

        let mut written = 0;
        for entry in entries.iter() {
            sink.on_event(&EmitEvent::EntryStarted {
                path: entry.path.clone(),
            });

            if let Err(err) = write_entry(base_dir, entry) {
                log::debug!("Aborting after {} of {} entries", written, entries.len());
                sink.on_event(&EmitEvent::RunFailed {
                    path: entry.path.clone(),
                    error: err.to_string(),
                });
                return Err(err);
            }

            written += 1;
            sink.on_event(&EmitEvent::EntryWritten {
                path: entry.path.clone(),
                bytes: entry.content.len(),
            });
        }

        sink.on_event(&EmitEvent::RunCompleted { written });
        Ok(written)
    }
}

fn write_entry(base_dir: &Path, entry: &OutputEntry) -> Result<(), EmitError> {
    let full_path = base_dir.join(&entry.path);
    let parent = full_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| base_dir.to_path_buf());

    fs::create_dir_all(&parent).map_err(|source| EmitError::DirectoryCreate {
        path: parent.clone(),
        source,
    })?;

    let target = resolve_symlinks(&full_path);
    let target_dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| parent.clone());
    let existing_permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let write_err = |source: std::io::Error| EmitError::FileWrite {
        path: full_path.clone(),
        source,
    };

    // Staged next to the target so the rename stays on one filesystem.
    // Dropping the temp file on any error removes it.
    let mut staged = staging_file(&target_dir).map_err(write_err)?;
    staged
        .write_all(entry.content.as_bytes())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(write_err)?;
    if let Some(permissions) = existing_permissions {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    staged
        .persist(&target)
        .map_err(|err| write_err(err.into()))?;

    Ok(())
}

const MAX_SYMLINK_HOPS: usize = 40;

/// Follows symlinks from `path` so the file they point at is the one replaced.
fn resolve_symlinks(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let Ok(link) = fs::read_link(&current) else {
            break;
        };
        current = match current.parent() {
            Some(dir) => dir.join(link),
            None => link,
        };
    }
    current
}

fn staging_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".scaffold-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir)
}
