//! Transfer planning - enumerate work items and create destination directories.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlanError;

/// One scheduled transfer unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Source file or symlink.
    pub source: PathBuf,
    /// Destination path; its parent directory exists once planning is done.
    pub destination: PathBuf,
    /// Bytes to transfer (0 for symlinks).
    pub size: u64,
}

/// Ordered list of work items with aggregate metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    /// Work items in transfer order.
    pub items: Vec<WorkItem>,
    /// Sum of the sizes of all regular files.
    pub total_size: u64,
    /// Source directories, deepest first, to remove after a move.
    pub directories_to_remove: Vec<PathBuf>,
}

/// Build a transfer plan.
///
/// Plain files are scheduled before directories at every level, each group in
/// lexicographic order. Destination directories are created while walking, so
/// every item's parent exists by the time it is scheduled.
///
/// # Arguments
///
/// * `sources` - Files, symlinks and directories to transfer
/// * `destination` - Target path (must be an existing directory for several sources)
/// * `all_files` - Include hidden entries found inside directories
///
/// # Errors
///
/// * If a source does not exist
/// * If several sources are given and the destination is not a directory
/// * If a directory would be copied into itself
/// * If a destination directory cannot be created or a source directory cannot be read
pub fn build_plan(
    sources: &[PathBuf],
    destination: &Path,
    all_files: bool,
) -> Result<TransferPlan, PlanError> {
    log::debug!(
        "Planning transfer of {} source(s) to {}",
        sources.len(),
        destination.display()
    );

    for source in sources {
        if fs::symlink_metadata(source).is_err() {
            return Err(PlanError::SourceNotFound {
                path: source.clone(),
            });
        }
    }

    if sources.len() > 1 && !destination.is_dir() {
        return Err(PlanError::DestinationNotDirectory {
            path: destination.to_path_buf(),
        });
    }

    let mut planner = Planner {
        all_files,
        plan: TransferPlan::default(),
    };
    planner.parse(sources, destination)?;

    log::debug!(
        "Planned {} item(s), {} bytes",
        planner.plan.items.len(),
        planner.plan.total_size
    );

    Ok(planner.plan)
}

struct Planner {
    all_files: bool,
    plan: TransferPlan,
}

impl Planner {
    fn parse(&mut self, sources: &[PathBuf], destination: &Path) -> Result<(), PlanError> {
        let mut files = Vec::new();
        let mut directories = Vec::new();

        for source in sources {
            let metadata = fs::symlink_metadata(source).map_err(|e| PlanError::MetadataError {
                path: source.clone(),
                io_error: e,
            })?;
            let file_type = metadata.file_type();

            if file_type.is_dir() {
                directories.push(source);
            } else if file_type.is_file() || file_type.is_symlink() {
                files.push((source, metadata));
            } else {
                log::warn!("Skipping special file {}", source.display());
            }
        }

        for (source, metadata) in files {
            self.add_file(source, &metadata, destination)?;
        }

        for source in directories {
            self.add_directory(source, destination)?;
        }

        Ok(())
    }

    fn add_file(
        &mut self,
        source: &Path,
        metadata: &fs::Metadata,
        destination: &Path,
    ) -> Result<(), PlanError> {
        let target = resolve_target(source, destination)?;
        log::debug!(":: file {} -> {}", source.display(), target.display());

        // A symlink's own size has no transfer meaning
        let size = if metadata.file_type().is_symlink() {
            0
        } else {
            metadata.len()
        };
        self.plan.total_size += size;
        self.plan.items.push(WorkItem {
            source: source.to_path_buf(),
            destination: target,
            size,
        });

        Ok(())
    }

    fn add_directory(&mut self, source: &Path, destination: &Path) -> Result<(), PlanError> {
        if destination.exists() && !destination.is_dir() {
            return Err(PlanError::DestinationNotDirectory {
                path: destination.to_path_buf(),
            });
        }

        let target = resolve_target(source, destination)?;
        log::debug!(":: dir {} -> {}", source.display(), target.display());

        check_not_inside(source, &target)?;

        if !target.exists() {
            log::debug!(":: making dir {}", target.display());
            fs::create_dir(&target).map_err(|e| PlanError::CreateDirError {
                path: target.clone(),
                io_error: e,
            })?;
        }

        let entries = list_directory(source, self.all_files)?;
        self.parse(&entries, &target)?;
        self.plan.directories_to_remove.push(source.to_path_buf());

        Ok(())
    }
}

/// Map a source onto the destination: `destination/name` when the destination
/// is an existing directory, the destination itself otherwise.
fn resolve_target(source: &Path, destination: &Path) -> Result<PathBuf, PlanError> {
    if destination.is_dir() {
        Ok(destination.join(base_name(source)?))
    } else {
        Ok(destination.to_path_buf())
    }
}

/// File name of a source, resolving `.` and `..` style paths.
fn base_name(source: &Path) -> Result<PathBuf, PlanError> {
    let cleaned = path_clean::clean(source);
    if let Some(name) = cleaned.file_name() {
        return Ok(PathBuf::from(name));
    }

    fs::canonicalize(source)
        .ok()
        .and_then(|path| path.file_name().map(PathBuf::from))
        .ok_or_else(|| PlanError::InvalidSource {
            path: source.to_path_buf(),
        })
}

/// Refuse to copy a directory somewhere below itself.
fn check_not_inside(source: &Path, target: &Path) -> Result<(), PlanError> {
    let Ok(source_resolved) = fs::canonicalize(source) else {
        return Ok(());
    };

    let target_resolved = if target.exists() {
        fs::canonicalize(target).ok()
    } else {
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::canonicalize(parent)
            .ok()
            .zip(target.file_name())
            .map(|(parent, name)| parent.join(name))
    };

    match target_resolved {
        Some(resolved) if resolved.starts_with(&source_resolved) => {
            Err(PlanError::DestinationInsideSource {
                source_path: source.to_path_buf(),
                target_path: target.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}

/// List the direct children of a directory in lexicographic order.
fn list_directory(path: &Path, all_files: bool) -> Result<Vec<PathBuf>, PlanError> {
    // jwalk reports an unreadable directory as an empty one
    fs::read_dir(path).map_err(|e| PlanError::ReadDirError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut entries = Vec::new();

    for entry in jwalk::WalkDir::new(path)
        .parallelism(jwalk::Parallelism::Serial)
        .min_depth(1)
        .max_depth(1)
        .skip_hidden(!all_files)
        .follow_links(false)
        .sort(true)
    {
        let entry = entry.map_err(|e| PlanError::ReadDirError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        entries.push(entry.path());
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(plan: &TransferPlan, root: &Path) -> Vec<String> {
        plan.items
            .iter()
            .map(|item| {
                item.destination
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_single_file_to_new_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        let plan = build_plan(&[source.clone()], &dir.path().join("b.txt"), false).unwrap();

        assert_eq!(
            plan.items,
            vec![WorkItem {
                source,
                destination: dir.path().join("b.txt"),
                size: 5,
            }]
        );
        assert_eq!(plan.total_size, 5);
        assert!(plan.directories_to_remove.is_empty());
    }

    #[test]
    fn test_file_into_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        let target = dir.path().join("dest");
        fs::write(&source, "hello").unwrap();
        fs::create_dir(&target).unwrap();

        let plan = build_plan(&[source], &target, false).unwrap();

        assert_eq!(plan.items[0].destination, target.join("a.txt"));
    }

    #[test]
    fn test_directory_is_created_and_sorted() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("b.txt"), "bb").unwrap();
        fs::write(source.join("a.txt"), "a").unwrap();
        fs::write(source.join("sub/c.txt"), "ccc").unwrap();
        fs::write(source.join(".hidden"), "hhhh").unwrap();

        let target = dir.path().join("copy");
        let plan = build_plan(&[source.clone()], &target, false).unwrap();

        assert!(target.is_dir());
        assert!(target.join("sub").is_dir());
        assert_eq!(names(&plan, &target), vec!["a.txt", "b.txt", "sub/c.txt"]);
        assert_eq!(plan.total_size, 6);
        assert_eq!(
            plan.directories_to_remove,
            vec![source.join("sub"), source.clone()]
        );
    }

    #[test]
    fn test_all_files_includes_hidden() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join(".git")).unwrap();
        fs::write(source.join(".hidden"), "h").unwrap();
        fs::write(source.join(".git/HEAD"), "ref").unwrap();
        fs::write(source.join("visible"), "v").unwrap();

        let target = dir.path().join("copy");
        let plan = build_plan(&[source], &target, true).unwrap();

        assert_eq!(
            names(&plan, &target),
            vec![".hidden", "visible", ".git/HEAD"]
        );
    }

    #[test]
    fn test_directory_into_existing_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let target = dir.path().join("dest");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(source.join("f"), "x").unwrap();

        let plan = build_plan(&[source], &target, false).unwrap();

        assert_eq!(plan.items[0].destination, target.join("src/f"));
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = build_plan(&[dir.path().join("nope")], dir.path(), false);

        assert!(matches!(result, Err(PlanError::SourceNotFound { .. })));
    }

    #[test]
    fn test_several_sources_need_directory() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let result = build_plan(&[a, b], &dir.path().join("missing"), false);

        assert!(matches!(
            result,
            Err(PlanError::DestinationNotDirectory { .. })
        ));
    }

    #[test]
    fn test_directory_into_itself() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();

        let result = build_plan(&[source.clone()], &source, false);

        assert!(matches!(
            result,
            Err(PlanError::DestinationInsideSource { .. })
        ));
        assert!(!source.join("src").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let locked = source.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(source.join("ok"), "o").unwrap();
        fs::write(locked.join("f"), "f").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = build_plan(&[source], &dir.path().join("copy"), false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(PlanError::ReadDirError { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected ReadDirError, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("real")).unwrap();
        fs::write(source.join("real/big"), vec![0u8; 1000]).unwrap();
        std::os::unix::fs::symlink("real", source.join("link")).unwrap();

        let target = dir.path().join("copy");
        let plan = build_plan(&[source], &target, false).unwrap();

        assert_eq!(names(&plan, &target), vec!["link", "real/big"]);
        assert_eq!(plan.items[0].size, 0);
        assert_eq!(plan.total_size, 1000);
    }
}
