use crate::app::error::EmitError;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Represents the final configuration after merging the config file and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub base_dir: PathBuf,
    pub extra_files: Vec<OutputEntry>,
}

/// A single file to materialize under the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub path: PathBuf,
    pub content: String,
}

impl OutputEntry {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Insertion-ordered entries with unique relative paths.
#[derive(Debug, Default)]
pub struct EntrySet {
    entries: Vec<OutputEntry>,
    seen: HashSet<PathBuf>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry with its path reduced to its normal components.
    pub fn push(&mut self, mut entry: OutputEntry) -> Result<(), EmitError> {
        let Some(normalized) = normalize_relative(&entry.path) else {
            return Err(EmitError::InvalidPath(entry.path));
        };
        if !self.seen.insert(normalized.clone()) {
            return Err(EmitError::DuplicatePath(entry.path));
        }
        entry.path = normalized;
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputEntry> {
        self.entries.iter()
    }
}

// None if the path is empty or could leave the base directory.
fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!normalized.as_os_str().is_empty()).then_some(normalized)
}

/// Progress notifications produced while emitting, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitEvent {
    RunStarted { total: usize },
    EntryStarted { path: PathBuf },
    EntryWritten { path: PathBuf, bytes: usize },
    RunCompleted { written: usize },
    RunFailed { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut set = EntrySet::new();
        set.push(OutputEntry::new("b/two.json", "2")).unwrap();
        set.push(OutputEntry::new("a/one.json", "1")).unwrap();
        set.push(OutputEntry::new("c.json", "3")).unwrap();

        let paths: Vec<_> = set.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("b/two.json"),
                PathBuf::from("a/one.json"),
                PathBuf::from("c.json")
            ]
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn rejects_duplicate_paths() {
        let mut set = EntrySet::new();
        set.push(OutputEntry::new("backend/tsconfig.json", "{}"))
            .unwrap();
        let err = set
            .push(OutputEntry::new("backend/tsconfig.json", "[]"))
            .unwrap_err();
        assert!(matches!(err, EmitError::DuplicatePath(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_duplicates_spelled_differently() {
        let mut set = EntrySet::new();
        set.push(OutputEntry::new("backend/tsconfig.json", "{}"))
            .unwrap();
        for alias in ["./backend/tsconfig.json", "backend/./tsconfig.json", "backend//tsconfig.json"] {
            let err = set.push(OutputEntry::new(alias, "[]")).unwrap_err();
            assert!(matches!(err, EmitError::DuplicatePath(_)), "{alias}");
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_paths_escaping_the_base() {
        let mut set = EntrySet::new();
        for bad in ["/etc/passwd", "../outside.json", "backend/../../x", "", "."] {
            let err = set.push(OutputEntry::new(bad, "")).unwrap_err();
            assert!(matches!(err, EmitError::InvalidPath(_)), "{bad}");
        }
        assert!(set.is_empty());
    }

    #[test]
    fn accepts_nested_relative_paths() {
        let mut set = EntrySet::new();
        set.push(OutputEntry::new("./frontend/src/app/config.json", ""))
            .unwrap();
        let paths: Vec<_> = set.iter().map(|e| e.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("frontend/src/app/config.json")]);
    }
}
