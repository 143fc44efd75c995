//! Suffix-filtered file discovery under a root directory.

use crate::error::BatchError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect files under `root` whose extension matches `extension`.
///
/// Non-recursive discovery returns only the root's immediate files;
/// recursive discovery walks subdirectories depth-first. Entries are
/// visited in name order, so the result is stable for a fixed tree.
/// The walk itself is iterative, so deeply nested trees cannot exhaust
/// the call stack.
///
/// An unreadable root or subdirectory aborts discovery with an error;
/// it is not a per-file condition.
pub fn discover(
    root: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, BatchError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().map_or(false, |ext| ext == extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    /// Tree: root/{a.exml, b.exml, notes.txt, skip.xml, sub/{c.exml, deep/{d.exml}}}
    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(&root.join("a.exml"));
        touch(&root.join("b.exml"));
        touch(&root.join("notes.txt"));
        touch(&root.join("skip.xml"));
        fs::create_dir_all(root.join("sub/deep")).unwrap();
        touch(&root.join("sub/c.exml"));
        touch(&root.join("sub/deep/d.exml"));
        tmp
    }

    #[test]
    fn non_recursive_returns_immediate_matches_only() {
        let tmp = fixture();
        let found = discover(tmp.path(), "exml", false).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.exml", "b.exml"]);
    }

    #[test]
    fn recursive_returns_matches_at_every_depth() {
        let tmp = fixture();
        let found = discover(tmp.path(), "exml", true).unwrap();
        assert_eq!(found.len(), 4);
        assert!(found.iter().any(|p| p.ends_with("sub/deep/d.exml")));
        // Non-matching suffixes are excluded at every level.
        assert!(found.iter().all(|p| p.extension().unwrap() == "exml"));
    }

    #[test]
    fn suffix_predicate_distinguishes_xml_from_exml() {
        let tmp = fixture();
        let found = discover(tmp.path(), "xml", false).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["skip.xml"]);
    }

    #[test]
    fn order_is_stable_for_a_fixed_tree() {
        let tmp = fixture();
        let first = discover(tmp.path(), "exml", true).unwrap();
        let second = discover(tmp.path(), "exml", true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unreadable_root_aborts_discovery() {
        assert!(discover(Path::new("/nonexistent-root-for-discovery"), "exml", true).is_err());
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover(tmp.path(), "exml", true).unwrap().is_empty());
    }
}
