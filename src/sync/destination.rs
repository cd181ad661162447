//! Local placement of projects under the destination root.

use std::path::{Path, PathBuf};

use crate::gitlab::Project;

/// The namespace a project is placed under, or `None` for the root itself.
///
/// Prefers the namespace reported by the API and falls back to the full
/// path with its last segment removed.
pub fn resolve_namespace(project: &Project) -> Option<String> {
    if let Some(ns) = project.namespace_full_path() {
        return Some(ns.to_string());
    }
    let full = project.path_with_namespace.trim_matches('/');
    match full.rsplit_once('/') {
        Some((ns, _)) if !ns.is_empty() => Some(ns.to_string()),
        _ => None,
    }
}

/// `dest_root / namespace / slug`, identical on every run.
pub fn local_path(dest_root: &Path, project: &Project) -> PathBuf {
    let mut path = dest_root.to_path_buf();
    if let Some(ns) = resolve_namespace(project) {
        push_segments(&mut path, &ns);
    }
    push_segments(&mut path, &project.slug);
    path
}

// Segments that would climb out of the destination root are dropped
fn push_segments(path: &mut PathBuf, segments: &str) {
    for segment in segments.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        path.push(segment);
    }
}
