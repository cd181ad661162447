//! Deduplication of projects found under several roots.

use std::collections::HashMap;

use crate::core::config::ESTIMATED_PROJECT_COUNT;
use crate::gitlab::Project;

/// Unique projects keyed by id; a later observation replaces an earlier one.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: HashMap<u64, Project>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self {
            projects: HashMap::with_capacity(ESTIMATED_PROJECT_COUNT),
        }
    }

    /// Records `project`, returning the record it replaced if the id was known.
    pub fn insert(&mut self, project: Project) -> Option<Project> {
        self.projects.insert(project.id, project)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// Unique projects ordered by full path, for stable output only.
    pub fn into_projects(self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.into_values().collect();
        projects.sort_by(|a, b| {
            a.path_with_namespace
                .cmp(&b.path_with_namespace)
                .then(a.id.cmp(&b.id))
        });
        projects
    }
}

impl Extend<Project> for ProjectRegistry {
    fn extend<I: IntoIterator<Item = Project>>(&mut self, iter: I) {
        for project in iter {
            self.insert(project);
        }
    }
}

impl FromIterator<Project> for ProjectRegistry {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u64, full: &str, http: &str) -> Project {
        Project {
            id,
            slug: full.rsplit('/').next().unwrap_or(full).to_string(),
            path_with_namespace: full.to_string(),
            namespace: None,
            http_url: http.to_string(),
            ssh_url: String::new(),
        }
    }

    #[test]
    fn test_same_id_is_kept_once() {
        let mut registry = ProjectRegistry::new();
        registry.extend(vec![project(42, "a/app", "one"), project(7, "a/lib", "x")]);
        registry.extend(vec![project(42, "a/app", "two")]);

        assert_eq!(registry.len(), 2);
        // Last observation wins
        assert_eq!(registry.get(42).map(|p| p.http_url.as_str()), Some("two"));
    }

    #[test]
    fn test_insert_returns_replaced_record() {
        let mut registry = ProjectRegistry::new();
        assert!(registry.insert(project(1, "a/x", "first")).is_none());
        let replaced = registry.insert(project(1, "a/x", "second"));
        assert_eq!(replaced.map(|p| p.http_url), Some("first".to_string()));
    }

    #[test]
    fn test_into_projects_is_sorted_by_path() {
        let registry: ProjectRegistry = vec![
            project(3, "b/zeta", ""),
            project(1, "a/beta", ""),
            project(2, "a/alpha", ""),
        ]
        .into_iter()
        .collect();

        let paths: Vec<_> = registry
            .into_projects()
            .into_iter()
            .map(|p| p.path_with_namespace)
            .collect();
        assert_eq!(paths, vec!["a/alpha", "a/beta", "b/zeta"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProjectRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.into_projects().is_empty());
    }
}
