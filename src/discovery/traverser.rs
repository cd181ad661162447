//! Cycle-safe walk of a group hierarchy.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::core::{Diagnostic, DiagnosticSink};
use crate::gitlab::{GroupRef, GroupSource, Project, TransportError};

/// Result of walking one root group
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Every project listed by a successfully expanded group, duplicates kept
    pub projects: Vec<Project>,
    /// Groups expanded, failed ones included
    pub groups_visited: usize,
    /// Groups whose listings failed and whose subtrees were abandoned
    pub groups_failed: usize,
}

/// Walks the group tree below one root with an explicit worklist.
///
/// The visited set makes re-expansion a no-op, so a hierarchy that reports
/// a group as its own descendant still terminates. A subgroup is known by
/// both its id and its full path, so a root given either way is matched
/// when it shows up again below itself.
pub struct GroupTraverser<'a, S: ?Sized> {
    source: &'a S,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, S: GroupSource + ?Sized> GroupTraverser<'a, S> {
    pub fn new(source: &'a S, sink: &'a dyn DiagnosticSink) -> Self {
        Self { source, sink }
    }

    /// Collects the projects of `root` and of all groups nested below it.
    ///
    /// A group whose project or subgroup listing fails contributes nothing;
    /// the failure goes to the sink and the remaining worklist is processed.
    pub async fn collect(&self, root: GroupRef) -> Traversal {
        let mut traversal = Traversal::default();
        let mut visited: HashSet<GroupRef> = HashSet::new();
        let mut worklist: Vec<(GroupRef, Option<GroupRef>)> = vec![(root, None)];

        while let Some((group, alias)) = worklist.pop() {
            if visited.contains(&group) || alias.as_ref().is_some_and(|a| visited.contains(a)) {
                debug!(%group, "group already visited");
                continue;
            }
            visited.insert(group.clone());
            visited.extend(alias);
            traversal.groups_visited += 1;

            let listing = async {
                let projects = self.source.list_projects(&group).await?;
                let subgroups = self.source.list_subgroups(&group).await?;
                Ok::<_, TransportError>((projects, subgroups))
            }
            .await;

            let (projects, subgroups) = match listing {
                Ok(listing) => listing,
                Err(error) => {
                    traversal.groups_failed += 1;
                    self.sink.report(Diagnostic::group_skipped(&group, &error));
                    continue;
                }
            };

            debug!(
                %group,
                projects = projects.len(),
                subgroups = subgroups.len(),
                "expanded group"
            );
            traversal.projects.extend(projects);
            for subgroup in subgroups {
                debug!(
                    parent = %group,
                    id = subgroup.id,
                    path = subgroup.full_path.as_deref().unwrap_or(""),
                    "queued subgroup"
                );
                worklist.push((subgroup.group_ref(), subgroup.path_ref()));
            }
        }

        info!(
            groups = traversal.groups_visited,
            failed = traversal.groups_failed,
            projects = traversal.projects.len(),
            "traversal finished"
        );
        traversal
    }
}
