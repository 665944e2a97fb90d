use crate::vulnerability_tracking::domain::Project;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-project line of the cross-project overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub description: String,
    pub vulnerable: bool,
}

/// Cross-project overview: every project's vulnerable flag plus a total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsOverview {
    pub projects: BTreeMap<String, ProjectSummary>,
    pub vulnerable_projects: usize,
}

/// VulnerabilityAggregator service for read-side views over stored projects
///
/// Views are recomputed on every call from the project list; nothing is cached.
pub struct VulnerabilityAggregator;

impl VulnerabilityAggregator {
    /// Summarizes every project as vulnerable/clean
    ///
    /// # Returns
    /// `None` when there are no projects at all
    pub fn overview(projects: &[Project]) -> Option<ProjectsOverview> {
        if projects.is_empty() {
            return None;
        }

        let summaries: BTreeMap<String, ProjectSummary> = projects
            .iter()
            .map(|project| {
                (
                    project.name().to_string(),
                    ProjectSummary {
                        description: project.description().to_string(),
                        vulnerable: project.is_vulnerable(),
                    },
                )
            })
            .collect();
        let vulnerable_projects = summaries.values().filter(|s| s.vulnerable).count();

        Some(ProjectsOverview {
            projects: summaries,
            vulnerable_projects,
        })
    }

    /// Merges vulnerable dependencies across projects
    ///
    /// Keys are lower-cased dependency names; values list every project the
    /// dependency is vulnerable in as "{project}: {count}", joined by ", ".
    /// Projects are visited in name order, dependencies in manifest order.
    pub fn vulnerable_dependencies(projects: &[Project]) -> BTreeMap<String, String> {
        let mut sorted: Vec<&Project> = projects.iter().collect();
        sorted.sort_by(|a, b| a.name().cmp(b.name()));

        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for project in sorted {
            for (name, status) in project.dependencies().iter() {
                if !status.is_vulnerable() {
                    continue;
                }
                merged.entry(name.to_lowercase()).or_default().push(format!(
                    "{}: {}",
                    project.name(),
                    status.vulnerability_count()
                ));
            }
        }

        merged
            .into_iter()
            .map(|(name, entries)| (name, entries.join(", ")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulnerability_tracking::domain::{DependencyMap, DependencyStatus};
    use pretty_assertions::assert_eq;

    fn project(name: &str, deps: &[(&str, usize)]) -> Project {
        let dependencies: DependencyMap = deps
            .iter()
            .map(|(dep, count)| (*dep, DependencyStatus::new(*count)))
            .collect();
        Project::new(name.to_string(), format!("{} description", name), dependencies)
    }

    #[test]
    fn test_overview_empty() {
        assert!(VulnerabilityAggregator::overview(&[]).is_none());
    }

    #[test]
    fn test_overview_counts_vulnerable_projects() {
        let projects = vec![
            project("p2", &[("Django", 0)]),
            project("p1", &[("Django", 0), ("requests", 2)]),
            project("p3", &[("lodash", 1)]),
        ];

        let overview = VulnerabilityAggregator::overview(&projects).unwrap();

        assert_eq!(overview.vulnerable_projects, 2);
        assert_eq!(overview.projects.len(), 3);
        assert!(overview.projects["p1"].vulnerable);
        assert!(!overview.projects["p2"].vulnerable);
        assert_eq!(overview.projects["p3"].description, "p3 description");
        let names: Vec<&String> = overview.projects.keys().collect();
        assert_eq!(names, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_overview_project_without_dependencies_is_clean() {
        let overview = VulnerabilityAggregator::overview(&[project("empty", &[])]).unwrap();
        assert_eq!(overview.vulnerable_projects, 0);
        assert!(!overview.projects["empty"].vulnerable);
    }

    #[test]
    fn test_vulnerable_dependencies_merges_across_projects() {
        let projects = vec![
            project("p2", &[("requests", 1)]),
            project("p1", &[("requests", 3), ("Django", 0)]),
        ];

        let merged = VulnerabilityAggregator::vulnerable_dependencies(&projects);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged["requests"], "p1: 3, p2: 1");
    }

    #[test]
    fn test_vulnerable_dependencies_case_folds_names() {
        let projects = vec![
            project("alpha", &[("PyYAML", 2)]),
            project("beta", &[("pyyaml", 1)]),
        ];

        let merged = VulnerabilityAggregator::vulnerable_dependencies(&projects);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged["pyyaml"], "alpha: 2, beta: 1");
    }

    #[test]
    fn test_vulnerable_dependencies_skips_clean() {
        let projects = vec![project("p1", &[("Django", 0), ("attrs", 0)])];
        assert!(VulnerabilityAggregator::vulnerable_dependencies(&projects).is_empty());
    }
}
