//! Per-project completion statistics.
//!
//! Derived on demand from the two registries and never persisted.

use serde::Serialize;

use crate::fields::Status;
use crate::project::Project;
use crate::task::Task;

/// Task counts for one project. `in_progress` counts every task that is not
/// done, so it includes both `todo` and `doing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub project_name: String,
    pub done: usize,
    pub in_progress: usize,
    pub total: usize,
}

impl ProjectStats {
    /// Share of done tasks in percent, rounded down. Zero for an empty project.
    pub fn percent_done(&self) -> u16 {
        if self.total == 0 {
            0
        } else {
            (self.done * 100 / self.total) as u16
        }
    }
}

/// Compute one entry per project, in registry order.
///
/// Tasks are matched by exact, case-sensitive equality between `task.project`
/// and `project.name`. Tasks naming no registered project are not counted
/// anywhere; projects without tasks still get an all-zero entry.
pub fn compute_stats(projects: &[Project], tasks: &[Task]) -> Vec<ProjectStats> {
    projects
        .iter()
        .map(|p| {
            let (total, done) = tasks
                .iter()
                .filter(|t| t.project == p.name)
                .fold((0, 0), |(total, done), t| {
                    (total + 1, done + usize::from(t.status == Status::Done))
                });
            ProjectStats {
                project_name: p.name.clone(),
                done,
                in_progress: total - done,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use proptest::prelude::*;

    fn project(id: u64, name: &str) -> Project {
        Project { id, name: name.to_string() }
    }

    fn task(id: u64, project: &str, status: Status) -> Task {
        NewTask::new(format!("t{id}")).project(project).status(status).into_task(id)
    }

    #[test]
    fn counts_done_and_not_done() {
        let projects = vec![project(1, "A"), project(2, "B")];
        let tasks = vec![
            task(1, "A", Status::Todo),
            task(2, "A", Status::Doing),
            task(3, "A", Status::Done),
            task(4, "B", Status::Done),
        ];
        let stats = compute_stats(&projects, &tasks);
        assert_eq!(
            stats,
            vec![
                ProjectStats { project_name: "A".into(), done: 1, in_progress: 2, total: 3 },
                ProjectStats { project_name: "B".into(), done: 1, in_progress: 0, total: 1 },
            ]
        );
    }

    #[test]
    fn empty_project_yields_zero_entry() {
        let stats = compute_stats(&[project(1, "Vuoto")], &[]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total, 0);
        assert_eq!(stats[0].done, 0);
        assert_eq!(stats[0].in_progress, 0);
        assert_eq!(stats[0].percent_done(), 0);
    }

    #[test]
    fn orphans_and_case_mismatches_are_excluded() {
        let projects = vec![project(1, "Cantiere A")];
        let tasks = vec![
            task(1, "Nonexistent Project", Status::Todo),
            task(2, "cantiere a", Status::Done),
            task(3, "Cantiere A ", Status::Done),
        ];
        let stats = compute_stats(&projects, &tasks);
        assert_eq!(stats[0].total, 0);
    }

    #[test]
    fn duplicate_names_report_the_same_counts_twice() {
        let projects = vec![project(1, "A"), project(2, "A")];
        let tasks = vec![task(1, "A", Status::Done)];
        let stats = compute_stats(&projects, &tasks);
        assert_eq!(stats[0], stats[1]);
        assert_eq!(stats[0].total, 1);
    }

    #[test]
    fn percent_done_rounds_down() {
        let s = ProjectStats { project_name: "A".into(), done: 2, in_progress: 1, total: 3 };
        assert_eq!(s.percent_done(), 66);
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![Just(Status::Todo), Just(Status::Doing), Just(Status::Done)]
    }

    proptest! {
        #[test]
        fn totals_are_consistent(
            names in prop::collection::vec("[ABC]", 0..5),
            raw in prop::collection::vec(("[ABCD]", arb_status()), 0..40),
        ) {
            let projects: Vec<Project> = names
                .iter()
                .enumerate()
                .map(|(i, n)| project(i as u64, n))
                .collect();
            let tasks: Vec<Task> = raw
                .iter()
                .enumerate()
                .map(|(i, (p, s))| task(i as u64, p, *s))
                .collect();
            let stats = compute_stats(&projects, &tasks);
            prop_assert_eq!(stats.len(), projects.len());
            for (p, s) in projects.iter().zip(&stats) {
                prop_assert_eq!(&s.project_name, &p.name);
                prop_assert_eq!(s.done + s.in_progress, s.total);
                let expected = tasks.iter().filter(|t| t.project == p.name).count();
                prop_assert_eq!(s.total, expected);
            }
        }
    }
}
