//! Per-project assignment rollup.

use std::collections::HashMap;

use crate::cleaning::round1;
use crate::model::{Assignment, Project, ProjectWorkload};

/// Build one workload row per project.
///
/// Team size counts distinct assigned employees; allocation totals and the
/// 1-decimal average come from the present allocation values. Projects without
/// assignments fill with zeroes.
pub fn project_workload(projects: &[Project], assignments: &[Assignment]) -> Vec<ProjectWorkload> {
    struct WorkloadStats {
        employees: Vec<i64>,
        allocation_sum: f64,
        allocation_count: usize,
    }
    let mut stats: HashMap<i64, WorkloadStats> = HashMap::new();
    for a in assignments {
        let Some(pid) = a.project_id else { continue };
        let entry = stats.entry(pid).or_insert(WorkloadStats {
            employees: Vec::new(),
            allocation_sum: 0.0,
            allocation_count: 0,
        });
        if let Some(eid) = a.employee_id {
            if !entry.employees.contains(&eid) {
                entry.employees.push(eid);
            }
        }
        if let Some(alloc) = a.allocation_percentage {
            entry.allocation_sum += alloc;
            entry.allocation_count += 1;
        }
    }

    projects
        .iter()
        .map(|p| {
            let s = p.project_id.and_then(|id| stats.get(&id));
            ProjectWorkload {
                project_id: p.project_id,
                project_name: p.project_name.clone(),
                total_team_size: s.map_or(0, |s| s.employees.len() as i64),
                total_allocation: s.map_or(0.0, |s| s.allocation_sum),
                avg_allocation: s.map_or(0.0, |s| {
                    if s.allocation_count > 0 {
                        round1(s.allocation_sum / s.allocation_count as f64)
                    } else {
                        0.0
                    }
                }),
            }
        })
        .collect()
}
