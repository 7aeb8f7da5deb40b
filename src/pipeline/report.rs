//! Run-summary assembly and rendering.
//!
//! The orchestrator collects timings, volumes, and quality stats into a
//! [`RunSummary`]; this module derives the business insights and renders the
//! fixed six-section text report plus a machine-readable JSON copy.

use std::path::Path;

use serde::Serialize;

use crate::error::EtlResult;
use crate::model::{DepartmentSummary, Employee, EmployeePerformance, Project};

/// Wall-clock duration of one pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub phase: String,
    pub seconds: f64,
}

/// Extracted vs. cleaned row counts for one source table.
#[derive(Debug, Clone, Serialize)]
pub struct TableVolume {
    pub table: String,
    pub extracted: usize,
    pub cleaned: usize,
}

impl TableVolume {
    /// Rows dropped by cleaning.
    pub fn removed(&self) -> usize {
        self.extracted.saturating_sub(self.cleaned)
    }
}

/// Validation outcome of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityStats {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub issues: Vec<String>,
}

/// The five fixed business insights.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Insights {
    pub highest_avg_salary_dept: Option<(String, f64)>,
    pub top_rated_employees: Vec<String>,
    pub most_active_projects_dept: Option<(String, i64)>,
    pub longest_tenure_employee: Option<(String, f64)>,
    pub avg_project_duration_days: Option<f64>,
}

/// Everything the report renders: execution, volume, quality, and insight
/// sections.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub total_seconds: f64,
    pub phases: Vec<PhaseTiming>,
    pub volumes: Vec<TableVolume>,
    pub quality: QualityStats,
    pub insights: Insights,
}

/// Derive the fixed insight set from the transformed tables.
pub fn compute_insights(
    dept_summary: &[DepartmentSummary],
    emp_performance: &[EmployeePerformance],
    employees: &[Employee],
    projects: &[Project],
) -> Insights {
    let unknown = || "Unknown".to_string();

    let highest_avg_salary_dept = dept_summary
        .iter()
        .filter_map(|d| Some((d.department_name.clone().unwrap_or_else(unknown), d.avg_salary?)))
        .fold(None::<(String, f64)>, |best, cur| match best {
            Some(b) if b.1 >= cur.1 => Some(b),
            _ => Some(cur),
        });

    let mut ranked: Vec<&EmployeePerformance> = emp_performance.iter().collect();
    // Descending by average rating, unrated employees last; stable, so ties
    // keep table order.
    ranked.sort_by(|a, b| {
        b.avg_rating
            .partial_cmp(&a.avg_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_rated_employees = ranked
        .iter()
        .take(5)
        .map(|e| e.name.clone().unwrap_or_else(unknown))
        .collect();

    let most_active_projects_dept = dept_summary
        .iter()
        .map(|d| {
            (
                d.department_name.clone().unwrap_or_else(unknown),
                d.active_projects,
            )
        })
        .fold(None::<(String, i64)>, |best, cur| match best {
            Some(b) if b.1 >= cur.1 => Some(b),
            _ => Some(cur),
        });

    let longest_tenure_employee = employees
        .iter()
        .filter_map(|e| Some((e.name.clone().unwrap_or_else(unknown), e.tenure_years?)))
        .fold(None::<(String, f64)>, |best, cur| match best {
            Some(b) if b.1 >= cur.1 => Some(b),
            _ => Some(cur),
        });

    let durations: Vec<i64> = projects.iter().filter_map(|p| p.duration_days).collect();
    let avg_project_duration_days = (!durations.is_empty())
        .then(|| durations.iter().sum::<i64>() as f64 / durations.len() as f64);

    Insights {
        highest_avg_salary_dept,
        top_rated_employees,
        most_active_projects_dept,
        longest_tenure_employee,
        avg_project_duration_days,
    }
}

/// Render the fixed six-section text report.
pub fn render_report(summary: &RunSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    let rule = "=".repeat(50);

    lines.push(rule.clone());
    lines.push("ETL PIPELINE SUMMARY REPORT".to_string());
    lines.push(format!("Generated on: {}", summary.finished_at));
    lines.push(format!("{rule}\n"));

    lines.push("1. EXECUTION SUMMARY".to_string());
    lines.push("--------------------".to_string());
    lines.push(format!("Start Time: {}", summary.started_at));
    lines.push(format!("End Time:   {}", summary.finished_at));
    lines.push(format!("Total Duration: {:.2} seconds", summary.total_seconds));
    lines.push("\nPhase Durations:".to_string());
    for p in &summary.phases {
        lines.push(format!("  - {}: {:.2} seconds", p.phase, p.seconds));
    }
    lines.push("\n".to_string());

    lines.push("2. DATA VOLUME SUMMARY".to_string());
    lines.push("----------------------".to_string());
    lines.push(format!(
        "{:<25} | {:<10} | {:<10} | {:<10}",
        "Table", "Extracted", "Cleaned", "Removed"
    ));
    lines.push("-".repeat(65));
    let mut total_loaded = 0usize;
    for v in &summary.volumes {
        lines.push(format!(
            "{:<25} | {:<10} | {:<10} | {:<10}",
            v.table,
            v.extracted,
            v.cleaned,
            v.removed()
        ));
        total_loaded += v.cleaned;
    }
    lines.push("-".repeat(65));
    lines.push(format!("Total Records Loaded to DB: {total_loaded}\n"));

    lines.push("3. DATA QUALITY SUMMARY".to_string());
    lines.push("-----------------------".to_string());
    lines.push(format!(
        "Total Checks Performed: {}",
        summary.quality.total_checks
    ));
    lines.push(format!("Passed: {}", summary.quality.passed));
    lines.push(format!("Failed/Issues: {}", summary.quality.failed));
    if summary.quality.issues.is_empty() {
        lines.push("\nNo Critical Issues Found.".to_string());
    } else {
        lines.push("\nCritical Issues Found:".to_string());
        for issue in &summary.quality.issues {
            lines.push(format!("  [!] {issue}"));
        }
    }
    lines.push("\n".to_string());

    lines.push("4. BUSINESS INSIGHTS".to_string());
    lines.push("--------------------".to_string());
    let ins = &summary.insights;
    if let Some((name, salary)) = &ins.highest_avg_salary_dept {
        lines.push(format!(
            "Highest Avg Salary Dept:   {name} (${})",
            thousands(*salary)
        ));
    }
    if !ins.top_rated_employees.is_empty() {
        lines.push(format!(
            "Top 5 Employees (Rating):  {}",
            ins.top_rated_employees.join(", ")
        ));
    }
    if let Some((name, count)) = &ins.most_active_projects_dept {
        lines.push(format!(
            "Most Active Projects Dept: {name} ({count} projects)"
        ));
    }
    if let Some((name, years)) = &ins.longest_tenure_employee {
        lines.push(format!("Longest Tenure Employee:   {name} ({years} years)"));
    }
    if let Some(days) = ins.avg_project_duration_days {
        lines.push(format!("Avg Project Duration:      {days:.1} days"));
    }

    lines.push(format!("\n{rule}"));
    lines.push("END OF REPORT".to_string());
    lines.push(rule);

    lines.join("\n")
}

/// Write the text report to `path`.
pub fn write_report(summary: &RunSummary, path: impl AsRef<Path>) -> EtlResult<()> {
    std::fs::write(path, render_report(summary))?;
    Ok(())
}

/// Write the JSON copy of the summary to `path`.
pub fn write_json_summary(summary: &RunSummary, path: impl AsRef<Path>) -> EtlResult<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Format a money amount with thousands separators and two decimals.
fn thousands(amount: f64) -> String {
    let formatted = format!("{amount:.2}");
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::{Insights, PhaseTiming, QualityStats, RunSummary, TableVolume, render_report, thousands};

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(103_600.0), "103,600.00");
        assert_eq!(thousands(950.5), "950.50");
        assert_eq!(thousands(-1_234_567.891), "-1,234,567.89");
    }

    #[test]
    fn report_contains_all_sections() {
        let summary = RunSummary {
            started_at: "2024-07-01 10:00:00".to_string(),
            finished_at: "2024-07-01 10:00:01".to_string(),
            total_seconds: 1.0,
            phases: vec![PhaseTiming {
                phase: "Extraction".to_string(),
                seconds: 0.2,
            }],
            volumes: vec![TableVolume {
                table: "employees".to_string(),
                extracted: 25,
                cleaned: 23,
            }],
            quality: QualityStats {
                total_checks: 4,
                passed: 3,
                failed: 1,
                issues: vec!["[Employees] Consistency Error: example".to_string()],
            },
            insights: Insights {
                highest_avg_salary_dept: Some(("Product".to_string(), 103_600.0)),
                top_rated_employees: vec!["Kavya Iyer".to_string()],
                most_active_projects_dept: Some(("Engineering".to_string(), 2)),
                longest_tenure_employee: Some(("Ananya Gupta".to_string(), 6.0)),
                avg_project_duration_days: Some(287.5),
            },
        };

        let text = render_report(&summary);
        for section in [
            "1. EXECUTION SUMMARY",
            "2. DATA VOLUME SUMMARY",
            "3. DATA QUALITY SUMMARY",
            "4. BUSINESS INSIGHTS",
            "END OF REPORT",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        let volume_line = text
            .lines()
            .find(|l| l.starts_with("employees"))
            .expect("volume row for employees");
        let cells: Vec<&str> = volume_line.split('|').map(str::trim).collect();
        assert_eq!(cells, vec!["employees", "25", "23", "2"]);
        assert!(text.contains("$103,600.00"));
        assert!(text.contains("[!] [Employees] Consistency Error: example"));
    }
}
