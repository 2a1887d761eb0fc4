// StaffLedger - core/stats.rs
//
// Aggregation engine: pure projections over a slice of employee records.
// Every function recomputes from scratch; nothing is cached. "Today" is always
// passed in so results are reproducible.
//
// Sorts are stable (`sort_by`), so records that compare equal keep their
// input order.

use crate::core::model::{DashboardStats, DepartmentStats, Employee, Status};
use chrono::{Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Report types
// =============================================================================

/// Salary distribution figures for a group of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// `SalarySummary` for one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSalarySummary {
    pub department: String,
    pub summary: SalarySummary,
}

/// One histogram bucket covering `[lower, upper)`.
/// The last bucket of a histogram also holds values equal to its `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Compact label in thousands, e.g. `R$5k-6k`.
    pub fn label(&self) -> String {
        format!(
            "R${}k-{}k",
            (self.lower / 1000.0).round(),
            (self.upper / 1000.0).round()
        )
    }
}

/// Number of admissions in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyHires {
    pub month: String,
    pub count: usize,
}

/// Head-count after each admission, in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub cumulative: usize,
}

/// Average salary for one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleAverage {
    pub role: String,
    pub average_salary: f64,
    pub employee_count: usize,
}

/// Head-count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Everything shown for a single department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentDetail {
    pub department: String,
    pub summary: SalarySummary,
    /// Share of the company-wide payroll, 0-100.
    pub percent_of_payroll: f64,
    pub role_averages: Vec<RoleAverage>,
    pub status_distribution: Vec<StatusCount>,
}

/// Admission-date window a period report covers, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// The trailing `months` up to and including `today`.
    ///
    /// A start that would fall before the calendar's first date is clamped
    /// to it. Month arithmetic clamps to the last day of a shorter month, so
    /// a year back from 29 February is 28 February.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        Self {
            start: today
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    /// From the earliest admission in `records` to `today` or the latest
    /// admission, whichever is later. Just `today` when there are no records.
    pub fn covering(records: &[Employee], today: NaiveDate) -> Self {
        let dates = || records.iter().map(|e| e.admission_date);
        Self {
            start: dates().min().unwrap_or(today),
            end: dates().max().map_or(today, |latest| latest.max(today)),
        }
    }
}

/// Compact entry of the top-salaries table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSalary {
    pub name: String,
    pub salary: f64,
    pub role: String,
    pub department: String,
}

/// Saved report for the records admitted within a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub total_employees: usize,
    pub total_payroll: f64,
    pub departments: Vec<DepartmentSalarySummary>,
    pub top_salaries: Vec<TopSalary>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Sum of all salaries.
pub fn total_payroll(records: &[Employee]) -> f64 {
    records.iter().map(|e| e.salary).sum()
}

/// Headline figures. Recent hires are admissions within the trailing
/// `recent_window_days` up to and including `today`.
pub fn dashboard_stats(
    records: &[Employee],
    today: NaiveDate,
    recent_window_days: u64,
) -> DashboardStats {
    let total_employees = records.len();
    let total_payroll = total_payroll(records);
    let average_salary = if total_employees > 0 {
        total_payroll / total_employees as f64
    } else {
        0.0
    };
    let department_count = records
        .iter()
        .map(|e| e.department.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();
    let cutoff = window_start(today, recent_window_days);
    let recent_hire_count = records
        .iter()
        .filter(|e| e.admission_date >= cutoff && e.admission_date <= today)
        .count();

    DashboardStats {
        total_employees,
        total_payroll,
        average_salary,
        department_count,
        recent_hire_count,
    }
}

/// Per-department payroll, most expensive department first.
///
/// Only departments referenced by at least one record appear.
pub fn department_stats(records: &[Employee]) -> Vec<DepartmentStats> {
    let payroll = total_payroll(records);
    let mut stats: Vec<DepartmentStats> = group_by(records, |e| e.department.as_str())
        .into_iter()
        .map(|(name, members)| {
            let total_cost: f64 = members.iter().map(|e| e.salary).sum();
            let employee_count = members.len();
            DepartmentStats {
                name: name.to_string(),
                total_cost,
                average_salary: total_cost / employee_count as f64,
                employee_count,
                percent_of_payroll: percent(total_cost, payroll),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    stats
}

// =============================================================================
// Salary distribution
// =============================================================================

/// Median of `values`: middle element of the ascending order, or the mean of
/// the two middle elements for an even count. `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Count, total, mean, median, min and max salary. `None` for no records.
pub fn salary_summary(records: &[Employee]) -> Option<SalarySummary> {
    let salaries: Vec<f64> = records.iter().map(|e| e.salary).collect();
    let median = median(&salaries)?;
    let total: f64 = salaries.iter().sum();
    let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
    let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(SalarySummary {
        count: salaries.len(),
        total,
        mean: total / salaries.len() as f64,
        median,
        min,
        max,
    })
}

/// `SalarySummary` per department, in order of first appearance.
pub fn department_salary_summaries(records: &[Employee]) -> Vec<DepartmentSalarySummary> {
    group_by(records, |e| e.department.as_str())
        .into_iter()
        .filter_map(|(department, members)| {
            let owned: Vec<Employee> = members.into_iter().cloned().collect();
            salary_summary(&owned).map(|summary| DepartmentSalarySummary {
                department: department.to_string(),
                summary,
            })
        })
        .collect()
}

/// Split the salary range into `bins` equal buckets and count members.
///
/// When every salary is equal the range would be zero; a width of 1 is used
/// instead so all records land in the first bucket. Empty input or zero bins
/// produce no buckets.
pub fn salary_histogram(records: &[Employee], bins: usize) -> Vec<HistogramBin> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = records.iter().map(|e| e.salary).fold(f64::INFINITY, f64::min);
    let max = records
        .iter()
        .map(|e| e.salary)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let width = if range > 0.0 { range / bins as f64 } else { 1.0 };

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for e in records {
        let idx = bucket_index(&histogram, e.salary, min, width);
        histogram[idx].count += 1;
    }
    histogram
}

/// Bucket holding `value`: the one with `lower <= value < upper`, or the last
/// bucket for anything at or past its lower bound (the maximum included).
///
/// The quotient gives a first guess; rounding can put it one bucket off near
/// an edge, so it is nudged until it agrees with the stored bounds.
fn bucket_index(histogram: &[HistogramBin], value: f64, min: f64, width: f64) -> usize {
    let last = histogram.len() - 1;
    let mut idx = (((value - min) / width).floor().max(0.0) as usize).min(last);
    while idx > 0 && value < histogram[idx].lower {
        idx -= 1;
    }
    while idx < last && value >= histogram[idx].upper {
        idx += 1;
    }
    idx
}

/// The `n` highest-paid records, highest first.
pub fn top_salaries(records: &[Employee], n: usize) -> Vec<Employee> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.salary.total_cmp(&a.salary));
    sorted.truncate(n);
    sorted
}

/// Build the report for the records admitted within `period`.
///
/// Head-count and payroll cover the period only; `top` bounds the
/// top-salaries table.
pub fn period_report(records: &[Employee], period: ReportPeriod, top: usize) -> PeriodReport {
    let selected = filter_by_admission_range(records, period.start, period.end);
    let top_salaries = top_salaries(&selected, top)
        .into_iter()
        .map(|e| TopSalary {
            name: e.name,
            salary: e.salary,
            role: e.role,
            department: e.department,
        })
        .collect();

    PeriodReport {
        period,
        total_employees: selected.len(),
        total_payroll: total_payroll(&selected),
        departments: department_salary_summaries(&selected),
        top_salaries,
    }
}

// =============================================================================
// Time-based views
// =============================================================================

/// Records admitted on or after `today - days`, newest first.
pub fn recent_hires(records: &[Employee], days: u64, today: NaiveDate) -> Vec<Employee> {
    let cutoff = window_start(today, days);
    let mut recent: Vec<Employee> = records
        .iter()
        .filter(|e| e.admission_date >= cutoff)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.admission_date.cmp(&a.admission_date));
    recent
}

/// Records admitted between `start` and `end`, both inclusive, in input order.
pub fn filter_by_admission_range(
    records: &[Employee],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Employee> {
    records
        .iter()
        .filter(|e| e.admission_date >= start && e.admission_date <= end)
        .cloned()
        .collect()
}

/// Admissions per month, oldest month first.
pub fn hires_by_month(records: &[Employee]) -> Vec<MonthlyHires> {
    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for e in records {
        *months
            .entry(e.admission_date.format("%Y-%m").to_string())
            .or_insert(0) += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| MonthlyHires { month, count })
        .collect()
}

/// Running head-count in admission order.
pub fn cumulative_growth(records: &[Employee]) -> Vec<GrowthPoint> {
    let mut dates: Vec<NaiveDate> = records.iter().map(|e| e.admission_date).collect();
    dates.sort();
    dates
        .into_iter()
        .enumerate()
        .map(|(idx, date)| GrowthPoint {
            date,
            cumulative: idx + 1,
        })
        .collect()
}

// =============================================================================
// Department detail
// =============================================================================

/// Head-count per status, in order of first appearance.
pub fn status_distribution(records: &[Employee]) -> Vec<StatusCount> {
    group_by(records, |e| e.status)
        .into_iter()
        .map(|(status, members)| StatusCount {
            status,
            count: members.len(),
        })
        .collect()
}

/// Average salary per role, best-paid role first.
pub fn role_averages(records: &[Employee]) -> Vec<RoleAverage> {
    let mut averages: Vec<RoleAverage> = group_by(records, |e| e.role.as_str())
        .into_iter()
        .map(|(role, members)| {
            let total: f64 = members.iter().map(|e| e.salary).sum();
            RoleAverage {
                role: role.to_string(),
                average_salary: total / members.len() as f64,
                employee_count: members.len(),
            }
        })
        .collect();
    averages.sort_by(|a, b| b.average_salary.total_cmp(&a.average_salary));
    averages
}

/// Detail view for one department, measured against the whole `records` set.
/// `None` if no record belongs to `department`.
pub fn department_detail(records: &[Employee], department: &str) -> Option<DepartmentDetail> {
    let members: Vec<Employee> = records
        .iter()
        .filter(|e| e.department == department)
        .cloned()
        .collect();
    let summary = salary_summary(&members)?;
    Some(DepartmentDetail {
        department: department.to_string(),
        percent_of_payroll: percent(summary.total, total_payroll(records)),
        summary,
        role_averages: role_averages(&members),
        status_distribution: status_distribution(&members),
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn window_start(today: NaiveDate, days: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Group records by key, keeping groups in order of first appearance and
/// members in input order.
fn group_by<'a, K, F>(records: &'a [Employee], key: F) -> Vec<(K, Vec<&'a Employee>)>
where
    K: std::hash::Hash + Eq + Clone,
    F: Fn(&'a Employee) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Employee>)> = Vec::new();
    for e in records {
        let k = key(e);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(e),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![e]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::EmployeeId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make(id: u64, dept: &str, role: &str, salary: f64, admitted: NaiveDate) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            name: format!("Employee {id}"),
            email: format!("e{id}@empresa.com"),
            phone: String::new(),
            department: dept.to_string(),
            role: role.to_string(),
            salary,
            admission_date: admitted,
            status: Status::Active,
            notes: String::new(),
        }
    }

    fn sample() -> Vec<Employee> {
        vec![
            make(1, "Tecnologia", "Dev Senior", 8500.0, date(2023, 1, 15)),
            make(2, "Vendas", "Gerente", 12000.0, date(2022, 6, 10)),
            make(3, "Tecnologia", "Dev Pleno", 6500.0, date(2024, 1, 10)),
            make(4, "Vendas", "Vendedor", 3500.0, date(2024, 2, 1)),
            make(5, "Marketing", "Analista", 5500.0, date(2023, 8, 20)),
        ]
    }

    #[test]
    fn test_dashboard_empty_store() {
        let stats = dashboard_stats(&[], date(2024, 1, 1), 30);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_dashboard_totals() {
        let stats = dashboard_stats(&sample(), date(2024, 2, 15), 30);
        assert_eq!(stats.total_employees, 5);
        assert_eq!(stats.total_payroll, 36000.0);
        assert_eq!(stats.average_salary, 7200.0);
        assert_eq!(stats.department_count, 3);
        // 2024-02-01 is inside the window, 2024-01-10 is 36 days back.
        assert_eq!(stats.recent_hire_count, 1);
    }

    #[test]
    fn test_dashboard_window_boundaries() {
        let today = date(2024, 3, 31);
        let records = vec![
            make(1, "A", "R", 1.0, date(2024, 3, 1)), // exactly 30 days back
            make(2, "A", "R", 1.0, date(2024, 2, 29)),
            make(3, "A", "R", 1.0, date(2024, 3, 31)),
            make(4, "A", "R", 1.0, date(2024, 4, 1)), // future
        ];
        assert_eq!(dashboard_stats(&records, today, 30).recent_hire_count, 2);
    }

    #[test]
    fn test_department_stats_sorted_and_closed() {
        let stats = department_stats(&sample());
        let names: Vec<_> = stats.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Vendas", "Tecnologia", "Marketing"]);
        assert_eq!(stats[0].total_cost, 15500.0);
        assert_eq!(stats[0].average_salary, 7750.0);
        assert_eq!(stats[0].employee_count, 2);

        let pct: f64 = stats.iter().map(|d| d.percent_of_payroll).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        let cost: f64 = stats.iter().map(|d| d.total_cost).sum();
        assert!((cost - total_payroll(&sample())).abs() < 1e-9);
    }

    #[test]
    fn test_department_stats_zero_payroll() {
        let records = vec![make(1, "Estágio", "Estagiário", 0.0, date(2024, 1, 1))];
        let stats = department_stats(&records);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].percent_of_payroll, 0.0);
        assert!(department_stats(&[]).is_empty());
    }

    #[test]
    fn test_department_stats_ties_keep_first_appearance() {
        let records = vec![
            make(1, "B", "R", 100.0, date(2024, 1, 1)),
            make(2, "A", "R", 100.0, date(2024, 1, 1)),
        ];
        let names: Vec<_> = department_stats(&records)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_salary_summary() {
        let summary = salary_summary(&sample()).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.median, 6500.0);
        assert_eq!(summary.min, 3500.0);
        assert_eq!(summary.max, 12000.0);
        assert_eq!(summary.mean, 7200.0);
        assert!(salary_summary(&[]).is_none());
    }

    #[test]
    fn test_department_salary_summaries_first_appearance_order() {
        let summaries = department_salary_summaries(&sample());
        let names: Vec<_> = summaries.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(names, ["Tecnologia", "Vendas", "Marketing"]);
        assert_eq!(summaries[1].summary.median, 7750.0);
    }

    #[test]
    fn test_histogram_counts_every_record() {
        let hist = salary_histogram(&sample(), 8);
        assert_eq!(hist.len(), 8);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(hist[0].lower, 3500.0);
        assert_eq!(hist[7].upper, 12000.0);
        assert_eq!(hist[7].count, 1);
        assert_eq!(hist[0].count, 1);
    }

    #[test]
    fn test_histogram_degenerate_range() {
        let records = vec![
            make(1, "A", "R", 5000.0, date(2024, 1, 1)),
            make(2, "A", "R", 5000.0, date(2024, 1, 1)),
        ];
        let hist = salary_histogram(&records, 10);
        assert_eq!(hist.len(), 10);
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[0].lower, 5000.0);
        assert_eq!(hist[0].upper, 5001.0);
        assert!(hist[1..].iter().all(|b| b.count == 0));
    }

    /// Evenly spaced salaries put many values right on bucket edges.
    fn evenly_spaced(first: f64, last: f64, count: usize) -> Vec<Employee> {
        let step = (last - first) / (count - 1) as f64;
        (0..count)
            .map(|i| {
                let salary = if i + 1 == count { last } else { first + i as f64 * step };
                make(i as u64 + 1, "A", "R", salary, date(2024, 1, 1))
            })
            .collect()
    }

    fn assert_counts_match_bounds(records: &[Employee], hist: &[HistogramBin]) {
        let last = hist.len() - 1;
        for (i, bin) in hist.iter().enumerate() {
            let inside = records
                .iter()
                .filter(|e| e.salary >= bin.lower && (i == last || e.salary < bin.upper))
                .count();
            assert_eq!(bin.count, inside, "bucket {i} [{}, {})", bin.lower, bin.upper);
        }
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), records.len());
    }

    #[test]
    fn test_histogram_counts_agree_with_bucket_bounds() {
        let records = evenly_spaced(1000.3, 5555.55, 201);
        let hist = salary_histogram(&records, 10);
        assert_counts_match_bounds(&records, &hist);

        let records = evenly_spaced(3333.33, 9876.54, 201);
        let hist = salary_histogram(&records, 10);
        assert_counts_match_bounds(&records, &hist);
    }

    #[test]
    fn test_histogram_value_on_lower_bound_goes_up() {
        let ends = vec![
            make(1, "A", "R", 1000.3, date(2024, 1, 1)),
            make(2, "A", "R", 5555.55, date(2024, 1, 1)),
        ];
        let edges: Vec<f64> = salary_histogram(&ends, 10).iter().map(|b| b.lower).collect();

        let mut records = ends.clone();
        for (i, lower) in edges.iter().enumerate().skip(1) {
            records.push(make(10 + i as u64, "A", "R", *lower, date(2024, 1, 1)));
        }
        let hist = salary_histogram(&records, 10);
        let counts: Vec<usize> = hist.iter().map(|b| b.count).collect();
        assert_eq!(counts, [1, 1, 1, 1, 1, 1, 1, 1, 1, 2]);
        assert_counts_match_bounds(&records, &hist);
    }

    #[test]
    fn test_histogram_empty_inputs() {
        assert!(salary_histogram(&[], 8).is_empty());
        assert!(salary_histogram(&sample(), 0).is_empty());
    }

    #[test]
    fn test_histogram_label() {
        let bin = HistogramBin {
            lower: 5000.0,
            upper: 6062.5,
            count: 0,
        };
        assert_eq!(bin.label(), "R$5k-6k");
    }

    #[test]
    fn test_recent_hires_sorted_newest_first() {
        let today = date(2024, 2, 15);
        let recent = recent_hires(&sample(), 60, today);
        let ids: Vec<_> = recent.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, [4, 3]);
    }

    #[test]
    fn test_admission_range_is_inclusive() {
        let found = filter_by_admission_range(&sample(), date(2023, 1, 15), date(2023, 8, 20));
        let ids: Vec<_> = found.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, [1, 5]);
    }

    #[test]
    fn test_trailing_year_period() {
        let period = ReportPeriod::trailing_months(date(2025, 6, 30), 12);
        assert_eq!(period.start, date(2024, 6, 30));
        assert_eq!(period.end, date(2025, 6, 30));

        let leap = ReportPeriod::trailing_months(date(2024, 2, 29), 12);
        assert_eq!(leap.start, date(2023, 2, 28));
    }

    #[test]
    fn test_covering_period_includes_every_record() {
        let today = date(2024, 1, 1);
        let period = ReportPeriod::covering(&sample(), today);
        assert_eq!(period.start, date(2022, 6, 10));
        assert_eq!(period.end, date(2024, 2, 1));
        assert_eq!(period_report(&sample(), period, 10).total_employees, 5);

        let empty = ReportPeriod::covering(&[], today);
        assert_eq!((empty.start, empty.end), (today, today));
    }

    #[test]
    fn test_period_report_covers_only_the_period() {
        let period = ReportPeriod {
            start: date(2023, 1, 15),
            end: date(2023, 8, 20),
        };
        let report = period_report(&sample(), period, 1);
        assert_eq!(report.period, period);
        assert_eq!(report.total_employees, 2);
        assert_eq!(report.total_payroll, 14000.0);
        let depts: Vec<&str> = report.departments.iter().map(|d| d.department.as_str()).collect();
        assert_eq!(depts, ["Tecnologia", "Marketing"]);
        assert_eq!(
            report.top_salaries,
            vec![TopSalary {
                name: "Employee 1".to_string(),
                salary: 8500.0,
                role: "Dev Senior".to_string(),
                department: "Tecnologia".to_string(),
            }]
        );
    }

    #[test]
    fn test_period_report_serialises_period_and_tables() {
        let period = ReportPeriod {
            start: date(2020, 1, 1),
            end: date(2030, 1, 1),
        };
        let report = period_report(&sample(), period, 10);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["period"]["start"], "2020-01-01");
        assert_eq!(json["period"]["end"], "2030-01-01");
        assert_eq!(json["total_employees"], 5);
        assert_eq!(json["top_salaries"].as_array().unwrap().len(), 5);
        assert!(json["departments"][0]["summary"]["median"].is_number());
    }

    #[test]
    fn test_period_report_of_empty_period() {
        let period = ReportPeriod {
            start: date(1990, 1, 1),
            end: date(1990, 12, 31),
        };
        let report = period_report(&sample(), period, 10);
        assert_eq!(report.total_employees, 0);
        assert_eq!(report.total_payroll, 0.0);
        assert!(report.departments.is_empty());
        assert!(report.top_salaries.is_empty());
    }

    #[test]
    fn test_top_salaries() {
        let top = top_salaries(&sample(), 2);
        let ids: Vec<_> = top.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, [2, 1]);
        assert_eq!(top_salaries(&sample(), 99).len(), 5);
    }

    #[test]
    fn test_hires_by_month_and_growth() {
        let months = hires_by_month(&sample());
        assert_eq!(months.first().unwrap().month, "2022-06");
        assert_eq!(months.last().unwrap().month, "2024-02");
        assert_eq!(months.len(), 5);

        let growth = cumulative_growth(&sample());
        assert_eq!(growth.len(), 5);
        assert_eq!(growth[0].date, date(2022, 6, 10));
        assert_eq!(growth[4].cumulative, 5);
    }

    #[test]
    fn test_department_detail() {
        let mut records = sample();
        records[3].status = Status::OnLeave;
        let detail = department_detail(&records, "Vendas").unwrap();
        assert_eq!(detail.summary.count, 2);
        assert!((detail.percent_of_payroll - 15500.0 / 36000.0 * 100.0).abs() < 1e-9);
        assert_eq!(detail.role_averages[0].role, "Gerente");
        assert_eq!(
            detail.status_distribution,
            vec![
                StatusCount {
                    status: Status::Active,
                    count: 1
                },
                StatusCount {
                    status: Status::OnLeave,
                    count: 1
                },
            ]
        );
        assert!(department_detail(&records, "Jurídico").is_none());
    }
}
