// StaffLedger - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Snapshot restore (or seed fallback)
// 4. Subcommand dispatch, saving the snapshot after any mutation

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use staffledger::app::state::{self, AppState};
use staffledger::core::filter::{FilterState, SortKey, SortOrder};
use staffledger::core::model::{Employee, EmployeePatch, NewEmployee, Status};
use staffledger::core::stats::{self, ReportPeriod};
use staffledger::core::{export, normalize};
use staffledger::platform::config::{self, AppConfig, PlatformPaths};
use staffledger::platform::fs;
use staffledger::util::constants;
use staffledger::util::error::{Result, StaffLedgerError};
use staffledger::util::logging;
use std::path::{Path, PathBuf};

/// StaffLedger - employee records, payroll statistics and spreadsheet import.
#[derive(Parser, Debug)]
#[command(name = "staffledger", version, about)]
struct Cli {
    /// Snapshot file to use instead of the platform data directory.
    #[arg(long = "data-file", global = true)]
    data_file: Option<PathBuf>,

    /// Configuration file to use instead of the platform config directory.
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List employees, optionally filtered and sorted.
    List {
        /// Case-insensitive text contained in the name.
        #[arg(short, long)]
        search: Option<String>,
        /// Regular expression matched against the name.
        #[arg(long)]
        regex: Option<String>,
        /// Only this department (exact label).
        #[arg(long)]
        department: Option<String>,
        /// Only this status (Ativo, Inativo, Férias).
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
        /// Active employees, best paid first.
        #[arg(long)]
        active: bool,
        /// Sort column (default: name, or salary with --active).
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },

    /// Headline figures and payroll per department.
    Stats,

    /// Distinct department labels.
    Departments,

    /// Detailed figures for one department.
    Department {
        name: String,
    },

    /// Employees admitted within the last N days.
    Recent {
        /// Window in days (defaults to [dashboard] recent_hire_days).
        #[arg(long)]
        days: Option<u64>,
    },

    /// Salary and admission report for a period (default: the last 12 months).
    Report {
        /// First admission date included (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last admission date included (YYYY-MM-DD, default today).
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Every record, whatever its admission date.
        #[arg(long, conflicts_with_all = ["from", "to"])]
        all: bool,
        /// Write the period report as JSON.
        #[arg(long)]
        json: bool,
        /// Output file for --json (stdout if omitted).
        #[arg(short, long, requires = "json")]
        out: Option<PathBuf>,
    },

    /// Salary histogram.
    Histogram {
        /// Number of buckets, 1-100 (defaults to [reports] report_histogram_bins).
        #[arg(long, value_parser = parse_bins)]
        bins: Option<usize>,
        /// Restrict to one department.
        #[arg(long)]
        department: Option<String>,
    },

    /// Import employees from a spreadsheet export (or from our own CSV export).
    Import {
        file: PathBuf,
        /// Show what would be imported without committing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Export all employees as CSV (or JSON).
    Export {
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Write JSON instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Add one employee.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        salary: f64,
        /// Admission date (YYYY-MM-DD).
        #[arg(long)]
        admitted: NaiveDate,
        /// Generated from the name if omitted.
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change fields of the employee with this e-mail.
    Update {
        email: String,
        #[arg(long)]
        name: Option<String>,
        /// New e-mail address.
        #[arg(long = "new-email")]
        new_email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
        #[arg(long)]
        admitted: Option<NaiveDate>,
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove the employee with this e-mail.
    Delete {
        email: String,
    },

    /// Print (or write) a sample import file.
    Template {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Name,
    Salary,
    Admission,
    Department,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Salary => SortKey::Salary,
            SortArg::Admission => SortKey::AdmissionDate,
            SortArg::Department => SortKey::Department,
        }
    }
}

fn parse_status(raw: &str) -> std::result::Result<Status, String> {
    Status::parse(raw).ok_or_else(|| {
        let valid: Vec<&str> = Status::all().iter().map(Status::label).collect();
        format!("unknown status '{raw}' (expected one of: {})", valid.join(", "))
    })
}

fn parse_bins(raw: &str) -> std::result::Result<usize, String> {
    let range = constants::MIN_HISTOGRAM_BINS..=constants::MAX_HISTOGRAM_BINS;
    match raw.trim().parse::<usize>() {
        Ok(bins) if range.contains(&bins) => Ok(bins),
        _ => Err(format!(
            "expected a bucket count between {} and {}",
            range.start(),
            range.end()
        )),
    }
}

/// Filter for `list`: the `--active` or `--department` quick filter, refined
/// by the status and sort flags.
fn list_filter(
    active: bool,
    department: Option<String>,
    status: Option<Status>,
    sort: Option<SortArg>,
    desc: bool,
) -> FilterState {
    let mut filter = if active {
        FilterState {
            department,
            ..FilterState::active_by_salary()
        }
    } else if let Some(name) = department {
        FilterState::department(name)
    } else {
        FilterState::default()
    };
    if status.is_some() {
        filter.status = status;
    }
    if let Some(key) = sort {
        filter.sort_key = key.into();
        filter.sort_order = SortOrder::Ascending;
    }
    if desc {
        filter.sort_order = SortOrder::Descending;
    }
    filter
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging is up; its warnings are replayed below.
    let platform_paths = PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "StaffLedger starting"
    );
    for w in &config_warnings {
        tracing::warn!(warning = %w, "Config warning");
        eprintln!("Warning: {w}");
    }

    // Snapshot location: CLI override > config > platform default
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| app_config.store_file.clone())
        .unwrap_or_else(|| platform_paths.store_file());

    if let Err(e) = run(cli.command, data_file, &app_config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, data_file: PathBuf, cfg: &AppConfig) -> Result<()> {
    // Template needs no records.
    if let Command::Template { ref out } = command {
        return write_output(out.as_deref(), normalize::import_template().as_bytes());
    }

    let mut app = AppState::load_or_seed(data_file);
    for w in &app.warnings {
        eprintln!("Warning: {w}");
    }
    let today = state::today();

    match command {
        Command::List {
            search,
            regex,
            department,
            status,
            active,
            sort,
            desc,
        } => {
            let mut filter = list_filter(active, department, status, sort, desc);
            filter.text_search = search.unwrap_or_default();
            if let Some(pattern) = regex {
                filter.set_regex(&pattern)?;
            }
            app.filter_state = filter;
            app.apply_filters();
            print_employees(app.filtered_records());
            println!(
                "{} of {} employees",
                app.filtered_indices.len(),
                app.store.len()
            );
        }

        Command::Stats => {
            let d = app.dashboard(today, cfg.recent_hire_days);
            println!("Employees:       {}", d.total_employees);
            println!("Total payroll:   {}", money(d.total_payroll));
            println!("Average salary:  {}", money(d.average_salary));
            println!("Departments:     {}", d.department_count);
            println!(
                "Recent hires:    {} (last {} days)",
                d.recent_hire_count, cfg.recent_hire_days
            );
            println!();
            println!(
                "{:<24} {:>6} {:>14} {:>14} {:>8}",
                "Department", "Staff", "Total cost", "Average", "Share"
            );
            for dept in stats::department_stats(app.store.records()) {
                println!(
                    "{:<24} {:>6} {:>14} {:>14} {:>7.1}%",
                    dept.name,
                    dept.employee_count,
                    money(dept.total_cost),
                    money(dept.average_salary),
                    dept.percent_of_payroll
                );
            }
        }

        Command::Departments => {
            for name in app.store.departments() {
                println!("{name}");
            }
        }

        Command::Department { name } => {
            let Some(detail) = stats::department_detail(app.store.records(), &name) else {
                println!("No employees in department '{name}'.");
                return Ok(());
            };
            let members = app.store.by_department(&name);
            println!("{}", detail.department);
            print_summary(&detail.summary);
            println!("Share of payroll: {:.1}%", detail.percent_of_payroll);
            println!();
            println!("Average salary by role:");
            for r in &detail.role_averages {
                println!(
                    "  {:<28} {:>14} ({})",
                    r.role,
                    money(r.average_salary),
                    r.employee_count
                );
            }
            println!("Status:");
            for s in &detail.status_distribution {
                println!("  {:<10} {}", s.status, s.count);
            }
            println!("Salary distribution:");
            print_histogram(&stats::salary_histogram(
                &members,
                cfg.department_histogram_bins,
            ));
            println!();
            print_employees(members.iter());
        }

        Command::Recent { days } => {
            let days = days.unwrap_or(cfg.recent_hire_days);
            let recent = stats::recent_hires(app.store.records(), days, today);
            print_employees(recent.iter());
            println!("{} admitted since {} days ago", recent.len(), days);
        }

        Command::Report {
            from,
            to,
            all,
            json,
            out,
        } => {
            let period = if all {
                ReportPeriod::covering(app.store.records(), today)
            } else {
                let default =
                    ReportPeriod::trailing_months(today, constants::REPORT_PERIOD_MONTHS);
                ReportPeriod {
                    start: from.unwrap_or(default.start),
                    end: to.unwrap_or(default.end),
                }
            };
            tracing::debug!(start = %period.start, end = %period.end, json, "Building report");

            if json {
                let report = stats::period_report(app.store.records(), period, cfg.top_salaries);
                let mut buf = Vec::new();
                export::export_report_json(&report, &mut buf)?;
                write_output(out.as_deref(), &buf)?;
                if let Some(path) = out {
                    println!(
                        "Report for {} to {} ({} employees) written to {}",
                        period.start,
                        period.end,
                        report.total_employees,
                        path.display()
                    );
                }
                return Ok(());
            }

            let records =
                stats::filter_by_admission_range(app.store.records(), period.start, period.end);
            println!("Period: {} to {}", period.start, period.end);
            let Some(summary) = stats::salary_summary(&records) else {
                println!("No employees admitted in the selected period.");
                return Ok(());
            };
            print_summary(&summary);

            println!();
            println!("By department:");
            for d in stats::department_salary_summaries(&records) {
                println!(
                    "  {:<24} {:>4} {:>14} {:>14}",
                    d.department,
                    d.summary.count,
                    money(d.summary.mean),
                    money(d.summary.median)
                );
            }

            println!("Top salaries:");
            for e in stats::top_salaries(&records, cfg.top_salaries) {
                println!("  {:<28} {:>14}", e.name, money(e.salary));
            }

            println!("Admissions by month:");
            let growth = stats::cumulative_growth(&records);
            for m in stats::hires_by_month(&records) {
                println!("  {} {:>4}", m.month, m.count);
            }
            if let Some(last) = growth.last() {
                println!("Head-count after {}: {}", last.date, last.cumulative);
            }

            println!("Status:");
            for s in stats::status_distribution(&records) {
                println!("  {:<10} {}", s.status, s.count);
            }

            println!("Salary distribution:");
            print_histogram(&stats::salary_histogram(&records, cfg.report_histogram_bins));
        }

        Command::Histogram { bins, department } => {
            let bins = bins.unwrap_or(cfg.report_histogram_bins);
            let records = match department {
                Some(ref name) => app.store.by_department(name),
                None => app.store.snapshot(),
            };
            print_histogram(&stats::salary_histogram(&records, bins));
        }

        Command::Import { file, dry_run } => {
            let text = fs::read_file_lossy(&file).map_err(|e| StaffLedgerError::Io {
                path: file.clone(),
                operation: "read import file",
                source: e,
            })?;

            let result = if export::is_export(&text) {
                tracing::info!(path = %file.display(), "Importing a StaffLedger export");
                if dry_run {
                    let candidates = export::decode_export(&text)?;
                    println!("{} records in export file; nothing committed.", candidates.len());
                    return Ok(());
                }
                app.import_exported(&text)?
            } else {
                let preview = app.preview_import(&text);
                println!(
                    "Delimiter '{}': {} rows, {} accepted, {} dropped",
                    preview.delimiter,
                    preview.rows_seen,
                    preview.rows_accepted,
                    preview.rows_dropped()
                );
                for d in &preview.diagnostics {
                    println!("  {d}");
                }
                for c in preview.candidates.iter().take(constants::IMPORT_PREVIEW_ROWS) {
                    println!(
                        "  {:<28} {:<24} {:>14} {:<16} {}",
                        c.name,
                        c.role,
                        money(c.salary),
                        c.department,
                        c.admission_date
                    );
                }
                if dry_run {
                    app.cancel_import();
                    println!("Dry run; nothing committed.");
                    return Ok(());
                }
                app.commit_import().unwrap_or_default()
            };

            println!(
                "Imported {}, failed {}.",
                result.success_count, result.error_count
            );
            for m in &result.messages {
                println!("  {m}");
            }
        }

        Command::Export { out, json } => {
            let mut buf = Vec::new();
            let count = if json {
                export::export_json(app.store.records(), &mut buf)?
            } else {
                export::export_csv(app.store.records(), &mut buf)?
            };
            write_output(out.as_deref(), &buf)?;
            if let Some(path) = out {
                println!("Exported {count} employees to {}", path.display());
            }
        }

        Command::Add {
            name,
            role,
            department,
            salary,
            admitted,
            email,
            phone,
            status,
            notes,
        } => {
            let mut new = NewEmployee::new(name, role, department, salary, admitted);
            new.email = email.unwrap_or_default();
            new.phone = phone.unwrap_or_default();
            new.status = status.unwrap_or_default();
            new.notes = notes.unwrap_or_default();
            let id = app.add_employee(new)?;
            if let Some(e) = app.store.get(id) {
                println!("Added {} <{}>", e.name, e.email);
            }
        }

        Command::Update {
            email,
            name,
            new_email,
            phone,
            department,
            role,
            salary,
            admitted,
            status,
            notes,
        } => {
            let patch = EmployeePatch {
                name,
                email: new_email,
                phone,
                department,
                role,
                salary,
                admission_date: admitted,
                status,
                notes,
            };
            if patch.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            app.update_employee(&email, &patch)?;
            println!("{}", app.status_message);
        }

        Command::Delete { email } => {
            let removed = app.delete_employee(&email)?;
            println!("Removed {} <{}>", removed.name, removed.email);
        }

        Command::Template { .. } => {}
    }

    if app.dirty {
        app.save()?;
    }
    Ok(())
}

/// Write to `path`, or to stdout when no path is given.
fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write_atomic(p, bytes).map_err(|e| StaffLedgerError::Io {
            path: p.to_path_buf(),
            operation: "write output file",
            source: e,
        }),
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .map_err(|e| StaffLedgerError::Io {
                    path: PathBuf::from("<stdout>"),
                    operation: "write output",
                    source: e,
                })
        }
    }
}

fn money(amount: f64) -> String {
    format!("{} {amount:.2}", constants::CURRENCY_SYMBOL)
}

fn print_employees<'a>(records: impl Iterator<Item = &'a Employee>) {
    for e in records {
        println!(
            "{:<24} {:<32} {:<18} {:<24} {:>14} {} {}",
            e.name,
            e.email,
            e.department,
            e.role,
            money(e.salary),
            e.admission_date,
            e.status
        );
    }
}

fn print_summary(s: &stats::SalarySummary) {
    println!("Employees: {}", s.count);
    println!("Total:     {}", money(s.total));
    println!("Mean:      {}", money(s.mean));
    println!("Median:    {}", money(s.median));
    println!("Range:     {} - {}", money(s.min), money(s.max));
}

fn print_histogram(bins: &[stats::HistogramBin]) {
    let widest = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for b in bins {
        let bar = "#".repeat(b.count * 40 / widest);
        println!("  {:<14} {:>4} {bar}", b.label(), b.count);
    }
}
