// StaffLedger - core/export.rs
//
// CSV and JSON export of the record set, plus decoding of our own CSV export.
// Core layer: writes to any Write trait object.
//
// The CSV format never quotes or escapes. A value containing a comma produces
// a line with extra columns, which `decode_export` rejects.

use crate::core::model::{CandidateRecord, Employee, Status};
use crate::core::stats::PeriodReport;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;

/// Fixed export header, in column order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "nome",
    "email",
    "telefone",
    "departamento",
    "cargo",
    "salario",
    "data_admissao",
    "status",
    "observacoes",
];

/// Export records to comma-delimited text.
///
/// Writes the header then one line per record:
/// name, email, phone, department, role, salary, admission date, status, notes.
pub fn export_csv<W: Write>(records: &[Employee], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    csv_writer
        .write_record(EXPORT_COLUMNS)
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for e in records {
        let salary = e.salary.to_string();
        let date = e.admission_date.format(constants::ISO_DATE_FORMAT).to_string();
        csv_writer
            .write_record([
                e.name.as_str(),
                e.email.as_str(),
                e.phone.as_str(),
                e.department.as_str(),
                e.role.as_str(),
                salary.as_str(),
                date.as_str(),
                e.status.label(),
                e.notes.as_str(),
            ])
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;

    tracing::debug!(records = count, "CSV export written");
    Ok(count)
}

/// `export_csv` into a string.
pub fn export_csv_string(records: &[Employee]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_csv(records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(records: &[Employee], writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json { source: e })?;
    Ok(records.len())
}

/// Write a period report as pretty-printed JSON.
pub fn export_report_json<W: Write>(report: &PeriodReport, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json { source: e })
}

/// True if the first non-blank line of `text` is the export header.
///
/// Export files must go through `decode_export`: the import pipeline would
/// read their plain decimal salaries as thousands-separated amounts.
pub fn is_export(text: &str) -> bool {
    text.lines()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|header| {
            header
                .trim_start_matches('\u{feff}')
                .split(',')
                .map(str::trim)
                .eq(EXPORT_COLUMNS.iter().copied())
        })
}

/// Read a file produced by `export_csv` back into candidate records.
///
/// This is the export column mapping reversed: every field, including e-mail,
/// phone, status and notes, is carried over. Salaries are plain decimal
/// numbers here (not the localised import format); an unparseable salary
/// becomes zero and an unknown status is left for the importer to default.
pub fn decode_export(text: &str) -> Result<Vec<CandidateRecord>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header = reader
        .headers()
        .map_err(|e| ExportError::Csv { source: e })?
        .clone();
    if header.iter().map(str::trim).ne(EXPORT_COLUMNS.iter().copied()) {
        return Err(ExportError::UnexpectedHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut candidates = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ExportError::Csv { source: e })?;
        let line = row.position().map_or(0, |p| p.line());
        if row.len() != EXPORT_COLUMNS.len() {
            return Err(ExportError::ColumnCount {
                line,
                found: row.len(),
                expected: EXPORT_COLUMNS.len(),
            });
        }
        let field = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        let optional = |idx: usize| Some(field(idx)).filter(|v| !v.is_empty());

        candidates.push(CandidateRecord {
            line_number: line,
            name: field(0),
            email: optional(1),
            phone: optional(2),
            department: field(3),
            role: field(4),
            salary: field(5).parse::<f64>().unwrap_or(0.0),
            admission_date: field(6),
            status: Status::parse(&field(7)),
            notes: optional(8),
        });
    }

    tracing::debug!(records = candidates.len(), "Exported CSV decoded");
    Ok(candidates)
}
