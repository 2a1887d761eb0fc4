// StaffLedger - core/normalize.rs
//
// Import normalisation: raw delimited text -> ordered candidate records.
// Core layer: accepts already-materialised text, never touches the filesystem.
//
// The pipeline never fails. Rows without a name or role are
// dropped and unparseable salaries become zero; both are reported through
// `NormalizationResult::diagnostics` instead of failing the import.

use crate::core::model::CandidateRecord;
use crate::util::constants;
use std::fmt;

// =============================================================================
// Column mapping
// =============================================================================

/// Column index bound to each recognised field, from the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub role: Option<usize>,
    pub salary: Option<usize>,
    pub department: Option<usize>,
    pub admission_date: Option<usize>,
}

impl ColumnMap {
    /// Bind header cells to fields by keyword containment.
    ///
    /// Cells are trimmed and lowercased first. For each field the FIRST cell
    /// containing its keyword wins; cells matching nothing are ignored.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = ColumnMap::default();
        for (idx, raw) in headers.into_iter().enumerate() {
            let header = raw.trim().to_lowercase();
            bind_first(&mut map.name, idx, header.contains(constants::HEADER_KEYWORD_NAME));
            bind_first(&mut map.role, idx, header.contains(constants::HEADER_KEYWORD_ROLE));
            bind_first(
                &mut map.salary,
                idx,
                constants::HEADER_KEYWORDS_SALARY
                    .iter()
                    .any(|k| header.contains(k)),
            );
            bind_first(
                &mut map.department,
                idx,
                header.contains(constants::HEADER_KEYWORD_DEPARTMENT),
            );
            bind_first(
                &mut map.admission_date,
                idx,
                header.contains(constants::HEADER_KEYWORD_DATE),
            );
        }
        map
    }

    /// Names of the fields no header was bound to.
    pub fn unmapped_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.role.is_none() {
            missing.push("role");
        }
        if self.salary.is_none() {
            missing.push("salary");
        }
        if self.department.is_none() {
            missing.push("department");
        }
        if self.admission_date.is_none() {
            missing.push("admission_date");
        }
        missing
    }
}

fn bind_first(slot: &mut Option<usize>, idx: usize, matches: bool) {
    if matches && slot.is_none() {
        *slot = Some(idx);
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Why a data row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingName,
    MissingRole,
    MissingNameAndRole,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DropReason::MissingName => "name is empty",
            DropReason::MissingRole => "role is empty",
            DropReason::MissingNameAndRole => "name and role are empty",
        })
    }
}

/// A silent decision taken by the pipeline, surfaced for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// No header cell contains the keyword for this field.
    UnmappedField { field: &'static str },

    /// A data row was not turned into a candidate.
    DroppedRow { line_number: u64, reason: DropReason },

    /// A salary cell could not be parsed and was replaced with zero.
    SalaryDefaulted { line_number: u64, raw: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedField { field } => {
                write!(f, "no header column recognised for '{field}'")
            }
            Self::DroppedRow {
                line_number,
                reason,
            } => write!(f, "line {line_number}: row dropped ({reason})"),
            Self::SalaryDefaulted { line_number, raw } => {
                write!(f, "line {line_number}: salary '{raw}' not understood, using 0")
            }
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// Output of `normalize_import`, intended for a preview step before commit.
#[derive(Debug, Clone, Default)]
pub struct NormalizationResult {
    /// Field delimiter detected for the whole text.
    pub delimiter: char,
    /// Header-to-field binding.
    pub columns: ColumnMap,
    /// Accepted rows in input order.
    pub candidates: Vec<CandidateRecord>,
    /// Non-blank data rows after the header.
    pub rows_seen: usize,
    /// Rows turned into candidates.
    pub rows_accepted: usize,
    /// Dropped rows, defaulted salaries and unmapped fields.
    pub diagnostics: Vec<Diagnostic>,
}

impl NormalizationResult {
    /// Rows seen but not accepted.
    pub fn rows_dropped(&self) -> usize {
        self.rows_seen - self.rows_accepted
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Field delimiter for `text`: `;` if it appears anywhere, otherwise `,`.
pub fn detect_delimiter(text: &str) -> char {
    if text.contains(constants::SEMICOLON_DELIMITER) {
        constants::SEMICOLON_DELIMITER
    } else {
        constants::COMMA_DELIMITER
    }
}

/// Parse an import file into candidate records.
///
/// The first non-blank line is the header, every further non-blank line is a
/// data row. Fields are split on the detected delimiter without any quote
/// handling, so values containing the delimiter are not supported.
pub fn normalize_import(text: &str) -> NormalizationResult {
    let delimiter = detect_delimiter(text);
    let mut result = NormalizationResult {
        delimiter,
        ..Default::default()
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| ((idx as u64) + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        tracing::debug!("Import text is blank; nothing to normalise");
        return result;
    };

    result.columns = ColumnMap::from_headers(header.split(delimiter));
    for field in result.columns.unmapped_fields() {
        result.diagnostics.push(Diagnostic::UnmappedField { field });
    }
    tracing::debug!(
        line = header_line,
        delimiter = %delimiter,
        columns = ?result.columns,
        "Import header mapped"
    );

    for (line_number, line) in lines {
        result.rows_seen += 1;
        let cells: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        let cell = |slot: Option<usize>| -> &str {
            slot.and_then(|idx| cells.get(idx).copied()).unwrap_or("")
        };

        let name = cell(result.columns.name);
        let role = cell(result.columns.role);

        let salary = match result.columns.salary {
            Some(_) => {
                let raw = cell(result.columns.salary);
                normalize_salary(raw).unwrap_or_else(|| {
                    tracing::debug!(
                        line = line_number,
                        raw = %preview(raw),
                        "Salary not understood; defaulting to zero"
                    );
                    result.diagnostics.push(Diagnostic::SalaryDefaulted {
                        line_number,
                        raw: raw.to_string(),
                    });
                    0.0
                })
            }
            None => 0.0,
        };

        let reason = match (name.is_empty(), role.is_empty()) {
            (false, false) => None,
            (true, false) => Some(DropReason::MissingName),
            (false, true) => Some(DropReason::MissingRole),
            (true, true) => Some(DropReason::MissingNameAndRole),
        };
        if let Some(reason) = reason {
            tracing::debug!(line = line_number, %reason, "Import row dropped");
            result
                .diagnostics
                .push(Diagnostic::DroppedRow { line_number, reason });
            continue;
        }

        result.candidates.push(CandidateRecord {
            line_number,
            name: name.to_string(),
            role: role.to_string(),
            salary,
            department: cell(result.columns.department).to_string(),
            admission_date: normalize_date(cell(result.columns.admission_date)),
            email: None,
            phone: None,
            status: None,
            notes: None,
        });
        result.rows_accepted += 1;
    }

    tracing::debug!(
        rows_seen = result.rows_seen,
        rows_accepted = result.rows_accepted,
        diagnostics = result.diagnostics.len(),
        "Import text normalised"
    );
    result
}

/// Parse a localised currency amount such as `R$ 8.500,50`.
///
/// Strips the currency symbol and all whitespace, drops `.` thousands
/// separators and turns the first `,` into the decimal point. Returns `None`
/// for anything that is not then a finite number.
pub fn normalize_salary(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .replace(constants::CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    let cleaned = cleaned.replacen(',', ".", 1);
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert `d/m/y` to `y-mm-dd`. Anything without a slash, or that does not
/// have exactly three slash-separated parts, is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    if !raw.contains('/') {
        return raw.to_string();
    }
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{year}-{month:0>2}-{day:0>2}"),
        _ => raw.to_string(),
    }
}

/// Generate an e-mail address from a full name.
///
/// `"João da Silva"` -> `"joao.silva@empresa.com"`, `"Ana"` -> `"ana@empresa.com"`.
/// Latin diacritics are folded to their ASCII base letter.
pub fn default_email(name: &str) -> String {
    let lowered: String = name.trim().to_lowercase().chars().map(fold_accent).collect();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let local = match tokens.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, .., last] => format!("{first}.{last}"),
    };
    format!("{local}@{}", constants::DEFAULT_EMAIL_DOMAIN)
}

/// Sample import file offered to users as a starting point.
pub fn import_template() -> &'static str {
    "nome;cargo;salario;departamento;data_admissao\n\
     JOÃO SILVA;ANALISTA;R$ 5.000,00;TECNOLOGIA;15/01/2024\n\
     MARIA SANTOS;GERENTE;R$ 8.500,50;VENDAS;01/02/2024\n"
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn preview(raw: &str) -> &str {
    match raw.char_indices().nth(constants::DEBUG_MAX_CELL_PREVIEW) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
