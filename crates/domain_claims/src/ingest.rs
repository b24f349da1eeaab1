//! CSV ingestion of claims files
//!
//! The header row decides the claim sub-type: an `AdmissionDate` column means
//! inpatient, a `ServiceDate` column means outpatient, neither falls back to
//! a minimal generic schema. Each sub-type has its own required columns and a
//! file missing any of them is rejected as a whole with one aggregated error.
//!
//! Once the headers pass, every row is mapped with best-effort coercion:
//! unparseable numbers become 0, missing dates fall back to `today`, and
//! nothing is rejected row by row. Coercions are reported as warnings.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::claim::{normalize_score, Claim, ClaimDetail, ClaimKind, ClaimStatus};
use crate::error::IngestError;
use crate::risk::SUSPICIOUS_FLAG_THRESHOLD;

/// Required columns for inpatient files
pub const REQUIRED_INPATIENT_COLUMNS: [&str; 8] = [
    "ClaimID",
    "PatientID",
    "ProviderID",
    "AdmissionDate",
    "DischargeDate",
    "ClmDiagnosisCode_1",
    "ClmProcedureCode_1",
    "TotalClaimAmount",
];

/// Required columns for outpatient files
pub const REQUIRED_OUTPATIENT_COLUMNS: [&str; 6] = [
    "ClaimID",
    "PatientID",
    "ProviderID",
    "ServiceDate",
    "ClmProcedureCode_1",
    "TotalClaimAmount",
];

/// Required columns when the sub-type cannot be detected
pub const REQUIRED_GENERIC_COLUMNS: [&str; 4] = [
    "ClaimID",
    "PatientID",
    "ProviderID",
    "TotalClaimAmount",
];

/// Flag attached to rows whose fraud score exceeds 0.5
pub const SUSPICIOUS_PATTERN_FLAG: &str = "Suspicious Pattern";

/// Default upload size limit
pub const DEFAULT_MAX_FILE_MB: u64 = 10;

/// Detects the claim sub-type from the header row
pub fn detect_schema<S: AsRef<str>>(headers: &[S]) -> ClaimKind {
    let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);
    if has("AdmissionDate") {
        ClaimKind::Inpatient
    } else if has("ServiceDate") {
        ClaimKind::Outpatient
    } else {
        ClaimKind::Generic
    }
}

/// Required columns for a sub-type
pub fn required_columns(schema: ClaimKind) -> &'static [&'static str] {
    match schema {
        ClaimKind::Inpatient => &REQUIRED_INPATIENT_COLUMNS,
        ClaimKind::Outpatient => &REQUIRED_OUTPATIENT_COLUMNS,
        ClaimKind::Generic => &REQUIRED_GENERIC_COLUMNS,
    }
}

/// Detects the sub-type and checks its required columns are all present
///
/// # Errors
///
/// Returns `IngestError::MissingColumns` listing every missing column.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Result<ClaimKind, IngestError> {
    let schema = detect_schema(headers);
    let missing: Vec<String> = required_columns(schema)
        .iter()
        .filter(|col| !headers.iter().any(|h| h.as_ref() == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(schema)
    } else {
        Err(IngestError::MissingColumns(missing))
    }
}

/// Accepts `.csv` file names or a `text/csv` content type
pub fn validate_file_type(filename: &str, content_type: Option<&str>) -> Result<(), IngestError> {
    if filename.ends_with(".csv") || content_type == Some("text/csv") {
        Ok(())
    } else {
        Err(IngestError::InvalidFileType {
            filename: filename.to_string(),
        })
    }
}

/// Rejects files larger than `max_mb` megabytes
pub fn validate_file_size(size_bytes: u64, max_mb: u64) -> Result<(), IngestError> {
    if size_bytes <= max_mb.saturating_mul(1024 * 1024) {
        Ok(())
    } else {
        Err(IngestError::FileTooLarge {
            size_bytes,
            limit_mb: max_mb,
        })
    }
}

/// Result of reading a claims file
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Detected sub-type (`None` until headers were read)
    pub schema: Option<ClaimKind>,
    /// Mapped claims, in file order
    pub rows: Vec<Claim>,
    /// Structural problems; any error means the file must not be uploaded
    pub errors: Vec<String>,
    /// Coercions applied while mapping rows
    pub warnings: Vec<String>,
}

impl IngestReport {
    /// Inpatient or outpatient; `None` for generic or unread files
    pub fn claim_type(&self) -> Option<ClaimKind> {
        match self.schema {
            Some(ClaimKind::Generic) | None => None,
            other => other,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reads a claims file, validating the header row and mapping every record
///
/// Invalid headers stop parsing: the report then carries one error and no
/// rows. Bytes that are not valid UTF-8 are replaced with U+FFFD and the row
/// is kept with a warning. Other reader errors on individual records are
/// recorded and the record is skipped.
pub fn validate_and_parse<R: io::Read>(reader: R, today: NaiveDate) -> IngestReport {
    let mut report = IngestReport::default();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = match csv_reader.byte_headers() {
        Ok(record) => record.iter().map(|f| String::from_utf8_lossy(f).into_owned()).collect(),
        Err(e) => {
            report.errors.push(IngestError::from(e).to_string());
            return report;
        }
    };

    report.schema = Some(detect_schema(&headers));
    let schema = match validate_headers(&headers) {
        Ok(schema) => schema,
        Err(e) => {
            warn!(error = %e, "Rejected claims file headers");
            report.errors.push(e.to_string());
            return report;
        }
    };

    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    for (n, result) in csv_reader.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                report.errors.push(IngestError::from(e).to_string());
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(n as u64 + 2);
        let (fields, lossy) = decode_fields(&record);
        if lossy {
            warn!(line, "Replaced invalid UTF-8 in claims file");
            report
                .warnings
                .push(format!("line {}: invalid UTF-8 replaced with U+FFFD", line));
        }
        let row = CsvRow {
            index: &index,
            fields: &fields,
            line,
        };
        let claim = map_row(&row, schema, today, &mut report.warnings);
        report.rows.push(claim);
    }

    debug!(
        schema = %schema,
        rows = report.rows.len(),
        warnings = report.warnings.len(),
        "Parsed claims file"
    );
    report
}

/// Convenience wrapper over an in-memory file
pub fn parse_str(contents: &str, today: NaiveDate) -> IngestReport {
    validate_and_parse(contents.as_bytes(), today)
}

/// Downloadable template covering the generic schema
pub fn template_csv() -> String {
    [
        "ClaimID,PatientID,ProviderID,ClaimStartDate,TotalClaimAmount,ClmProcedureCode_1,ClmDiagnosisCode_1",
        "CLM-2024-001,PAT-1234567,PRV-5678,2024-11-20,500.00,99213,I10",
    ]
    .join("\n")
}

/// Column lookup over one record
struct CsvRow<'a> {
    index: &'a HashMap<&'a str, usize>,
    fields: &'a [String],
    line: u64,
}

/// Decodes every field, reporting whether any bytes had to be replaced
fn decode_fields(record: &csv::ByteRecord) -> (Vec<String>, bool) {
    let mut lossy = false;
    let fields = record
        .iter()
        .map(|field| match std::str::from_utf8(field) {
            Ok(text) => text.to_string(),
            Err(_) => {
                lossy = true;
                String::from_utf8_lossy(field).into_owned()
            }
        })
        .collect();
    (fields, lossy)
}

impl CsvRow<'_> {
    /// Raw value, including empty strings
    fn raw(&self, column: &str) -> Option<&str> {
        self.index.get(column).and_then(|&i| self.fields.get(i)).map(String::as_str)
    }

    /// Non-empty value
    fn get(&self, column: &str) -> Option<&str> {
        self.raw(column).filter(|v| !v.is_empty())
    }

    fn text(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

fn map_row(row: &CsvRow<'_>, schema: ClaimKind, today: NaiveDate, warnings: &mut Vec<String>) -> Claim {
    let amount = match row.get("TotalClaimAmount") {
        Some(raw) => parse_amount(raw).unwrap_or_else(|| {
            warnings.push(format!(
                "line {}: TotalClaimAmount '{}' is not a number, using 0",
                row.line, raw
            ));
            Decimal::ZERO
        }),
        None => Decimal::ZERO,
    };

    let fraud_score = match row.get("PotentialFraud") {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(score) => normalize_score(score),
            Err(_) => {
                warnings.push(format!(
                    "line {}: PotentialFraud '{}' is not a number, using 0",
                    row.line, raw
                ));
                0.0
            }
        },
        None => 0.0,
    };

    let claim_date = row
        .get("ClaimStartDate")
        .or_else(|| row.get("ServiceDate"))
        .and_then(|raw| parse_date_or_warn(raw, "claim date", row.line, warnings))
        .unwrap_or(today);

    let date_field = |column: &str, warnings: &mut Vec<String>| {
        row.get(column)
            .and_then(|raw| parse_date_or_warn(raw, column, row.line, warnings))
    };

    let detail = match schema {
        ClaimKind::Inpatient => ClaimDetail::Inpatient {
            admission_date: date_field("AdmissionDate", warnings),
            discharge_date: date_field("DischargeDate", warnings),
            diagnosis_related_group: row.text("DiagnosisRelatedGroup"),
        },
        ClaimKind::Outpatient => ClaimDetail::Outpatient {
            service_date: date_field("ServiceDate", warnings),
        },
        ClaimKind::Generic => ClaimDetail::Generic,
    };

    let number_of_procedures = row
        .get("NumberOfProcedures")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1);

    let flags = if fraud_score > SUSPICIOUS_FLAG_THRESHOLD {
        vec![SUSPICIOUS_PATTERN_FLAG.to_string()]
    } else {
        Vec::new()
    };

    Claim {
        id: row.raw("ClaimID").unwrap_or_default().into(),
        patient_id: row.raw("PatientID").unwrap_or_default().into(),
        provider_id: row.raw("ProviderID").unwrap_or_default().into(),
        doctor_name: row.text("AttendingPhysician"),
        claim_date,
        amount,
        procedure_code: row.text("ClmProcedureCode_1"),
        diagnosis_code: row.text("ClmDiagnosisCode_1"),
        number_of_procedures,
        fraud_score,
        status: ClaimStatus::Pending,
        flags,
        detail,
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// ISO date, or the date part of an RFC 3339 timestamp
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
}

fn parse_date_or_warn(raw: &str, field: &str, line: u64, warnings: &mut Vec<String>) -> Option<NaiveDate> {
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warnings.push(format!("line {}: {} '{}' is not a date, ignoring", line, field, raw));
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_schema_prefers_inpatient() {
        let headers = ["ClaimID", "ServiceDate", "AdmissionDate"];
        assert_eq!(detect_schema(&headers), ClaimKind::Inpatient);
        assert_eq!(detect_schema(&["ServiceDate"]), ClaimKind::Outpatient);
        assert_eq!(detect_schema::<&str>(&[]), ClaimKind::Generic);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500.00"), Some(Decimal::new(150000, 2)));
        assert_eq!(parse_amount(" 12 "), Some(Decimal::new(12, 0)));
        assert_eq!(parse_amount("1e3"), Some(Decimal::new(1000, 0)));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 20);
        assert_eq!(parse_date("2024-11-20"), expected);
        assert_eq!(parse_date("2024-11-20T08:00:00Z"), expected);
        assert_eq!(parse_date("20/11/2024"), None);
    }

    #[test]
    fn test_file_checks() {
        assert!(validate_file_type("claims.csv", None).is_ok());
        assert!(validate_file_type("claims.txt", Some("text/csv")).is_ok());
        assert!(validate_file_type("claims.xlsx", None).is_err());
        assert!(validate_file_size(10 * 1024 * 1024, 10).is_ok());
        assert!(validate_file_size(10 * 1024 * 1024 + 1, 10).is_err());
    }
}
