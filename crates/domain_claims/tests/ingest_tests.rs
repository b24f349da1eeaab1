//! Tests for CSV ingestion

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use domain_claims::claim::{ClaimDetail, ClaimKind, ClaimStatus};
use domain_claims::error::IngestError;
use domain_claims::ingest::{
    parse_str, template_csv, validate_and_parse, validate_file_size, validate_file_type,
    validate_headers, SUSPICIOUS_PATTERN_FLAG,
};
use domain_claims::RiskTier;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 25).unwrap()
}

const OUTPATIENT_FILE: &str = "\
ClaimID,PatientID,ProviderID,ServiceDate,ClmProcedureCode_1,TotalClaimAmount,PotentialFraud
CLM-OUT-1,PAT-1,PRV-1,2024-11-10,99213,1500.00,0
CLM-OUT-2,PAT-2,PRV-1,2024-11-11,99214,820.25,0.82
";

const INPATIENT_FILE: &str = "\
ClaimID,PatientID,ProviderID,AdmissionDate,DischargeDate,ClmDiagnosisCode_1,ClmProcedureCode_1,TotalClaimAmount,DiagnosisRelatedGroup,AttendingPhysician,NumberOfProcedures
CLM-IN-1,PAT-9,PRV-4,2024-10-01,2024-10-05,I21.4,0210093,48250.00,DRG-280,Dr. Reyes,3
";

// ============================================================================
// Schema detection and header validation
// ============================================================================

mod header_tests {
    use super::*;

    #[test]
    fn test_outpatient_headers_pass() {
        let headers = [
            "ClaimID",
            "PatientID",
            "ProviderID",
            "ServiceDate",
            "ClmProcedureCode_1",
            "TotalClaimAmount",
        ];
        assert_eq!(validate_headers(&headers), Ok(ClaimKind::Outpatient));
    }

    #[test]
    fn test_missing_columns_are_listed_together() {
        let headers = ["ClaimID", "AdmissionDate"];
        let err = validate_headers(&headers).unwrap_err();
        match &err {
            IngestError::MissingColumns(cols) => {
                assert!(cols.contains(&"PatientID".to_string()));
                assert!(cols.contains(&"DischargeDate".to_string()));
                assert!(!cols.contains(&"ClaimID".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().starts_with("Missing required columns: "));
    }

    #[test]
    fn test_generic_schema_needs_four_columns() {
        let headers = ["ClaimID", "PatientID", "ProviderID", "TotalClaimAmount"];
        assert_eq!(validate_headers(&headers), Ok(ClaimKind::Generic));
    }
}

// ============================================================================
// Row mapping
// ============================================================================

mod parse_tests {
    use super::*;

    #[test]
    fn test_outpatient_rows_are_mapped() {
        let report = parse_str(OUTPATIENT_FILE, today());
        assert!(report.is_valid());
        assert_eq!(report.claim_type(), Some(ClaimKind::Outpatient));
        assert_eq!(report.rows.len(), 2);

        let first = &report.rows[0];
        assert_eq!(first.id.as_str(), "CLM-OUT-1");
        assert_eq!(first.amount, dec!(1500));
        assert_eq!(first.fraud_score, 0.0);
        assert_eq!(first.risk_tier(), RiskTier::Low);
        assert!(first.flags.is_empty());
        assert_eq!(first.status, ClaimStatus::Pending);
        assert_eq!(first.claim_date, NaiveDate::from_ymd_opt(2024, 11, 10).unwrap());
        assert_eq!(
            first.detail,
            ClaimDetail::Outpatient {
                service_date: NaiveDate::from_ymd_opt(2024, 11, 10)
            }
        );
    }

    #[test]
    fn test_high_score_gets_suspicious_flag() {
        let report = parse_str(OUTPATIENT_FILE, today());
        let second = &report.rows[1];
        assert_eq!(second.risk_tier(), RiskTier::High);
        assert_eq!(second.flags, vec![SUSPICIOUS_PATTERN_FLAG.to_string()]);
    }

    #[test]
    fn test_inpatient_rows_are_mapped() {
        let report = parse_str(INPATIENT_FILE, today());
        assert!(report.is_valid());
        let claim = &report.rows[0];
        assert_eq!(claim.kind(), ClaimKind::Inpatient);
        assert_eq!(claim.length_of_stay(), Some(4));
        assert_eq!(claim.doctor_name.as_deref(), Some("Dr. Reyes"));
        assert_eq!(claim.number_of_procedures, 3);
        assert_eq!(claim.diagnosis_code.as_deref(), Some("I21.4"));
        // no claim start or service date
        assert_eq!(claim.claim_date, today());
    }

    #[test]
    fn test_missing_provider_column_rejects_file() {
        let file = "ClaimID,PatientID,TotalClaimAmount\nCLM-1,PAT-1,10.00\n";
        let report = parse_str(file, today());
        assert!(report.rows.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("ProviderID"));
        assert!(!report.is_valid());
    }

    #[test]
    fn test_outpatient_file_without_provider_column() {
        let file = "\
ClaimID,PatientID,ServiceDate,ClmProcedureCode_1,TotalClaimAmount
CLM-1,PAT-1,2024-11-10,99213,10.00
";
        let report = parse_str(file, today());
        assert_eq!(report.schema, Some(ClaimKind::Outpatient));
        assert_eq!(report.errors, vec!["Missing required columns: ProviderID".to_string()]);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_invalid_utf8_row_is_kept_with_warning() {
        let file: &[u8] =
            b"ClaimID,PatientID,ProviderID,TotalClaimAmount\nC1,P1,V1,10\nC2,P\xff,V1,20\nC3,P3,V3,30\n";
        let report = validate_and_parse(file, today());

        assert!(report.is_valid());
        let ids: Vec<&str> = report.rows.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C2", "C3"]);
        assert_eq!(report.rows[1].patient_id.as_str(), "P\u{FFFD}");
        assert_eq!(report.rows[1].amount, dec!(20));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("line 3:"));
    }

    #[test]
    fn test_unparseable_numbers_become_zero_with_warnings() {
        let file = "\
ClaimID,PatientID,ProviderID,TotalClaimAmount,PotentialFraud
CLM-1,PAT-1,PRV-1,lots,maybe
";
        let report = parse_str(file, today());
        assert!(report.is_valid());
        let claim = &report.rows[0];
        assert_eq!(claim.amount, dec!(0));
        assert_eq!(claim.fraud_score, 0.0);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_empty_cells_default() {
        let file = "\
ClaimID,PatientID,ProviderID,TotalClaimAmount,ClmDiagnosisCode_1,NumberOfProcedures
CLM-1,PAT-1,PRV-1,,,0
";
        let report = parse_str(file, today());
        let claim = &report.rows[0];
        assert_eq!(claim.amount, dec!(0));
        assert_eq!(claim.diagnosis_code, None);
        assert_eq!(claim.number_of_procedures, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_score_of_point_seven_is_medium() {
        let file = "\
ClaimID,PatientID,ProviderID,TotalClaimAmount,PotentialFraud
CLM-1,PAT-1,PRV-1,10,0.7
";
        let report = parse_str(file, today());
        let claim = &report.rows[0];
        assert_eq!(claim.risk_tier(), RiskTier::Medium);
        assert_eq!(claim.flags, vec![SUSPICIOUS_PATTERN_FLAG.to_string()]);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        let file = "\
ClaimID,PatientID,ProviderID,TotalClaimAmount,PotentialFraud
CLM-1,PAT-1,PRV-1,10,3.5
";
        let report = parse_str(file, today());
        assert_eq!(report.rows[0].fraud_score, 1.0);
    }

    #[test]
    fn test_bad_date_warns_and_falls_back() {
        let file = "\
ClaimID,PatientID,ProviderID,TotalClaimAmount,ClaimStartDate
CLM-1,PAT-1,PRV-1,10,11/20/2024
";
        let report = parse_str(file, today());
        assert_eq!(report.rows[0].claim_date, today());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let report = parse_str("ClaimID,PatientID,ProviderID,TotalClaimAmount\n", today());
        assert!(report.is_valid());
        assert!(report.rows.is_empty());
        assert_eq!(report.claim_type(), None);
    }

    #[test]
    fn test_template_parses_cleanly() {
        let report = parse_str(&template_csv(), today());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].id.as_str(), "CLM-2024-001");
        assert_eq!(report.rows[0].procedure_code.as_deref(), Some("99213"));
    }
}

// ============================================================================
// File checks
// ============================================================================

mod file_check_tests {
    use super::*;

    #[test]
    fn test_non_csv_is_rejected_with_message() {
        let err = validate_file_type("claims.pdf", Some("application/pdf")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Please upload a CSV file.");
    }

    #[test]
    fn test_oversize_message_names_limit() {
        let err = validate_file_size(11 * 1024 * 1024, 10).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10MB limit.");
    }
}
