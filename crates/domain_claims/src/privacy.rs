//! Masking of sensitive identifiers for display

/// Field-name fragments considered sensitive
const SENSITIVE_FIELDS: [&str; 6] = ["patientid", "ssn", "dob", "address", "phone", "email"];

/// Shows only the last four characters: `****4567`
pub fn mask_patient_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Shows only the first three characters: `PRV***`
pub fn mask_provider_id(id: &str) -> String {
    if id.chars().count() <= 3 {
        return "***".to_string();
    }
    let head: String = id.chars().take(3).collect();
    format!("{}***", head)
}

/// Replaces all but the last `visible` characters with `*`
pub fn mask_partial(value: &str, visible: usize) -> String {
    let len = value.chars().count();
    if len <= visible {
        return "*".repeat(len);
    }
    let tail: String = value.chars().skip(len - visible).collect();
    format!("{}{}", "*".repeat(len - visible), tail)
}

/// Returns true if a field name looks like it holds personal data
pub fn is_sensitive_field(field_name: &str) -> bool {
    let lowered = field_name.to_lowercase().replace('_', "");
    SENSITIVE_FIELDS.iter().any(|f| lowered.contains(f))
}
