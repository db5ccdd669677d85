use crate::models::diagnosis_form::{find_field, DIAGNOSIS_FIELDS};
use crate::models::DiagnosisForm;

/// Builds the form state from submitted `(label, value)` pairs.
///
/// Pairs are applied in field order. Blank values are the "Select ..."
/// placeholder and unknown labels are not fields, so both are skipped.
pub fn capture(submitted: &[(String, String)]) -> DiagnosisForm {
    let mut form = DiagnosisForm::new();

    for field in DIAGNOSIS_FIELDS {
        let value = submitted
            .iter()
            .rev()
            .find(|(label, _)| label == field.label)
            .map(|(_, value)| value.as_str());

        if let Some(value) = value.filter(|v| !v.is_empty()) {
            form.select(field.label, value);
        }
    }

    for (label, _) in submitted {
        if find_field(label).is_none() {
            log::warn!("⚠️ Ignoring unknown diagnosis field: {}", label);
        }
    }

    form
}
