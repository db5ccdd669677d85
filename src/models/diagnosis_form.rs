use serde::ser::{Serialize, SerializeMap, Serializer};

use super::breeds::CLASS_NAMES;

/// A labelled select on the diagnosis form.
pub struct DiagnosisField {
    pub label: &'static str,
    pub options: &'static [&'static str],
}

const YES_NO: &[&str] = &["Yes", "No"];

pub const DIAGNOSIS_FIELDS: &[DiagnosisField] = &[
    DiagnosisField { label: "Breed", options: CLASS_NAMES },
    DiagnosisField { label: "Age", options: &["2", "3", "4", "5", "6", "7", "8", "9"] },
    DiagnosisField { label: "Gender", options: &["Female", "Male"] },
    DiagnosisField {
        label: "Weight",
        options: &[
            "600", "580", "650", "590", "700", "620", "570", "550", "630", "610", "500", "560",
            "450", "680", "720", "750",
        ],
    },
    DiagnosisField {
        label: "Symptom 1",
        options: &[
            "Fever", "Lethargy", "Decreased Milk Yield", "Appetite Loss", "Diarrhea", "Coughing",
            "Loss of Appetite", "Weight Loss", "Nasal Discharge", "Labored Breathing",
        ],
    },
    DiagnosisField {
        label: "Symptom 2",
        options: &[
            "Nasal Discharge", "Decreased Milk Yield", "Lethargy", "Fever", "Diarrhea",
            "Coughing", "Weight Loss", "Dehydration", "Reduced Milk Production",
            "Labored Breathing", "Loss of Appetite",
        ],
    },
    DiagnosisField {
        label: "Symptom 3",
        options: &[
            "Labored Breathing", "Fever", "Decreased Milk Yield", "Appetite Loss", "Lethargy",
            "Diarrhea", "Loss of Appetite", "Coughing", "Nasal Discharge",
        ],
    },
    DiagnosisField {
        label: "Symptom 4",
        options: &[
            "Coughing", "No", "Appetite Loss", "Lethargy", "Nasal Discharge",
            "Decreased Milk Yield", "Fever", "Dehydration", "Reduced Milk Production",
            "Loss of Appetite", "Weight Loss", "Swollen Legs",
        ],
    },
    DiagnosisField {
        label: "Duration",
        options: &["5 days", "8 days", "7 days", "6 days", "4 days", "3 days", "10 days"],
    },
    DiagnosisField { label: "Appetite Loss", options: YES_NO },
    DiagnosisField { label: "Vomiting", options: YES_NO },
    DiagnosisField { label: "Diarrhea", options: YES_NO },
    DiagnosisField { label: "Coughing", options: YES_NO },
    DiagnosisField { label: "Labored_Breathing", options: YES_NO },
    DiagnosisField { label: "Lameness", options: YES_NO },
    DiagnosisField { label: "Skin_Lesions", options: YES_NO },
    DiagnosisField { label: "Nasal_Discharge", options: YES_NO },
    DiagnosisField { label: "Eye_Discharge", options: YES_NO },
    DiagnosisField {
        label: "Body Temperature",
        options: &[
            "40.1°C", "39.6°C", "39.7°C", "39.5°C", "39.8°C", "39.4°C", "39.9°C", "39.1°C",
            "39.3°C", "40.0°C", "39.2°C", "39.0°C",
        ],
    },
    DiagnosisField {
        label: "Heart_Rate",
        options: &[
            "90", "70", "80", "75", "82", "79", "81", "85", "83", "84", "86", "87", "78", "77",
            "95", "100",
        ],
    },
];

pub fn find_field(label: &str) -> Option<&'static DiagnosisField> {
    DIAGNOSIS_FIELDS.iter().find(|field| field.label == label)
}

/// Selections on the diagnosis form, in the order fields were first touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosisForm {
    selections: Vec<(String, String)>,
}

impl DiagnosisForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites exactly one key; a new key is appended.
    pub fn select(&mut self, label: &str, value: &str) {
        match self.selections.iter_mut().find(|(l, _)| l == label) {
            Some((_, current)) => *current = value.to_string(),
            None => self.selections.push((label.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.selections
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Pretty JSON, two-space indented.
    pub fn to_display_text(&self) -> String {
        // A map of strings always serializes.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for DiagnosisForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.selections.len()))?;
        for (label, value) in &self.selections {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites_in_place() {
        let mut form = DiagnosisForm::new();
        form.select("Gender", "Female");
        form.select("Age", "4");
        form.select("Gender", "Male");

        assert_eq!(form.len(), 2);
        assert_eq!(form.get("Gender"), Some("Male"));
        assert_eq!(form.to_display_text(), "{\n  \"Gender\": \"Male\",\n  \"Age\": \"4\"\n}");
    }

    #[test]
    fn test_empty_form_renders_empty_object() {
        assert_eq!(DiagnosisForm::new().to_display_text(), "{}");
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(DIAGNOSIS_FIELDS.len(), 20);
        assert_eq!(find_field("Heart_Rate").map(|f| f.options.len()), Some(16));
        assert!(find_field("Colour").is_none());
    }
}
