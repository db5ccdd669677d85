/// Common Indian bovine breeds offered by the nutrition autocomplete.
pub const BOVINE_BREEDS: &[&str] = &[
    "Alambadi", "Amritmahal", "Ayrshire", "Banni", "Bargur", "Bhadawari",
    "Brown Swiss", "Dangi", "Deoni", "Gir", "Guernsey", "Hallikar", "Hariana",
    "Holstein Friesian", "Jaffrabadi", "Jersey", "Kangayam", "Kankrej",
    "Kasargod", "Kenkatha", "Kherigarh", "Khillari", "Krishna Valley",
    "Malnad Gidda", "Mehsana", "Murrah", "Nagori", "Nagpuri", "Nili Ravi",
    "Nimari", "Ongole", "Pulikulam", "Rathi", "Red_Dane", "Red Sindhi",
    "Sahiwal", "Surti", "Tharparkar", "Toda", "Umblachery", "Vechur",
];

/// Class names as emitted by the classifier, used by the diagnosis form.
pub const CLASS_NAMES: &[&str] = &[
    "Alambadi", "Amritmahal", "Ayrshire", "Banni", "Bargur", "Bhadawari",
    "Brown_Swiss", "Dangi", "Deoni", "Gir", "Guernsey", "Hallikar", "Hariana",
    "Holstein_Friesian", "Jaffrabadi", "Jersey", "Kangayam", "Kankrej",
    "Kasargod", "Kenkatha", "Kherigarh", "Khillari", "Krishna_Valley",
    "Malnad_gidda", "Mehsana", "Murrah", "Nagori", "Nagpuri", "Nili_Ravi",
    "Nimari", "Ongole", "Pulikulam", "Rathi", "Red_Dane", "Red_Sindhi",
    "Sahiwal", "Surti", "Tharparkar", "Toda", "Umblachery", "Vechur",
];

/// Candidates whose names start with `query`, ignoring case, in list order.
///
/// An empty query suggests nothing rather than everything.
pub fn filter_suggestions(query: &str, candidates: &[&'static str]) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    candidates
        .iter()
        .copied()
        .filter(|breed| breed.to_lowercase().starts_with(&needle))
        .collect()
}
