//! Fuzzy patient lookup for the patient-select step.

use strsim::jaro_winkler;

use crate::models::Patient;

/// Minimum similarity for a non-substring match.
const MIN_SIMILARITY: f64 = 0.80;

/// A patient matched against a typed query.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientMatch<'a> {
    pub patient: &'a Patient,
    /// 0.0 - 1.0, higher is better
    pub score: f64,
}

/// Rank patients by how well their name matches the query.
///
/// Substring hits on the full name or on the id score 1.0. Otherwise the
/// best Jaro-Winkler similarity between the query and any name token is used.
pub fn rank_patients<'a>(query: &str, patients: &'a [Patient], limit: usize) -> Vec<PatientMatch<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<PatientMatch<'a>> = patients
        .iter()
        .filter_map(|patient| {
            let score = score_patient(&query, patient);
            (score >= MIN_SIMILARITY).then_some(PatientMatch { patient, score })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.patient.name.cmp(&b.patient.name))
    });
    matches.truncate(limit);
    matches
}

fn score_patient(query: &str, patient: &Patient) -> f64 {
    let name = patient.name.to_lowercase();
    if name.contains(query) || patient.id.to_lowercase() == query {
        return 1.0;
    }

    let whole = jaro_winkler(query, &name);
    name.split_whitespace()
        .map(|token| jaro_winkler(query, token))
        .fold(whole, f64::max)
}
