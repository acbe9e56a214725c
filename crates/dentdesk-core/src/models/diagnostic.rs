//! Diagnostic suggestion models.

use serde::{Deserialize, Serialize};

/// How soon a recommendation should be acted on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Immediate,
}

/// A suggested observation attached to a patient visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticFinding {
    /// Condition name (e.g., "Dental caries")
    pub condition: String,
    /// Where it was seen (e.g., "Tooth 14, occlusal surface")
    pub location: String,
    /// Model probability as reported; stored unbounded
    pub probability: f64,
    /// Severity label as reported
    pub severity: String,
}

impl DiagnosticFinding {
    /// Probability as a whole percentage clamped to 0-100.
    ///
    /// Accepts both fractional (0.87) and percentage (87) inputs.
    pub fn probability_percent(&self) -> u8 {
        let p = if self.probability <= 1.0 {
            self.probability * 100.0
        } else {
            self.probability
        };
        p.round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub description: String,
    pub urgency: Urgency,
    pub estimated_cost: Option<f64>,
}

/// A diagnostic suggestion for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticRecord {
    pub id: String,
    pub patient_id: String,
    pub created_at: String,
    pub summary: String,
    pub findings: Vec<DiagnosticFinding>,
    pub recommendations: Vec<Recommendation>,
}

impl DiagnosticRecord {
    /// Highest urgency among the recommendations.
    pub fn max_urgency(&self) -> Option<Urgency> {
        self.recommendations.iter().map(|r| r.urgency).max()
    }

    /// Findings sorted by probability, most likely first.
    pub fn ranked_findings(&self) -> Vec<&DiagnosticFinding> {
        let mut findings: Vec<&DiagnosticFinding> = self.findings.iter().collect();
        findings.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(condition: &str, probability: f64) -> DiagnosticFinding {
        DiagnosticFinding {
            condition: condition.into(),
            location: "Tooth 14".into(),
            probability,
            severity: "moderate".into(),
        }
    }

    #[test]
    fn test_probability_percent() {
        assert_eq!(finding("a", 0.874).probability_percent(), 87);
        assert_eq!(finding("a", 87.0).probability_percent(), 87);
        assert_eq!(finding("a", 250.0).probability_percent(), 100);
        assert_eq!(finding("a", -0.5).probability_percent(), 0);
    }

    #[test]
    fn test_ranked_findings_and_urgency() {
        let record = DiagnosticRecord {
            id: "d-1".into(),
            patient_id: "p-1".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            summary: "test".into(),
            findings: vec![finding("low", 0.2), finding("high", 0.9)],
            recommendations: vec![
                Recommendation {
                    description: "Monitor".into(),
                    urgency: Urgency::Low,
                    estimated_cost: None,
                },
                Recommendation {
                    description: "Fill".into(),
                    urgency: Urgency::High,
                    estimated_cost: Some(200.0),
                },
            ],
        };

        assert_eq!(record.ranked_findings()[0].condition, "high");
        assert_eq!(record.max_urgency(), Some(Urgency::High));
    }
}
