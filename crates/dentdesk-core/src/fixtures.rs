//! Sample clinic data.
//!
//! Used to seed demo databases, back the fixture analyzer and drive tests.

use crate::models::{
    Appointment, AppointmentStatus, ContactInfo, DentalHistoryEntry, DiagnosticFinding,
    DiagnosticRecord, Insurance, Patient, PlanStatus, Recommendation, StepStatus, StepType,
    TreatmentPlan, TreatmentStep, Urgency,
};

const SEED_TIMESTAMP: &str = "2024-01-02T09:00:00+00:00";

pub fn patients() -> Vec<Patient> {
    vec![
        patient(
            "P-1001",
            "Sarah Johnson",
            "1985-03-12",
            "555-0101",
            "sarah.johnson@example.com",
            Some(("Delta Dental", "DD-884201", 80.0)),
            &["Penicillin allergy"],
            &[("2023-06-14", "Composite filling #14"), ("2023-12-05", "Cleaning")],
            Some("2023-12-05"),
        ),
        patient(
            "P-1002",
            "Michael Chen",
            "1978-11-02",
            "555-0102",
            "m.chen@example.com",
            Some(("MetLife", "ML-220931", 70.0)),
            &["Type 2 diabetes", "Metformin"],
            &[("2022-09-20", "Crown #30")],
            Some("2023-11-18"),
        ),
        patient(
            "P-1003",
            "Emily Rodriguez",
            "1992-07-24",
            "555-0103",
            "emily.r@example.com",
            None,
            &[],
            &[("2023-03-02", "Extraction #1")],
            Some("2023-10-09"),
        ),
        patient(
            "P-1004",
            "James Wilson",
            "1960-01-30",
            "555-0104",
            "jwilson@example.com",
            Some(("Cigna", "CG-117745", 50.0)),
            &["Hypertension", "Blood thinners"],
            &[],
            None,
        ),
    ]
}

pub fn appointments() -> Vec<Appointment> {
    vec![
        appointment("A-2001", "P-1001", "2024-01-15", "09:00", 60, "Cleaning", AppointmentStatus::Confirmed),
        appointment("A-2002", "P-1002", "2024-01-15", "10:30", 90, "Crown Preparation", AppointmentStatus::Confirmed),
        appointment("A-2003", "P-1003", "2024-01-16", "14:00", 30, "Consultation", AppointmentStatus::Pending),
        appointment("A-2004", "P-1004", "2024-01-17", "11:00", 60, "Periodontal Exam", AppointmentStatus::Pending),
        appointment("A-2005", "P-1001", "2024-01-18", "15:30", 45, "Filling", AppointmentStatus::Cancelled),
        appointment("A-2006", "P-1002", "2024-02-01", "09:30", 90, "Root Canal", AppointmentStatus::Confirmed),
    ]
}

pub fn diagnostics() -> Vec<DiagnosticRecord> {
    vec![
        DiagnosticRecord {
            id: "D-3001".into(),
            patient_id: "P-1001".into(),
            created_at: SEED_TIMESTAMP.into(),
            summary: "Early interproximal caries with mild gingival inflammation.".into(),
            findings: vec![
                finding("Dental caries", "Tooth 14, mesial surface", 0.87, "moderate"),
                finding("Gingivitis", "Lower anterior region", 0.62, "mild"),
            ],
            recommendations: vec![
                recommendation("Composite restoration on tooth 14", Urgency::High, Some(250.0)),
                recommendation("Professional cleaning and oral hygiene instruction", Urgency::Medium, Some(120.0)),
            ],
        },
        DiagnosticRecord {
            id: "D-3002".into(),
            patient_id: "P-1002".into(),
            created_at: SEED_TIMESTAMP.into(),
            summary: "Periapical radiolucency suggesting pulpal necrosis.".into(),
            findings: vec![
                finding("Periapical lesion", "Tooth 19, distal root", 0.91, "severe"),
                finding("Fractured restoration", "Tooth 19", 0.54, "moderate"),
            ],
            recommendations: vec![
                recommendation("Root canal therapy on tooth 19", Urgency::Immediate, Some(1100.0)),
                recommendation("Full-coverage crown after endodontic treatment", Urgency::High, Some(1400.0)),
            ],
        },
        DiagnosticRecord {
            id: "D-3003".into(),
            patient_id: "P-1003".into(),
            created_at: SEED_TIMESTAMP.into(),
            summary: "Impacted third molar with no acute signs.".into(),
            findings: vec![finding("Impacted third molar", "Tooth 32", 0.78, "moderate")],
            recommendations: vec![recommendation(
                "Surgical extraction consultation",
                Urgency::Low,
                Some(450.0),
            )],
        },
    ]
}

pub fn treatment_plans() -> Vec<TreatmentPlan> {
    vec![
        TreatmentPlan {
            id: "T-4001".into(),
            patient_id: "P-1001".into(),
            title: "Restore tooth 14 and hygiene".into(),
            status: PlanStatus::Active,
            total_cost: 370.0,
            insurance_coverage: 296.0,
            steps: vec![
                step("S-5001", StepType::Hygiene, "Prophylaxis", &[], StepStatus::Completed, Some("2024-01-15"), 120.0),
                step("S-5002", StepType::Filling, "Composite filling", &[14], StepStatus::Planned, Some("2024-01-29"), 250.0),
            ],
            notes: Some("Patient prefers morning appointments".into()),
            created_at: SEED_TIMESTAMP.into(),
            updated_at: "2024-01-15T10:00:00+00:00".into(),
        },
        TreatmentPlan {
            id: "T-4002".into(),
            patient_id: "P-1002".into(),
            title: "Endodontic treatment tooth 19".into(),
            status: PlanStatus::Draft,
            total_cost: 2500.0,
            insurance_coverage: 1750.0,
            steps: vec![
                step("S-5003", StepType::RootCanal, "Root canal therapy", &[19], StepStatus::Planned, Some("2024-02-01"), 1100.0),
                step("S-5004", StepType::Crown, "Porcelain fused to metal crown", &[19], StepStatus::Planned, None, 1400.0),
            ],
            notes: None,
            created_at: SEED_TIMESTAMP.into(),
            updated_at: SEED_TIMESTAMP.into(),
        },
        TreatmentPlan {
            id: "T-4003".into(),
            patient_id: "P-1003".into(),
            title: "Third molar extraction".into(),
            status: PlanStatus::Completed,
            total_cost: 450.0,
            insurance_coverage: 0.0,
            steps: vec![step(
                "S-5005",
                StepType::Extraction,
                "Surgical extraction",
                &[32],
                StepStatus::Completed,
                Some("2023-10-09"),
                450.0,
            )],
            notes: None,
            created_at: "2023-09-20T09:00:00+00:00".into(),
            updated_at: "2023-10-09T16:00:00+00:00".into(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    date_of_birth: &str,
    phone: &str,
    email: &str,
    insurance: Option<(&str, &str, f64)>,
    medical_history: &[&str],
    dental_history: &[(&str, &str)],
    last_visit: Option<&str>,
) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        date_of_birth: date_of_birth.into(),
        contact: ContactInfo {
            phone: Some(phone.into()),
            email: Some(email.into()),
            address: None,
        },
        insurance: insurance.map(|(provider, policy_number, coverage_percent)| Insurance {
            provider: provider.into(),
            policy_number: policy_number.into(),
            coverage_percent,
        }),
        medical_history: medical_history.iter().map(|s| s.to_string()).collect(),
        dental_history: dental_history
            .iter()
            .map(|(date, procedure)| DentalHistoryEntry {
                date: date.to_string(),
                procedure: procedure.to_string(),
                notes: None,
            })
            .collect(),
        last_visit: last_visit.map(Into::into),
        created_at: SEED_TIMESTAMP.into(),
        updated_at: SEED_TIMESTAMP.into(),
    }
}

fn appointment(
    id: &str,
    patient_id: &str,
    date: &str,
    time: &str,
    duration_minutes: u32,
    appointment_type: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.into(),
        patient_id: patient_id.into(),
        date: date.into(),
        time: time.into(),
        duration_minutes,
        appointment_type: appointment_type.into(),
        status,
        notes: None,
    }
}

fn finding(condition: &str, location: &str, probability: f64, severity: &str) -> DiagnosticFinding {
    DiagnosticFinding {
        condition: condition.into(),
        location: location.into(),
        probability,
        severity: severity.into(),
    }
}

fn recommendation(description: &str, urgency: Urgency, estimated_cost: Option<f64>) -> Recommendation {
    Recommendation {
        description: description.into(),
        urgency,
        estimated_cost,
    }
}

fn step(
    id: &str,
    step_type: StepType,
    description: &str,
    teeth: &[u8],
    status: StepStatus,
    scheduled_date: Option<&str>,
    cost: f64,
) -> TreatmentStep {
    TreatmentStep {
        id: id.into(),
        step_type,
        description: description.into(),
        teeth: teeth.to_vec(),
        status,
        scheduled_date: scheduled_date.map(Into::into),
        cost: Some(cost),
        image_url: None,
        notes: None,
    }
}
