//! End-to-end tests through the FFI object.

use dentdesk_core::{open_core, open_core_in_memory, DentalError};

#[test]
fn test_in_memory_core_is_seeded() {
    let core = open_core_in_memory().unwrap();

    assert_eq!(core.list_patients().unwrap().len(), 4);
    let page = core.treatment_page().unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1);
    assert_eq!(core.storage_key(), "treatment-store");
}

#[test]
fn test_treatment_crud() {
    let core = open_core_in_memory().unwrap();

    let created = core
        .create_treatment("P-1003".into(), "Replace missing molar".into())
        .unwrap();
    assert_eq!(created.status, "draft");
    assert_eq!(core.treatment_page().unwrap().total, 4);

    let step_id = core
        .add_treatment_step(created.id.clone(), "crown".into(), "Implant crown".into(), vec![30], Some(1800.0))
        .unwrap();
    core.set_step_status(created.id.clone(), step_id, "in_progress".into())
        .unwrap();
    assert!(core
        .update_treatment_json(created.id.clone(), r#"{"status":"active","total_cost":1800.0}"#.into())
        .unwrap());

    let json = core.get_treatment_json(created.id.clone()).unwrap();
    assert!(json.contains("\"in_progress\""));
    assert!(json.contains("\"active\""));

    assert!(core.delete_treatment(created.id.clone()).unwrap());
    assert!(!core.delete_treatment(created.id).unwrap());
    assert_eq!(core.treatment_page().unwrap().total, 3);
}

#[test]
fn test_filters_reset_page() {
    let core = open_core_in_memory().unwrap();
    core.set_treatment_page(Some(2), Some(1)).unwrap();
    assert_eq!(core.treatment_page().unwrap().page, 2);

    core.set_treatment_filters(Some("active".into()), None, None, None)
        .unwrap();
    let page = core.treatment_page().unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.filtered_total, 1);
    assert!(page.items.iter().all(|plan| plan.status == "active"));

    let err = core
        .set_treatment_filters(Some("archived".into()), None, None, None)
        .unwrap_err();
    assert!(matches!(err, DentalError::InvalidInput(_)));
}

#[test]
fn test_wizard_through_core() {
    let core = open_core_in_memory().unwrap();

    assert!(matches!(core.wizard_advance(), Err(DentalError::InvalidState(_))));

    core.wizard_add_image("periapical.png".into(), "image/png".into(), vec![1, 2, 3])
        .unwrap();
    assert_eq!(core.wizard_advance().unwrap(), 2);

    let found = core.find_patients("chen".into(), 5).unwrap();
    assert_eq!(found[0].id, "P-1002");

    assert!(matches!(
        core.wizard_select_patient("P-0000".into()),
        Err(DentalError::NotFound(_))
    ));
    core.wizard_select_patient("P-1002".into()).unwrap();
    assert_eq!(core.wizard_advance().unwrap(), 3);
    assert!(core.wizard_state().unwrap().processing);

    let state = core.wizard_run_analysis().unwrap();
    assert!(!state.processing);
    assert!(state.result_summary.is_some());
    assert!(core.wizard_result_json().unwrap().unwrap().contains("P-1002"));

    core.wizard_reset().unwrap();
    assert_eq!(core.wizard_state().unwrap().step, 1);
}

#[test]
fn test_reports_through_core() {
    let core = open_core_in_memory().unwrap();

    let csv = core.analytics_csv().unwrap();
    assert!(csv.contains("appointments,pending,2,33"));

    let csv = core.treatment_summary_csv("T-4001".into()).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("T-4001,P-1001"));

    let json = core.treatment_summary_json("T-4001".into()).unwrap();
    assert!(json.contains("Sarah Johnson"));

    assert!(matches!(
        core.treatment_summary_json("T-0000".into()),
        Err(DentalError::NotFound(_))
    ));
}

#[test]
fn test_appointments_through_core() {
    let core = open_core_in_memory().unwrap();

    let booked = core
        .book_appointment("P-1004".into(), "2030-01-15".into(), "09:30".into(), 45, "Cleaning".into())
        .unwrap();
    assert_eq!(booked.status, "pending");
    assert!(core
        .set_appointment_status(booked.id.clone(), "confirmed".into())
        .unwrap());

    let day = core.appointments_on("2030-01-15".into()).unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].status, "confirmed");

    assert!(matches!(
        core.book_appointment("P-1004".into(), "15/01/2030".into(), "09:30".into(), 30, "Exam".into()),
        Err(DentalError::InvalidInput(_))
    ));
}

#[test]
fn test_on_disk_core_keeps_plans() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("practice.db").to_string_lossy().to_string();
    let config = Some(r#"{"seed_sample_data": true}"#.to_string());

    let id = {
        let core = open_core(path.clone(), config.clone()).unwrap();
        core.create_treatment("P-1001".into(), "Night guard".into())
            .unwrap()
            .id
    };

    let core = open_core(path, config).unwrap();
    assert_eq!(core.treatment_page().unwrap().total, 4);
    assert!(core.get_treatment_json(id).is_ok());
    assert_eq!(core.list_patients().unwrap().len(), 4);
}

#[test]
fn test_deleted_sample_plans_stay_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("practice.db").to_string_lossy().to_string();
    let config = Some(r#"{"seed_sample_data": true}"#.to_string());

    {
        let core = open_core(path.clone(), config.clone()).unwrap();
        for id in ["T-4001", "T-4002", "T-4003"] {
            assert!(core.delete_treatment(id.into()).unwrap());
        }
        assert_eq!(core.treatment_page().unwrap().total, 0);
    }

    let core = open_core(path, config).unwrap();
    assert_eq!(core.treatment_page().unwrap().total, 0);
    // Patients are still there
    assert_eq!(core.list_patients().unwrap().len(), 4);
}

#[test]
fn test_clear_one_filter_keeps_the_rest() {
    let core = open_core_in_memory().unwrap();

    core.set_treatment_filters(Some("active".into()), None, Some("tooth".into()), None)
        .unwrap();
    assert_eq!(core.treatment_page().unwrap().filtered_total, 1);

    // Back to every status, search still applied
    core.set_treatment_filters(Some(String::new()), None, None, None)
        .unwrap();
    let page = core.treatment_page().unwrap();
    assert_eq!(page.filtered_total, 2);
    assert!(page.items.iter().all(|plan| plan.title.contains("tooth")));

    // A blank patient id is no filter, not an impossible one
    core.set_treatment_filters(None, Some("  ".into()), None, Some("all".into()))
        .unwrap();
    assert_eq!(core.treatment_page().unwrap().filtered_total, 2);

    core.set_treatment_filters(None, None, Some(String::new()), None)
        .unwrap();
    assert_eq!(core.treatment_page().unwrap().filtered_total, 3);
}

#[test]
fn test_sort_through_core() {
    let core = open_core_in_memory().unwrap();
    core.set_treatment_page(Some(2), None).unwrap();

    core.set_treatment_sort("total_cost".into(), "asc".into()).unwrap();
    let page = core.treatment_page().unwrap();
    assert_eq!(page.page, 1);
    let ids: Vec<&str> = page.items.iter().map(|plan| plan.id.as_str()).collect();
    assert_eq!(ids, vec!["T-4001", "T-4003", "T-4002"]);

    core.set_treatment_sort("title".into(), "desc".into()).unwrap();
    let page = core.treatment_page().unwrap();
    let ids: Vec<&str> = page.items.iter().map(|plan| plan.id.as_str()).collect();
    assert_eq!(ids, vec!["T-4003", "T-4001", "T-4002"]);

    assert!(matches!(
        core.set_treatment_sort("patient".into(), "asc".into()),
        Err(DentalError::InvalidInput(_))
    ));
    assert!(matches!(
        core.set_treatment_sort("title".into(), "sideways".into()),
        Err(DentalError::InvalidInput(_))
    ));
}

#[test]
fn test_remove_step_through_core() {
    let core = open_core_in_memory().unwrap();

    assert!(core
        .remove_treatment_step("T-4002".into(), "S-5004".into())
        .unwrap());
    assert!(!core
        .remove_treatment_step("T-4002".into(), "S-5004".into())
        .unwrap());

    let json = core.get_treatment_json("T-4002".into()).unwrap();
    assert!(json.contains("S-5003"));
    assert!(!json.contains("S-5004"));

    assert!(matches!(
        core.remove_treatment_step("T-0000".into(), "S-5003".into()),
        Err(DentalError::NotFound(_))
    ));
}

#[test]
fn test_wizard_clear_patient_through_core() {
    let core = open_core_in_memory().unwrap();
    core.wizard_add_image("bitewing.jpg".into(), "image/jpeg".into(), vec![9, 9])
        .unwrap();
    core.wizard_advance().unwrap();
    core.wizard_select_patient("P-1001".into()).unwrap();
    assert!(core.wizard_state().unwrap().can_advance);

    core.wizard_clear_patient().unwrap();
    let state = core.wizard_state().unwrap();
    assert!(state.selected_patient.is_none());
    assert!(!state.can_advance);
    assert!(matches!(core.wizard_advance(), Err(DentalError::InvalidState(_))));
}
