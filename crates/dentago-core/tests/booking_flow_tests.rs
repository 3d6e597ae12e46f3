//! End-to-end tests for the booking flow and review queue over a real store.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use dentago_core::booking::{
    half_hour_slots, BookingError, BookingFlow, BookingStep, PatientForm, Service, SubmissionAck,
};
use dentago_core::directory::Normalizer;
use dentago_core::reviews::{ReviewQueue, ReviewedDoctorSet};
use dentago_core::store::{KeyValueStore, SqliteStore};
use serde_json::json;

fn tashkent() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_full_booking_with_slot() {
    let normalizer = Normalizer::new();
    let doctor = normalizer.normalize_doctor(&json!({
        "_id": "65f0c1",
        "fullName": "Shahnoza Ergasheva",
        "specialty": "Terapevt",
        "price": 120000
    }));

    let mut flow = BookingFlow::start(doctor, tashkent());
    assert_eq!(flow.step().number(), 1);

    flow.select_date(date(2026, 10, 20), date(2026, 10, 16)).unwrap();

    let slot = &half_hour_slots()[29];
    assert_eq!(slot, "14:30");
    flow.select_time(slot, None).unwrap();
    assert_eq!(flow.step(), BookingStep::EnteringPatientInfo);

    let mut form: PatientForm = flow.patient_form();
    form.full_name = "Olim Ismoilov".into();
    form.phone = "93-555-44-33".into();
    form.email = Some("olim@mail.uz".into());
    form.service = Some("Tish oqartirish".parse().unwrap());

    let request = flow.prepare_submission(&form).unwrap();
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body,
        json!({
            "doctorId": "65f0c1",
            "patient": {
                "fullName": "Olim Ismoilov",
                "phone": "+998935554433",
                "email": "olim@mail.uz"
            },
            "appointmentDate": "2026-10-20T09:30:00.000Z",
            "appointmentTime": "14:30",
            "service": "Отбеливание зубов",
            "comment": ""
        })
    );

    let ack: SubmissionAck =
        serde_json::from_value(json!({ "success": true, "message": "OK" })).unwrap();
    let confirmed = flow.confirm(request, ack).unwrap();
    assert_eq!(flow.step(), BookingStep::Confirmed);
    assert_eq!(confirmed.date_label.unwrap().to_string(), "20 Oktyabr 2026");
    assert_eq!(confirmed.request.service, Service::Whitening);
}

#[test]
fn test_rejection_then_retry() {
    let mut flow = BookingFlow::start(
        Normalizer::new().normalize_doctor(&json!({ "_id": "d1" })),
        tashkent(),
    );
    flow.select_date(date(2026, 10, 16), date(2026, 10, 16)).unwrap();
    flow.select_time("08:00", Some("Birinchi tashrif".into())).unwrap();

    let form = PatientForm {
        full_name: "Ali".into(),
        phone: "998901112233".into(),
        service: Some(Service::Consultation),
        ..flow.patient_form()
    };
    let request = flow.prepare_submission(&form).unwrap();
    assert_eq!(request.comment, "Birinchi tashrif");

    let err = flow
        .confirm(
            request.clone(),
            serde_json::from_value(json!({ "success": false, "message": "Vaqt band" })).unwrap(),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Vaqt band");
    assert_eq!(flow.step(), BookingStep::EnteringPatientInfo);

    let ack: SubmissionAck = serde_json::from_value(json!({ "success": true })).unwrap();
    assert!(flow.confirm(request, ack).is_ok());
}

#[test]
fn test_unknown_service_is_field_error() {
    let err = "Massaj".parse::<Service>().unwrap_err();
    assert!(matches!(err, BookingError::UnknownService(_)));
    assert!(err.field().is_some());
}

#[test]
fn test_review_marks_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.db");
    let normalizer = Normalizer::new();

    let appointments: Vec<_> = [
        json!({ "doctor": "d1", "status": "confirmed", "appointmentDate": "2026-09-01T05:00:00Z" }),
        json!({ "doctor": { "_id": "d2" }, "status": "confirmed", "appointmentDate": "2026-08-01T05:00:00Z" }),
        json!({ "doctor": "d3", "status": "cancelled", "appointmentDate": "2026-07-01T05:00:00Z" }),
    ]
    .iter()
    .map(|r| normalizer.normalize_appointment(r))
    .collect();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
        let mut reviewed = ReviewedDoctorSet::load(store);
        let mut queue = ReviewQueue::build(&appointments, &reviewed);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().doctor_id, "d2");

        queue.skip(&mut reviewed).unwrap();
        assert_eq!(queue.len(), 1);
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
    let reviewed = ReviewedDoctorSet::load(store);
    let queue = ReviewQueue::build(&appointments, &reviewed);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.current().unwrap().doctor_id, "d1");
}
