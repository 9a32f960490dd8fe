//! End-to-end tests for the clinic workflow
//!
//! Each test builds its own in-memory clinic with a fixed clock, so tests
//! are independent and deterministic.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use clinica::adapters::repository::Repositories;
use clinica::core::clinic::Clinic;
use clinica::core::clock::{Clock, FixedClock};
use clinica::domain::{
    is_generated_id, Appointment, AppointmentStatus, ClinicError, Doctor, EntityKind,
    MedicalRecord, Patient, Prescription, RandomIdGenerator, SequentialIdGenerator,
};
use std::sync::Arc;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 4, 20)
        .unwrap()
        .and_hms_opt(11, 15, 0)
        .unwrap()
}

fn clinic_at(now: NaiveDateTime) -> (Clinic, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let clinic = Clinic::new(
        Repositories::in_memory(),
        Arc::new(SequentialIdGenerator::new()),
        clock.clone(),
    );
    (clinic, clock)
}

fn patient(blood_group: &str) -> Patient {
    Patient::builder()
        .first_name("Dana")
        .last_name("Reyes")
        .date_of_birth(NaiveDate::from_ymd_opt(1978, 11, 2).unwrap())
        .gender("Other")
        .phone_number("9000011111")
        .email("dana.reyes@example.org")
        .address("12 Harbour Rd")
        .blood_group(blood_group)
        .build()
        .unwrap()
}

fn doctor() -> Doctor {
    Doctor::new(
        "Priya",
        "Nair",
        "General Medicine",
        "9000022222",
        "priya.nair@hospital.com",
        8,
        "MBBS",
    )
}

#[test]
fn test_register_schedule_complete_then_cancel_fails() {
    let (clinic, _) = clinic_at(now());

    let p = clinic.patients().register_patient(patient("A+")).unwrap();
    let d = clinic.doctors().register_doctor(doctor()).unwrap();

    let booked = clinic
        .appointments()
        .schedule_appointment(Appointment::new(
            &p.id,
            &d.id,
            now() + Duration::days(7),
            "Annual physical",
        ))
        .unwrap();

    let upcoming = clinic.appointments().get_upcoming_appointments().unwrap();
    assert_eq!(upcoming, vec![booked.clone()]);

    let completed = clinic.appointments().complete_appointment(&booked.id).unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    let err = clinic
        .appointments()
        .cancel_appointment(&booked.id)
        .unwrap_err();
    assert!(err.is_invalid_data());
    assert_eq!(
        clinic
            .appointments()
            .get_appointment_by_id(&booked.id)
            .unwrap()
            .status,
        AppointmentStatus::Completed
    );
}

#[test]
fn test_zero_validity_prescription_is_never_stored() {
    let (clinic, _) = clinic_at(now());
    let p = clinic.patients().register_patient(patient("O+")).unwrap();
    let d = clinic.doctors().register_doctor(doctor()).unwrap();

    let err = clinic
        .prescriptions()
        .create_prescription(Prescription::new(&p.id, &d.id, "Migraine").with_validity_days(0))
        .unwrap_err();

    assert!(err.is_invalid_data());
    assert_eq!(clinic.prescriptions().get_total_prescription_count().unwrap(), 0);
}

#[test]
fn test_generated_ids_use_entity_prefixes() {
    let clinic = Clinic::new(
        Repositories::in_memory(),
        Arc::new(RandomIdGenerator),
        Arc::new(FixedClock::new(now())),
    );

    let p = clinic.patients().register_patient(patient("B-")).unwrap();
    let d = clinic.doctors().register_doctor(doctor()).unwrap();
    let a = clinic
        .appointments()
        .schedule_appointment(Appointment::new(&p.id, &d.id, now() + Duration::hours(1), "Consult"))
        .unwrap();
    let rx = clinic
        .prescriptions()
        .create_prescription(Prescription::new(&p.id, &d.id, "Sinusitis"))
        .unwrap();
    let rec = clinic
        .medical_records()
        .create_medical_record(MedicalRecord::new(&p.id, &d.id, "Headache", "Sinusitis"))
        .unwrap();

    assert!(is_generated_id(EntityKind::Patient, &p.id), "{}", p.id);
    assert!(is_generated_id(EntityKind::Doctor, &d.id), "{}", d.id);
    assert!(is_generated_id(EntityKind::Appointment, &a.id), "{}", a.id);
    assert!(is_generated_id(EntityKind::Prescription, &rx.id), "{}", rx.id);
    assert!(is_generated_id(EntityKind::MedicalRecord, &rec.id), "{}", rec.id);
}

#[test]
fn test_duplicate_registration_leaves_first_untouched() {
    let (clinic, _) = clinic_at(now());

    let mut first = patient("AB+");
    first.id = "PAT777".to_string();
    clinic.patients().register_patient(first.clone()).unwrap();

    let mut second = patient("O-");
    second.id = "PAT777".to_string();
    second.first_name = "Other".to_string();

    assert_eq!(
        clinic.patients().register_patient(second).unwrap_err(),
        ClinicError::invalid("Patient with ID PAT777 already exists")
    );

    let stored = clinic.patients().get_patient_by_id("PAT777").unwrap();
    assert_eq!(stored.first_name, "Dana");
    assert_eq!(stored.blood_group, "AB+");
}

#[test]
fn test_blood_group_filter_contract() {
    let (clinic, _) = clinic_at(now());

    assert!(clinic
        .patients()
        .get_patients_by_blood_group("X")
        .unwrap_err()
        .is_invalid_data());
    assert!(clinic
        .patients()
        .get_patients_by_blood_group("O+")
        .unwrap()
        .is_empty());
}

#[test]
fn test_references_to_deleted_patient_are_rejected() {
    let (clinic, _) = clinic_at(now());
    let p = clinic.patients().register_patient(patient("A-")).unwrap();
    let d = clinic.doctors().register_doctor(doctor()).unwrap();

    clinic.patients().delete_patient(&p.id).unwrap();

    let err = clinic
        .medical_records()
        .create_medical_record(MedicalRecord::new(&p.id, &d.id, "Cough", "Bronchitis"))
        .unwrap_err();
    assert_eq!(
        err,
        ClinicError::invalid(format!("Patient not found with ID: {}", p.id))
    );
}

#[test]
fn test_queries_return_copies() {
    let (clinic, _) = clinic_at(now());
    let d = clinic.doctors().register_doctor(doctor()).unwrap();

    let mut copy = clinic.doctors().get_doctor_by_id(&d.id).unwrap();
    copy.available = false;
    copy.specialization = "Changed".to_string();

    let stored = clinic.doctors().get_doctor_by_id(&d.id).unwrap();
    assert!(stored.available);
    assert_eq!(stored.specialization, "General Medicine");
}

#[test]
fn test_not_found_kinds_are_distinct_per_entity() {
    let (clinic, _) = clinic_at(now());

    assert!(matches!(
        clinic.patients().get_patient_by_id("NOPE"),
        Err(ClinicError::PatientNotFound(_))
    ));
    assert!(matches!(
        clinic.doctors().get_doctor_by_id("NOPE"),
        Err(ClinicError::DoctorNotFound(_))
    ));
    assert!(matches!(
        clinic.appointments().get_appointment_by_id("NOPE"),
        Err(ClinicError::AppointmentNotFound(_))
    ));
    assert!(matches!(
        clinic.prescriptions().get_prescription_by_id("NOPE"),
        Err(ClinicError::PrescriptionNotFound(_))
    ));
    assert!(matches!(
        clinic.medical_records().get_medical_record_by_id("NOPE"),
        Err(ClinicError::MedicalRecordNotFound(_))
    ));
}

#[test]
fn test_visit_produces_linked_record_and_prescription() {
    let (clinic, clock) = clinic_at(now());
    clinic.seed_sample_data().unwrap();

    let visit = clinic
        .appointments()
        .schedule_appointment(Appointment::new(
            "PAT003",
            "DOC003",
            now() + Duration::days(1),
            "Knee pain",
        ))
        .unwrap();

    clock.advance(Duration::days(1) + Duration::minutes(5));
    clinic.appointments().complete_appointment(&visit.id).unwrap();

    clinic
        .medical_records()
        .create_medical_record(
            MedicalRecord::new("PAT003", "DOC003", "Knee pain", "Sprain")
                .with_appointment_id(&visit.id),
        )
        .unwrap();
    clinic
        .prescriptions()
        .create_prescription(
            Prescription::new("PAT003", "DOC003", "Sprain")
                .with_appointment_id(&visit.id)
                .with_prescription_date(clock.now().date())
                .with_validity_days(14),
        )
        .unwrap();

    let record = clinic
        .medical_records()
        .get_medical_record_by_appointment(&visit.id)
        .unwrap()
        .unwrap();
    assert_eq!(record.record_date_time, clock.now());
    assert_eq!(
        clinic
            .prescriptions()
            .get_prescriptions_by_patient("PAT003")
            .unwrap()
            .len(),
        1
    );

    let stats = clinic.statistics().unwrap();
    assert_eq!(stats.total_appointments, 1);
    assert_eq!(stats.upcoming_appointments, 0);
    assert_eq!(stats.valid_prescriptions, 1);
    assert_eq!(stats.total_medical_records, 1);
}
