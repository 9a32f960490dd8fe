//! Demo command implementation
//!
//! Opens an in-memory clinic with the sample doctors and patients, walks one
//! patient through a visit, and prints the resulting statistics.

use crate::config::{load_config_or_default, ClinicConfig};
use crate::core::clinic::Clinic;
use crate::core::dates;
use crate::domain::{Appointment, MedicalRecord, Medication, Prescription};
use anyhow::Context;
use chrono::Duration;
use clap::Args;

/// Arguments for the demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Days from now for the demo appointment
    #[arg(long, default_value_t = 7)]
    pub days_ahead: i64,

    /// Print statistics as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl DemoArgs {
    /// Execute the demo command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if self.days_ahead < 1 {
            println!("❌ --days-ahead must be at least 1");
            return Ok(2);
        }

        let clinic = open_clinic(&config)?;
        self.run_scenario(&clinic)?;

        let stats = clinic.statistics()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!();
            println!("📊 Clinic Statistics ({})", config.application.name);
            println!("{stats}");
        }

        Ok(0)
    }

    fn run_scenario(&self, clinic: &Clinic) -> anyhow::Result<()> {
        let patient = clinic.patients().get_patient_by_id("PAT001")?;
        let doctor = clinic.doctors().get_doctor_by_id("DOC001")?;
        println!("👤 {patient}");
        println!("🩺 {doctor}");

        let when = clinic.clock().now() + Duration::days(self.days_ahead);
        let appointment = clinic
            .appointments()
            .schedule_appointment(Appointment::new(
                &patient.id,
                &doctor.id,
                when,
                "Chest pain follow-up",
            ))
            .context("scheduling demo appointment")?;
        println!(
            "📅 Scheduled {} for {}",
            appointment.id,
            dates::format_date_time(appointment.date_time)
        );

        let record = clinic.medical_records().create_medical_record(
            MedicalRecord::new(&patient.id, &doctor.id, "Chest pain", "Stable angina")
                .with_appointment_id(&appointment.id)
                .with_vital_signs("BP 130/85, HR 78")
                .with_treatment("Lifestyle changes"),
        )?;
        println!("📋 Recorded {}", record.id);

        let prescription = clinic.prescriptions().create_prescription(
            Prescription::new(&patient.id, &doctor.id, "Stable angina")
                .with_appointment_id(&appointment.id),
        )?;
        let prescription = clinic.prescriptions().add_medication(
            &prescription.id,
            Medication::new("Aspirin", "75mg", "Once daily", 30).with_instructions("After food"),
        )?;
        println!(
            "💊 Prescribed {} ({} medication, valid until {})",
            prescription.id,
            prescription.medications.len(),
            prescription
                .expiry_date()
                .map_or_else(|| "-".to_string(), dates::format_date)
        );

        clinic.appointments().complete_appointment(&appointment.id)?;
        println!("✅ Completed {}", appointment.id);

        if let Err(e) = clinic.appointments().cancel_appointment(&appointment.id) {
            println!("⚠️  Cancel refused: {e}");
        }

        Ok(())
    }
}

fn open_clinic(config: &ClinicConfig) -> anyhow::Result<Clinic> {
    let clinic = Clinic::from_config(config).context("opening clinic")?;
    if !config.sample_data.enabled {
        clinic.seed_sample_data()?;
    }
    Ok(clinic)
}
