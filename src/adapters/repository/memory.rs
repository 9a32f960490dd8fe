//! In-memory repository implementation
//!
//! Entities live in an ordered map guarded by a read/write lock. Nothing is
//! persisted; the store lives exactly as long as the repository value.

use super::traits::Repository;
use crate::domain::errors::ClinicError;
use crate::domain::ids::Entity;
use crate::domain::Result;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store for one entity type
///
/// Results of [`Repository::find_all`] are ordered by id.
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    entries: RwLock<BTreeMap<String, T>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, T>>> {
        self.entries.read().map_err(|_| {
            ClinicError::Storage(format!("{} store lock poisoned", T::KIND.label()))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, T>>> {
        self.entries.write().map_err(|_| {
            ClinicError::Storage(format!("{} store lock poisoned", T::KIND.label()))
        })
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn save(&self, entity: T) -> Result<T> {
        self.write()?
            .insert(entity.id().to_string(), entity.clone());
        Ok(entity)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(id))
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.write()?.remove(id).is_some())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    fn find_matching(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>> {
        let matches: Vec<T> = self
            .read()?
            .values()
            .filter(|entity| predicate(entity))
            .cloned()
            .collect();
        tracing::debug!(entity = %T::KIND, matched = matches.len(), "Filtered query");
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::repository::traits::{
        AppointmentQueries, DoctorQueries, MedicalRecordQueries, PatientQueries,
    };
    use crate::domain::{Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn doctor(id: &str, specialization: &str) -> Doctor {
        Doctor::new(
            "Jane",
            "Smith",
            specialization,
            "9876543211",
            "jane@hospital.com",
            10,
            "MBBS, MD",
        )
        .with_id(id)
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_save_find_delete() {
        let repo = InMemoryRepository::<Doctor>::new();
        repo.save(doctor("DOC001", "Cardiology")).unwrap();

        assert!(repo.exists_by_id("DOC001").unwrap());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.find_by_id("DOC001").unwrap().unwrap().specialization,
            "Cardiology"
        );

        assert!(repo.delete_by_id("DOC001").unwrap());
        assert!(!repo.delete_by_id("DOC001").unwrap());
        assert!(repo.find_by_id("DOC001").unwrap().is_none());
    }

    #[test]
    fn test_returned_values_are_copies() {
        let repo = InMemoryRepository::<Doctor>::new();
        repo.save(doctor("DOC001", "Cardiology")).unwrap();

        let mut copy = repo.find_by_id("DOC001").unwrap().unwrap();
        copy.available = false;

        assert!(repo.find_by_id("DOC001").unwrap().unwrap().available);
    }

    #[test]
    fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryRepository::<Doctor>::new();
        repo.save(doctor("DOC003", "Orthopedics")).unwrap();
        repo.save(doctor("DOC001", "Cardiology")).unwrap();
        repo.save(doctor("DOC002", "Pediatrics")).unwrap();

        let ids: Vec<String> = repo.find_all().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["DOC001", "DOC002", "DOC003"]);

        repo.clear().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_specialization_query_ignores_case() {
        let repo = InMemoryRepository::<Doctor>::new();
        repo.save(doctor("DOC001", "Cardiology")).unwrap();
        repo.save(doctor("DOC002", "Pediatrics")).unwrap();

        let found = repo.find_by_specialization("cardiology").unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.find_by_specialization("Neurology").unwrap().is_empty());
        assert_eq!(repo.find_available().unwrap().len(), 2);
    }

    #[test]
    fn test_patient_queries_on_empty_store() {
        let repo = InMemoryRepository::<Patient>::new();
        assert!(repo.find_by_last_name("Doe").unwrap().is_empty());
        assert!(repo.find_by_blood_group("O+").unwrap().is_empty());
    }

    #[test]
    fn test_upcoming_sorted_and_filtered() {
        let repo = InMemoryRepository::<Appointment>::new();
        let now = noon();

        let later = Appointment::new("PAT1", "DOC1", now + Duration::days(3), "Follow-up")
            .with_id("APT1");
        let sooner = Appointment::new("PAT1", "DOC1", now + Duration::days(1), "Checkup")
            .with_id("APT2");
        let mut confirmed = Appointment::new("PAT1", "DOC1", now + Duration::days(2), "Scan")
            .with_id("APT3");
        confirmed.status = AppointmentStatus::Confirmed;
        let past = Appointment::new("PAT1", "DOC1", now - Duration::days(1), "Old").with_id("APT4");

        for appointment in [later, sooner, confirmed, past] {
            repo.save(appointment).unwrap();
        }

        let ids: Vec<String> = repo
            .find_upcoming(now)
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["APT2", "APT1"]);
        assert_eq!(repo.find_by_date(now.date() + Duration::days(2)).unwrap().len(), 1);
    }

    #[test]
    fn test_records_by_patient_newest_first() {
        let repo = InMemoryRepository::<MedicalRecord>::new();
        let mut older = MedicalRecord::new("PAT1", "DOC1", "Cough", "Cold").with_id("REC1");
        older.record_date_time = noon();
        let mut newer = MedicalRecord::new("PAT1", "DOC1", "Fever", "Flu")
            .with_id("REC2")
            .with_appointment_id("APT9");
        newer.record_date_time = noon() + Duration::days(5);

        repo.save(older).unwrap();
        repo.save(newer).unwrap();

        let ids: Vec<String> = repo
            .find_by_patient_id("PAT1")
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["REC2", "REC1"]);
        assert_eq!(
            repo.find_by_appointment_id("APT9").unwrap().unwrap().id,
            "REC2"
        );
        assert!(repo.find_by_appointment_id("APT0").unwrap().is_none());
    }
}
