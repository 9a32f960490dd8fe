//! Entity identifiers and id generation
//!
//! Every stored entity is keyed by a string id. Ids supplied by callers are
//! accepted as-is; generated ids follow a stable format: a 3-letter entity
//! prefix followed by 8 uppercase alphanumeric characters
//! (`PAT########`, `DOC########`, `APT########`, `PRE########`, `REC########`).

use super::errors::ClinicError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Number of characters following the prefix in a generated id
pub const GENERATED_SUFFIX_LEN: usize = 8;

/// Largest sequence number that fits in a generated id suffix
pub const MAX_SEQUENCE: u64 = 99_999_999;

/// Kinds of entity managed by the clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Registered patient
    Patient,
    /// Registered doctor
    Doctor,
    /// Scheduled appointment
    Appointment,
    /// Issued prescription
    Prescription,
    /// Visit medical record
    MedicalRecord,
}

impl EntityKind {
    /// All entity kinds, in a fixed order
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Patient,
        EntityKind::Doctor,
        EntityKind::Appointment,
        EntityKind::Prescription,
        EntityKind::MedicalRecord,
    ];

    /// The 3-letter prefix used for generated ids
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Patient => "PAT",
            EntityKind::Doctor => "DOC",
            EntityKind::Appointment => "APT",
            EntityKind::Prescription => "PRE",
            EntityKind::MedicalRecord => "REC",
        }
    }

    /// Human-readable label, as used in error messages
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Patient => "Patient",
            EntityKind::Doctor => "Doctor",
            EntityKind::Appointment => "Appointment",
            EntityKind::Prescription => "Prescription",
            EntityKind::MedicalRecord => "Medical record",
        }
    }

    fn index(self) -> usize {
        match self {
            EntityKind::Patient => 0,
            EntityKind::Doctor => 1,
            EntityKind::Appointment => 2,
            EntityKind::Prescription => 3,
            EntityKind::MedicalRecord => 4,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A record that can be stored by a repository
///
/// Implementors are plain data holders; repositories key them by [`Entity::id`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// The kind of entity, which also determines the id prefix
    const KIND: EntityKind;

    /// Returns the entity id (blank until one is assigned)
    fn id(&self) -> &str;

    /// Replaces the entity id
    fn set_id(&mut self, id: String);

    /// Returns true if no id has been assigned yet
    fn has_blank_id(&self) -> bool {
        self.id().trim().is_empty()
    }
}

/// Source of fresh entity ids
///
/// Services call this once per created entity whose id is blank. Tests inject
/// [`SequentialIdGenerator`] for predictable ids.
pub trait IdGenerator: Send + Sync {
    /// Produces a fresh id for the given entity kind
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Storage`] when no further id can be issued.
    fn generate(&self, kind: EntityKind) -> Result<String>;
}

/// Random, collision-resistant id generator backed by v4 UUIDs
///
/// The suffix is the first 8 hex digits of a random UUID, uppercased.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, kind: EntityKind) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        Ok(format!(
            "{}{}",
            kind.prefix(),
            token[..GENERATED_SUFFIX_LEN].to_uppercase()
        ))
    }
}

/// Deterministic id generator with one counter per entity kind
///
/// # Examples
///
/// ```
/// use clinica::domain::ids::{EntityKind, IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::new();
/// assert_eq!(ids.generate(EntityKind::Patient).unwrap(), "PAT00000001");
/// assert_eq!(ids.generate(EntityKind::Patient).unwrap(), "PAT00000002");
/// assert_eq!(ids.generate(EntityKind::Doctor).unwrap(), "DOC00000001");
/// ```
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counters: [AtomicU64; 5],
}

impl SequentialIdGenerator {
    /// Creates a generator whose counters all start at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator whose next id for every kind is `last + 1`
    pub fn resume_after(last: u64) -> Self {
        Self {
            counters: std::array::from_fn(|_| AtomicU64::new(last)),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    /// Issues ids up to `MAX_SEQUENCE`, then fails instead of wrapping
    fn generate(&self, kind: EntityKind) -> Result<String> {
        let previous = self.counters[kind.index()]
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n < MAX_SEQUENCE).then_some(n + 1)
            })
            .map_err(|_| {
                ClinicError::Storage(format!("{} id sequence exhausted", kind.label()))
            })?;
        Ok(format!("{}{:08}", kind.prefix(), previous + 1))
    }
}

/// Checks whether `id` has the generated-id shape for `kind`
pub fn is_generated_id(kind: EntityKind, id: &str) -> bool {
    match id.strip_prefix(kind.prefix()) {
        Some(suffix) => {
            suffix.len() == GENERATED_SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        }
        None => false,
    }
}
