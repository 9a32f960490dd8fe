//! External collaborators for Clinica.
//!
//! - [`repository`] - Entity storage (trait-based, in-memory implementation)
//!
//! # Design Pattern
//!
//! Adapters isolate storage behind traits so services can be tested against
//! fresh stores per test case and alternative backends can be slotted in
//! without touching business rules.
//!
//! ```rust
//! use clinica::adapters::repository::{Repositories, Repository};
//!
//! let repos = Repositories::in_memory();
//! assert_eq!(repos.patients.count().unwrap(), 0);
//! ```

pub mod repository;
