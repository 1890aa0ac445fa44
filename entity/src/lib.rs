//! Employee records as exchanged with the registry backend.
//!
//! The backend reads and writes the same record under two spellings: the list
//! endpoint echoes the table columns (`PrimerApellido`) while the write
//! endpoints expect the payload model's names (`primer_apellido`). Each type
//! here pins one of those shapes.

mod employee;
mod field;

pub use employee::{Employee, EmployeeId, EmployeeKey, EmployeeUpdate, NewEmployee};
pub use field::Field;
