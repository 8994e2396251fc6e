// src/lib.rs

pub mod dates;
pub mod error;
pub mod ident;
pub mod load;
pub mod pipeline;
pub mod report;
pub mod table;

pub use error::TransferError;
pub use ident::IdentifierGenerator;
pub use pipeline::{Outcome, RunConfig};
pub use table::{Row, Table, Value};

/// Column holding the person's name; rows without it are dropped.
pub const COL_NAME: &str = "nome";
/// Column holding the CPF (taxpayer identifier).
pub const COL_CPF: &str = "cpf";
/// Column holding the PIS (social-insurance identifier).
pub const COL_PIS: &str = "pis";
/// Column holding the admission date.
pub const COL_ADMISSION: &str = "data de admissão";
