pub mod delimited;
pub mod paths;
pub mod xlsx;

pub use delimited::{read_delimited, write_delimited, DELIMITER};
pub use paths::{csv_path, validate_input_path, xlsx_path};
pub use xlsx::read_spreadsheet;
