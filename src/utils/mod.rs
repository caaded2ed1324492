pub mod errors;
pub mod table;

pub use errors::{user_message, CheckerError};
pub use table::Table;
