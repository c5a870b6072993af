pub mod error;
pub mod output;

pub use error::Error;
pub use output::{Mode, Report, local_principal};
