pub mod error;

pub use error::{AppError, DataError, DataResult};
