pub mod fallback;
pub mod test_utils;

pub use fallback::{Settle, SettleFlag};
