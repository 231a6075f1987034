pub mod memory;
pub mod query;
pub mod store;
pub mod supabase;
pub mod tenant;

pub use memory::{MemoryStore, StoreOperation};
pub use query::{timestamp_value, Direction, Filter, Order, Query};
pub use store::{decode_row, decode_rows, ensure_affected, touched_patch, DatabaseContext, TableStore};
pub use supabase::SupabaseClient;
pub use tenant::{Table, TableResolver};
