// Service exports
pub mod expo;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod supabase;

pub use expo::{ExpoClient, PushError};
pub use memory::InMemoryStore;
pub use postgres::{PostgresClient, PostgresError, LogStatus};
pub use store::{DiscardLogStore, JobStore, NotificationLogStore, PushSender, SeekerStore, StoreError};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
