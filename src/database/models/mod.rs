pub mod inventory;
pub mod transaction;
pub mod user;

pub use inventory::InventoryItem;
pub use transaction::LedgerEntry;
pub use user::User;
