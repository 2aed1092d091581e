pub mod catalog;
pub mod coin_service;
pub mod error;
pub mod item_service;
pub mod user_service;

pub use coin_service::CoinService;
pub use error::ServiceError;
pub use item_service::ItemService;
pub use user_service::{CoinHistory, UserInfo, UserService};
