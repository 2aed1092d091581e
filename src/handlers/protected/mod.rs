// handlers/protected/mod.rs - Handlers behind the JWT middleware
//
// Every handler here reads the caller from the `AuthUser` extension that
// `jwt_auth_middleware` inserts; none of them looks at the token itself.
pub mod buy;
pub mod info;
pub mod send_coin;

pub use buy::buy_item;
pub use info::user_info;
pub use send_coin::send_coin;
