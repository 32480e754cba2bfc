//! Storage seams for the route handlers.

pub mod users;

pub use users::{MemoryUserStore, NewUser, StoreError, User, UserStore};
