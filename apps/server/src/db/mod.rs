//! Database layer - case stores and query building

pub mod memory;
pub mod postgres;
pub mod search;
pub mod traits;

pub use memory::InMemoryCaseStore;
pub use postgres::PostgresCaseStore;
pub use traits::CaseStore;
