pub mod data_api;
pub use data_api::{DataApi, Order, PgDataApi, Relation, Row, SelectQuery};
pub mod user_repo;
pub use user_repo::UserRepository;

#[cfg(test)]
pub mod memory;
