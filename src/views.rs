pub mod html;
pub mod layout;
pub mod columns;
pub use columns::Tabular;
pub mod records;
pub mod login;
pub mod dashboard;
