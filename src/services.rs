pub mod auth;
pub use auth::{AuthApi, AuthGate, AuthService};
pub mod record_page;
pub use record_page::RecordPage;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
