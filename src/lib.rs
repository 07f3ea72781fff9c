pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod lifecycle;
pub mod session;
pub mod store;
pub mod view;

pub use self::{config::Config, dashboard::Dashboard, session::Session};
