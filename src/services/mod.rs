pub mod contact_service;
pub mod health_service;
pub mod notifier;
pub mod store;
