pub mod account_service;
pub mod audit_service;
pub mod auth_service;
pub mod transfer_service;
