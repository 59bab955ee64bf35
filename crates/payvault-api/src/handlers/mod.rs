pub mod account_details;
pub mod health;
pub mod login;
pub mod open_account;
pub mod register;
pub mod transfer;
