pub mod monnify;
pub mod token;

pub use monnify::MonnifyClient;
pub use token::{CachedToken, TokenManager};
