pub mod monnify;
