pub mod coordinator;
pub mod mutations;
pub mod ports;
pub mod services;
pub mod store;
