pub mod bus;
pub mod message;
pub mod reading;
pub mod status;
pub mod store;
pub mod supervisor;
pub mod system;
