pub mod request;
pub mod reviewer;
