pub mod common;
pub mod request;
pub mod wire;

pub use common::*;
pub use request::*;
