pub mod details;
pub mod registro;
