pub mod aggregate;
pub mod harvest;
pub mod registro;
