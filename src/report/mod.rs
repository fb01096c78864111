pub mod json;
pub mod tables;
