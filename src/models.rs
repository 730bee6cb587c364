pub mod contentmodels;
pub mod eoimodel;
