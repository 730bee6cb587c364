pub mod eoidtos;

pub use eoidtos::*;
