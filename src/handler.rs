pub mod content;
pub mod eoi;
