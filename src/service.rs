pub mod content_service;
pub mod eoi_intake;
pub mod eoi_service;
pub mod error;
