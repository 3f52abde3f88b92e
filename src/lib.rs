pub mod importers;
pub mod report;
pub mod services;
pub mod table;
pub mod utils;
