pub mod config;
pub mod options;
pub mod rigid;
pub mod transformer;
