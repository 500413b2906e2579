// Service exports
pub mod catalog;

pub use catalog::{load_engine, LoadError, ReferenceData};
