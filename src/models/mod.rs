//! Core data models for the extractor.

pub mod bbox;

pub use bbox::BoundingBox;
