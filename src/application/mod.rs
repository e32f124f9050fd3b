// Application layer - Use cases and the normalization pipeline
pub mod chronology;
pub mod circular;
pub mod dashboard_service;
pub mod pipeline_service;
pub mod record_parser;
pub mod series_extractor;
pub mod source_reader;
