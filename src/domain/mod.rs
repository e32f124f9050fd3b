// Domain layer - Core types with no I/O
pub mod dashboard;
pub mod record;
pub mod registry;
pub mod series;
