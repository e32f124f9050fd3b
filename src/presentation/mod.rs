// Presentation layer - HTTP surface for the external renderer
pub mod app_state;
pub mod handlers;
