pub mod table;
pub mod incident;

// Re-export all APIs
pub use table::TableApi;
pub use incident::IncidentApi;
