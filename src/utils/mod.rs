//! Utility helpers: JSON serializers and atomic file writes.
pub mod serialization;

pub use serialization::CompactJsonSerializer;
pub use serialization::FileSerializer;
pub use serialization::FileUtils;
pub use serialization::JsonSerializer;
pub use serialization::Serializer;
