pub mod artifact;
pub mod fetcher;
pub mod request;
pub mod source;

// Re-exports for convenience
pub use artifact::ImageArtifact;
pub use fetcher::MapFetcher;
pub use request::RequestDescriptor;
pub use source::{MapSource, StaticMapApi};
