pub mod merge;
pub mod registry;

pub use registry::DefaultsRegistry;
