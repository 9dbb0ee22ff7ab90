//! Component resolution for the panel engine.
//!
//! Maps a logical component name (e.g. `Pages/Reports`) to the physical
//! asset the frontend should load, searching registered manifests, the
//! host application and the engine's bundled components in turn.

pub mod config;
pub mod resolution;
pub mod resolver;

pub use config::ResolverConfig;
pub use resolution::Resolution;
pub use resolver::ComponentResolver;
