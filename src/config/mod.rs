//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → ResolverConfig handed to every Resolver
//!
//! While running (cache.watch = true):
//!     watcher.rs detects route files added/removed/renamed
//!     → cached route map invalidated
//!     → next lookup rescans the routes directory
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::CacheConfig;
pub use schema::DispatchConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ResolverConfig;
pub use schema::RouterConfig;
pub use schema::RoutesConfig;
