//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming URL
//!     → segments.rs (path component, chunks, named parameters, index map)
//!     → resolver.rs (longest dotted-name prefix against the RouteMap snapshot)
//!     → fallback: catch-all route, then not-found route
//!     → route.rs (RouteDescriptor handed to the executor)
//!
//! Rewriting:
//!     RouteDescriptor + ParamChange list
//!     → rewrite.rs (in-place slot replacement, append for new keys)
//!     → new path string
//! ```
//!
//! # Design Decisions
//! - Route map snapshots are immutable; a refresh produces a new resolver
//! - No filesystem access here; maps come from `crate::provider`
//! - Deterministic: same URL and map always give the same route

pub mod error;
pub mod map;
pub mod resolver;
pub mod rewrite;
pub mod route;
pub mod router;
pub mod segments;

pub use error::RouteError;
pub use map::{RouteLocation, RouteMap};
pub use resolver::{MatchKind, Resolver};
pub use rewrite::ParamChange;
pub use route::RouteDescriptor;
pub use router::Router;
pub use segments::{IndexMap, ParamValue, Parameters};
