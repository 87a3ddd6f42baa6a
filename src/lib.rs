//! Hierarchical URL to dotted route name resolution.

pub mod config;
pub mod dispatch;
pub mod observability;
pub mod provider;
pub mod routing;

pub use config::schema::RouterConfig;
pub use dispatch::{dispatch, Executor, Flow};
pub use provider::RouteMapProvider;
pub use routing::{ParamChange, RouteDescriptor, RouteError, RouteMap, Resolver, Router};
