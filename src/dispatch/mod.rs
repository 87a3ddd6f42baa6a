//! Handler execution.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor
//!     → Executor::execute
//!     → Flow::Complete(output)  → done
//!     → Flow::Reroute(name)     → RouteDescriptor::reroute → execute again
//! ```
//!
//! # Design Decisions
//! - Routing never runs handlers; executors are supplied by the caller
//! - Reroutes per dispatch are capped so two handlers cannot bounce forever

use thiserror::Error;

use crate::routing::{RouteDescriptor, RouteError};

pub mod static_file;

pub use static_file::StaticFileExecutor;

/// Reroutes allowed per dispatch when not configured.
pub const DEFAULT_MAX_REROUTES: usize = 8;

/// What an executor wants to happen next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Complete(T),
    /// Run the named route instead, with the same arguments.
    Reroute(String),
}

/// Runs the handler behind a resolved route.
pub trait Executor {
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&mut self, route: &RouteDescriptor) -> Result<Flow<Self::Output>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum DispatchError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("handler for route `{route}` failed")]
    Handler {
        route: String,
        #[source]
        source: E,
    },

    #[error("route `{route}` exceeded the limit of {limit} reroutes")]
    TooManyReroutes { route: String, limit: usize },
}

/// Execute `route`, following reroute requests up to `max_reroutes` times.
pub fn dispatch<E: Executor>(
    route: &mut RouteDescriptor,
    executor: &mut E,
    max_reroutes: usize,
) -> Result<E::Output, DispatchError<E::Error>> {
    let mut reroutes = 0;
    loop {
        let flow = executor
            .execute(route)
            .map_err(|source| DispatchError::Handler {
                route: route.name().to_string(),
                source,
            })?;

        match flow {
            Flow::Complete(output) => return Ok(output),
            Flow::Reroute(target) => {
                if reroutes == max_reroutes {
                    return Err(DispatchError::TooManyReroutes {
                        route: target,
                        limit: max_reroutes,
                    });
                }
                reroutes += 1;
                route.reroute(&target)?;
            }
        }
    }
}
