//! Executor that passes handler files through unchanged.

use std::fs;
use std::io;

use crate::dispatch::{Executor, Flow};
use crate::routing::RouteDescriptor;

/// Reads the route's location as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFileExecutor;

impl Executor for StaticFileExecutor {
    type Output = String;
    type Error = io::Error;

    fn execute(&mut self, route: &RouteDescriptor) -> io::Result<Flow<String>> {
        tracing::debug!(route = %route.name(), location = %route.location(), "Reading handler file");
        fs::read_to_string(route.location().as_path()).map(Flow::Complete)
    }
}
