//! Metrics collection.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by `outcome`
//!   (`matched`, `catchall`, `notfound`, `failed`)
//! - `router_route_map_loads_total` (counter): directory scans
//! - `router_route_map_size` (gauge): routes in the last scanned map
//! - `router_route_map_cache_hits_total` (counter): maps served from cache
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no exporter is installed here,
//!   the embedding application picks one
//! - Low-overhead metric updates (atomic operations)

pub fn record_resolution(outcome: &'static str) {
    ::metrics::counter!("router_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_route_map_load(size: usize) {
    ::metrics::counter!("router_route_map_loads_total").increment(1);
    ::metrics::gauge!("router_route_map_size").set(size as f64);
}

pub fn record_cache_hit() {
    ::metrics::counter!("router_route_map_cache_hits_total").increment(1);
}
