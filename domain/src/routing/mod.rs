//! Request routing
//!
//! Maps a query, its business context and optional manual overrides to a
//! provider, a model and whether to run the reasoning loop first.
//! Classification is a pure, stateless keyword match.

pub mod router;
pub mod rule;

pub use router::{RouteDecision, RouteOverrides, Router};
pub use rule::{ROUTING_RULES, RouteCategory, RoutingRule};
