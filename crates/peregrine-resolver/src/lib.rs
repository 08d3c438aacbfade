//! # Peregrine DNS Resolver
//!
//! Iterative (non-recursive) resolution: starting from a configured root
//! server, the engine walks the delegation chain itself, following
//! referrals, CNAME chains, and glue records until an answer is found or
//! the exploration is exhausted.
//!
//! The engine is single-threaded and synchronous: at most one UDP
//! round-trip is in flight at a time, and a timed-out or malformed round
//! simply yields no records for that branch. Every decoded record lands in
//! the shared [`peregrine_cache::RecordCache`].

use std::time::Duration;

pub mod iterative;
pub mod transport;

pub use iterative::{IterativeResolver, Outcome, Resolution};
pub use transport::{Transport, TransportError, UdpTransport};

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum CNAME indirection levels per lookup.
    pub max_indirection: u32,

    /// Maximum UDP exchanges per lookup, shared with NS sub-lookups.
    pub query_budget: u32,

    /// Receive timeout for one UDP exchange.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_indirection: 10,
            query_budget: 15,
            timeout: Duration::from_secs(5),
        }
    }
}
