//! Pipeline core: dispatch and lifecycle.
//!
//! This module contains the embedded implementation of the dispatch
//! pipeline. The only public API from this module is [`DispatchPool`],
//! which accepts submissions, bounds concurrency, and drives shutdown.
//!
//! Internal modules:
//! - [`pool`]: intake queue, semaphore-gated dispatcher, shutdown/drain;
//! - [`worker`]: executes one notification with gateway resolution, retry
//!   decoration and boundary failure isolation.

mod pool;
mod worker;

pub use pool::DispatchPool;
