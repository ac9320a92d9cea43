/*!
 * Monitoring
 * Structured tracing for resolution decisions
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, ResolutionSpan};
