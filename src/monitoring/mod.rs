/*!
 * Monitoring
 * Structured logging setup and command tracing
 */

mod tracer;

pub use tracer::{init_tracing, CommandSpan, ENV_TRACE_JSON};
