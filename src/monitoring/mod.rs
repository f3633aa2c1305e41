/*!
 * Monitoring Module
 * Structured tracing for the syscall layer
 */

pub mod tracer;

pub use tracer::{init_tracing, SyscallSpan, ENV_TRACE_JSON};
