//! Profiling scopes for geometry rebuilds and CSV coding, backed by `puffin`.
//!
//! Scopes cost a relaxed atomic load while profiling is off, so the library
//! opens them unconditionally. Hosts opt in with [`init_profiling`].

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(feature = "profiling-server")]
use std::sync::OnceLock;

/// Address the HTTP server binds when no other is given.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8585";

/// Where collected scopes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Collect in-process only, for hosts embedding their own viewer.
    InProcess,
    /// Serve frames to `puffin_viewer` over HTTP.
    #[cfg(feature = "profiling-server")]
    PuffinHttp {
        /// Bind address, e.g. [`DEFAULT_SERVER_ADDR`]
        addr: &'static str,
    },
}

#[cfg(feature = "profiling-server")]
static SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Turn scope collection on and start the chosen backend.
///
/// A server that fails to bind is logged and scopes stay collected in-process.
///
/// # Example
/// ```no_run
/// use livegraph_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::InProcess);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);

    match backend {
        ProfilingBackend::InProcess => {
            tracing::debug!("Profiling scopes enabled (in-process)");
        }
        #[cfg(feature = "profiling-server")]
        ProfilingBackend::PuffinHttp { addr } => {
            if SERVER.get().is_some() {
                tracing::debug!("Puffin server already running");
                return;
            }
            match puffin_http::Server::new(addr) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server listening on {}", addr);
                    let _ = SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server on {}: {}", addr, e);
                }
            }
        }
    }
}

/// Stop collecting scopes. A running server stays up but receives no data.
pub fn disable_profiling() {
    puffin::set_scopes_on(false);
}

/// Whether scopes are currently collected.
pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Close the current profiler frame.
///
/// Call once per rendered frame so rebuild scopes group by frame.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_in_process() {
        init_profiling(ProfilingBackend::InProcess);
        assert!(is_enabled());
        {
            profile_scope!("test_scope");
        }
        new_frame();

        disable_profiling();
        assert!(!is_enabled());
    }
}
