//! Process signal adapter.
//!
//! Runs a single-threaded tokio runtime on its own thread, waits for a
//! termination request and cancels the [`ShutdownToken`]. SIGINT (Ctrl+C)
//! is handled everywhere; unix also listens for SIGTERM and SIGQUIT.
//!
//! The first signal starts a graceful drain. The listener keeps running, and
//! a second signal exits the process at once with status 130, so a drain
//! stuck on an unresponsive panel can still be interrupted.

use std::io;
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use crate::shutdown::ShutdownToken;

/// Exit status for a forced quit, as a shell reports SIGINT.
pub const FORCED_EXIT_CODE: i32 = 130;

/// What to do with an incoming termination signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalAction {
    /// First request: cancel the token and let the loop drain.
    Drain,
    /// Repeated request while draining: exit immediately.
    ForceExit,
}

/// Decide how to handle a signal given the token's current state.
pub fn action_for(token: &ShutdownToken) -> SignalAction {
    if token.is_cancelled() { SignalAction::ForceExit } else { SignalAction::Drain }
}

/// Start the listener thread.
///
/// The thread is not joined on shutdown; it dies with the process. If the
/// handlers cannot be installed the token is left alone and the dashboard
/// runs until killed.
pub fn spawn_listener(token: ShutdownToken) -> io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    thread::Builder::new().name("signals".into()).spawn(move || {
        runtime.block_on(async {
            loop {
                let name = match wait_for_signal().await {
                    Ok(name) => name,
                    Err(e) => {
                        warn!(error = %e, "signal handler unavailable, graceful shutdown disabled");
                        return;
                    }
                };
                match action_for(&token) {
                    SignalAction::Drain => {
                        info!(signal = name, "shutdown requested, press Ctrl+C again to force quit");
                        token.cancel();
                    }
                    SignalAction::ForceExit => {
                        error!(signal = name, "second signal while draining, exiting now");
                        std::process::exit(FORCED_EXIT_CODE);
                    }
                }
            }
        });
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
        _ = quit.recv() => Ok("SIGQUIT"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("SIGINT")
}

// =============================================================================
// Unit Tests
// =============================================================================
