//! SIGINT handling. The handler only records the signal; prompts pick it up
//! and turn it into [`PromptError::Interrupted`](super::PromptError), so a
//! statement that is already running is never cut short.

use std::sync::atomic::{AtomicBool, Ordering};

static PENDING: AtomicBool = AtomicBool::new(false);

/// Route SIGINT to the pending flag. Installed without `SA_RESTART`, so a
/// blocked read returns `EINTR` and the prompt can notice the flag at once.
#[cfg(unix)]
pub fn install() -> nix::Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler only stores to an atomic, which is signal-safe.
    unsafe { sigaction(Signal::SIGINT, &action) }?;
    Ok(())
}

/// Without Unix signals, Ctrl-C only reaches us as a key event.
#[cfg(not(unix))]
pub fn install() -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
extern "C" fn on_sigint(_: std::ffi::c_int) {
    PENDING.store(true, Ordering::SeqCst);
}

/// Consume a recorded SIGINT, if any.
pub fn take_pending() -> bool {
    PENDING.swap(false, Ordering::SeqCst)
}
