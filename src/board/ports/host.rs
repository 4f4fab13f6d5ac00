//! Host capability port.
//!
//! The same web bundle runs in a plain browser and inside the desktop
//! shell. Desktop-only affordances are gated on an injected capability
//! rather than probed from ambient globals.

/// Capabilities of the shell hosting the application.
pub trait HostCapabilities: Send + Sync {
    /// Returns `true` when running inside the desktop shell.
    fn is_desktop(&self) -> bool;
}

/// Plain browser host: no desktop affordances.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

impl HostCapabilities for BrowserHost {
    fn is_desktop(&self) -> bool {
        false
    }
}

/// Desktop shell host.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopShellHost;

impl HostCapabilities for DesktopShellHost {
    fn is_desktop(&self) -> bool {
        true
    }
}
