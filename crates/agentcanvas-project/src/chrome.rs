//! Window-chrome and file-dialog seams.
//!
//! The canvas core has no dependency on the windowing system beyond a
//! current project path; the shell drives these narrow interfaces and the
//! tests substitute recording stubs.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// Whether the window is currently maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Maximized,
    Restored,
}

/// Callback invoked when the OS changes the window state (e.g. the user
/// double-clicks the title bar), so the chrome buttons can stay in sync.
pub type WindowStateListener = Box<dyn Fn(WindowState) + Send>;

/// Window-control operations the title bar invokes.
pub trait WindowChrome {
    fn minimize(&self);
    fn toggle_maximize(&self);
    fn close(&self);
    fn window_state(&self) -> WindowState;

    /// Registers the listener for externally driven state changes. At most
    /// one listener is live; a later registration replaces it.
    fn on_window_state_changed(&self, listener: WindowStateListener);
}

/// Result of a folder-picker dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChoice {
    pub canceled: bool,
    pub paths: Vec<PathBuf>,
}

impl FolderChoice {
    pub fn canceled() -> Self {
        Self {
            canceled: true,
            paths: Vec::new(),
        }
    }

    /// The picked folder, when exactly one was chosen.
    pub fn single(&self) -> Option<&PathBuf> {
        if self.canceled {
            None
        } else {
            self.paths.first()
        }
    }
}

/// OS folder-open dialog.
pub trait FolderDialog {
    fn pick_folder(&self) -> FolderChoice;
}

/// Native folder picker backed by `rfd`.
#[derive(Debug, Clone, Default)]
pub struct RfdFolderDialog;

impl FolderDialog for RfdFolderDialog {
    fn pick_folder(&self) -> FolderChoice {
        match rfd::FileDialog::new().pick_folder() {
            Some(path) => FolderChoice {
                canceled: false,
                paths: vec![path],
            },
            None => FolderChoice::canceled(),
        }
    }
}

/// Inert chrome for headless use and tests; records the calls it receives
/// and notifies its listener on maximize toggles.
#[derive(Default)]
pub struct NullChrome {
    maximized: AtomicBool,
    pub close_requested: AtomicBool,
    listener: Mutex<Option<WindowStateListener>>,
}

impl WindowChrome for NullChrome {
    fn minimize(&self) {}

    fn toggle_maximize(&self) {
        self.maximized.fetch_xor(true, Ordering::SeqCst);
        if let Some(listener) = self.listener.lock().as_ref() {
            listener(self.window_state());
        }
    }

    fn close(&self) {
        self.close_requested.store(true, Ordering::SeqCst);
    }

    fn window_state(&self) -> WindowState {
        if self.maximized.load(Ordering::SeqCst) {
            WindowState::Maximized
        } else {
            WindowState::Restored
        }
    }

    fn on_window_state_changed(&self, listener: WindowStateListener) {
        *self.listener.lock() = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_toggle_maximize_round_trip() {
        let chrome = NullChrome::default();
        assert_eq!(chrome.window_state(), WindowState::Restored);
        chrome.toggle_maximize();
        assert_eq!(chrome.window_state(), WindowState::Maximized);
        chrome.toggle_maximize();
        assert_eq!(chrome.window_state(), WindowState::Restored);
    }

    #[test]
    fn test_state_listener_notified() {
        let chrome = NullChrome::default();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        chrome.on_window_state_changed(Box::new(move |state| {
            if state == WindowState::Maximized {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        chrome.toggle_maximize();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_canceled_choice_has_no_folder() {
        assert!(FolderChoice::canceled().single().is_none());
    }
}
