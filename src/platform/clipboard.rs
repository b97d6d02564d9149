use crate::platform::{PlatformError, PlatformResult};
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use std::sync::Mutex;

/// Write-text clipboard capability
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> PlatformResult<()>;
}

/// The operating system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> PlatformResult<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_owned()))
            .map_err(|e| PlatformError::from_message(e.to_string()))
    }
}

/// In-process clipboard that remembers every write
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write with `PermissionDenied`
    pub fn denied() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            deny: true,
        }
    }

    /// Most recent write
    pub fn contents(&self) -> Option<String> {
        self.writes.lock().ok().and_then(|w| w.last().cloned())
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> PlatformResult<()> {
        if self.deny {
            return Err(PlatformError::PermissionDenied(
                "clipboard write not allowed".to_string(),
            ));
        }
        self.writes
            .lock()
            .map_err(|e| PlatformError::Io(e.to_string()))?
            .push(text.to_string());
        Ok(())
    }
}
