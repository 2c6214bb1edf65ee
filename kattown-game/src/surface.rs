//! Transcript-recording dialog surfaces.
//!
//! The default [`kattown_core::registry::DialogFactory`] for the game.
//! A real embedder swaps in a factory that builds DOM or engine widgets;
//! this one records everything so the transcript is inspectable (and so
//! headless runs still keep the full chat log per NPC).

use std::sync::Arc;

use parking_lot::Mutex;

use kattown_core::registry::{DialogFactory, DialogSurface};
use kattown_core::types::{NpcId, Role};

/// One rendered transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Who authored the line.
    pub role: Role,
    /// The rendered text.
    pub text: String,
}

#[derive(Debug, Default)]
struct TranscriptState {
    visible: bool,
    focused: bool,
    lines: Vec<TranscriptLine>,
}

/// Shared handle onto one NPC's recorded transcript.
///
/// Cloneable so the embedder can keep a read side while the registry owns
/// the write side.
#[derive(Debug, Clone, Default)]
pub struct TranscriptHandle {
    state: Arc<Mutex<TranscriptState>>,
}

impl TranscriptHandle {
    /// Whether the dialog is currently shown.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.state.lock().visible
    }

    /// Whether the text input has focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.state.lock().focused
    }

    /// Snapshot of every line appended so far.
    #[must_use]
    pub fn lines(&self) -> Vec<TranscriptLine> {
        self.state.lock().lines.clone()
    }
}

/// A [`DialogSurface`] that records lines and visibility.
#[derive(Debug, Default)]
pub struct TranscriptSurface {
    handle: TranscriptHandle,
}

impl TranscriptSurface {
    /// Create a surface and return it with its read handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The read side of this surface.
    #[must_use]
    pub fn handle(&self) -> TranscriptHandle {
        self.handle.clone()
    }
}

impl DialogSurface for TranscriptSurface {
    fn reveal(&mut self) {
        self.handle.state.lock().visible = true;
    }

    fn hide(&mut self) {
        let mut state = self.handle.state.lock();
        state.visible = false;
        state.focused = false;
    }

    fn focus_input(&mut self) {
        self.handle.state.lock().focused = true;
    }

    fn append_line(&mut self, role: Role, text: &str) {
        self.handle.state.lock().lines.push(TranscriptLine {
            role,
            text: text.to_string(),
        });
    }
}

/// Factory producing [`TranscriptSurface`]s, keeping a read handle per NPC.
///
/// Clones share the handle list, so the game can keep a read side after
/// moving a clone into the registry.
#[derive(Debug, Clone, Default)]
pub struct TranscriptSurfaceFactory {
    handles: Arc<Mutex<Vec<(NpcId, TranscriptHandle)>>>,
}

impl TranscriptSurfaceFactory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read handle for `npc`, if its dialog has ever been opened.
    #[must_use]
    pub fn handle(&self, npc: &NpcId) -> Option<TranscriptHandle> {
        self.handles
            .lock()
            .iter()
            .find(|(id, _)| id == npc)
            .map(|(_, handle)| handle.clone())
    }
}

impl DialogFactory for TranscriptSurfaceFactory {
    fn create(&mut self, npc: &NpcId) -> Box<dyn DialogSurface> {
        let surface = TranscriptSurface::new();
        self.handles.lock().push((npc.clone(), surface.handle()));
        Box::new(surface)
    }
}
