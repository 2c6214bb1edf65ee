//! The chat session registry — one dialog open at a time, sessions forever.
//!
//! Maps each NPC identity to at most one [`ConversationSession`] and owns
//! the show/hide lifecycle of the opaque dialog UI handles. Surfaces are
//! hidden on close, never destroyed, and sessions are never dropped:
//! reopening an NPC's chat reveals the full prior log.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::session::{ConversationSession, TurnDispatcher, TurnOutcome};
use crate::types::{NpcId, Role};

/// Opaque handle to one NPC's dialog UI (log, input, send, close widgets).
///
/// The core toggles and appends; layout and styling are the embedder's.
pub trait DialogSurface: Send {
    /// Make the dialog visible.
    fn reveal(&mut self);
    /// Hide the dialog without destroying it.
    fn hide(&mut self);
    /// Move keyboard focus to the text input.
    fn focus_input(&mut self);
    /// Append a rendered line to the message log.
    fn append_line(&mut self, role: Role, text: &str);
}

/// Creates a dialog surface the first time an NPC's chat is opened.
pub trait DialogFactory: Send {
    /// Build the surface for `npc`.
    fn create(&mut self, npc: &NpcId) -> Box<dyn DialogSurface>;
}

/// A surface that does nothing. Useful headless (tests, benches, servers).
#[derive(Debug, Default)]
pub struct NullSurface;

impl DialogSurface for NullSurface {
    fn reveal(&mut self) {}
    fn hide(&mut self) {}
    fn focus_input(&mut self) {}
    fn append_line(&mut self, _role: Role, _text: &str) {}
}

/// Factory producing [`NullSurface`]s.
#[derive(Debug, Default)]
pub struct NullDialogFactory;

impl DialogFactory for NullDialogFactory {
    fn create(&mut self, _npc: &NpcId) -> Box<dyn DialogSurface> {
        Box::new(NullSurface)
    }
}

struct ChatEntry {
    session: ConversationSession,
    surface: Box<dyn DialogSurface>,
}

/// Registry of per-NPC chat sessions and their dialog surfaces.
pub struct ChatSessionRegistry {
    active: Option<NpcId>,
    sessions: HashMap<NpcId, ChatEntry>,
    factory: Box<dyn DialogFactory>,
}

impl ChatSessionRegistry {
    /// Create a registry with the given surface factory.
    #[must_use]
    pub fn new(factory: Box<dyn DialogFactory>) -> Self {
        Self {
            active: None,
            sessions: HashMap::new(),
            factory,
        }
    }

    /// The NPC whose dialog is currently visible, if any.
    #[must_use]
    pub fn active(&self) -> Option<&NpcId> {
        self.active.as_ref()
    }

    /// Whether any dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// A read view of an NPC's session, if one was ever created.
    #[must_use]
    pub fn session(&self, npc: &NpcId) -> Option<&ConversationSession> {
        self.sessions.get(npc).map(|e| &e.session)
    }

    /// Open (or re-reveal) the dialog for `npc`.
    ///
    /// The at-most-one invariant is checked before any mutation: while a
    /// *different* NPC's dialog is open this call is fully inert and
    /// returns false. Opening the already-active NPC is an idempotent
    /// reveal. A first open creates the session seeded with `persona` as
    /// its System message, plus a fresh surface from the factory.
    pub fn open(&mut self, npc: &NpcId, persona: &str) -> bool {
        if let Some(active) = &self.active {
            if active != npc {
                debug!(open = %npc, active = %active, "dialog already open; ignoring");
                return false;
            }
        }

        if !self.sessions.contains_key(npc) {
            info!(npc = %npc, "creating conversation session");
            let mut surface = self.factory.create(npc);
            let session = ConversationSession::new(npc.clone(), persona);
            // Seed the rendered log with what the session already holds.
            for line in session.history() {
                surface.append_line(line.role, &line.text);
            }
            self.sessions.insert(npc.clone(), ChatEntry { session, surface });
        }

        if let Some(entry) = self.sessions.get_mut(npc) {
            entry.surface.reveal();
            entry.surface.focus_input();
        }
        self.active = Some(npc.clone());
        true
    }

    /// Close the active dialog, if any.
    ///
    /// Hides every surface (close is global, not per-dialog), and returns
    /// the NPC that was active so its actor can resume wandering. Sessions
    /// and surfaces are kept.
    pub fn close(&mut self) -> Option<NpcId> {
        let npc = self.active.take()?;
        for entry in self.sessions.values_mut() {
            entry.surface.hide();
        }
        debug!(npc = %npc, "dialog closed");
        Some(npc)
    }

    /// Handle the dialog's "submit text" event for the active session.
    ///
    /// No-ops (returning false) when no dialog is open, when `text` is
    /// empty, or while a reply is already in flight — a double-click on
    /// send must not produce duplicate requests or duplicate lines. On
    /// success the Player line is appended and rendered *before* the
    /// reply request is dispatched.
    pub fn submit(&mut self, text: &str, turns: &TurnDispatcher) -> bool {
        let Some(npc) = self.active.clone() else {
            debug!("submit with no open dialog; ignoring");
            return false;
        };
        let Some(entry) = self.sessions.get_mut(&npc) else {
            return false;
        };
        if entry.session.turn_in_flight() {
            debug!(npc = %npc, "submit while reply in flight; ignoring");
            return false;
        }
        if entry.session.append(Role::Player, text).is_none() {
            return false;
        }
        entry.surface.append_line(Role::Player, text);

        if entry.session.begin_turn() {
            turns.dispatch(npc, entry.session.history().to_vec());
        }
        true
    }

    /// Apply a completed turn to its session.
    ///
    /// History mutation is independent of UI visibility: a late reply for
    /// a closed dialog still appends, so it shows on reopen.
    pub fn deliver(&mut self, outcome: &TurnOutcome) {
        match self.sessions.get_mut(&outcome.npc) {
            Some(entry) => {
                entry.session.complete_turn(outcome.text.clone());
                entry.surface.append_line(Role::Character, &outcome.text);
            }
            None => {
                warn!(npc = %outcome.npc, "reply for unknown session dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct SharedLog {
        visible: bool,
        lines: Vec<(Role, String)>,
    }

    struct RecordingSurface(Arc<Mutex<SharedLog>>);

    impl DialogSurface for RecordingSurface {
        fn reveal(&mut self) {
            self.0.lock().unwrap().visible = true;
        }
        fn hide(&mut self) {
            self.0.lock().unwrap().visible = false;
        }
        fn focus_input(&mut self) {}
        fn append_line(&mut self, role: Role, text: &str) {
            self.0.lock().unwrap().lines.push((role, text.to_string()));
        }
    }

    struct RecordingFactory(Arc<Mutex<Vec<(NpcId, Arc<Mutex<SharedLog>>)>>>);

    impl DialogFactory for RecordingFactory {
        fn create(&mut self, npc: &NpcId) -> Box<dyn DialogSurface> {
            let log = Arc::new(Mutex::new(SharedLog::default()));
            self.0.lock().unwrap().push((npc.clone(), Arc::clone(&log)));
            Box::new(RecordingSurface(log))
        }
    }

    fn registry() -> (ChatSessionRegistry, Arc<Mutex<Vec<(NpcId, Arc<Mutex<SharedLog>>)>>>) {
        let logs = Arc::new(Mutex::new(Vec::new()));
        let registry = ChatSessionRegistry::new(Box::new(RecordingFactory(Arc::clone(&logs))));
        (registry, logs)
    }

    fn kev() -> NpcId {
        NpcId::from_name("Kev")
    }

    fn ellie() -> NpcId {
        NpcId::from_name("Ellie")
    }

    #[test]
    fn second_open_while_active_is_inert() {
        let (mut registry, logs) = registry();
        assert!(registry.open(&kev(), "kev persona"));
        assert!(!registry.open(&ellie(), "ellie persona"));

        assert_eq!(registry.active(), Some(&kev()));
        // No session, no surface was created for Ellie.
        assert!(registry.session(&ellie()).is_none());
        assert_eq!(logs.lock().unwrap().len(), 1);
    }

    #[test]
    fn reopen_same_npc_is_idempotent_reveal() {
        let (mut registry, logs) = registry();
        registry.open(&kev(), "kev persona");
        assert!(registry.open(&kev(), "kev persona"));
        assert_eq!(logs.lock().unwrap().len(), 1, "no duplicate surface");
    }

    #[test]
    fn close_hides_without_destroying() {
        let (mut registry, logs) = registry();
        registry.open(&kev(), "kev persona");
        assert_eq!(registry.close(), Some(kev()));
        assert_eq!(registry.close(), None);

        let session_len = registry.session(&kev()).map(|s| s.history().len());
        assert_eq!(session_len, Some(1), "session survives close");
        let logs = logs.lock().unwrap();
        assert!(!logs[0].1.lock().unwrap().visible);
    }

    #[test]
    fn reopen_after_close_preserves_history_in_order() {
        let (mut registry, _) = registry();
        registry.open(&kev(), "kev persona");
        {
            // Simulate a completed turn directly on the entry.
            let outcome = TurnOutcome {
                npc: kev(),
                text: "Nice weather for fishing.".into(),
                fallback: false,
            };
            registry.deliver(&outcome);
        }
        registry.close();
        registry.open(&kev(), "kev persona");

        let history = registry.session(&kev()).map(|s| s.history().to_vec());
        let history = history.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::System);
        assert_eq!(history[1].role, Role::Character);
        let seqs: Vec<u64> = history.iter().map(|m| m.sequence).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn late_delivery_after_close_still_appends() {
        let (mut registry, logs) = registry();
        registry.open(&kev(), "kev persona");
        registry.close();

        registry.deliver(&TurnOutcome {
            npc: kev(),
            text: "Sorry, I wandered off.".into(),
            fallback: false,
        });

        let history_len = registry.session(&kev()).map(|s| s.history().len());
        assert_eq!(history_len, Some(2));
        // Rendered into the (hidden) log too.
        let logs = logs.lock().unwrap();
        assert_eq!(logs[0].1.lock().unwrap().lines.len(), 2);
    }

    #[test]
    fn delivery_for_unknown_session_is_dropped() {
        let (mut registry, _) = registry();
        registry.deliver(&TurnOutcome {
            npc: kev(),
            text: "hello?".into(),
            fallback: false,
        });
        assert!(registry.session(&kev()).is_none());
    }

    #[test]
    fn alternating_open_close_keeps_single_active() {
        let (mut registry, _) = registry();
        for _ in 0..5 {
            assert!(registry.open(&kev(), "kev"));
            assert!(!registry.open(&ellie(), "ellie"));
            registry.close();
            assert!(registry.open(&ellie(), "ellie"));
            registry.close();
        }
        assert!(!registry.is_open());
    }
}
