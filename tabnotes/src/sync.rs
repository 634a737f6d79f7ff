//! When a mutation is persisted and when it is drawn.
use crate::storage::{KeyValueStorage, PersistentStore};
use crate::ui::{Renderer, View};
use crate::{Note, NoteID};
use tracing::{error, trace};

/// What has to happen after a mutation.
///
/// Every mutation is persisted; there is no render-only effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEffect {
    /// Write to storage only. Used on every keystroke, so the edit surface keeps its cursor.
    PersistOnly,
    /// Write to storage, then redraw the tab strip and the edit surface.
    PersistAndRender,
}

impl SyncEffect {
    pub fn renders(self) -> bool {
        matches!(self, SyncEffect::PersistAndRender)
    }
}

/// Carries out [`SyncEffect`]s against the persistent store and the renderer.
#[derive(Debug)]
pub struct Synchronizer<S, R> {
    store: PersistentStore<S>,
    renderer: R,
}

impl<S: KeyValueStorage, R: Renderer> Synchronizer<S, R> {
    pub fn new(store: PersistentStore<S>, renderer: R) -> Self {
        Synchronizer { store, renderer }
    }

    /// Persist the state, then render if the effect asks for it.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory state stays authoritative
    /// and the next successful write catches storage up.
    pub fn apply(&mut self, effect: SyncEffect, notes: &[Note], active: &NoteID) {
        trace!(?effect, "synchronizing");
        if let Err(e) = self.store.save(notes, active) {
            error!(error = ?e, "failed to persist notes");
        }
        if effect.renders() {
            self.render(notes, active);
        }
    }

    pub fn render(&mut self, notes: &[Note], active: &NoteID) {
        self.renderer.render(&View::new(notes, active));
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
