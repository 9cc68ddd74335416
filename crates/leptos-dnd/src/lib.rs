//! Leptos DragDrop Utilities
//!
//! Native HTML5 drag-and-drop state for Leptos: one explicit drag session
//! plus the zone currently hovered, behind a single reactive signal.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::DragEvent;

/// DataTransfer type used for the dragged item id
pub const DRAG_PAYLOAD_MIME: &str = "text/plain";

/// The item being dragged and where it came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub item_id: String,
    pub from_zone: String,
}

/// Drag state: `session` is Some exactly while a gesture is in progress.
/// At most one session exists; a dragstart while a stale session was never
/// cleared replaces it wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DndState {
    pub session: Option<DragSession>,
    pub over_zone: Option<String>,
}

impl DndState {
    /// Start a new session, replacing any stale one
    pub fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
        self.over_zone = None;
    }

    /// Unconditional cleanup path (dragend fires even when the drop lands
    /// outside any zone)
    pub fn end(&mut self) {
        self.session = None;
        self.over_zone = None;
    }

    pub fn enter_zone(&mut self, zone: &str) {
        if self.session.is_some() {
            self.over_zone = Some(zone.to_string());
        }
    }

    /// `left_element` is the descendant-aware containment check: dragleave
    /// between a zone's own child nodes must not drop the affordance.
    pub fn leave_zone(&mut self, zone: &str, left_element: bool) {
        if left_element && self.over_zone.as_deref() == Some(zone) {
            self.over_zone = None;
        }
    }

    pub fn clear_over(&mut self) {
        self.over_zone = None;
    }

    pub fn dragging_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.item_id.as_str())
    }
}

/// Reactive wrapper shared by cards and drop zones
#[derive(Clone, Copy)]
pub struct DndSignals {
    state: RwSignal<DndState>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        state: RwSignal::new(DndState::default()),
    }
}

impl DndSignals {
    pub fn begin(&self, session: DragSession) {
        self.state.update(|s| s.begin(session));
    }

    pub fn end_drag(&self) {
        self.state.update(|s| s.end());
    }

    pub fn enter_zone(&self, zone: &str) {
        self.state.update(|s| s.enter_zone(zone));
    }

    pub fn leave_zone(&self, zone: &str, left_element: bool) {
        self.state.update(|s| s.leave_zone(zone, left_element));
    }

    pub fn clear_over(&self) {
        self.state.update(|s| s.clear_over());
    }

    /// Reactive: is this item the one being dragged?
    pub fn is_dragging(&self, item_id: &str) -> bool {
        self.state.with(|s| s.dragging_id() == Some(item_id))
    }

    /// Reactive: is this zone under the pointer?
    pub fn is_over(&self, zone: &str) -> bool {
        self.state.with(|s| s.over_zone.as_deref() == Some(zone))
    }

    pub fn dragging_id_untracked(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.dragging_id().map(str::to_string))
    }
}

/// Write the dragged id into the platform drag payload
pub fn attach_payload(ev: &DragEvent, item_id: &str) {
    if let Some(dt) = ev.data_transfer() {
        let _ = dt.set_data(DRAG_PAYLOAD_MIME, item_id);
        dt.set_effect_allowed("move");
    }
}

/// Read the dragged id back out at drop time
pub fn read_payload(ev: &DragEvent) -> Option<String> {
    ev.data_transfer()
        .and_then(|dt| dt.get_data(DRAG_PAYLOAD_MIME).ok())
        .filter(|id| !id.is_empty())
}

/// True when a dragleave means the pointer actually left the listening
/// element, not just moved between its descendants
pub fn leaves_element(ev: &DragEvent) -> bool {
    let target = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok());
    let related = ev
        .related_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok());
    match (target, related) {
        (Some(target), Some(related)) => {
            let node: &web_sys::Node = related.as_ref();
            !target.contains(Some(node))
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, zone: &str) -> DragSession {
        DragSession {
            item_id: id.to_string(),
            from_zone: zone.to_string(),
        }
    }

    #[test]
    fn test_payload_mime_matches_drop_contract() {
        assert_eq!(DRAG_PAYLOAD_MIME, "text/plain");
    }

    #[test]
    fn test_dragstart_replaces_stale_session() {
        let mut state = DndState::default();
        state.begin(session("7", "todo"));
        state.enter_zone("in_progress");
        // dragend was never delivered for "7"; the next dragstart must
        // still leave exactly one active session
        state.begin(session("9", "in_review"));
        assert_eq!(state.dragging_id(), Some("9"));
        assert_eq!(state.over_zone, None);
    }

    #[test]
    fn test_end_clears_session_and_over_zone() {
        let mut state = DndState::default();
        state.begin(session("7", "todo"));
        state.enter_zone("completed");
        state.end();
        assert_eq!(state, DndState::default());
    }

    #[test]
    fn test_enter_requires_active_session() {
        let mut state = DndState::default();
        state.enter_zone("todo");
        assert_eq!(state.over_zone, None);
    }

    #[test]
    fn test_leave_ignores_movement_between_descendants() {
        let mut state = DndState::default();
        state.begin(session("7", "todo"));
        state.enter_zone("in_progress");
        state.leave_zone("in_progress", false);
        assert_eq!(state.over_zone.as_deref(), Some("in_progress"));
        state.leave_zone("in_progress", true);
        assert_eq!(state.over_zone, None);
    }

    #[test]
    fn test_leave_of_other_zone_keeps_affordance() {
        let mut state = DndState::default();
        state.begin(session("7", "todo"));
        state.enter_zone("in_progress");
        state.leave_zone("todo", true);
        assert_eq!(state.over_zone.as_deref(), Some("in_progress"));
    }
}
