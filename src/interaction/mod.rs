//! Pointer interaction: hover tracking and click-versus-drag disambiguation.
//!
//! Raw pointer events are queued by the host as they arrive and drained once per
//! frame. Each event goes through [`transition`], a pure function of the current
//! state, the event and the hit-test result, so whole pointer sessions can be
//! replayed in tests without a window.

mod selection;

use std::collections::VecDeque;

use glam::Vec2;

pub use selection::Selection;

/// Movement along either axis beyond this many pixels turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;
/// Presses released within this many seconds count as clicks.
pub const CLICK_TIME_THRESHOLD_SECS: f64 = 0.3;

/// Resolves a pointer position to the node under it, nearest to the camera.
pub trait HitTest {
    fn hit_test(&self, pointer: Vec2) -> Option<String>;
}

impl<F> HitTest for F
where
    F: Fn(Vec2) -> Option<String>,
{
    fn hit_test(&self, pointer: Vec2) -> Option<String> {
        self(pointer)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Down { pos: Vec2, time: f64 },
    Move { pos: Vec2 },
    Up { pos: Vec2, time: f64 },
    Leave,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed {
        origin: Vec2,
        since: f64,
    },
    Dragging,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub phase: PointerPhase,
    pub hovered: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionOutput {
    HoverChanged {
        from: Option<String>,
        to: Option<String>,
    },
    Click {
        node: String,
    },
}

fn exceeds_drag_threshold(origin: Vec2, pos: Vec2) -> bool {
    let delta = (pos - origin).abs();
    delta.x > DRAG_THRESHOLD_PX || delta.y > DRAG_THRESHOLD_PX
}

fn hover_to(state: &mut PointerState, hit: Option<String>, outputs: &mut Vec<InteractionOutput>) {
    if state.hovered == hit {
        return;
    }
    let from = std::mem::replace(&mut state.hovered, hit.clone());
    outputs.push(InteractionOutput::HoverChanged { from, to: hit });
}

/// `hit` is only consulted for `Move`; other events keep the current hover.
pub fn transition(
    state: &PointerState,
    event: &PointerEvent,
    hit: Option<String>,
) -> (PointerState, Vec<InteractionOutput>) {
    let mut next = state.clone();
    let mut outputs = Vec::new();

    match *event {
        PointerEvent::Down { pos, time } => {
            next.phase = PointerPhase::Pressed {
                origin: pos,
                since: time,
            };
        }
        PointerEvent::Move { pos } => {
            hover_to(&mut next, hit, &mut outputs);
            if let PointerPhase::Pressed { origin, .. } = next.phase
                && exceeds_drag_threshold(origin, pos)
            {
                next.phase = PointerPhase::Dragging;
            }
        }
        PointerEvent::Up { time, .. } => {
            let is_click = matches!(
                next.phase,
                PointerPhase::Pressed { since, .. } if time - since < CLICK_TIME_THRESHOLD_SECS
            );
            if is_click && let Some(node) = next.hovered.clone() {
                outputs.push(InteractionOutput::Click { node });
            }
            next.phase = PointerPhase::Idle;
        }
        PointerEvent::Leave => {
            hover_to(&mut next, None, &mut outputs);
            next.phase = PointerPhase::Idle;
        }
    }

    (next, outputs)
}

/// Queue of pending pointer events plus the state they have produced so far.
#[derive(Debug, Default)]
pub struct PointerFsm {
    state: PointerState,
    queue: VecDeque<PointerEvent>,
}

impl PointerFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    pub fn drain(&mut self, hits: &impl HitTest) -> Vec<InteractionOutput> {
        let mut outputs = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            let hit = match &event {
                PointerEvent::Move { pos } => hits.hit_test(*pos),
                _ => None,
            };
            let (next, produced) = transition(&self.state, &event, hit);
            self.state = next;
            outputs.extend(produced);
        }
        outputs
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn hovered(&self) -> Option<&str> {
        self.state.hovered.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.phase == PointerPhase::Dragging
    }

    /// Drops the hover reference to a removed node without emitting outputs.
    pub fn forget(&mut self, id: &str) -> bool {
        if self.state.hovered.as_deref() != Some(id) {
            return false;
        }
        self.state.hovered = None;
        true
    }
}
