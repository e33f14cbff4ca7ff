//! Canvas panning.
//!
//! Dragging on the empty canvas background moves the whole block layout. The
//! gesture is a two-state machine: `Idle -> Panning -> Idle`.

use crate::geometry::Point;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanGesture {
    #[default]
    Idle,
    Panning {
        /// Pointer position minus the translate at gesture start.
        anchor: Point,
        /// Translate when the gesture started.
        origin_translate: Point,
    },
}

/// What a pointer event did to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Started,
    Moved { translate: Point, delta: Point },
    Ended,
    Ignored,
}

impl ViewportEvent {
    pub fn needs_recompute(&self) -> bool {
        matches!(self, ViewportEvent::Moved { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    translate: Point,
    gesture: PanGesture,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    pub fn gesture(&self) -> PanGesture {
        self.gesture
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, PanGesture::Panning { .. })
    }

    /// Starts a pan if the press landed on the canvas background. Presses on a
    /// block or control are left to them.
    pub fn pointer_down(&mut self, pointer: Point, on_background: bool) -> ViewportEvent {
        if !on_background {
            return ViewportEvent::Ignored;
        }
        self.gesture = PanGesture::Panning {
            anchor: pointer - self.translate,
            origin_translate: self.translate,
        };
        trace!(x = pointer.x, y = pointer.y, "pan started");
        ViewportEvent::Started
    }

    /// Sets `translate = pointer - anchor` while panning.
    pub fn pointer_move(&mut self, pointer: Point) -> ViewportEvent {
        let PanGesture::Panning { anchor, .. } = self.gesture else {
            return ViewportEvent::Ignored;
        };
        let translate = pointer - anchor;
        let delta = translate - self.translate;
        self.translate = translate;
        ViewportEvent::Moved { translate, delta }
    }

    pub fn pointer_up(&mut self) -> ViewportEvent {
        match self.gesture {
            PanGesture::Idle => ViewportEvent::Ignored,
            PanGesture::Panning { .. } => {
                self.gesture = PanGesture::Idle;
                trace!(x = self.translate.x, y = self.translate.y, "pan ended");
                ViewportEvent::Ended
            }
        }
    }

    /// Leaving the canvas ends the gesture just like a release.
    pub fn pointer_leave(&mut self) -> ViewportEvent {
        self.pointer_up()
    }

    /// CSS transform for the block layout container.
    pub fn transform_css(&self) -> String {
        format!("translate({}px, {}px)", self.translate.x, self.translate.y)
    }

    pub fn cursor(&self) -> &'static str {
        if self.is_panning() { "grabbing" } else { "grab" }
    }
}
