//! Pointer interaction state machine.
//!
//! Turns raw pointer down/move/up/leave events into one of: selecting a pin,
//! clearing the selection, placing a pin, drawing a pen stroke or a box,
//! relocating an existing pin, or panning the viewport. Exactly one gesture
//! is active at a time; its cached content rect and pointer capture live in
//! the [`Gesture`] value and go away with it.
//!
//! The engine never mutates comments. A finished gesture is reported as an
//! [`AnnotationCommit`] for the owner of the comment list to apply.

use reviewkit_core::CommentId;
use reviewkit_settings::GestureSettings;

use crate::capture::PointerCapture;
use crate::compare::CompareMode;
use crate::drawing::Drawing;
use crate::gesture::{Gesture, GestureKind, GestureSession};
use crate::geometry::{NormalizedRect, Point, ScreenPoint};
use crate::measure::ContentMeasure;
use crate::tools::Tool;
use crate::viewport::Viewport;

/// Which button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A pin under the pointer, as hit-tested by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PinHit {
    pub id: CommentId,
    pub anchor: Point,
    pub drawing: Option<Drawing>,
}

/// Everything the engine needs to classify a pointer-down.
pub struct PointerContext<'a> {
    pub tool: Tool,
    pub compare: CompareMode,
    /// False for read-only roles.
    pub can_annotate: bool,
    pub has_selection: bool,
    /// Set when the press landed on a pin's hit target.
    pub hit: Option<PinHit>,
    pub measure: &'a dyn ContentMeasure,
}

/// A finished gesture the comment model should apply.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationCommit {
    /// New comment at `anchor`, optionally carrying a drawing.
    Place {
        anchor: Point,
        drawing: Option<Drawing>,
    },
    /// Move an existing comment's pin and drawing by a delta.
    Relocate { id: CommentId, dx: f64, dy: f64 },
}

/// Outcome of a pointer event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    None,
    Selected(CommentId),
    SelectionCleared,
    Committed(AnnotationCommit),
}

/// Ephemeral render state of a pin being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub id: CommentId,
    pub anchor: Point,
    pub drawing: Option<Drawing>,
}

/// Pointer state machine for one review surface.
#[derive(Debug)]
pub struct InteractionEngine {
    gesture: Gesture,
    settings: GestureSettings,
    capture: PointerCapture,
}

impl InteractionEngine {
    pub fn new(settings: GestureSettings, capture: PointerCapture) -> Self {
        Self {
            gesture: Gesture::Idle,
            settings,
            capture,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn gesture_kind(&self) -> GestureKind {
        self.gesture.kind()
    }

    pub fn is_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    /// Abort whatever gesture is running. Nothing is committed.
    pub fn cancel(&mut self) {
        if !self.gesture.is_idle() {
            tracing::debug!("Cancelled {:?} gesture", self.gesture.kind());
            self.gesture = Gesture::Idle;
        }
    }

    fn capture_point(&self, session: &GestureSession, at: ScreenPoint) -> Option<Point> {
        let p = session.to_normalized(at)?;
        Some(if self.settings.clamp_pen_points {
            p.clamped()
        } else {
            p
        })
    }

    pub fn pointer_down(
        &mut self,
        at: ScreenPoint,
        button: PointerButton,
        ctx: &PointerContext<'_>,
    ) -> Interaction {
        self.cancel();
        if !at.is_finite() || button == PointerButton::Secondary {
            return Interaction::None;
        }

        if button == PointerButton::Middle || ctx.tool == Tool::Hand {
            self.gesture = Gesture::Panning { last: at };
            return Interaction::None;
        }

        // Pins take priority over anything underneath them.
        if let (Some(hit), Tool::Pointer) = (&ctx.hit, ctx.tool) {
            if ctx.can_annotate && ctx.compare.allows_annotation() {
                let session =
                    GestureSession::begin(ctx.measure, Some(self.capture.acquire("annotation-drag")));
                if session.rect().is_usable() {
                    self.gesture = Gesture::Dragging {
                        session,
                        id: hit.id,
                        origin: hit.anchor,
                        current: hit.anchor,
                        drawing: hit.drawing.clone(),
                    };
                }
            }
            return Interaction::Selected(hit.id);
        }

        if ctx.tool == Tool::Pointer && ctx.has_selection {
            return Interaction::SelectionCleared;
        }
        if !ctx.can_annotate || !ctx.compare.allows_annotation() {
            return Interaction::None;
        }

        let session = GestureSession::begin(ctx.measure, None);
        let Some(start) = session.to_normalized(at) else {
            tracing::debug!("Content rect not measurable, ignoring press");
            return Interaction::None;
        };

        self.gesture = match ctx.tool {
            Tool::Pointer => Gesture::Placing {
                session,
                last: start,
            },
            Tool::Pen => {
                let first = if self.settings.clamp_pen_points {
                    start.clamped()
                } else {
                    start
                };
                Gesture::Pen {
                    session,
                    points: vec![first],
                }
            }
            Tool::Box => Gesture::Box {
                session,
                start,
                current: start,
            },
            Tool::Hand => Gesture::Idle,
        };
        Interaction::None
    }

    /// Returns true when something visible changed.
    pub fn pointer_move(&mut self, at: ScreenPoint, viewport: &mut Viewport) -> bool {
        if !at.is_finite() {
            return false;
        }
        if self.gesture.kind() == GestureKind::Pen {
            let Some(p) = self
                .gesture
                .session()
                .and_then(|session| self.capture_point(session, at))
            else {
                return false;
            };
            if let Gesture::Pen { points, .. } = &mut self.gesture {
                points.push(p);
            }
            return true;
        }

        match &mut self.gesture {
            Gesture::Idle | Gesture::Pen { .. } => false,
            Gesture::Panning { last } => {
                let moved = viewport.pan_by(at.x - last.x, at.y - last.y);
                *last = at;
                moved
            }
            Gesture::Placing { session, last } => match session.to_normalized(at) {
                Some(p) => {
                    *last = p;
                    false
                }
                None => false,
            },
            Gesture::Box {
                session, current, ..
            } => match session.to_normalized(at) {
                Some(p) => {
                    *current = p;
                    true
                }
                None => false,
            },
            Gesture::Dragging {
                session, current, ..
            } => match session.to_normalized(at) {
                Some(p) => {
                    *current = p.clamped();
                    true
                }
                None => false,
            },
        }
    }

    /// Finish the gesture. The release position counts as a final move for
    /// everything except pen strokes, which only sample moves.
    pub fn pointer_up(&mut self, at: ScreenPoint, viewport: &mut Viewport) -> Interaction {
        if !matches!(self.gesture, Gesture::Pen { .. }) {
            self.pointer_move(at, viewport);
        }
        let gesture = std::mem::take(&mut self.gesture);
        let color = self.settings.default_color.clone();

        match gesture {
            Gesture::Idle | Gesture::Panning { .. } => Interaction::None,
            Gesture::Placing { last, .. } => {
                if !last.is_inside() {
                    tracing::debug!("Pin released outside the content box, discarded");
                    return Interaction::None;
                }
                Interaction::Committed(AnnotationCommit::Place {
                    anchor: last,
                    drawing: None,
                })
            }
            Gesture::Pen { points, .. } => {
                if points.len() < self.settings.pen_min_points {
                    tracing::debug!("Pen stroke with {} point(s) discarded", points.len());
                    return Interaction::None;
                }
                let anchor = points[0].clamped();
                Interaction::Committed(AnnotationCommit::Place {
                    anchor,
                    drawing: Some(Drawing::pen(points, color)),
                })
            }
            Gesture::Box { start, current, .. } => {
                // Threshold applies to the clipped rect, so a box dragged
                // mostly outside the content is dropped.
                let rect = NormalizedRect::from_corners(start, current).clipped();
                let min = self.settings.box_min_extent;
                if rect.w < min && rect.h < min {
                    tracing::debug!("Box {:.2}x{:.2} below threshold, discarded", rect.w, rect.h);
                    return Interaction::None;
                }
                Interaction::Committed(AnnotationCommit::Place {
                    anchor: rect.origin().clamped(),
                    drawing: Some(Drawing::rect(rect, color)),
                })
            }
            Gesture::Dragging {
                id,
                origin,
                current,
                ..
            } => {
                let (dx, dy) = current.delta_from(&origin);
                if current.distance_to(&origin) <= self.settings.drag_min_distance {
                    return Interaction::None;
                }
                Interaction::Committed(AnnotationCommit::Relocate { id, dx, dy })
            }
        }
    }

    /// Pointer left the surface. Captured drags keep going; everything else
    /// is abandoned.
    pub fn pointer_leave(&mut self) {
        if !matches!(self.gesture, Gesture::Dragging { .. }) {
            self.cancel();
        }
    }

    /// Where the dragged pin and its drawing should render right now.
    pub fn drag_preview(&self) -> Option<DragPreview> {
        match &self.gesture {
            Gesture::Dragging {
                id,
                origin,
                current,
                drawing,
                ..
            } => {
                let (dx, dy) = current.delta_from(origin);
                Some(DragPreview {
                    id: *id,
                    anchor: *current,
                    drawing: drawing.as_ref().map(|d| d.translated(dx, dy)),
                })
            }
            _ => None,
        }
    }

    /// The stroke or box being drawn, unclipped.
    pub fn drawing_preview(&self) -> Option<Drawing> {
        let color = self.settings.default_color.clone();
        match &self.gesture {
            Gesture::Pen { points, .. } => Some(Drawing::pen(points.clone(), color)),
            Gesture::Box { start, current, .. } => Some(Drawing::rect(
                NormalizedRect::from_corners(*start, *current),
                color,
            )),
            _ => None,
        }
    }
}
