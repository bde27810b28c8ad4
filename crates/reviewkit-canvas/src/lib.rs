//! # ReviewKit Canvas
//!
//! The coordinate engine behind the review surface: where a pointer is in
//! content terms, what a gesture means, and how the view is zoomed and
//! panned. No rendering happens here.
//!
//! ## Coordinate spaces
//!
//! ```text
//! Screen pixels ──(measured content rect, once per gesture)──► Normalized 0-100
//!        ▲                                                          │
//!        └──────────── translate(pan) scale(zoom) ◄─────────────────┘
//! ```
//!
//! Stored geometry ([`Point`], [`Drawing`]) is always normalized. Zoom and
//! pan ([`Viewport`]) are view state only.
//!
//! ## Gestures
//!
//! [`InteractionEngine`] classifies pointer input into pin placement, pen
//! strokes, boxes, pin relocation and panning. Finished gestures come out
//! as [`AnnotationCommit`] values for the comment model to apply.

pub mod capture;
pub mod compare;
pub mod drawing;
pub mod framing;
pub mod geometry;
pub mod gesture;
pub mod interaction;
pub mod keyboard;
pub mod measure;
pub mod media;
pub mod tools;
pub mod viewport;

pub use capture::{CaptureGuard, PointerCapture};
pub use compare::{CompareMode, WipeDivider};
pub use drawing::{Drawing, DrawingKind};
pub use framing::{AspectRatio, SafeZone};
pub use geometry::{NormalizedRect, Point, ScreenPoint, ScreenRect, Size, NORMALIZED_MAX};
pub use gesture::{Gesture, GestureKind, GestureSession};
pub use interaction::{
    AnnotationCommit, DragPreview, Interaction, InteractionEngine, PinHit, PointerButton,
    PointerContext,
};
pub use keyboard::{KeyCommand, KeyEvent, KeyPhase, KeyRouter, ShortcutAction};
pub use measure::{ContentLayout, ContentMeasure, LayoutMeasure};
pub use media::{AspectLock, MediaKind};
pub use tools::{Tool, ToolState};
pub use viewport::Viewport;
