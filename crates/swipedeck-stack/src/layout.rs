#![forbid(unsafe_code)]

//! Pure frame computation for cards and the stack container.
//!
//! Frames are plain rectangles handed to the presentation layer; nothing here
//! reads stack state.

use swipedeck_core::{Insets, Rect};

/// Description of a card's footer strip, when it has one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footer {
    /// Height of the strip anchored to the card's bottom edge.
    pub height: f32,
    /// An opaque footer pushes the content frame up; a translucent one lets
    /// content run underneath.
    pub opaque: bool,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            height: 100.0,
            opaque: true,
        }
    }
}

/// The frame of a card's main content within its bounds.
pub fn content_frame(bounds: Rect, footer: Option<Footer>) -> Rect {
    match footer {
        Some(footer) if footer.opaque => Rect::new(
            0.0,
            0.0,
            bounds.width(),
            (bounds.height() - footer.height).max(0.0),
        ),
        _ => Rect::from_size(bounds.size),
    }
}

/// The frame of a card's footer strip within its bounds.
pub fn footer_frame(bounds: Rect, footer: Footer) -> Rect {
    Rect::new(
        0.0,
        bounds.height() - footer.height,
        bounds.width(),
        footer.height,
    )
}

/// The frame of a card's overlay container within its bounds.
///
/// Any footer, opaque or not, keeps overlays out of the footer strip.
pub fn overlay_frame(bounds: Rect, footer: Option<Footer>) -> Rect {
    match footer {
        Some(footer) => Rect::new(
            0.0,
            0.0,
            bounds.width(),
            (bounds.height() - footer.height).max(0.0),
        ),
        None => Rect::from_size(bounds.size),
    }
}

/// The card container frame inside the stack bounds.
pub fn container_frame(stack_bounds: Rect, insets: Insets) -> Rect {
    stack_bounds.inset_by(insets)
}

/// The frame every card occupies, at the container origin.
pub fn card_frame(stack_bounds: Rect, insets: Insets) -> Rect {
    Rect::from_size(container_frame(stack_bounds, insets).size)
}
