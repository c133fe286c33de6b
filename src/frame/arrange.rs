use crate::{
    foundation::core::{CanonicalSpace, Point, PlacementPatch},
    frame::{
        editor::FrameEditor,
        model::{CustomFrame, PersonKind},
    },
};

/// Pointer drag on the arrange preview.
///
/// Pointer positions arrive in display pixels; the preview shows the canonical 540x960 space at
/// `display_scale`, so deltas are divided by it before they reach the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrangeDrag {
    display_scale: f64,
    target: Option<PersonKind>,
    last: Point,
}

impl ArrangeDrag {
    /// Drag tracker for a preview drawn at `display_scale` display pixels per canonical unit.
    pub fn new(display_scale: f64) -> Self {
        Self {
            display_scale,
            target: None,
            last: Point::ZERO,
        }
    }

    /// Tracker for a preview `display_width` pixels wide.
    pub fn for_display_width(display_width: f64) -> Self {
        Self::new(CanonicalSpace::scale_for_width(display_width))
    }

    /// Preview scale.
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Person being dragged.
    pub fn target(&self) -> Option<PersonKind> {
        self.target
    }

    /// Start dragging `kind` from display position `at`.
    pub fn pointer_down(&mut self, kind: PersonKind, at: Point) {
        self.target = Some(kind);
        self.last = at;
    }

    /// Start dragging whichever cut-out is on top at display position `at`. Returns the person
    /// picked, if any.
    pub fn pointer_down_at(&mut self, frame: &CustomFrame, at: Point) -> Option<PersonKind> {
        let kind = pick(frame, self.to_canonical(at))?;
        self.pointer_down(kind, at);
        Some(kind)
    }

    /// Move the dragged cut-out by the pointer delta since the last event.
    pub fn pointer_move(&mut self, editor: &mut FrameEditor, at: Point) -> bool {
        let Some(kind) = self.target else {
            return false;
        };
        let delta = CanonicalSpace::display_delta_to_canonical(at - self.last, self.display_scale);
        self.last = at;
        let Some(current) = editor.frame().person(kind).map(|p| p.position) else {
            return false;
        };
        editor.update_position(
            kind,
            PlacementPatch::position(current.x + delta.x, current.y + delta.y),
        );
        true
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.target = None;
    }

    fn to_canonical(&self, display: Point) -> Point {
        let v = CanonicalSpace::display_delta_to_canonical(display.to_vec2(), self.display_scale);
        v.to_point()
    }
}

/// Topmost cut-out under canonical point `p`. The bride is drawn last, so it wins overlaps.
pub fn pick(frame: &CustomFrame, p: Point) -> Option<PersonKind> {
    PersonKind::BOTH
        .into_iter()
        .rev()
        .find(|kind| {
            frame
                .person(*kind)
                .is_some_and(|img| img.cropped_url.is_some() && img.position.contains(p))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/frame/arrange.rs"]
mod tests;
