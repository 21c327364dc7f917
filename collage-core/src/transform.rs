//! Screen/model coordinate transforms and per-view gesture state.
//!
//! Model space is integer and centered: (0, 0) is the middle of the canvas,
//! and emoji positions are offsets from it. Screen space is the floating
//! pixel space of whatever surface hosts the view. Conversions into model
//! space truncate toward zero, so the model is intentionally quantized and
//! a screen point round-trips to within one model unit per axis.

use crate::Emoji;

/// Convert a screen point to integer model coordinates.
///
/// `origin` is the screen position of the canvas center and `pan` the
/// screen-space pan offset. Truncates toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // truncation toward zero is the defined conversion
pub fn to_model(screen: (f64, f64), origin: (f64, f64), pan: (f64, f64), zoom: f64) -> (i64, i64) {
    (
        ((screen.0 - origin.0 - pan.0) / zoom) as i64,
        ((screen.1 - origin.1 - pan.1) / zoom) as i64,
    )
}

/// Convert integer model coordinates to a screen point.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_screen(model: (i64, i64), origin: (f64, f64), pan: (f64, f64), zoom: f64) -> (f64, f64) {
    (
        origin.0 + model.0 as f64 * zoom + pan.0,
        origin.1 + model.1 as f64 * zoom + pan.1,
    )
}

/// Convert a pixel translation to a model-space offset by dividing out the
/// zoom, truncating toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // truncation toward zero is the defined conversion
pub fn drag_to_model(translation: (f64, f64), zoom: f64) -> (i64, i64) {
    ((translation.0 / zoom) as i64, (translation.1 / zoom) as i64)
}

/// Which pan/zoom context a live gesture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomScope {
    /// The whole canvas: the gesture moves the steady-state view.
    Background,
    /// Only the currently selected emojis.
    Selection,
}

/// Outcome of a completed zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomEnd {
    /// Background scope: the steady zoom absorbed the gesture in place.
    Committed,
    /// Selection scope: the caller applies this factor to the selected
    /// emojis as a document mutation.
    ScaleSelected(f64),
}

/// Session-scoped transform state for one open view of a document.
///
/// Holds the committed (steady-state) pan and zoom plus the live deltas of
/// in-flight gestures. Pan is stored in pre-zoom units, the way gesture
/// translations are folded in; the screen-space offset is
/// `(steady + live) * zoom`. Live zoom deltas are split between the
/// [`ZoomScope::Background`] and [`ZoomScope::Selection`] scopes, and the
/// scope is fixed once when the gesture begins.
///
/// None of this is document state. It is never persisted and resets with
/// the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    steady_pan: (f64, f64),
    gesture_pan: (f64, f64),
    steady_zoom: f64,
    gesture_zoom_background: f64,
    gesture_zoom_selection: f64,
    gesture_selection_drag: (f64, f64),
    zoom_scope: Option<ZoomScope>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            steady_pan: (0.0, 0.0),
            gesture_pan: (0.0, 0.0),
            steady_zoom: 1.0,
            gesture_zoom_background: 1.0,
            gesture_zoom_selection: 1.0,
            gesture_selection_drag: (0.0, 0.0),
            zoom_scope: None,
        }
    }
}

impl ViewState {
    /// Identity view: no pan, zoom 1, no gesture in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Background-scope zoom: steady zoom times the live background delta.
    ///
    /// This is the zoom every position conversion uses, selected or not.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.steady_zoom * self.gesture_zoom_background
    }

    /// Selection-scope zoom: steady zoom times the live selection delta.
    ///
    /// Only the drawn size of selected emojis uses this.
    #[must_use]
    pub fn selection_zoom(&self) -> f64 {
        self.steady_zoom * self.gesture_zoom_selection
    }

    /// Screen-space pan offset: committed plus live pan, scaled by the
    /// current zoom.
    #[must_use]
    pub fn screen_pan(&self) -> (f64, f64) {
        let zoom = self.zoom();
        (
            (self.steady_pan.0 + self.gesture_pan.0) * zoom,
            (self.steady_pan.1 + self.gesture_pan.1) * zoom,
        )
    }

    /// Begin a zoom gesture, fixing its scope for the whole gesture.
    ///
    /// The scope comes from the selection state at this moment; selection
    /// changes while the gesture is in flight do not re-route it.
    pub fn begin_zoom(&mut self, any_selected: bool) -> ZoomScope {
        let scope = if any_selected {
            ZoomScope::Selection
        } else {
            ZoomScope::Background
        };
        self.zoom_scope = Some(scope);
        self.gesture_zoom_background = 1.0;
        self.gesture_zoom_selection = 1.0;
        scope
    }

    /// Update the live magnitude of the in-flight zoom gesture.
    ///
    /// Starts a background-scope gesture if none was begun.
    pub fn update_zoom(&mut self, magnitude: f64) {
        match self.zoom_scope.get_or_insert(ZoomScope::Background) {
            ZoomScope::Background => self.gesture_zoom_background = magnitude,
            ZoomScope::Selection => self.gesture_zoom_selection = magnitude,
        }
    }

    /// End the zoom gesture with its final magnitude.
    ///
    /// Background scope folds the magnitude into the steady zoom here.
    /// Selection scope leaves the view untouched and hands the factor back
    /// for the caller to apply to the selected emojis.
    pub fn end_zoom(&mut self, magnitude: f64) -> ZoomEnd {
        let scope = self.zoom_scope.take().unwrap_or(ZoomScope::Background);
        self.gesture_zoom_background = 1.0;
        self.gesture_zoom_selection = 1.0;
        match scope {
            ZoomScope::Background => {
                self.steady_zoom *= magnitude;
                ZoomEnd::Committed
            }
            ZoomScope::Selection => ZoomEnd::ScaleSelected(magnitude),
        }
    }

    /// Update the live pan with the gesture's running pixel translation.
    pub fn update_pan(&mut self, translation: (f64, f64)) {
        let zoom = self.zoom();
        self.gesture_pan = (translation.0 / zoom, translation.1 / zoom);
    }

    /// End the pan gesture, folding the final translation into the steady
    /// pan in pre-zoom units.
    pub fn end_pan(&mut self, translation: (f64, f64)) {
        let zoom = self.zoom();
        self.steady_pan.0 += translation.0 / zoom;
        self.steady_pan.1 += translation.1 / zoom;
        self.gesture_pan = (0.0, 0.0);
    }

    /// Update the live drag offset applied to selected emojis.
    pub fn update_selection_drag(&mut self, translation: (f64, f64)) {
        let zoom = self.zoom();
        self.gesture_selection_drag = (translation.0 / zoom, translation.1 / zoom);
    }

    /// End the selected-emoji drag.
    ///
    /// Clears the live offset and returns the model-space delta the caller
    /// commits through a move-selected mutation.
    pub fn end_selection_drag(&mut self, translation: (f64, f64)) -> (i64, i64) {
        let zoom = self.zoom();
        self.gesture_selection_drag = (0.0, 0.0);
        drag_to_model(translation, zoom)
    }

    /// Convert a screen point (a drop location, say) to model coordinates.
    #[must_use]
    pub fn point_to_model(&self, screen: (f64, f64), origin: (f64, f64)) -> (i64, i64) {
        to_model(screen, origin, self.screen_pan(), self.zoom())
    }

    /// Convert model coordinates to a screen point.
    #[must_use]
    pub fn point_from_model(&self, model: (i64, i64), origin: (f64, f64)) -> (f64, f64) {
        to_screen(model, origin, self.screen_pan(), self.zoom())
    }

    /// Screen position of an emoji.
    ///
    /// A selected emoji carries the live selection drag, truncated into
    /// model units first so the preview lands exactly where the committed
    /// move will. Position always converts under the background zoom; only
    /// drawn size is scope-dependent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // truncation toward zero is the defined conversion
    pub fn emoji_position(&self, emoji: &Emoji, origin: (f64, f64)) -> (f64, f64) {
        let (mut x, mut y) = (emoji.x, emoji.y);
        if emoji.selected {
            x += self.gesture_selection_drag.0 as i64;
            y += self.gesture_selection_drag.1 as i64;
        }
        self.point_from_model((x, y), origin)
    }

    /// Drawn font size of an emoji: the selection zoom while the emoji is
    /// selected, the background zoom otherwise.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn emoji_size(&self, emoji: &Emoji) -> f64 {
        let zoom = if emoji.selected {
            self.selection_zoom()
        } else {
            self.zoom()
        };
        emoji.size as f64 * zoom
    }

    /// Set the steady zoom so `image` fits inside `viewport`, using the
    /// smaller of the horizontal and vertical ratios.
    ///
    /// A no-op unless every dimension is positive; a zero-sized viewport
    /// (first layout pass) must not wipe the zoom.
    pub fn zoom_to_fit(&mut self, image: (f64, f64), viewport: (f64, f64)) {
        if image.0 > 0.0 && image.1 > 0.0 && viewport.0 > 0.0 && viewport.1 > 0.0 {
            let h_zoom = viewport.0 / image.0;
            let v_zoom = viewport.1 / image.1;
            self.steady_zoom = h_zoom.min(v_zoom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    const ORIGIN: (f64, f64) = (400.0, 300.0);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_to_model_identity_view() {
        assert_eq!(
            to_model((400.0, 300.0), ORIGIN, (0.0, 0.0), 1.0),
            (0, 0)
        );
        assert_eq!(
            to_model((395.0, 290.0), ORIGIN, (0.0, 0.0), 1.0),
            (-5, -10)
        );
    }

    #[test]
    fn test_to_model_truncates_toward_zero() {
        // 0.7 and -0.6 both collapse onto 0, not toward negative infinity.
        assert_eq!(
            to_model((400.7, 299.4), ORIGIN, (0.0, 0.0), 1.0),
            (0, 0)
        );
        assert_eq!(
            to_model((398.5, 301.5), ORIGIN, (0.0, 0.0), 1.0),
            (-1, 1)
        );
    }

    #[test]
    fn test_to_model_divides_out_pan_and_zoom() {
        // screen = origin + model * zoom + pan, solved back for model.
        assert_eq!(
            to_model((430.0, 260.0), ORIGIN, (10.0, 20.0), 2.0),
            (10, -30)
        );
    }

    #[test]
    fn test_to_screen_applies_zoom_then_pan() {
        let (x, y) = to_screen((3, -4), ORIGIN, (10.0, 20.0), 2.0);
        assert!(close(x, 416.0));
        assert!(close(y, 312.0));
    }

    #[test]
    fn test_drag_to_model_truncates() {
        assert_eq!(drag_to_model((25.0, -25.0), 10.0), (2, -2));
        assert_eq!(drag_to_model((9.9, -9.9), 1.0), (9, -9));
    }

    #[test]
    fn test_zoom_scope_fixed_at_gesture_start() {
        let mut view = ViewState::new();

        let scope = view.begin_zoom(false);
        assert_eq!(scope, ZoomScope::Background);
        view.update_zoom(2.0);
        assert!(close(view.zoom(), 2.0));
        assert!(close(view.selection_zoom(), 1.0));
        assert_eq!(view.end_zoom(2.0), ZoomEnd::Committed);
        assert!(close(view.zoom(), 2.0));

        // Selection present at start: the whole gesture stays in the
        // selection scope and never moves the steady zoom.
        let scope = view.begin_zoom(true);
        assert_eq!(scope, ZoomScope::Selection);
        view.update_zoom(1.5);
        assert!(close(view.zoom(), 2.0));
        assert!(close(view.selection_zoom(), 3.0));
        assert_eq!(view.end_zoom(1.5), ZoomEnd::ScaleSelected(1.5));
        assert!(close(view.zoom(), 2.0));
        assert!(close(view.selection_zoom(), 2.0));
    }

    #[test]
    fn test_update_zoom_without_begin_defaults_to_background() {
        let mut view = ViewState::new();
        view.update_zoom(3.0);
        assert!(close(view.zoom(), 3.0));
        assert_eq!(view.end_zoom(3.0), ZoomEnd::Committed);
        assert!(close(view.zoom(), 3.0));
    }

    #[test]
    fn test_pan_stored_in_prezoom_units() {
        let mut view = ViewState::new();
        view.update_zoom(2.0);
        view.end_zoom(2.0);

        view.update_pan((100.0, 50.0));
        let (px, py) = view.screen_pan();
        assert!(close(px, 100.0));
        assert!(close(py, 50.0));

        view.end_pan((100.0, 50.0));
        let (px, py) = view.screen_pan();
        assert!(close(px, 100.0));
        assert!(close(py, 50.0));
    }

    #[test]
    fn test_pan_accumulates_across_gestures() {
        let mut view = ViewState::new();
        view.end_pan((30.0, 0.0));
        view.end_pan((0.0, -20.0));
        let (px, py) = view.screen_pan();
        assert!(close(px, 30.0));
        assert!(close(py, -20.0));
    }

    #[test]
    fn test_selection_drag_preview_matches_commit() {
        let mut document = Document::new();
        let id = document.add_emoji("x", 0, 0, 10);
        document.toggle_selected(id);

        let mut view = ViewState::new();
        view.update_zoom(10.0);
        view.end_zoom(10.0);

        // 25 px at zoom 10 is 2.5 model units; both the preview and the
        // committed move truncate it to 2.
        view.update_selection_drag((25.0, -25.0));
        let emoji = document.emoji(id).unwrap().clone();
        let (x, _) = view.emoji_position(&emoji, ORIGIN);
        assert!(close(x, ORIGIN.0 + 2.0 * 10.0));

        let (dx, dy) = view.end_selection_drag((25.0, -25.0));
        assert_eq!((dx, dy), (2, -2));
        document.move_selected(dx, dy);
        let emoji = document.emoji(id).unwrap().clone();
        let (x, _) = view.emoji_position(&emoji, ORIGIN);
        assert!(close(x, ORIGIN.0 + 2.0 * 10.0));
    }

    #[test]
    fn test_unselected_emoji_ignores_selection_state() {
        let mut document = Document::new();
        let id = document.add_emoji("x", 5, 0, 10);

        let mut view = ViewState::new();
        view.update_selection_drag((100.0, 100.0));
        view.begin_zoom(true);
        view.update_zoom(4.0);

        let emoji = document.emoji(id).unwrap().clone();
        let (x, _) = view.emoji_position(&emoji, ORIGIN);
        assert!(close(x, ORIGIN.0 + 5.0));
        assert!(close(view.emoji_size(&emoji), 10.0));
    }

    #[test]
    fn test_selected_size_uses_selection_zoom() {
        let mut document = Document::new();
        let id = document.add_emoji("x", 0, 0, 10);
        document.toggle_selected(id);

        let mut view = ViewState::new();
        view.begin_zoom(true);
        view.update_zoom(1.5);

        let emoji = document.emoji(id).unwrap().clone();
        assert!(close(view.emoji_size(&emoji), 15.0));
        // Position still converts under the background zoom.
        let (x, _) = view.emoji_position(&emoji, ORIGIN);
        assert!(close(x, ORIGIN.0));
    }

    #[test]
    fn test_zoom_to_fit_picks_smaller_ratio() {
        let mut view = ViewState::new();
        view.zoom_to_fit((200.0, 100.0), (400.0, 300.0));
        assert!(close(view.zoom(), 2.0));
        view.zoom_to_fit((100.0, 300.0), (400.0, 300.0));
        assert!(close(view.zoom(), 1.0));
    }

    #[test]
    fn test_zoom_to_fit_ignores_degenerate_dimensions() {
        let mut view = ViewState::new();
        view.update_zoom(2.0);
        view.end_zoom(2.0);
        view.zoom_to_fit((0.0, 100.0), (400.0, 300.0));
        view.zoom_to_fit((200.0, 100.0), (0.0, 0.0));
        assert!(close(view.zoom(), 2.0));
    }

    #[test]
    fn test_round_trip_is_exact_on_integer_grid() {
        let view = {
            let mut view = ViewState::new();
            view.end_pan((17.0, -6.0));
            view.update_zoom(2.0);
            view.end_zoom(2.0);
            view
        };
        for model in [(0, 0), (10, -20), (-137, 42)] {
            let screen = view.point_from_model(model, ORIGIN);
            assert_eq!(view.point_to_model(screen, ORIGIN), model);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_round_trip_within_one_unit(
                mx in -10_000i64..10_000i64,
                my in -10_000i64..10_000i64,
                pan_x in -1000.0f64..1000.0f64,
                pan_y in -1000.0f64..1000.0f64,
                zoom in 0.1f64..10.0f64
            ) {
                let screen = to_screen((mx, my), (400.0, 300.0), (pan_x, pan_y), zoom);
                let (bx, by) = to_model(screen, (400.0, 300.0), (pan_x, pan_y), zoom);
                prop_assert!(
                    (bx - mx).abs() <= 1 && (by - my).abs() <= 1,
                    "({}, {}) round-tripped to ({}, {})",
                    mx, my, bx, by
                );
            }

            #[test]
            fn prop_truncation_moves_toward_zero(
                sx in -2000.0f64..2000.0f64,
                sy in -2000.0f64..2000.0f64,
                zoom in 0.1f64..10.0f64
            ) {
                let (mx, my) = to_model((sx, sy), (0.0, 0.0), (0.0, 0.0), zoom);
                let exact_x = sx / zoom;
                let exact_y = sy / zoom;
                prop_assert!((mx as f64).abs() <= exact_x.abs());
                prop_assert!((my as f64).abs() <= exact_y.abs());
                prop_assert!(mx == 0 || (mx > 0) == (exact_x > 0.0));
                prop_assert!(my == 0 || (my > 0) == (exact_y > 0.0));
            }
        }
    }
}
