//! Hover tracking for the interactive fill layer.
//!
//! [`HoverController`] owns the single "currently hovered" identifier and is the
//! only writer of the per-feature `hover` flag. It never talks to the map or the
//! DOM directly: flag writes go through a [`FeatureStateSink`] and the floating
//! tooltip through a [`TooltipSurface`], so the state machine runs the same in
//! the browser and under `cargo test`.

use crate::feature::{Feature, FeatureId};
use crate::tooltip::TooltipTemplate;

/// Geographic pointer position, used as the tooltip anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(FeatureId),
}

/// Per-feature render state of the polygon source.
pub trait FeatureStateSink {
    fn set_hover(&mut self, id: FeatureId, hovered: bool);
}

/// The single floating tooltip panel.
pub trait TooltipSurface {
    /// Attach (if detached), replace content and move to `anchor`.
    fn show(&mut self, anchor: LngLat, html: &str);
    /// Detach. Hiding an already hidden tooltip is harmless.
    fn hide(&mut self);
}

pub struct HoverController<S, T> {
    state: HoverState,
    /// Last pointer position seen, reused when an event carries none.
    anchor: Option<LngLat>,
    template: TooltipTemplate,
    feature_state: S,
    tooltip: T,
}

impl<S: FeatureStateSink, T: TooltipSurface> HoverController<S, T> {
    pub fn new(template: TooltipTemplate, feature_state: S, tooltip: T) -> Self {
        Self {
            state: HoverState::Idle,
            anchor: None,
            template,
            feature_state,
            tooltip,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Pointer moved within the fill layer. `features` are the rendered features
    /// under the pointer, topmost first. `at` is `None` when the engine did not
    /// report a position; the previous one is kept in that case.
    pub fn pointer_move(&mut self, at: Option<LngLat>, features: &[Feature]) {
        // Between shapes: keep whatever is currently shown.
        let Some(top) = features.first() else {
            return;
        };
        // Nowhere to put the tooltip yet.
        let Some(anchor) = at.or(self.anchor) else {
            return;
        };

        let Some(id) = top.id else {
            // Cannot be flagged, so it cannot own the tooltip either.
            log::trace!("hover: feature without id under pointer");
            self.release();
            return;
        };

        match self.state {
            HoverState::Hovering(prev) if prev == id => {}
            HoverState::Hovering(prev) => {
                self.feature_state.set_hover(prev, false);
                self.feature_state.set_hover(id, true);
                log::trace!("hover: {prev} -> {id}");
            }
            HoverState::Idle => {
                self.feature_state.set_hover(id, true);
                log::trace!("hover: enter {id}");
            }
        }
        self.state = HoverState::Hovering(id);
        self.anchor = Some(anchor);

        let html = self.template.render_html(Some(top));
        self.tooltip.show(anchor, &html);
    }

    /// Pointer left the fill layer.
    pub fn pointer_leave(&mut self) {
        self.release();
    }

    /// Clear any flag and hide the tooltip. Called when the view unmounts,
    /// whatever the current state.
    pub fn teardown(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let HoverState::Hovering(prev) = self.state {
            self.feature_state.set_hover(prev, false);
            log::trace!("hover: leave {prev}");
        }
        self.state = HoverState::Idle;
        self.anchor = None;
        self.tooltip.hide();
    }
}
