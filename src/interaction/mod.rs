mod transition;

pub use transition::{Interpolate, Transition, ease_cubic_in_out};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::ElementId;
use crate::render::Color;

fn default_enter_ms() -> u64 {
    150
}

fn default_marker_leave_ms() -> u64 {
    300
}

fn default_label_leave_ms() -> u64 {
    150
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverState {
    Idle,
    Hovered,
}

/// Idle and hovered paint of one kind of hoverable element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPalette {
    pub idle_fill: Color,
    pub idle_stroke: Color,
    pub hover_fill: Color,
    pub hover_stroke: Color,
}

impl HoverPalette {
    fn fill(self, state: HoverState) -> Color {
        match state {
            HoverState::Idle => self.idle_fill,
            HoverState::Hovered => self.hover_fill,
        }
    }

    fn stroke(self, state: HoverState) -> Color {
        match state {
            HoverState::Idle => self.idle_stroke,
            HoverState::Hovered => self.hover_stroke,
        }
    }
}

/// Hover transition durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Marker and label fade-in after pointer enter.
    #[serde(default = "default_enter_ms")]
    pub enter_ms: u64,
    /// Marker revert after pointer leave.
    #[serde(default = "default_marker_leave_ms")]
    pub marker_leave_ms: u64,
    /// Label fade-out after pointer leave.
    #[serde(default = "default_label_leave_ms")]
    pub label_leave_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter_ms: default_enter_ms(),
            marker_leave_ms: default_marker_leave_ms(),
            label_leave_ms: default_label_leave_ms(),
        }
    }
}

impl TransitionConfig {
    #[must_use]
    pub fn enter(self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    #[must_use]
    pub fn marker_leave(self) -> Duration {
        Duration::from_millis(self.marker_leave_ms)
    }

    #[must_use]
    pub fn label_leave(self) -> Duration {
        Duration::from_millis(self.label_leave_ms)
    }
}

/// Interpolated paint of one element at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementVisuals {
    pub fill: Color,
    pub stroke: Color,
    pub label_opacity: f64,
}

/// Hover record of one marker or annotation band, owning its transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInteraction {
    element: ElementId,
    state: HoverState,
    fill: Transition<Color>,
    stroke: Transition<Color>,
    label_opacity: Transition<f64>,
}

impl ElementInteraction {
    #[must_use]
    pub fn new(element: ElementId, palette: HoverPalette) -> Self {
        Self {
            element,
            state: HoverState::Idle,
            fill: Transition::settled(palette.idle_fill),
            stroke: Transition::settled(palette.idle_stroke),
            label_opacity: Transition::settled(0.0),
        }
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// `Idle -> Hovered`. Returns `false` when already hovered.
    pub fn enter(&mut self, now: Duration, palette: HoverPalette, timings: TransitionConfig) -> bool {
        if self.state == HoverState::Hovered {
            return false;
        }
        self.state = HoverState::Hovered;
        self.fill
            .retarget(palette.fill(self.state), now, timings.enter());
        self.stroke
            .retarget(palette.stroke(self.state), now, timings.enter());
        self.label_opacity.retarget(1.0, now, timings.enter());
        true
    }

    /// `Hovered -> Idle`. Returns `false` when already idle.
    pub fn leave(&mut self, now: Duration, palette: HoverPalette, timings: TransitionConfig) -> bool {
        if self.state == HoverState::Idle {
            return false;
        }
        self.state = HoverState::Idle;
        self.fill
            .retarget(palette.fill(self.state), now, timings.marker_leave());
        self.stroke
            .retarget(palette.stroke(self.state), now, timings.marker_leave());
        self.label_opacity.retarget(0.0, now, timings.label_leave());
        true
    }

    #[must_use]
    pub fn visuals(&self, now: Duration) -> ElementVisuals {
        ElementVisuals {
            fill: self.fill.value_at(now),
            stroke: self.stroke.value_at(now),
            label_opacity: self.label_opacity.value_at(now).clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.fill.is_active(now) || self.stroke.is_active(now) || self.label_opacity.is_active(now)
    }
}

/// Hover state of every marker and annotation band of one graph.
///
/// Pointer hover and programmatic hover share the same per-element records;
/// the pointer only remembers which element it entered last.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    points: Vec<ElementInteraction>,
    notes: Vec<ElementInteraction>,
    marker_palette: HoverPalette,
    band_palette: HoverPalette,
    timings: TransitionConfig,
    pointer_target: Option<ElementId>,
}

impl InteractionState {
    #[must_use]
    pub fn new(
        point_count: usize,
        note_count: usize,
        marker_palette: HoverPalette,
        band_palette: HoverPalette,
        timings: TransitionConfig,
    ) -> Self {
        Self {
            points: (0..point_count)
                .map(|index| ElementInteraction::new(ElementId::DataPoint(index), marker_palette))
                .collect(),
            notes: (0..note_count)
                .map(|index| ElementInteraction::new(ElementId::Annotation(index), band_palette))
                .collect(),
            marker_palette,
            band_palette,
            timings,
            pointer_target: None,
        }
    }

    #[must_use]
    pub fn timings(&self) -> TransitionConfig {
        self.timings
    }

    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.element(element).is_some()
    }

    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&ElementInteraction> {
        match element {
            ElementId::DataPoint(index) => self.points.get(index),
            ElementId::Annotation(index) => self.notes.get(index),
        }
    }

    #[must_use]
    pub fn state(&self, element: ElementId) -> Option<HoverState> {
        self.element(element).map(ElementInteraction::state)
    }

    #[must_use]
    pub fn visuals(&self, element: ElementId, now: Duration) -> Option<ElementVisuals> {
        self.element(element).map(|record| record.visuals(now))
    }

    /// Element the pointer entered last, if it is still over it.
    #[must_use]
    pub fn pointer_target(&self) -> Option<ElementId> {
        self.pointer_target
    }

    /// Every element currently in `Hovered` state, points first.
    pub fn hovered(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.points
            .iter()
            .chain(self.notes.iter())
            .filter(|record| record.state == HoverState::Hovered)
            .map(ElementInteraction::element)
    }

    /// Enters `element`. Unknown elements are ignored. Returns whether state changed.
    pub fn hover(&mut self, element: ElementId, now: Duration) -> bool {
        let timings = self.timings;
        let Some((record, palette)) = self.record_mut(element) else {
            warn!(?element, "ignoring hover of unknown element");
            return false;
        };
        let changed = record.enter(now, palette, timings);
        if changed {
            trace!(?element, now_ms = now.as_millis() as u64, "element hovered");
        }
        changed
    }

    /// Leaves `element`. Unknown elements are ignored. Returns whether state changed.
    pub fn unhover(&mut self, element: ElementId, now: Duration) -> bool {
        let timings = self.timings;
        let Some((record, palette)) = self.record_mut(element) else {
            warn!(?element, "ignoring unhover of unknown element");
            return false;
        };
        let changed = record.leave(now, palette, timings);
        if changed {
            trace!(?element, now_ms = now.as_millis() as u64, "element unhovered");
        }
        changed
    }

    /// Moves the pointer onto `target` (or off every element with `None`):
    /// the previous pointer target receives leave, the new one enter.
    pub fn set_pointer_target(&mut self, target: Option<ElementId>, now: Duration) -> bool {
        if target == self.pointer_target {
            return false;
        }
        let mut changed = false;
        if let Some(previous) = self.pointer_target.take() {
            changed |= self.unhover(previous, now);
        }
        if let Some(next) = target.filter(|element| self.contains(*element)) {
            changed |= self.hover(next, now);
            self.pointer_target = Some(next);
        }
        changed
    }

    /// Pointer left the graph: every hovered element reverts.
    pub fn pointer_leave(&mut self, now: Duration) -> bool {
        self.pointer_target = None;
        let hovered: Vec<ElementId> = self.hovered().collect();
        let mut changed = false;
        for element in hovered {
            changed |= self.unhover(element, now);
        }
        changed
    }

    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.points
            .iter()
            .chain(self.notes.iter())
            .any(|record| record.is_animating(now))
    }

    fn record_mut(&mut self, element: ElementId) -> Option<(&mut ElementInteraction, HoverPalette)> {
        match element {
            ElementId::DataPoint(index) => {
                let palette = self.marker_palette;
                self.points.get_mut(index).map(|record| (record, palette))
            }
            ElementId::Annotation(index) => {
                let palette = self.band_palette;
                self.notes.get_mut(index).map(|record| (record, palette))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{HoverPalette, HoverState, InteractionState, TransitionConfig};
    use crate::core::ElementId;
    use crate::render::Color;

    fn palette() -> HoverPalette {
        HoverPalette {
            idle_fill: Color::rgb(1.0, 1.0, 1.0),
            idle_stroke: Color::rgb(0.0, 0.0, 1.0),
            hover_fill: Color::rgb(0.0, 0.0, 1.0),
            hover_stroke: Color::rgb(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn pointer_target_switch_leaves_previous_element() {
        let mut state = InteractionState::new(2, 0, palette(), palette(), TransitionConfig::default());
        let now = Duration::from_millis(10);
        assert!(state.set_pointer_target(Some(ElementId::DataPoint(0)), now));
        assert!(state.set_pointer_target(Some(ElementId::DataPoint(1)), now));
        assert_eq!(state.state(ElementId::DataPoint(0)), Some(HoverState::Idle));
        assert_eq!(state.state(ElementId::DataPoint(1)), Some(HoverState::Hovered));
        assert!(!state.set_pointer_target(Some(ElementId::DataPoint(1)), now));
    }

    #[test]
    fn unknown_element_is_ignored() {
        let mut state = InteractionState::new(1, 0, palette(), palette(), TransitionConfig::default());
        assert!(!state.hover(ElementId::Annotation(3), Duration::ZERO));
        assert!(!state.set_pointer_target(Some(ElementId::DataPoint(9)), Duration::ZERO));
        assert_eq!(state.pointer_target(), None);
    }
}
