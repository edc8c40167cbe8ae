use crate::core::{
    Dataset, ElementId, PlotScales, TimeAxisPlan, VALUE_TICK_TARGET_COUNT, ValueTicks, Viewport,
    plan_time_ticks, value_ticks,
};
use crate::error::GraphResult;
use crate::render::TextMeasurer;

use super::label_layout::{PlacedLabel, layout_note_labels, layout_point_labels};
use super::{GraphConfig, GraphStyle, PlotLayout};

/// Pointer-sensitive area of one hoverable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    Circle { cx: f64, cy: f64, radius: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

impl HitShape {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        match self {
            Self::Circle { cx, cy, radius } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= radius * radius
            }
            Self::Rect {
                x: left,
                y: top,
                width,
                height,
            } => x >= left && x <= left + width && y >= top && y <= top + height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub element: ElementId,
    pub shape: HitShape,
}

/// Everything derived from one dataset at one viewport size.
///
/// Built once and read by frame building, hit testing and label lookup.
/// A resize builds a fresh context from the same dataset and config.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    dataset: Dataset,
    config: GraphConfig,
    style: GraphStyle,
    layout: PlotLayout,
    scales: PlotScales,
    time_axis: TimeAxisPlan,
    value_ticks: ValueTicks,
    point_labels: Vec<PlacedLabel>,
    note_labels: Vec<PlacedLabel>,
    hit_regions: Vec<HitRegion>,
}

impl RenderContext {
    pub fn build(
        dataset: Dataset,
        viewport: Viewport,
        config: GraphConfig,
        measurer: &dyn TextMeasurer,
    ) -> GraphResult<Self> {
        let layout = PlotLayout::new(viewport, config.layout)?;
        let scales = PlotScales::build(&dataset.points, dataset.value_range, layout.plot)?;
        let extent = scales.extent();
        let time_axis = plan_time_ticks(extent.min_time, extent.max_time);
        let value_ticks = value_ticks(extent.min_value, extent.max_value, VALUE_TICK_TARGET_COUNT);

        let granularity = time_axis.granularity;
        let point_labels =
            layout_point_labels(&dataset, &scales, granularity, config.labels, measurer);
        let note_labels = layout_note_labels(&dataset, &scales, granularity, config.labels, measurer);
        let hit_regions = build_hit_regions(&dataset, &scales, config);

        Ok(Self {
            style: config.style(),
            dataset,
            config,
            layout,
            scales,
            time_axis,
            value_ticks,
            point_labels,
            note_labels,
            hit_regions,
        })
    }

    /// Same dataset and config laid out for another viewport.
    pub fn resized(&self, viewport: Viewport, measurer: &dyn TextMeasurer) -> GraphResult<Self> {
        Self::build(self.dataset.clone(), viewport, self.config, measurer)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    #[must_use]
    pub fn style(&self) -> GraphStyle {
        self.style
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    #[must_use]
    pub fn scales(&self) -> &PlotScales {
        &self.scales
    }

    #[must_use]
    pub fn time_axis(&self) -> &TimeAxisPlan {
        &self.time_axis
    }

    #[must_use]
    pub fn value_ticks(&self) -> &ValueTicks {
        &self.value_ticks
    }

    #[must_use]
    pub fn point_labels(&self) -> &[PlacedLabel] {
        &self.point_labels
    }

    #[must_use]
    pub fn note_labels(&self) -> &[PlacedLabel] {
        &self.note_labels
    }

    #[must_use]
    pub fn label(&self, element: ElementId) -> Option<&PlacedLabel> {
        match element {
            ElementId::DataPoint(index) => self.point_labels.get(index),
            ElementId::Annotation(index) => self.note_labels.get(index),
        }
    }

    /// Hit regions in drawing order: bands, then markers.
    #[must_use]
    pub fn hit_regions(&self) -> &[HitRegion] {
        &self.hit_regions
    }

    /// Topmost element under `(x, y)`; markers sit above bands and later
    /// elements above earlier ones.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ElementId> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.shape.contains(x, y))
            .map(|region| region.element)
    }
}

fn build_hit_regions(dataset: &Dataset, scales: &PlotScales, config: GraphConfig) -> Vec<HitRegion> {
    let plot = scales.plot();
    let band_width = config.markers.band_width;
    let marker_radius = config.markers.radius + 0.5 * config.markers.marker_stroke_width;

    let bands = dataset.notes.iter().enumerate().map(|(index, note)| HitRegion {
        element: ElementId::Annotation(index),
        shape: HitShape::Rect {
            x: scales.time_to_x(note.time) - 0.5 * band_width,
            y: plot.top,
            width: band_width,
            height: plot.height,
        },
    });
    let markers = dataset.points.iter().enumerate().map(|(index, point)| HitRegion {
        element: ElementId::DataPoint(index),
        shape: HitShape::Circle {
            cx: scales.time_to_x(point.time),
            cy: scales.value_to_y(point.value),
            radius: marker_radius,
        },
    });
    bands.chain(markers).collect()
}
