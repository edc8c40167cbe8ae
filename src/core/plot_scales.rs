use ordered_float::OrderedFloat;
use tracing::debug;

use crate::core::scale::LinearScale;
use crate::core::types::{PlotRect, Point};
use crate::error::{GraphError, GraphResult, ScaleAxis};

/// Time and value bounds of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataExtent {
    pub min_time: i64,
    pub max_time: i64,
    pub min_value: f64,
    pub max_value: f64,
}

impl DataExtent {
    /// Computes the extent of `points`. An explicit `value_range` replaces the
    /// value bounds of the points entirely.
    pub fn from_points(points: &[Point], value_range: Option<(f64, f64)>) -> GraphResult<Self> {
        let (Some(min_time), Some(max_time)) = (
            points.iter().map(|p| p.time).min(),
            points.iter().map(|p| p.time).max(),
        ) else {
            return Err(GraphError::InvalidData(
                "cannot build scales without points".to_owned(),
            ));
        };

        let (min_value, max_value) = match value_range {
            Some(range) => range,
            None => {
                let values = points.iter().map(|p| OrderedFloat(p.value));
                let min = values.clone().min().unwrap_or_default();
                let max = values.max().unwrap_or_default();
                (min.0, max.0)
            }
        };

        Ok(Self {
            min_time,
            max_time,
            min_value,
            max_value,
        })
    }

    #[must_use]
    pub fn time_span(self) -> i64 {
        self.max_time.saturating_sub(self.min_time)
    }
}

/// The pair of scales every drawing step reads from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    extent: DataExtent,
    plot: PlotRect,
    time: LinearScale,
    value: LinearScale,
}

impl PlotScales {
    /// Builds `time -> x` over the plot width and `value -> y` over the plot
    /// height (inverted). Zero-width domains fall back to centred scales.
    pub fn build(
        points: &[Point],
        value_range: Option<(f64, f64)>,
        plot: PlotRect,
    ) -> GraphResult<Self> {
        let extent = DataExtent::from_points(points, value_range)?;

        let time = resolve_scale(
            ScaleAxis::Time,
            (extent.min_time as f64, extent.max_time as f64),
            (plot.left, plot.right()),
        )?;
        let value = resolve_scale(
            ScaleAxis::Value,
            (extent.min_value, extent.max_value),
            (plot.bottom(), plot.top),
        )?;

        Ok(Self {
            extent,
            plot,
            time,
            value,
        })
    }

    #[must_use]
    pub fn extent(&self) -> DataExtent {
        self.extent
    }

    #[must_use]
    pub fn plot(&self) -> PlotRect {
        self.plot
    }

    #[must_use]
    pub fn time_scale(&self) -> LinearScale {
        self.time
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.value
    }

    #[must_use]
    pub fn time_to_x(&self, time: i64) -> f64 {
        self.time.map(time as f64)
    }

    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        self.value.map(value)
    }

    #[must_use]
    pub fn is_degenerate(&self, axis: ScaleAxis) -> bool {
        match axis {
            ScaleAxis::Time => self.time.is_constant(),
            ScaleAxis::Value => self.value.is_constant(),
        }
    }
}

fn resolve_scale(
    axis: ScaleAxis,
    domain: (f64, f64),
    range: (f64, f64),
) -> GraphResult<LinearScale> {
    match LinearScale::new(axis, domain, range) {
        Ok(scale) => Ok(scale),
        Err(GraphError::DegenerateScale { .. }) => {
            debug!(%axis, domain = domain.0, "degenerate domain, using centred scale");
            LinearScale::centered(domain.0, range)
        }
        Err(err) => Err(err),
    }
}
