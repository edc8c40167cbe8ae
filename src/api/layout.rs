use crate::core::{PlotRect, Viewport};
use crate::error::{GraphError, GraphResult};

use super::LayoutConfig;

/// Surface geometry derived from the viewport: the plot rectangle and the
/// title anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub plot: PlotRect,
    /// Horizontal centre of the title.
    pub title_x: f64,
    pub title_baseline: f64,
}

impl PlotLayout {
    /// Fails with `InvalidViewport` when paddings leave no room for the plot.
    pub fn new(viewport: Viewport, config: LayoutConfig) -> GraphResult<Self> {
        let invalid = || GraphError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid());
        }

        let width = f64::from(viewport.width) - 2.0 * config.edge_padding - config.y_axis_space;
        let height = f64::from(viewport.height)
            - 2.0 * config.edge_padding
            - config.x_axis_space
            - config.title_space;
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }

        let plot = PlotRect::new(
            config.edge_padding + config.y_axis_space,
            config.edge_padding + config.title_space,
            width,
            height,
        );
        Ok(Self {
            viewport,
            plot,
            title_x: plot.left + 0.5 * plot.width - config.y_axis_space,
            title_baseline: plot.top - (config.title_space - config.title_offset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PlotLayout;
    use crate::api::LayoutConfig;
    use crate::core::Viewport;
    use crate::error::GraphError;

    #[test]
    fn default_paddings_shape_the_plot() {
        let layout =
            PlotLayout::new(Viewport::new(400, 300), LayoutConfig::default()).expect("layout");
        assert_eq!(layout.plot.left, 40.0);
        assert_eq!(layout.plot.top, 40.0);
        assert_eq!(layout.plot.width, 340.0);
        assert_eq!(layout.plot.height, 225.0);
        assert_eq!(layout.title_x, 190.0);
        assert_eq!(layout.title_baseline, 25.0);
    }

    #[test]
    fn tiny_viewport_is_rejected() {
        let err = PlotLayout::new(Viewport::new(60, 90), LayoutConfig::default())
            .expect_err("no room for plot");
        assert!(matches!(
            err,
            GraphError::InvalidViewport {
                width: 60,
                height: 90
            }
        ));
    }
}
