pub mod dataset;
pub mod plot_scales;
pub mod scale;
pub mod time_format;
pub mod time_ticks;
pub mod types;
pub mod value_ticks;

pub use dataset::{Dataset, DatasetRegistry, dataset_name_from_query};
pub use plot_scales::{DataExtent, PlotScales};
pub use scale::LinearScale;
pub use time_format::{TimeFormatContext, format_time};
pub use time_ticks::{TickGranularity, TimeAxisPlan, plan_time_ticks, time_ticks};
pub use types::{Annotation, ElementId, PlotRect, Point, Tick, Viewport};
pub use value_ticks::{
    VALUE_TICK_TARGET_COUNT, ValueTicks, format_value_tick, value_tick_step, value_ticks,
};
