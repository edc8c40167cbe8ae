mod config;
mod engine;
mod frame_builder;
mod label_layout;
mod layout;
mod render_context;
mod style;
mod validation;

pub use config::{GraphConfig, LabelConfig, LayoutConfig, MarkerConfig};
pub use engine::{GraphEngine, INLINE_DATASET_NAME};
pub use frame_builder::build_render_frame;
pub use label_layout::{
    LabelBox, PlacedLabel, clamp_label_center, data_label_text, format_point_value,
    layout_note_labels, layout_point_labels, note_label_text, place_label,
};
pub use layout::PlotLayout;
pub use render_context::{HitRegion, HitShape, RenderContext};
pub use style::{GraphStyle, Theme};

pub use crate::interaction::TransitionConfig;
