use graph_rs::core::{LinearScale, PlotRect, PlotScales, Point};
use graph_rs::error::ScaleAxis;
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;
        let scale = LinearScale::new(ScaleAxis::Value, (domain_start, domain_end), (900.0, 10.0))
            .expect("valid scale");

        let px = scale.map(value);
        prop_assert!((10.0..=900.0).contains(&px) || (px - 10.0).abs() < 1e-6);
        prop_assert!((scale.invert(px) - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn plot_mapping_is_monotonic(
        start in -1_000_000i64..1_000_000,
        span in 1i64..10_000_000,
        low in -1_000.0f64..1_000.0,
        value_span in 0.01f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let points = [Point::new(start, low), Point::new(start + span, low + value_span)];
        let plot = PlotRect::new(40.0, 40.0, 600.0, 300.0);
        let scales = PlotScales::build(&points, None, plot).expect("scales");

        let (t1, t2) = (start + (a * span as f64) as i64, start + (b * span as f64) as i64);
        if t1 < t2 {
            prop_assert!(scales.time_to_x(t1) < scales.time_to_x(t2));
        }
        let (v1, v2) = (low + a * value_span, low + b * value_span);
        if v1 < v2 {
            prop_assert!(scales.value_to_y(v1) >= scales.value_to_y(v2));
        }
        prop_assert!((scales.time_to_x(start) - plot.left).abs() < 1e-9);
        prop_assert!((scales.value_to_y(low) - plot.bottom()).abs() < 1e-9);
    }

    #[test]
    fn explicit_range_ignores_point_extrema(
        v1 in -1_000.0f64..1_000.0,
        v2 in -1_000.0f64..1_000.0,
        min in -10.0f64..0.0,
        max in 1.0f64..10.0
    ) {
        let points = [Point::new(0, v1), Point::new(60, v2)];
        let plot = PlotRect::new(0.0, 0.0, 100.0, 100.0);
        let scales = PlotScales::build(&points, Some((min, max)), plot).expect("scales");
        prop_assert!((scales.value_to_y(min) - 100.0).abs() < 1e-9);
        prop_assert!(scales.value_to_y(max).abs() < 1e-9);
    }
}
