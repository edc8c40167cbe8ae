use crate::error::{GraphError, GraphResult, ScaleAxis};

/// Affine map from a data domain onto a pixel range.
///
/// The range may be reversed (`range_start > range_end`), which is how the
/// value axis maps larger values to smaller pixel rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    constant: bool,
}

impl LinearScale {
    /// Builds a strict scale. A zero-width or non-finite domain is rejected.
    pub fn new(
        axis: ScaleAxis,
        domain: (f64, f64),
        range: (f64, f64),
    ) -> GraphResult<Self> {
        validate_range(range)?;
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(GraphError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if domain.0 == domain.1 {
            return Err(GraphError::DegenerateScale { axis });
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
            constant: false,
        })
    }

    /// Builds a scale that maps every input to the middle of `range`.
    ///
    /// Used when the domain collapses to a single value.
    pub fn centered(domain_value: f64, range: (f64, f64)) -> GraphResult<Self> {
        validate_range(range)?;
        Ok(Self {
            domain_start: domain_value,
            domain_end: domain_value,
            range_start: range.0,
            range_end: range.1,
            constant: true,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_constant(self) -> bool {
        self.constant
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.constant {
            return 0.5 * (self.range_start + self.range_end);
        }
        // Halved operands keep the domain width finite for extreme values.
        let normalized = (0.5 * value - 0.5 * self.domain_start)
            / (0.5 * self.domain_end - 0.5 * self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel back into the domain. Constant scales return their single domain value.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if self.constant || self.range_start == self.range_end {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        let half = normalized * (0.5 * self.domain_end - 0.5 * self.domain_start);
        self.domain_start + half + half
    }
}

fn validate_range(range: (f64, f64)) -> GraphResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(GraphError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LinearScale;
    use crate::error::{GraphError, ScaleAxis};

    #[test]
    fn zero_width_domain_is_reported_as_degenerate() {
        let result = LinearScale::new(ScaleAxis::Value, (4.0, 4.0), (0.0, 100.0));
        assert!(matches!(
            result,
            Err(GraphError::DegenerateScale {
                axis: ScaleAxis::Value
            })
        ));
    }

    #[test]
    fn centered_scale_maps_everything_to_mid_range() {
        let scale = LinearScale::centered(7.0, (10.0, 30.0)).expect("centered");
        assert_eq!(scale.map(-1.0e9), 20.0);
        assert_eq!(scale.map(7.0), 20.0);
        assert_eq!(scale.invert(25.0), 7.0);
    }

    #[test]
    fn reversed_range_inverts_direction() {
        let scale = LinearScale::new(ScaleAxis::Value, (0.0, 10.0), (100.0, 0.0)).expect("scale");
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.invert(50.0), 5.0);
    }

    #[test]
    fn domain_wider_than_f64_max_still_maps_finitely() {
        let scale = LinearScale::new(ScaleAxis::Value, (-1.0e308, 1.0e308), (200.0, 0.0))
            .expect("scale");
        assert_eq!(scale.map(-1.0e308), 200.0);
        assert_eq!(scale.map(1.0e308), 0.0);
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.invert(0.0), 1.0e308);
        assert_eq!(scale.invert(100.0), 0.0);
    }
}
