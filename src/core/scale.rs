use crate::error::{ChartError, ChartResult};

/// Linear mapping between an axis domain and a pixel span starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, length_px: f64) -> ChartResult<f64> {
        validate_length(length_px)?;

        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * length_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, length_px: f64) -> ChartResult<f64> {
        validate_length(length_px)?;

        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / length_px;
        Ok(self.domain_start + normalized * span)
    }
}

pub(crate) fn validate_length(length_px: f64) -> ChartResult<f64> {
    if !length_px.is_finite() || length_px <= 0.0 {
        return Err(ChartError::InvalidAxisLength(length_px));
    }
    Ok(length_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_span_domain_is_rejected() {
        assert!(LinearScale::new(3.0, 3.0).is_err());
    }

    #[test]
    fn negative_length_is_rejected() {
        let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
        assert!(matches!(
            scale.domain_to_pixel(0.5, -10.0),
            Err(ChartError::InvalidAxisLength(_))
        ));
    }
}
