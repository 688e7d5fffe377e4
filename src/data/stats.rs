use polars::prelude::*;

/// Summary of the present values of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Stats {
    /// Distance between the largest and smallest value
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Calculate mean/min/max using polars.
///
/// Returns `None` for an empty slice: there is no meaningful mean of nothing,
/// and callers must not render a chart from a made-up zero.
pub fn calculate_stats(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }

    let series = Series::new("values".into(), values);
    let chunked = series.f64().ok()?;

    Some(Stats {
        mean: chunked.mean()?,
        min: chunked.min()?,
        max: chunked.max()?,
        count: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_stats() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = calculate_stats(&data).unwrap();

        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.spread(), 4.0);
        assert_eq!(stats.count, 5);
    }

    #[test]
    fn test_single_value() {
        let stats = calculate_stats(&[7.5]).unwrap();
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.spread(), 0.0);
    }

    #[test]
    fn test_empty_series() {
        let data: Vec<f64> = vec![];
        assert!(calculate_stats(&data).is_none());
    }
}
