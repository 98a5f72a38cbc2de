//! Dated series used as reference climatology.

use chrono::NaiveDate;

use crate::error::ScalingError;

/// Values paired one-to-one with calendar dates. Dates need not be sorted
/// or contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DatedSeries {
    /// Pairs `dates` with `values`.
    ///
    /// # Errors
    ///
    /// [`ScalingError::LengthMismatch`] if the lengths differ.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, ScalingError> {
        if dates.len() != values.len() {
            return Err(ScalingError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        Ok(Self { dates, values })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dates, in input order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values, in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(date, value)` pairs with `start <= date <= end`.
    pub fn window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates
            .iter()
            .zip(&self.values)
            .filter(move |(d, _)| **d >= start && **d <= end)
            .map(|(&d, &v)| (d, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn length_mismatch() {
        let err = DatedSeries::new(vec![date(2000, 1, 1)], vec![]).unwrap_err();
        assert!(matches!(
            err,
            ScalingError::LengthMismatch {
                dates: 1,
                values: 0
            }
        ));
    }

    #[test]
    fn window_is_inclusive() {
        let s = DatedSeries::new(
            vec![date(2000, 1, 1), date(2000, 1, 2), date(2000, 1, 3)],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap();
        let picked: Vec<f64> = s
            .window(date(2000, 1, 2), date(2000, 1, 3))
            .map(|(_, v)| v)
            .collect();
        assert_eq!(picked, vec![2.0, 3.0]);
        assert_eq!(s.window(date(2001, 1, 1), date(2001, 12, 31)).count(), 0);
    }
}
