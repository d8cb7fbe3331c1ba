//! Population adjustment and case estimation.

use crime_rate_reference::REFERENCE_YEAR;

use crate::model::ModelError;

/// Linear growth applied per year away from [`REFERENCE_YEAR`].
pub const ANNUAL_GROWTH: f64 = 0.01;

/// Scales a 2011 population to `year` by 1% of the base per year.
///
/// The factor is applied once, not compounded, and is not clamped: years
/// before 2011 shrink the population and years before 1911 make it
/// negative.
#[must_use]
pub fn adjust_population(base_population: f64, year: i32) -> f64 {
    let year_diff = f64::from(year) - f64::from(REFERENCE_YEAR);
    base_population + ANNUAL_GROWTH * year_diff * base_population
}

/// Estimates the case count as `ceil(rate * population)`.
///
/// # Errors
///
/// Returns [`ModelError::Inference`] if the product is not finite or does
/// not fit in an `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn estimate_cases(crime_rate: f64, adjusted_population: f64) -> Result<i64, ModelError> {
    let cases = (crime_rate * adjusted_population).ceil();
    if !cases.is_finite() || cases < i64::MIN as f64 || cases >= i64::MAX as f64 {
        return Err(ModelError::inference(format!(
            "case estimate {crime_rate} * {adjusted_population} is out of range"
        )));
    }
    Ok(cases as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_year_is_identity() {
        assert!((adjust_population(63.50, 2011) - 63.50).abs() < f64::EPSILON);
    }

    #[test]
    fn grows_one_percent_of_base_per_year() {
        assert!(approx(adjust_population(63.50, 2021), 69.85));
        assert!(approx(adjust_population(100.0, 2050), 139.0));
    }

    #[test]
    fn shrinks_before_reference_year() {
        assert!(approx(adjust_population(100.0, 2000), 89.0));
        assert!(adjust_population(100.0, 1900) < 0.0);
    }

    #[test]
    fn cases_round_up() {
        assert_eq!(estimate_cases(2.0, 10.0).unwrap(), 20);
        assert_eq!(estimate_cases(2.01, 10.0).unwrap(), 21);
        assert_eq!(estimate_cases(0.0, 63.5).unwrap(), 0);
        assert_eq!(estimate_cases(0.001, 1.0).unwrap(), 1);
    }

    #[test]
    fn negative_population_is_not_clamped() {
        assert_eq!(estimate_cases(2.0, -10.5).unwrap(), -21);
    }

    #[test]
    fn non_finite_products_fail() {
        assert!(estimate_cases(f64::NAN, 10.0).is_err());
        assert!(estimate_cases(f64::INFINITY, 10.0).is_err());
        assert!(estimate_cases(1e300, 1e300).is_err());
    }
}
