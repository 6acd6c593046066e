use spendgrid_domain::IntensityLevel;

/// Lowest value a maximum can take; keeps the ratio finite.
pub const MIN_MAX_AMOUNT: f64 = 1.0;

const LOW_BELOW: f64 = 0.2;
const MEDIUM_BELOW: f64 = 0.5;
const HIGH_BELOW: f64 = 0.8;

pub struct IntensityClassifier;

impl IntensityClassifier {
    /// Places `amount` on the ordinal scale relative to `max_amount`.
    ///
    /// Zero, negative and NaN amounts are `None`. The maximum is floored at 1.
    pub fn classify(amount: f64, max_amount: f64) -> IntensityLevel {
        if amount.is_nan() || amount <= 0.0 {
            return IntensityLevel::None;
        }
        let ratio = amount / Self::floor_max(max_amount);
        if ratio < LOW_BELOW {
            IntensityLevel::Low
        } else if ratio < MEDIUM_BELOW {
            IntensityLevel::Medium
        } else if ratio < HIGH_BELOW {
            IntensityLevel::High
        } else {
            IntensityLevel::Critical
        }
    }

    /// Largest of `amounts`, never below [`MIN_MAX_AMOUNT`].
    pub fn max_amount<I>(amounts: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        amounts
            .into_iter()
            .filter(|amount| !amount.is_nan())
            .fold(MIN_MAX_AMOUNT, f64::max)
    }

    fn floor_max(max_amount: f64) -> f64 {
        if max_amount.is_nan() {
            MIN_MAX_AMOUNT
        } else {
            max_amount.max(MIN_MAX_AMOUNT)
        }
    }
}
