//! Numeric validation functions

/// `value >= min`
pub fn is_at_least(value: f64, min: f64) -> bool {
    value >= min
}

/// `value <= max`
pub fn is_at_most(value: f64, max: f64) -> bool {
    value <= max
}

/// `value > bound`
pub fn is_greater_than(value: f64, bound: f64) -> bool {
    value > bound
}

/// `value < bound`
pub fn is_less_than(value: f64, bound: f64) -> bool {
    value < bound
}

/// Whether a finite number has no fractional part
pub fn is_integer(value: f64) -> bool {
    value.is_finite() && value.trunc() == value
}
