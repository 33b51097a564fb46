use crate::table::UnifiedTable;

pub const METERS_PER_INCH: f64 = 0.0254;
pub const KILOGRAMS_PER_POUND: f64 = 0.45359237;

/// Converts heights from inches to meters and weights from pounds to
/// kilograms, rounding both to two decimals with ties going to the even
/// digit.
///
/// Must run exactly once per raw table: applying it again converts the
/// already-metric values a second time.
pub fn normalize(mut table: UnifiedTable) -> UnifiedTable {
    for record in table.iter_mut() {
        record.height = round2(record.height * METERS_PER_INCH);
        record.weight = round2(record.weight * KILOGRAMS_PER_POUND);
    }
    table
}

/// Half-to-even, so `190.5` hundredths becomes `1.90`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
