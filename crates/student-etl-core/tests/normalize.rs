use student_etl_core::normalize::{normalize, round2};
use student_etl_core::table::UnifiedTable;
use student_etl_core::StudentRecord;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn converts_known_values() {
    let table = UnifiedTable::from_records(vec![StudentRecord::new("kim", 70.0, 160.0)]);
    let normalized = normalize(table);
    let record = &normalized.records()[0];
    assert_eq!(record.name, "kim");
    assert!(approx_eq(record.height, 1.78), "height was {}", record.height);
    assert!(approx_eq(record.weight, 72.57), "weight was {}", record.weight);
}

#[test]
fn preserves_row_order_and_count() {
    let table = UnifiedTable::from_records(vec![
        StudentRecord::new("b", 65.78, 112.99),
        StudentRecord::new("a", 71.52, 136.49),
        StudentRecord::new("b", 69.40, 153.03),
    ]);
    let normalized = normalize(table);
    let names: Vec<_> = normalized.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "b"]);
    assert!(approx_eq(normalized.records()[0].height, 1.67));
    assert!(approx_eq(normalized.records()[0].weight, 51.25));
    assert!(approx_eq(normalized.records()[1].height, 1.82));
    assert!(approx_eq(normalized.records()[1].weight, 61.91));
}

#[test]
fn is_not_idempotent() {
    let raw = UnifiedTable::from_records(vec![StudentRecord::new("kim", 70.0, 160.0)]);
    let once = normalize(raw);
    let twice = normalize(once.clone());
    assert_ne!(once, twice);
    assert!(approx_eq(twice.records()[0].height, 0.05));
    assert!(approx_eq(twice.records()[0].weight, 32.92));
}

#[test]
fn empty_table_stays_empty() {
    assert!(normalize(UnifiedTable::new()).is_empty());
}

#[test]
fn rounds_to_two_decimals() {
    assert!(approx_eq(round2(1.234), 1.23));
    assert!(approx_eq(round2(1.236), 1.24));
    assert!(approx_eq(round2(-0.004), 0.0));
}

#[test]
fn exact_halves_round_to_even() {
    // 75 in is exactly 190.5 cm.
    let table = UnifiedTable::from_records(vec![StudentRecord::new("tall", 75.0, 160.0)]);
    let normalized = normalize(table);
    assert_eq!(normalized.records()[0].height, 1.9);
    assert_eq!(round2(0.125), 0.12);
    assert_eq!(round2(0.375), 0.38);
}
