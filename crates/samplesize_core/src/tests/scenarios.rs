//! Known sample sizes and full reference tables

use crate::estimator::compute;
use crate::model::ConfidenceLevel;
use crate::sensitivity::{
    FixedInputs, QUICK_REFERENCE_LEVELS, QUICK_REFERENCE_MARGINS, ReferenceTable,
    STANDARD_MARGINS, SweepDimension, SweepRange, reference_table, sweep,
};

/// 95% confidence, 5% margin, p = 0.5: ceil(384.16)
#[test]
fn test_classic_survey_size() {
    let result = compute(ConfidenceLevel::NinetyFive, 0.05, 0.5, None).unwrap();
    assert_eq!(result.sample_size, 385);
    assert!(!result.is_corrected());
}

/// 99% confidence, 3% margin, p = 0.5: ceil(1843.27)
#[test]
fn test_high_confidence_tight_margin() {
    let result = compute(ConfidenceLevel::NinetyNine, 0.03, 0.5, None).unwrap();
    let expected = (2.576_f64.powi(2) * 0.25 / 0.03_f64.powi(2)).ceil() as u64;
    assert_eq!(result.sample_size, expected);
    assert_eq!(result.sample_size, 1844);
}

/// 95% confidence, 3% margin, p = 0.5
#[test]
fn test_standard_confidence_tight_margin() {
    let result = compute(ConfidenceLevel::NinetyFive, 0.03, 0.5, None).unwrap();
    assert_eq!(result.sample_size, 1068);
}

/// A survey of a 2,000 person organization
#[test]
fn test_small_organization() {
    let uncorrected = compute(ConfidenceLevel::NinetyFive, 0.05, 0.5, None).unwrap();
    let corrected = compute(ConfidenceLevel::NinetyFive, 0.05, 0.5, Some(2_000)).unwrap();

    assert_eq!(corrected.sample_size, 323);
    assert_eq!(corrected.unadjusted_size, uncorrected.unadjusted_size);
    assert!(corrected.corrected_size.unwrap() < corrected.unadjusted_size);
}

/// Population smaller than the uncorrected requirement
#[test]
fn test_population_below_requirement() {
    let result = compute(ConfidenceLevel::NinetyNine, 0.01, 0.5, Some(50)).unwrap();
    assert!(result.unadjusted_size > 50.0);
    assert!(result.sample_size <= 50);
    assert_eq!(result.sample_size, 50);
}

/// Four confidence levels by four margins, each cell equal to a direct call
#[test]
fn test_standard_reference_table() {
    let table = reference_table(&ConfidenceLevel::ALL, &STANDARD_MARGINS, 0.5, None).unwrap();
    assert_eq!(table.len(), 16);
    assert_eq!(table, ReferenceTable::standard().unwrap());

    let mut cells = table.iter();
    for margin in STANDARD_MARGINS {
        for level in ConfidenceLevel::ALL {
            let cell = cells.next().unwrap();
            assert_eq!(*cell, compute(level, margin, 0.5, None).unwrap());
        }
    }
    assert!(cells.next().is_none());
}

/// The quick reference grid of 90/95/99% by 1-10% margins
#[test]
fn test_quick_reference_table() {
    let table = ReferenceTable::quick_reference().unwrap();
    let expected: [[u64; 3]; 7] = [
        [6766, 9604, 16590],
        [1692, 2401, 4148],
        [752, 1068, 1844],
        [423, 601, 1037],
        [271, 385, 664],
        [139, 196, 339],
        [68, 97, 166],
    ];

    assert_eq!(table.margins().len(), QUICK_REFERENCE_MARGINS.len());
    assert_eq!(table.confidence_levels(), &QUICK_REFERENCE_LEVELS);
    for ((margin, cells), expected_row) in table.rows().zip(expected) {
        let sizes: Vec<u64> = cells.iter().map(|c| c.sample_size).collect();
        assert_eq!(sizes, expected_row, "margin {}", margin.value());
    }
}

/// A reference table with a shared population applies the correction everywhere
#[test]
fn test_reference_table_with_population() {
    let table = reference_table(&ConfidenceLevel::ALL, &STANDARD_MARGINS, 0.5, Some(1_000)).unwrap();
    assert!(table.iter().all(|c| c.is_corrected()));
    assert!(table.iter().all(|c| c.sample_size <= 1_000));
    assert_eq!(table.population_size().map(|n| n.get()), Some(1_000));
}

/// The proportion sweep peaks at p = 0.5 and mirrors around it
#[test]
fn test_proportion_sweep_shape() {
    let series = sweep(
        SweepDimension::Proportion,
        &FixedInputs::default(),
        &SweepRange::Default,
    )
    .unwrap();

    let sizes = series.sample_sizes();
    assert_eq!(sizes.len(), 19);
    assert_eq!(sizes[9], 385);
    let reversed: Vec<u64> = sizes.iter().rev().copied().collect();
    assert_eq!(sizes, reversed);
    assert_eq!(sizes.iter().max(), Some(&385));
}
