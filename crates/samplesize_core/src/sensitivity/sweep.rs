//! One-dimensional sensitivity sweeps

use serde::{Deserialize, Serialize};

use super::config::{FixedInputs, SweepDimension, SweepRange};
use super::estimate_all;
use crate::error::{InvalidParameter, Parameter};
use crate::model::{ConfidenceLevel, EstimateInputs, SampleSizeResult};

/// A single (input value, result) pair of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Value of the varying input, in the dimension's natural unit
    pub value: f64,
    pub result: SampleSizeResult,
}

/// Results of varying one input, ordered by ascending input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    pub dimension: SweepDimension,
    pub fixed: FixedInputs,
    pub points: Vec<SweepPoint>,
}

impl SweepSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter()
    }

    /// Input values in series order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Required sample sizes in series order
    pub fn sample_sizes(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.result.sample_size).collect()
    }

    /// Point whose input is closest to `value`, used to mark the current
    /// selection on a chart
    pub fn nearest(&self, value: f64) -> Option<&SweepPoint> {
        self.points
            .iter()
            .min_by(|a, b| (a.value - value).abs().total_cmp(&(b.value - value).abs()))
    }
}

/// Vary one input across `range` while holding the others at `fixed`.
///
/// Every generated combination is validated before anything is computed; the
/// first invalid one (in the order the values were supplied) aborts the sweep.
/// The returned series is sorted by ascending input value.
pub fn sweep(
    dimension: SweepDimension,
    fixed: &FixedInputs,
    range: &SweepRange,
) -> Result<SweepSeries, InvalidParameter> {
    let values = range.values(dimension)?;
    if values.is_empty() {
        return Err(InvalidParameter::empty(Parameter::SweepValues));
    }

    let mut points: Vec<(f64, EstimateInputs)> = values
        .into_iter()
        .map(|value| point_inputs(dimension, fixed, value).map(|inputs| (value, inputs)))
        .collect::<Result<_, _>>()?;
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let inputs: Vec<EstimateInputs> = points.iter().map(|(_, inputs)| *inputs).collect();
    let results = estimate_all(&inputs);

    Ok(SweepSeries {
        dimension,
        fixed: *fixed,
        points: points
            .into_iter()
            .zip(results)
            .map(|((value, _), result)| SweepPoint { value, result })
            .collect(),
    })
}

/// Validated inputs for one point of a sweep
fn point_inputs(
    dimension: SweepDimension,
    fixed: &FixedInputs,
    value: f64,
) -> Result<EstimateInputs, InvalidParameter> {
    let mut confidence_level = fixed.confidence_level;
    let mut margin_of_error = fixed.margin_of_error;
    let mut proportion = fixed.proportion;

    match dimension {
        SweepDimension::MarginOfError => margin_of_error = value,
        SweepDimension::ConfidenceLevel => confidence_level = ConfidenceLevel::from_percent(value)?,
        SweepDimension::Proportion => proportion = value,
    }

    EstimateInputs::new(
        confidence_level,
        margin_of_error,
        proportion,
        fixed.population_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidReason;
    use crate::estimator::compute;

    #[test]
    fn test_default_margin_sweep() {
        let series = sweep(
            SweepDimension::MarginOfError,
            &FixedInputs::default(),
            &SweepRange::Default,
        )
        .unwrap();

        assert_eq!(series.len(), 20);
        assert_eq!(series.points[0].value, 0.005);
        assert_eq!(series.points[0].result.sample_size, 38416);
        assert_eq!(series.points[9].result.sample_size, 385);
        assert_eq!(series.points[19].result.sample_size, 97);
    }

    #[test]
    fn test_points_match_direct_compute() {
        let fixed = FixedInputs {
            confidence_level: ConfidenceLevel::NinetyNine,
            margin_of_error: 0.03,
            proportion: 0.5,
            population_size: Some(20_000),
        };
        let series = sweep(SweepDimension::Proportion, &fixed, &SweepRange::Default).unwrap();

        for point in series.iter() {
            let direct = compute(
                ConfidenceLevel::NinetyNine,
                0.03,
                point.value,
                Some(20_000),
            )
            .unwrap();
            assert_eq!(point.result, direct);
        }
    }

    #[test]
    fn test_confidence_sweep_uses_percents() {
        let series = sweep(
            SweepDimension::ConfidenceLevel,
            &FixedInputs::default(),
            &SweepRange::Default,
        )
        .unwrap();

        assert_eq!(series.values(), vec![90.0, 95.0, 99.0, 99.9]);
        assert_eq!(series.sample_sizes(), vec![271, 385, 664, 1084]);
    }

    #[test]
    fn test_values_are_sorted_ascending() {
        let series = sweep(
            SweepDimension::MarginOfError,
            &FixedInputs::default(),
            &SweepRange::Values(vec![0.05, 0.01, 0.03]),
        )
        .unwrap();

        assert_eq!(series.values(), vec![0.01, 0.03, 0.05]);
        assert_eq!(series.sample_sizes(), vec![9604, 1068, 385]);
    }

    #[test]
    fn test_swept_dimension_ignores_fixed_value() {
        // The fixed margin is invalid but is never used by a margin sweep
        let fixed = FixedInputs {
            margin_of_error: 0.0,
            ..Default::default()
        };
        let series = sweep(
            SweepDimension::MarginOfError,
            &fixed,
            &SweepRange::Values(vec![0.05]),
        )
        .unwrap();
        assert_eq!(series.sample_sizes(), vec![385]);
    }

    #[test]
    fn test_invalid_value_aborts_sweep() {
        let err = sweep(
            SweepDimension::MarginOfError,
            &FixedInputs::default(),
            &SweepRange::Values(vec![0.01, 0.0, 1.5]),
        )
        .unwrap_err();
        assert_eq!(err.parameter, Parameter::MarginOfError);
        assert_eq!(
            err.reason,
            InvalidReason::OutOfRange {
                value: 0.0,
                expected: "0 < e < 1"
            }
        );

        let err = sweep(
            SweepDimension::ConfidenceLevel,
            &FixedInputs::default(),
            &SweepRange::Values(vec![95.0, 80.0]),
        )
        .unwrap_err();
        assert_eq!(err.parameter, Parameter::ConfidenceLevel);
    }

    #[test]
    fn test_invalid_fixed_input_propagates() {
        let fixed = FixedInputs {
            population_size: Some(0),
            ..Default::default()
        };
        let err = sweep(SweepDimension::Proportion, &fixed, &SweepRange::Default).unwrap_err();
        assert_eq!(err.parameter, Parameter::PopulationSize);
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = sweep(
            SweepDimension::Proportion,
            &FixedInputs::default(),
            &SweepRange::Values(vec![]),
        )
        .unwrap_err();
        assert_eq!(err.parameter, Parameter::SweepValues);
        assert_eq!(err.reason, InvalidReason::Empty);
    }

    #[test]
    fn test_oversized_linear_range_rejected() {
        let err = sweep(
            SweepDimension::MarginOfError,
            &FixedInputs::default(),
            &SweepRange::Linear {
                min: 0.01,
                max: 0.05,
                steps: 100_000_000_000,
            },
        )
        .unwrap_err();
        assert_eq!(err.parameter, Parameter::SweepValues);
    }

    #[test]
    fn test_nearest_point() {
        let series = sweep(
            SweepDimension::MarginOfError,
            &FixedInputs::default(),
            &SweepRange::Default,
        )
        .unwrap();

        let point = series.nearest(0.048).unwrap();
        assert_eq!(point.value, 0.05);
        assert_eq!(point.result.sample_size, 385);
    }
}
