//! Precomputed reference grid over confidence levels and margins

use serde::Serialize;

use super::estimate_all;
use crate::error::{InvalidParameter, Parameter};
use crate::model::{
    ConfidenceLevel, EstimateInputs, MarginOfError, PopulationSize, Proportion, SampleSizeResult,
};

/// Margins of the standard table: 1%, 3%, 5%, 10%
pub const STANDARD_MARGINS: [f64; 4] = [0.01, 0.03, 0.05, 0.10];

/// Margins of the quick reference table: 1, 2, 3, 4, 5, 7 and 10%
pub const QUICK_REFERENCE_MARGINS: [f64; 7] = [0.01, 0.02, 0.03, 0.04, 0.05, 0.07, 0.10];

/// Confidence levels of the quick reference table
pub const QUICK_REFERENCE_LEVELS: [ConfidenceLevel; 3] = [
    ConfidenceLevel::Ninety,
    ConfidenceLevel::NinetyFive,
    ConfidenceLevel::NinetyNine,
];

/// Tolerance for matching a margin when looking up a cell
const MARGIN_MATCH_TOLERANCE: f64 = 1e-12;

/// Sample sizes for every (margin, confidence level) combination.
///
/// Rows are margins and columns are confidence levels, both in the order the
/// caller supplied them. Cells are stored in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    confidence_levels: Vec<ConfidenceLevel>,
    margins: Vec<MarginOfError>,
    proportion: Proportion,
    #[serde(skip_serializing_if = "Option::is_none")]
    population_size: Option<PopulationSize>,
    cells: Vec<SampleSizeResult>,
}

impl ReferenceTable {
    /// The four confidence levels crossed with [`STANDARD_MARGINS`] at p = 0.5
    pub fn standard() -> Result<Self, InvalidParameter> {
        reference_table(&ConfidenceLevel::ALL, &STANDARD_MARGINS, 0.5, None)
    }

    /// The quick reference grid: 90/95/99% crossed with [`QUICK_REFERENCE_MARGINS`]
    pub fn quick_reference() -> Result<Self, InvalidParameter> {
        reference_table(&QUICK_REFERENCE_LEVELS, &QUICK_REFERENCE_MARGINS, 0.5, None)
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.margins.len(), self.confidence_levels.len())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn confidence_levels(&self) -> &[ConfidenceLevel] {
        &self.confidence_levels
    }

    pub fn margins(&self) -> &[MarginOfError] {
        &self.margins
    }

    pub fn proportion(&self) -> Proportion {
        self.proportion
    }

    pub fn population_size(&self) -> Option<PopulationSize> {
        self.population_size
    }

    /// Cell at a row (margin index) and column (level index)
    pub fn cell(&self, row: usize, col: usize) -> Option<&SampleSizeResult> {
        let cols = self.confidence_levels.len();
        if row >= self.margins.len() || col >= cols {
            return None;
        }
        self.cells.get(row * cols + col)
    }

    /// Cell for a confidence level and margin (as a fraction)
    pub fn get(&self, level: ConfidenceLevel, margin: f64) -> Option<&SampleSizeResult> {
        let col = self.confidence_levels.iter().position(|&l| l == level)?;
        let row = self
            .margins
            .iter()
            .position(|m| (m.value() - margin).abs() < MARGIN_MATCH_TOLERANCE)?;
        self.cell(row, col)
    }

    /// Rows as (margin, cells ordered like `confidence_levels`)
    pub fn rows(&self) -> impl Iterator<Item = (MarginOfError, &[SampleSizeResult])> {
        let cols = self.confidence_levels.len().max(1);
        self.margins.iter().copied().zip(self.cells.chunks(cols))
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &SampleSizeResult> {
        self.cells.iter()
    }
}

/// Compute the full cross product of `confidence_levels` and `margins`.
///
/// Either the whole table is produced or the first invalid input is returned;
/// there are no partially filled tables.
pub fn reference_table(
    confidence_levels: &[ConfidenceLevel],
    margins: &[f64],
    proportion: f64,
    population_size: Option<i64>,
) -> Result<ReferenceTable, InvalidParameter> {
    if confidence_levels.is_empty() {
        return Err(InvalidParameter::empty(Parameter::TableLevels));
    }
    if margins.is_empty() {
        return Err(InvalidParameter::empty(Parameter::TableMargins));
    }

    let margins: Vec<MarginOfError> = margins
        .iter()
        .map(|&m| MarginOfError::new(m))
        .collect::<Result<_, _>>()?;
    let proportion = Proportion::new(proportion)?;
    let population_size = population_size.map(PopulationSize::new).transpose()?;

    let inputs: Vec<EstimateInputs> = margins
        .iter()
        .flat_map(|&margin_of_error| {
            confidence_levels
                .iter()
                .map(move |&confidence_level| EstimateInputs {
                    confidence_level,
                    margin_of_error,
                    proportion,
                    population_size,
                })
        })
        .collect();

    Ok(ReferenceTable {
        confidence_levels: confidence_levels.to_vec(),
        margins,
        proportion,
        population_size,
        cells: estimate_all(&inputs),
    })
}
