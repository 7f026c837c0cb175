//! Report assembly and rendering

use clap::ValueEnum;
use color_eyre::eyre::eyre;
use samplesize_core::model::SampleSizeResult;
use samplesize_core::sensitivity::{ReferenceTable, SweepSeries, reference_table, sweep};
use samplesize_core::{EstimateInputs, estimate};
use serde::Serialize;

use crate::format::{render_formula, render_result, render_series, render_table};
use crate::request::CalculationRequest;

/// How a report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Everything computed for one invocation
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<SampleSizeResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sweeps: Vec<SweepSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ReferenceTable>,
}

impl Report {
    pub fn from_estimate(result: SampleSizeResult) -> Self {
        Self {
            estimate: Some(result),
            ..Default::default()
        }
    }

    pub fn from_series(series: SweepSeries) -> Self {
        Self {
            sweeps: vec![series],
            ..Default::default()
        }
    }

    pub fn from_table(table: ReferenceTable) -> Self {
        Self {
            table: Some(table),
            ..Default::default()
        }
    }

    /// Compute the estimate, every sweep and the table a request asks for
    pub fn from_request(request: &CalculationRequest) -> color_eyre::Result<Self> {
        let inputs = EstimateInputs::new(
            request.confidence_level,
            request.margin_of_error,
            request.proportion,
            request.population_size,
        )?;
        let result = estimate(&inputs);
        tracing::debug!(sample_size = result.sample_size, "computed estimate");

        let fixed = request.fixed_inputs();
        let sweeps = request
            .sweeps
            .iter()
            .map(|sweep_request| -> color_eyre::Result<SweepSeries> {
                let series = sweep(sweep_request.dimension, &fixed, &sweep_request.range()?)?;
                tracing::debug!(
                    dimension = %series.dimension,
                    points = series.len(),
                    "computed sweep"
                );
                Ok(series)
            })
            .collect::<color_eyre::Result<Vec<_>>>()?;

        let table = match &request.table {
            Some(table_request) => {
                let table = reference_table(
                    &table_request.confidence_levels,
                    &table_request.margins,
                    table_request.proportion,
                    table_request.population_size,
                )?;
                tracing::debug!(cells = table.len(), "computed reference table");
                Some(table)
            }
            None => None,
        };

        tracing::info!(
            sample_size = result.sample_size,
            sweeps = sweeps.len(),
            table = table.is_some(),
            "request processed"
        );

        Ok(Self {
            estimate: Some(result),
            sweeps,
            table,
        })
    }

    /// Render in the chosen format. `explain` adds the substituted formula to
    /// text output and is ignored otherwise.
    pub fn render(&self, format: OutputFormat, explain: bool) -> color_eyre::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text(explain)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => {
                serde_saphyr::to_string(self).map_err(|e| eyre!("failed to serialize report: {e}"))
            }
        }
    }

    fn render_text(&self, explain: bool) -> String {
        let mut sections = Vec::new();
        if let Some(result) = &self.estimate {
            sections.push(render_result(result));
            if explain {
                sections.push(render_formula(result));
            }
        }
        sections.extend(self.sweeps.iter().map(render_series));
        if let Some(table) = &self.table {
            sections.push(render_table(table));
        }
        sections.join("\n")
    }
}
