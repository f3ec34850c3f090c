//! Plain-text campus summary.

use energy_core::formatting::format_kwh;
use energy_core::models::{BuildingSummary, IngestFailure};
use energy_data::analysis::AnalysisResult;

pub const SUMMARY_TITLE: &str = "CAMPUS ENERGY SUMMARY";
const RULE: &str = "---------------------------";

/// Render the summary text for an analysis run.
pub fn render_summary(result: &AnalysisResult) -> String {
    render_summary_parts(
        result.total_consumption(),
        result.highest_consumer(),
        &result.errors,
    )
}

/// Render the summary from its parts.
///
/// With no buildings the highest-consumer line reads `none (0.00 kWh)`.
/// Ingestion failures, when present, are listed after the totals.
pub fn render_summary_parts(
    total_kwh: f64,
    highest: Option<&BuildingSummary>,
    errors: &[IngestFailure],
) -> String {
    let mut out = String::new();
    out.push_str(SUMMARY_TITLE);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total consumption: {} kWh\n", format_kwh(total_kwh)));

    let (name, top_total) = match highest {
        Some(row) => (row.building.as_str(), row.total_kwh),
        None => ("none", 0.0),
    };
    out.push_str(&format!(
        "Highest consuming building: {} ({} kWh)\n",
        name,
        format_kwh(top_total)
    ));

    if !errors.is_empty() {
        out.push('\n');
        out.push_str("Ingestion problems:\n");
        out.push_str(&render_error_list(errors));
    }

    out
}

/// One `- <source>: <reason>` line per failure.
pub fn render_error_list(errors: &[IngestFailure]) -> String {
    errors
        .iter()
        .map(|e| format!("- {}\n", e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::error::EnergyError;

    fn row(building: &str, total: f64) -> BuildingSummary {
        BuildingSummary {
            building: building.to_string(),
            total_kwh: total,
            mean_kwh: total,
            min_kwh: total,
            max_kwh: total,
            readings: 1,
        }
    }

    #[test]
    fn test_render_summary_with_building() {
        let top = row("A", 15.0);
        let text = render_summary_parts(22.0, Some(&top), &[]);

        assert_eq!(
            text,
            "CAMPUS ENERGY SUMMARY\n\
             ---------------------------\n\
             Total consumption: 22.00 kWh\n\
             Highest consuming building: A (15.00 kWh)\n"
        );
    }

    #[test]
    fn test_render_summary_without_buildings() {
        let text = render_summary_parts(0.0, None, &[]);

        assert!(text.contains("Total consumption: 0.00 kWh"));
        assert!(text.contains("Highest consuming building: none (0.00 kWh)"));
        assert!(!text.contains("Ingestion problems"));
    }

    #[test]
    fn test_render_summary_lists_errors() {
        let errors = vec![IngestFailure {
            source_name: "Broken.csv".to_string(),
            reason: EnergyError::MissingColumn {
                column: "kwh".to_string(),
            },
        }];
        let text = render_summary_parts(0.0, None, &errors);

        assert!(text.ends_with("Ingestion problems:\n- Broken.csv: Missing column 'kwh'\n"));
    }
}
