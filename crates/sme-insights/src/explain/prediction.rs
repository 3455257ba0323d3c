use serde::Serialize;

use super::format_column_name;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionExplanation {
    pub technical: String,
    pub plain: String,
    /// Empty when there is no forecast to judge.
    pub business_impact: String,
    /// First-to-last change across the forecast, in percent.
    pub percent_change: f64,
    /// Coefficient of variation of the forecast, in percent.
    pub volatility: f64,
}

/// Descriptive numbers for a forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub len: usize,
    pub mean: f64,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    /// `(last - first) / first × 100`; 0 when `first` is 0.
    pub percent_change: f64,
    /// Population stddev over mean, × 100; 0 when the mean is 0.
    pub volatility: f64,
}

/// Summarize a series, or `None` when it is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    let (&first, &last) = (values.first()?, values.last()?);
    let n = values.len() as f64;

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let percent_change = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };
    let volatility = if mean == 0.0 {
        0.0
    } else {
        std_dev / mean * 100.0
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(SeriesStats {
        len: values.len(),
        mean,
        first,
        last,
        min,
        max,
        percent_change,
        volatility,
    })
}

/// Explain a forecast series, optionally naming the forecast column.
///
/// A series that starts at 0 has no defined percent change and is described
/// as stable around its mean, whatever its last value.
#[must_use]
pub fn explain_predictions(predictions: &[f64], column_name: Option<&str>) -> PredictionExplanation {
    let Some(stats) = series_stats(predictions) else {
        return PredictionExplanation {
            technical: "No predictions available".to_string(),
            plain: "Not enough data to generate predictions.".to_string(),
            business_impact: String::new(),
            percent_change: 0.0,
            volatility: 0.0,
        };
    };

    let SeriesStats {
        len,
        mean,
        first,
        last,
        min,
        max,
        percent_change,
        volatility,
    } = stats;

    let technical =
        format!("Forecast: {len} periods, Range: {min:.2} - {max:.2}, Avg: {mean:.2}");

    let metric = column_name.map_or_else(
        || "values".to_string(),
        |c| format_column_name(c).to_lowercase(),
    );

    let outlook = if percent_change.abs() < 5.0 {
        format!("{metric} are expected to remain relatively stable around {mean:.0}")
    } else if percent_change > 0.0 {
        format!(
            "{metric} are projected to grow from {first:.0} to {last:.0} ({percent_change:.1}% increase)"
        )
    } else {
        format!(
            "{metric} are projected to decline from {first:.0} to {last:.0} ({:.1}% decrease)",
            percent_change.abs()
        )
    };

    let non_decreasing = predictions.windows(2).all(|w| w[1] >= w[0]);
    let non_increasing = predictions.windows(2).all(|w| w[1] <= w[0]);
    let pattern = if non_decreasing {
        "with consistent upward momentum"
    } else if non_increasing {
        "with consistent downward movement"
    } else if volatility > 20.0 {
        "with significant fluctuations"
    } else {
        "with some variation"
    };

    let plain = format!("Over the next {len} time periods, {outlook} {pattern}.");

    let business_impact = if percent_change > 10.0 {
        "\u{1f4c8} Growth Opportunity: This positive trend suggests favorable conditions. Consider increasing investment or capacity to capitalize on this momentum."
    } else if percent_change < -10.0 {
        "\u{1f4c9} Attention Required: The declining trend indicates potential challenges ahead. Review strategies to mitigate this downturn or adapt to changing conditions."
    } else if volatility > 20.0 {
        "\u{26a1} High Uncertainty: Significant variability in the forecast suggests unpredictable conditions. Plan for multiple scenarios and maintain flexibility."
    } else {
        "\u{1f4ca} Steady State: Stable projections indicate predictable conditions. This is a good time to focus on optimization and efficiency improvements."
    };

    PredictionExplanation {
        technical,
        plain,
        business_impact: business_impact.to_string(),
        percent_change,
        volatility,
    }
}
