use serde::Serialize;
use sme_core::TrendRecord;

use super::format_column_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendExplanation {
    pub technical: String,
    pub plain: String,
    /// Empty when the trend is unremarkable.
    pub insight: String,
}

/// Explain one column's trend.
#[must_use]
pub fn explain_trend(column_name: &str, trend: &TrendRecord) -> TrendExplanation {
    let change = trend.change_percent;
    let abs_change = change.abs();
    let volatility = trend.volatility;
    let column = format_column_name(column_name);

    let technical = format!(
        "{column}: {} by {abs_change:.1}% (volatility: {volatility:.1}%)",
        trend.direction
    );

    let movement = if abs_change < 2.0 {
        "has remained relatively stable".to_string()
    } else if change > 0.0 {
        if change > 20.0 {
            format!("has grown significantly by {change:.1}%")
        } else if change > 10.0 {
            format!("has grown moderately by {change:.1}%")
        } else {
            format!("has increased slightly by {change:.1}%")
        }
    } else if abs_change > 20.0 {
        format!("has declined significantly by {abs_change:.1}%")
    } else if abs_change > 10.0 {
        format!("has declined moderately by {abs_change:.1}%")
    } else {
        format!("has decreased slightly by {abs_change:.1}%")
    };

    let behavior = if volatility > 30.0 {
        "with high fluctuations"
    } else if volatility > 15.0 {
        "with some fluctuations"
    } else {
        "with consistent behavior"
    };

    let plain = format!("Your {} {movement}, {behavior}.", column.to_lowercase());

    let insight = if volatility > 30.0 {
        "\u{26a0}\u{fe0f} High volatility suggests unpredictable patterns. Consider investigating underlying causes."
    } else if abs_change > 15.0 {
        if change > 0.0 {
            "\u{2705} Strong positive trend. This indicates good performance worth maintaining."
        } else {
            "\u{26a0}\u{fe0f} Notable decline detected. Review factors that may be contributing to this downturn."
        }
    } else if abs_change < 2.0 && volatility < 10.0 {
        "\u{1f4ca} Stable metrics indicate predictable business conditions."
    } else {
        ""
    };

    TrendExplanation {
        technical,
        plain,
        insight: insight.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use sme_core::TrendDirection;

    use super::*;

    fn trend(direction: TrendDirection, change_percent: f64, volatility: f64) -> TrendRecord {
        TrendRecord {
            direction,
            change_percent,
            volatility,
        }
    }

    #[test]
    fn strong_growth_with_low_volatility() {
        let e = explain_trend("total_revenue", &trend(TrendDirection::Increasing, 25.0, 12.0));
        assert_eq!(
            e.technical,
            "Total Revenue: increasing by 25.0% (volatility: 12.0%)"
        );
        assert_eq!(
            e.plain,
            "Your total revenue has grown significantly by 25.0%, with consistent behavior."
        );
        assert!(e.insight.contains("Strong positive trend"));
    }

    #[test]
    fn moderate_decline_reports_absolute_change() {
        let e = explain_trend("units", &trend(TrendDirection::Decreasing, -12.34, 20.0));
        assert_eq!(e.technical, "Units: decreasing by 12.3% (volatility: 20.0%)");
        assert_eq!(
            e.plain,
            "Your units has declined moderately by 12.3%, with some fluctuations."
        );
        assert_eq!(e.insight, "");
    }

    #[test]
    fn slight_increase_tier() {
        let e = explain_trend("avgCheck", &trend(TrendDirection::Increasing, 5.0, 5.0));
        assert_eq!(
            e.plain,
            "Your avg check has increased slightly by 5.0%, with consistent behavior."
        );
        assert_eq!(e.insight, "");
    }

    #[test]
    fn stable_and_calm_produces_stability_insight() {
        let e = explain_trend("traffic", &trend(TrendDirection::Other("stable".into()), -1.5, 4.0));
        assert_eq!(e.technical, "Traffic: stable by 1.5% (volatility: 4.0%)");
        assert_eq!(
            e.plain,
            "Your traffic has remained relatively stable, with consistent behavior."
        );
        assert!(e.insight.contains("Stable metrics"));
    }

    #[test]
    fn high_volatility_wins_over_change_insight() {
        let e = explain_trend("orders", &trend(TrendDirection::Decreasing, -40.0, 45.0));
        assert!(e.plain.ends_with("with high fluctuations."));
        assert!(e.insight.contains("High volatility"));
    }

    #[test]
    fn notable_decline_insight() {
        let e = explain_trend("orders", &trend(TrendDirection::Decreasing, -18.0, 10.0));
        assert!(e.plain.contains("declined moderately by 18.0%"));
        assert!(e.insight.contains("Notable decline"));
    }

    #[test]
    fn stable_but_noisy_has_no_insight() {
        let e = explain_trend("orders", &trend(TrendDirection::Increasing, 1.0, 12.0));
        assert_eq!(e.insight, "");
    }

    #[test]
    fn change_tiers_use_strict_thresholds() {
        let plain = |change: f64| explain_trend("sales", &trend(TrendDirection::Increasing, change, 5.0)).plain;
        assert!(plain(1.99).contains("remained relatively stable"));
        assert!(plain(2.0).contains("increased slightly by 2.0%"));
        assert!(plain(-2.0).contains("decreased slightly by 2.0%"));
        assert!(plain(10.0).contains("increased slightly by 10.0%"));
        assert!(plain(-10.0).contains("decreased slightly by 10.0%"));
        assert!(plain(10.5).contains("grown moderately by 10.5%"));
        assert!(plain(20.0).contains("grown moderately by 20.0%"));
        assert!(plain(-20.0).contains("declined moderately by 20.0%"));
        assert!(plain(20.5).contains("grown significantly by 20.5%"));
        assert!(plain(-20.5).contains("declined significantly by 20.5%"));
    }

    #[test]
    fn volatility_tiers_use_strict_thresholds() {
        let e = |volatility: f64| explain_trend("sales", &trend(TrendDirection::Increasing, 5.0, volatility));
        assert!(e(15.0).plain.ends_with("with consistent behavior."));
        assert!(e(15.5).plain.ends_with("with some fluctuations."));
        assert!(e(30.0).plain.ends_with("with some fluctuations."));
        assert_eq!(e(30.0).insight, "");
        assert!(e(30.5).plain.ends_with("with high fluctuations."));
        assert!(e(30.5).insight.contains("High volatility"));
    }

    #[test]
    fn insight_thresholds_are_strict() {
        let up = explain_trend("sales", &trend(TrendDirection::Increasing, 15.0, 5.0));
        assert_eq!(up.insight, "");
        let down = explain_trend("sales", &trend(TrendDirection::Decreasing, -15.0, 5.0));
        assert_eq!(down.insight, "");
        let calm = explain_trend("sales", &trend(TrendDirection::Increasing, 1.0, 10.0));
        assert_eq!(calm.insight, "");
    }
}
