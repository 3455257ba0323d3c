//! Downloadable CSV starter templates for the three supported business types.
//!
//! Each template is deliberately small: the minimum columns the analysis
//! needs plus five illustrative rows.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template type '{0}' (expected retail, service or ecommerce)")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Retail,
    Service,
    Ecommerce,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [Self::Retail, Self::Service, Self::Ecommerce];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Service => "service",
            Self::Ecommerce => "ecommerce",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" => Ok(Self::Retail),
            "service" => Ok(Self::Service),
            "ecommerce" | "e-commerce" => Ok(Self::Ecommerce),
            _ => Err(TemplateError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateMeta {
    pub filename: &'static str,
    pub description: &'static str,
    pub header: &'static [&'static str],
    pub sample_rows: &'static [&'static [&'static str]],
}

const RETAIL: TemplateMeta = TemplateMeta {
    filename: "retail_sales_template.csv",
    description: "Daily retail sales with product category segmentation",
    header: &["Date", "Revenue", "Units", "Category"],
    sample_rows: &[
        &["2024-01-01", "2400", "62", "Coffee"],
        &["2024-01-02", "2850", "78", "Coffee"],
        &["2024-01-03", "1950", "51", "Pastries"],
        &["2024-01-04", "3200", "89", "Coffee"],
        &["2024-01-05", "2700", "72", "Mixed"],
    ],
};

const SERVICE: TemplateMeta = TemplateMeta {
    filename: "service_business_template.csv",
    description: "Service bookings with revenue and labor hours",
    header: &["Date", "Bookings", "Revenue", "Labor_Hours"],
    sample_rows: &[
        &["2024-01-01", "14", "980", "42"],
        &["2024-01-02", "18", "1260", "55"],
        &["2024-01-03", "12", "840", "38"],
        &["2024-01-04", "20", "1400", "60"],
        &["2024-01-05", "16", "1120", "48"],
    ],
};

const ECOMMERCE: TemplateMeta = TemplateMeta {
    filename: "ecommerce_template.csv",
    description: "E-commerce daily performance with marketing spend & traffic",
    header: &["Date", "Orders", "Revenue", "Marketing_Spend", "Traffic"],
    sample_rows: &[
        &["2024-01-01", "45", "8500", "1200", "1820"],
        &["2024-01-02", "52", "9200", "1350", "1955"],
        &["2024-01-03", "41", "7800", "1100", "1760"],
        &["2024-01-04", "58", "10500", "1500", "2100"],
        &["2024-01-05", "48", "9100", "1280", "1885"],
    ],
};

/// Checklist shown alongside the templates.
pub const DATA_REQUIREMENTS: [&str; 4] = [
    "\u{2713} At least 30 days of data (more is better)",
    "\u{2713} Date column in any common format (YYYY-MM-DD preferred)",
    "\u{2713} At least one numeric metric (revenue, sales, customers)",
    "\u{2713} Optional: categories, regions, or other dimensions for deeper insights",
];

#[must_use]
pub fn template_meta(kind: TemplateKind) -> &'static TemplateMeta {
    match kind {
        TemplateKind::Retail => &RETAIL,
        TemplateKind::Service => &SERVICE,
        TemplateKind::Ecommerce => &ECOMMERCE,
    }
}

fn lines(meta: &TemplateMeta, separator: &str) -> Vec<String> {
    std::iter::once(meta.header)
        .chain(meta.sample_rows.iter().copied())
        .map(|row| row.join(separator))
        .collect()
}

/// Header plus sample rows as CSV text, with a trailing newline.
#[must_use]
pub fn generate_template_csv(kind: TemplateKind) -> String {
    let mut csv = lines(template_meta(kind), ",").join("\n");
    csv.push('\n');
    csv
}

/// Header plus sample rows with ` | ` between fields, for on-screen preview.
#[must_use]
pub fn format_sample_preview(kind: TemplateKind) -> String {
    lines(template_meta(kind), " | ").join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retail_csv_has_header_and_five_rows() {
        let csv = generate_template_csv(TemplateKind::Retail);
        assert!(csv.ends_with('\n'));
        assert!(!csv.ends_with("\n\n"));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Date,Revenue,Units,Category");
        assert!(lines.iter().all(|l| l.split(',').count() == 4));
    }

    #[test]
    fn every_template_is_rectangular() {
        for kind in TemplateKind::ALL {
            let meta = template_meta(kind);
            assert_eq!(meta.sample_rows.len(), 5, "{kind}");
            assert!(meta.sample_rows.iter().all(|r| r.len() == meta.header.len()));
        }
    }

    #[test]
    fn ecommerce_preview_uses_pipes_without_trailing_newline() {
        let preview = format_sample_preview(TemplateKind::Ecommerce);
        let first = preview.lines().next().unwrap();
        assert_eq!(first, "Date | Orders | Revenue | Marketing_Spend | Traffic");
        assert_eq!(preview.lines().count(), 6);
        assert!(!preview.ends_with('\n'));
    }

    #[test]
    fn kinds_parse_from_strings() {
        assert_eq!("Retail".parse::<TemplateKind>().unwrap(), TemplateKind::Retail);
        assert_eq!("e-commerce".parse::<TemplateKind>().unwrap(), TemplateKind::Ecommerce);
        assert_eq!(
            "wholesale".parse::<TemplateKind>(),
            Err(TemplateError::UnknownKind("wholesale".to_string()))
        );
    }

    #[test]
    fn filenames_are_distinct_csv_files() {
        let names: Vec<&str> = TemplateKind::ALL
            .iter()
            .map(|k| template_meta(*k).filename)
            .collect();
        assert!(names.iter().all(|n| n.ends_with(".csv")));
        assert_eq!(names, ["retail_sales_template.csv", "service_business_template.csv", "ecommerce_template.csv"]);
    }

    #[test]
    fn requirements_checklist_has_four_items() {
        assert_eq!(DATA_REQUIREMENTS.len(), 4);
        assert!(DATA_REQUIREMENTS[0].contains("30 days"));
    }
}
