// src/report/mod.rs
pub mod format;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::dataset::BrandRecord;
use crate::error::ConfigError;
use crate::forecast::Projection;
pub use format::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub year: i32,
    pub projected_equity: String,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakSummary {
    pub year: i32,
    pub equity: f64,
    pub formatted: String,
}

/// Everything the presentation layer shows for one brand forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub brand: String,
    pub market_position: String,
    pub rows: Vec<ReportRow>,
    pub peak: Option<PeakSummary>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(record: &BrandRecord, projection: &Projection) -> Self {
        let rows = projection
            .points
            .iter()
            .map(|p| ReportRow {
                year: p.year,
                projected_equity: format_currency(p.equity),
                equity: p.equity,
            })
            .collect();
        let peak = projection.peak().map(|p| PeakSummary {
            year: p.year,
            equity: p.equity,
            formatted: format_currency(p.equity),
        });

        Self {
            brand: record.brand_name.clone(),
            market_position: record.market_position().to_string(),
            rows,
            peak,
            generated_at: Utc::now(),
        }
    }

    /// Year → formatted equity, in request order.
    pub fn formatted(&self) -> Vec<(i32, &str)> {
        self.rows
            .iter()
            .map(|r| (r.year, r.projected_equity.as_str()))
            .collect()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => {
                let mut out = String::new();
                self.write_table(&mut out)
                    .context("rendering report table")?;
                Ok(out)
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("serializing report to JSON")
            }
            OutputFormat::Yaml => serde_yaml::to_string(self).context("serializing report to YAML"),
        }
    }

    /// Write the plain-text table to `out`, stopping at the first failed write.
    pub fn write_table<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        const YEAR: &str = "Year";
        const EQUITY: &str = "Projected Equity";

        let width = self
            .rows
            .iter()
            .map(|r| r.projected_equity.len())
            .chain(std::iter::once(EQUITY.len()))
            .max()
            .unwrap_or(EQUITY.len());

        writeln!(out, "{}", self.brand)?;
        writeln!(out, "  Current market position: {}", self.market_position)?;
        writeln!(out)?;

        if self.rows.is_empty() {
            return writeln!(out, "No years selected.");
        }

        writeln!(out, "{:<6}{:>width$}", YEAR, EQUITY, width = width)?;
        writeln!(out, "{:<6}{:>width$}", "----", "-".repeat(width), width = width)?;
        for r in &self.rows {
            writeln!(out, "{:<6}{:>width$}", r.year, r.projected_equity, width = width)?;
        }

        if let Some(peak) = &self.peak {
            writeln!(out)?;
            writeln!(
                out,
                "Projected peak equity: {} (expected in {})",
                peak.formatted, peak.year
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::project;

    fn report(years: &[i32]) -> Report {
        let rec = BrandRecord::new("Louis Vuitton", 1000.0)
            .with_market_position("Luxury")
            .with_growth_rate(1, 0.10)
            .with_growth_rate(2, 0.20);
        let p = project(&rec, years).unwrap();
        Report::new(&rec, &p)
    }

    #[test]
    fn test_formatted_rows_and_peak() {
        let r = report(&[2002, 2003]);
        assert_eq!(r.formatted(), vec![(2002, "$1,100.00"), (2003, "$1,320.00")]);
        let peak = r.peak.as_ref().unwrap();
        assert_eq!(peak.year, 2003);
        assert_eq!(peak.formatted, "$1,320.00");
        assert_eq!(r.market_position, "Luxury");
    }

    #[test]
    fn test_table_render() {
        let text = report(&[2002, 2003]).render(OutputFormat::Table).unwrap();
        assert!(text.starts_with("Louis Vuitton\n"));
        assert!(text.contains("Current market position: Luxury"));
        assert!(text.contains("2002         $1,100.00"));
        assert!(text.contains("Projected peak equity: $1,320.00 (expected in 2003)"));

        let empty = report(&[]).render(OutputFormat::Table).unwrap();
        assert!(empty.contains("No years selected."));
    }

    /// Accepts `budget` bytes, then fails every write.
    struct Truncating {
        buf: String,
        budget: usize,
    }

    impl fmt::Write for Truncating {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.buf.len() + s.len() > self.budget {
                return Err(fmt::Error);
            }
            self.buf.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_table_write_error_propagates() {
        let r = report(&[2002, 2003]);
        let mut full = String::new();
        r.write_table(&mut full).unwrap();

        // one byte short: the trailing newline of the peak line fails
        let mut out = Truncating {
            buf: String::new(),
            budget: full.len() - 1,
        };
        assert!(r.write_table(&mut out).is_err());
        assert!(out.buf.len() < full.len());

        let mut roomy = Truncating {
            buf: String::new(),
            budget: full.len(),
        };
        r.write_table(&mut roomy).unwrap();
        assert_eq!(roomy.buf, full);
        assert_eq!(r.render(OutputFormat::Table).unwrap(), full);
    }

    #[test]
    fn test_json_and_yaml_render() {
        let r = report(&[2002]);
        let json = r.render(OutputFormat::Json).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back.brand, "Louis Vuitton");
        assert_eq!(back.formatted(), vec![(2002, "$1,100.00")]);

        let yaml = r.render(OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("brand: Louis Vuitton"));
        assert!(yaml.contains("1,100.00"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(" table ".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
