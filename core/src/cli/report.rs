use crate::types::FeatureRow;
use std::fmt;

/// Placeholder shown for features absent from the record
const MISSING: &str = "N/A";

/// Text report formatter for extracted features
pub struct TextReport<'a> {
    image_name: &'a str,
    rows: &'a [FeatureRow],
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(image_name: &'a str, rows: &'a [FeatureRow]) -> Self {
        Self { image_name, rows }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("SEM Metadata: {}", self.image_name);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(f)?;

        let values: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                row.value
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| MISSING.to_string())
            })
            .collect();

        let name_width = self
            .rows
            .iter()
            .map(|r| r.variable.chars().count())
            .chain(std::iter::once("Variable".len()))
            .max()
            .unwrap_or(0);
        let value_width = values
            .iter()
            .map(|v| v.chars().count())
            .chain(std::iter::once("Value".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:<nw$}  {:<vw$}  Unit",
            "Variable",
            "Value",
            nw = name_width,
            vw = value_width
        )?;
        writeln!(
            f,
            "{}  {}  ----",
            "-".repeat(name_width),
            "-".repeat(value_width)
        )?;

        for (row, value) in self.rows.iter().zip(&values) {
            let line = format!(
                "{:<nw$}  {:<vw$}  {}",
                row.variable,
                value,
                row.unit,
                nw = name_width,
                vw = value_width
            );
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureValue;

    #[test]
    fn test_text_report_format() {
        let rows = vec![
            FeatureRow::new("AP_WD", Some(FeatureValue::Number(5.2)), "mm"),
            FeatureRow::new("AP_BEAM_TIME", Some(FeatureValue::Number(12.0)), ""),
            FeatureRow::missing("AP_HOLDER_HEIGHT"),
        ];

        let report = TextReport::new("sample01", &rows);
        let output = format!("{}", report);

        assert!(output.contains("SEM Metadata: sample01"));
        assert!(output.contains("Variable          Value  Unit"));
        assert!(output.contains("AP_WD             5.2    mm"));
        assert!(output.contains("AP_BEAM_TIME      12\n"));
        assert!(output.contains("AP_HOLDER_HEIGHT  N/A\n"));
    }

    #[test]
    fn test_text_report_empty() {
        let output = TextReport::new("empty", &[]).to_string();
        assert!(output.contains("Variable  Value  Unit"));
    }
}
