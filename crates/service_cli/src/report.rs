//! Markdown and JSON report rendering.

use std::fmt::Write as _;
use std::path::Path;

use agririsk_models::eda::EdaSummary;
use agririsk_models::proxies::ProxyComparison;
use agririsk_optimiser::trainer::ModelSummary;
use agririsk_risk::RunSummary;
use serde::Serialize;

use crate::Result;

/// Format with `precision` significant digits in `%g` style: fixed notation
/// for moderate exponents, scientific otherwise, trailing zeros removed.
pub fn format_general(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Run summary document.
pub fn render_run_summary(summary: &RunSummary) -> String {
    let metrics = |label: &str, m: &ModelSummary| {
        format!(
            "- {} Ridge: alpha={}, RMSE={}, R2={}\n",
            label,
            format_general(m.best_alpha, 4),
            format_general(m.test_rmse, 4),
            format_general(m.test_r2, 4)
        )
    };

    let mut md = String::from("# Pipeline Run Summary\n\n");
    let _ = writeln!(md, "- random_state: {}", summary.random_seed);
    let _ = writeln!(md, "- baseline proxy: {}", summary.baseline_proxy);
    let _ = writeln!(md, "- baseline strategy: {}\n", summary.baseline_strategy);
    md.push_str("## Model metrics\n");
    md.push_str(&metrics("Net_Profit", &summary.profit_model));
    md.push_str(&metrics("EmissionsProxy", &summary.emissions_model));
    md.push_str("\n## Stranding\n");
    let _ = writeln!(
        md,
        "- {}: {} of {} enterprises stranded",
        summary.severe_scenario, summary.stranded, summary.n_rows
    );
    md
}

/// Markdown table of the proxy agreement rows.
pub fn render_stability_table(rows: &[ProxyComparison]) -> String {
    let mut md = String::from("| proxy_a | proxy_b | mad | top10_overlap |\n");
    md.push_str("|:--------|:--------|----:|--------------:|\n");
    for row in rows {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} |",
            row.proxy_a,
            row.proxy_b,
            format_general(row.mad, 6),
            format_general(row.top10_overlap, 6)
        );
    }
    md
}

/// EDA summary document.
pub fn render_eda_summary(summary: &EdaSummary) -> String {
    format!(
        "# EDA Summary\n\n- Rows: {}\n- Columns: {}\n- Duplicates: {}\n- Missing values (total): {}\n",
        summary.n_rows,
        summary.n_cols,
        summary.n_duplicates,
        summary.total_missing()
    )
}

/// JSON twin of the run summary.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// RFC 3339 creation time
    pub generated_at: String,
    /// Run record
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

impl<'a> RunReport<'a> {
    /// Stamp a summary with the current time.
    pub fn now(summary: &'a RunSummary) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
        }
    }
}

/// Write text, creating parent directories.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.001, 4), "0.001");
        assert_eq!(format_general(1000.0, 4), "1000");
        assert_eq!(format_general(12346.0, 4), "1.235e+04");
        assert_eq!(format_general(0.123456, 4), "0.1235");
        assert_eq!(format_general(2.5e-5, 4), "2.5e-05");
        assert_eq!(format_general(-0.5, 4), "-0.5");
        assert_eq!(format_general(0.0, 4), "0");
        assert_eq!(format_general(f64::NAN, 4), "nan");
        assert_eq!(format_general(0.75, 6), "0.75");
    }

    #[test]
    fn test_stability_table_shape() {
        let rows = vec![ProxyComparison {
            proxy_a: "Emissions_Proxy_v1".into(),
            proxy_b: "Emissions_Proxy_v2".into(),
            mad: 0.125,
            top10_overlap: 0.8,
        }];
        let md = render_stability_table(&rows);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "| Emissions_Proxy_v1 | Emissions_Proxy_v2 | 0.125 | 0.8 |"
        );
    }

    #[test]
    fn test_eda_summary_text() {
        let summary = EdaSummary {
            n_rows: 10,
            n_cols: 3,
            dtypes: vec![],
            missing_by_col: vec![("A".into(), 2), ("B".into(), 1)],
            n_duplicates: 1,
        };
        assert_eq!(
            render_eda_summary(&summary),
            "# EDA Summary\n\n- Rows: 10\n- Columns: 3\n- Duplicates: 1\n- Missing values (total): 3\n"
        );
    }
}
