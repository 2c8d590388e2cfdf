//! Stranded-asset flagging and category restoration.
//!
//! The classifier works on the final, scenario-enriched dataset:
//! - `Is_Stranded` flags rows whose future carbon risk under the severe
//!   scenario is strictly positive
//! - encoded categorical fields are rebuilt from their indicator columns
//! - climate stress is bucketed into tertile profiles

use agririsk_core::frame::{Column, Dataset};
use agririsk_core::math::stats::quantile;
use agririsk_core::schema::{
    scenario_column, CARBON_RISK_FUTURE_PREFIX, CLIMATE_PROFILE, CLIMATE_STRESS, IS_STRANDED,
};
use agririsk_core::types::DataError;
use agririsk_models::preprocessing::{indicator_name, OneHotEncoding};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Lower tertile cut of climate stress.
pub const LOW_PROFILE_QUANTILE: f64 = 0.33;
/// Upper tertile cut of climate stress.
pub const HIGH_PROFILE_QUANTILE: f64 = 0.67;

/// Append `Is_Stranded`: future carbon risk under `scenario` is strictly
/// positive. Zero and NaN risk are not stranded.
///
/// # Errors
///
/// `MissingColumn` if `Carbon_Risk_Score_Future_<scenario>` is absent.
pub fn add_stranded_flag(data: &Dataset, scenario: &str) -> Result<Dataset, DataError> {
    let risk = data.numeric(&scenario_column(CARBON_RISK_FUTURE_PREFIX, scenario))?;
    let flags: Vec<bool> = risk.iter().map(|&r| r > 0.0).collect();
    let stranded = flags.iter().filter(|&&f| f).count();
    info!(scenario, stranded, rows = data.n_rows(), "Flagged stranded enterprises");

    let mut out = data.clone();
    out.insert_column(IS_STRANDED, Column::Boolean(flags))?;
    Ok(out)
}

/// Number of rows flagged in `Is_Stranded`.
pub fn stranded_count(data: &Dataset) -> Result<usize, DataError> {
    Ok(data.boolean(IS_STRANDED)?.iter().filter(|&&f| f).count())
}

/// Rebuild one label column per encoded field.
///
/// Each row takes the reference level unless one of its indicators is set;
/// when several are set the last level in encoding order wins. Indicator
/// columns missing from `data` are treated as never set.
pub fn reconstruct_categories(
    data: &Dataset,
    encoding: &OneHotEncoding,
) -> Result<Dataset, DataError> {
    let mut out = data.clone();
    for entry in encoding.iter() {
        let mut labels = vec![entry.reference.clone(); data.n_rows()];
        for level in &entry.levels {
            let name = indicator_name(&entry.column, level);
            if !data.has_column(&name) {
                debug!(indicator = %name, "Indicator column absent");
                continue;
            }
            for (label, value) in labels.iter_mut().zip(data.feature_values(&name)?) {
                if value == 1.0 {
                    *label = level.clone();
                }
            }
        }
        out.insert_column(entry.column.clone(), Column::Categorical(labels))?;
    }
    Ok(out)
}

/// Tertile bucket of climate stress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateProfile {
    /// At or below the lower cut
    Low,
    /// Above the lower cut, at or below the upper cut
    Medium,
    /// Above the upper cut
    High,
}

impl ClimateProfile {
    /// Label written to the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Classify a stress value against the two cuts. `None` for NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use agririsk_risk::stranding::ClimateProfile;
    ///
    /// assert_eq!(ClimateProfile::classify(1.0, 1.0, 2.0), Some(ClimateProfile::Low));
    /// assert_eq!(ClimateProfile::classify(1.5, 1.0, 2.0), Some(ClimateProfile::Medium));
    /// assert_eq!(ClimateProfile::classify(2.5, 1.0, 2.0), Some(ClimateProfile::High));
    /// assert_eq!(ClimateProfile::classify(f64::NAN, 1.0, 2.0), None);
    /// ```
    pub fn classify(stress: f64, low_cut: f64, high_cut: f64) -> Option<Self> {
        if stress.is_nan() {
            None
        } else if stress <= low_cut {
            Some(Self::Low)
        } else if stress <= high_cut {
            Some(Self::Medium)
        } else {
            Some(Self::High)
        }
    }
}

impl std::fmt::Display for ClimateProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append `Climate_Profile` from the 33rd and 67th percentiles of
/// `Climate_Stress` in `data`. NaN stress gets an empty label.
pub fn add_climate_profile(data: &Dataset) -> Result<Dataset, DataError> {
    let stress = data.numeric(CLIMATE_STRESS)?;
    let low_cut = quantile(stress, LOW_PROFILE_QUANTILE);
    let high_cut = quantile(stress, HIGH_PROFILE_QUANTILE);
    debug!(low_cut, high_cut, "Climate profile cuts");

    let labels = stress
        .iter()
        .map(|&x| {
            ClimateProfile::classify(x, low_cut, high_cut)
                .map(|p| p.as_str().to_string())
                .unwrap_or_default()
        })
        .collect();
    let mut out = data.clone();
    out.insert_column(CLIMATE_PROFILE, Column::Categorical(labels))?;
    Ok(out)
}
