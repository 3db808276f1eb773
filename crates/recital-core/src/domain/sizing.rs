//! Costume sizing
//!
//! Maps body measurements (centimetres) onto the standard US dance costume
//! size charts and recommends one size per dancer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::dancer::Measurements;
use super::errors::DomainError;

/// Costume size, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeLabel {
    Xxs,
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

impl SizeLabel {
    /// Size used when nothing has been measured
    pub const FALLBACK: SizeLabel = SizeLabel::M;

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Xxs => "XXS",
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::Xxl => "XXL",
            Self::Xxxl => "XXXL",
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizeLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XXS" => Ok(Self::Xxs),
            "XS" => Ok(Self::Xs),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::Xl),
            "XXL" => Ok(Self::Xxl),
            "XXXL" => Ok(Self::Xxxl),
            _ => Err(DomainError::InvalidSize(s.to_string())),
        }
    }
}

/// Measurement that has a size chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    Girth,
    Waist,
    Hips,
}

/// One row of a size chart: inclusive centimetre range for a size
struct ChartRow {
    size: SizeLabel,
    min: f64,
    max: f64,
}

const fn row(size: SizeLabel, min: f64, max: f64) -> ChartRow {
    ChartRow { size, min, max }
}

const GIRTH_CHART: [ChartRow; 6] = [
    row(SizeLabel::Xs, 75.0, 80.0),
    row(SizeLabel::S, 81.0, 85.0),
    row(SizeLabel::M, 86.0, 90.0),
    row(SizeLabel::L, 91.0, 95.0),
    row(SizeLabel::Xl, 96.0, 100.0),
    row(SizeLabel::Xxl, 101.0, 110.0),
];

const WAIST_CHART: [ChartRow; 6] = [
    row(SizeLabel::Xs, 60.0, 65.0),
    row(SizeLabel::S, 66.0, 70.0),
    row(SizeLabel::M, 71.0, 75.0),
    row(SizeLabel::L, 76.0, 80.0),
    row(SizeLabel::Xl, 81.0, 85.0),
    row(SizeLabel::Xxl, 86.0, 95.0),
];

const HIPS_CHART: [ChartRow; 6] = [
    row(SizeLabel::Xs, 85.0, 90.0),
    row(SizeLabel::S, 91.0, 95.0),
    row(SizeLabel::M, 96.0, 100.0),
    row(SizeLabel::L, 101.0, 105.0),
    row(SizeLabel::Xl, 106.0, 110.0),
    row(SizeLabel::Xxl, 111.0, 120.0),
];

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 3] = [Self::Girth, Self::Waist, Self::Hips];

    fn chart(self) -> &'static [ChartRow] {
        match self {
            Self::Girth => &GIRTH_CHART,
            Self::Waist => &WAIST_CHART,
            Self::Hips => &HIPS_CHART,
        }
    }

    /// Field name as it appears in the roster
    pub const fn label(self) -> &'static str {
        match self {
            Self::Girth => "girth",
            Self::Waist => "waist",
            Self::Hips => "hips",
        }
    }

    /// This measurement of a dancer, if taken
    pub fn read(self, measurements: &Measurements) -> Option<f64> {
        match self {
            Self::Girth => measurements.girth,
            Self::Waist => measurements.waist,
            Self::Hips => measurements.hips,
        }
    }
}

/// Size for a single measurement
///
/// Values below the smallest chart range are `XXS`, values above the
/// largest are `XXXL`. A value that falls between two ranges (e.g. 80.5 on
/// the girth chart) takes the larger size.
pub fn size_for(kind: MeasurementKind, value: f64) -> SizeLabel {
    let chart = kind.chart();
    if value < chart[0].min {
        return SizeLabel::Xxs;
    }
    chart
        .iter()
        .find(|r| value <= r.max)
        .map_or(SizeLabel::Xxxl, |r| r.size)
}

/// Recommended costume size: the largest size across girth, waist and hips
///
/// Measurements that have not been taken are ignored. With nothing
/// measured the recommendation is [`SizeLabel::FALLBACK`].
pub fn recommended_size(measurements: &Measurements) -> SizeLabel {
    MeasurementKind::ALL
        .iter()
        .filter_map(|kind| kind.read(measurements).map(|v| size_for(*kind, v)))
        .max()
        .unwrap_or(SizeLabel::FALLBACK)
}
