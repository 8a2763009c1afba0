use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque result identifier; the backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// One completed questionnaire, exactly as the backend delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTestRecord {
    #[serde(rename = "idHasil")]
    pub id_hasil: RecordId,
    pub nim: String,
    pub nama: String,
    #[serde(default)]
    pub kelas: Option<String>,
    #[serde(default)]
    pub current_semester: Option<i32>,
    #[serde(default)]
    pub klasifikasi: Option<String>,
    #[serde(rename = "tanggalTes")]
    pub tanggal_tes: String,
    pub skor_depression: i32,
    pub skor_anxiety: i32,
    pub skor_stress: i32,
    pub total_skor: i32,
    #[serde(default)]
    pub kesimpulan: Option<String>,
    #[serde(default)]
    pub saran: Option<String>,
}

/// Response envelope returned by the history endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<RawTestRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// DASS-21 sub-scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Depression,
    Anxiety,
    Stress,
}

impl Aspect {
    pub const ALL: [Aspect; 3] = [Aspect::Depression, Aspect::Anxiety, Aspect::Stress];

    /// Case-insensitive lookup. Anything unrecognised is treated as stress.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "depression" => Self::Depression,
            "anxiety" => Self::Anxiety,
            _ => Self::Stress,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Depression => "depression",
            Self::Anxiety => "anxiety",
            Self::Stress => "stress",
        }
    }

    /// Display label used in notes and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Depression => "Depresi",
            Self::Anxiety => "Kecemasan",
            Self::Stress => "Stres",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Severity level name and its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityLevel {
    pub level: &'static str,
    pub color: &'static str,
}

impl SeverityLevel {
    pub const UNKNOWN: SeverityLevel = SeverityLevel {
        level: "Unknown",
        color: "gray",
    };

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

/// A backend record decorated for display. Built once per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub id: RecordId,
    pub nim: String,
    pub nama: String,
    pub kelas: Option<String>,
    pub current_semester: Option<i32>,
    pub klasifikasi: Option<String>,
    pub depression: i32,
    pub anxiety: i32,
    pub stress: i32,
    pub total: i32,
    pub kesimpulan: Option<String>,
    pub saran: Option<String>,
    /// Locale-formatted date, e.g. `5 Maret 2024`.
    pub tanggal_tes: String,
    pub tanggal_tes_raw: String,
    /// Sortable date; `None` when the backend string could not be parsed.
    pub tested_at: Option<NaiveDateTime>,
    /// 1 for the oldest test, highest for the most recent.
    pub test_number: usize,
}

impl NormalizedResult {
    pub fn score(&self, aspect: Aspect) -> i32 {
        match aspect {
            Aspect::Depression => self.depression,
            Aspect::Anxiety => self.anxiety,
            Aspect::Stress => self.stress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectChange {
    pub current: i32,
    pub previous: i32,
    pub change: i32,
    pub percentage: i64,
    pub improved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTrend {
    Improving,
    Worsening,
    Stable,
}

impl OverallTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Worsening => "worsening",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for OverallTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub changes: BTreeMap<Aspect, AspectChange>,
    pub improvements: Vec<String>,
    pub concerns: Vec<String>,
    pub overall_trend: OverallTrend,
}

impl ComparisonResult {
    pub fn change(&self, aspect: Aspect) -> Option<&AspectChange> {
        self.changes.get(&aspect)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectSummary {
    pub aspect: Aspect,
    pub score: i32,
    pub severity: SeverityLevel,
}
