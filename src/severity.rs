use crate::models::{Aspect, AspectSummary, NormalizedResult, SeverityLevel};

/// Closed score interval mapped to a severity level.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub min: i32,
    pub max: i32,
    pub severity: SeverityLevel,
}

const fn band(min: i32, max: i32, level: &'static str, color: &'static str) -> Band {
    Band {
        min,
        max,
        severity: SeverityLevel { level, color },
    }
}

const DEPRESSION_BANDS: [Band; 5] = [
    band(0, 4, "Normal", "green"),
    band(5, 6, "Ringan", "yellow"),
    band(7, 10, "Sedang", "orange"),
    band(11, 13, "Parah", "red"),
    band(14, 21, "Sangat Parah", "darkred"),
];

const ANXIETY_BANDS: [Band; 5] = [
    band(0, 3, "Normal", "green"),
    band(4, 5, "Ringan", "yellow"),
    band(6, 7, "Sedang", "orange"),
    band(8, 9, "Parah", "red"),
    band(10, 21, "Sangat Parah", "darkred"),
];

const STRESS_BANDS: [Band; 5] = [
    band(0, 7, "Normal", "green"),
    band(8, 9, "Ringan", "yellow"),
    band(10, 12, "Sedang", "orange"),
    band(13, 16, "Parah", "red"),
    band(17, 21, "Sangat Parah", "darkred"),
];

pub fn bands(aspect: Aspect) -> &'static [Band] {
    match aspect {
        Aspect::Depression => &DEPRESSION_BANDS,
        Aspect::Anxiety => &ANXIETY_BANDS,
        Aspect::Stress => &STRESS_BANDS,
    }
}

/// Classify a sub-scale score by aspect name. Unrecognised names fall back to stress.
pub fn classify(score: i32, aspect: &str) -> SeverityLevel {
    classify_aspect(score, Aspect::parse(aspect))
}

/// Scores outside every band yield [`SeverityLevel::UNKNOWN`].
pub fn classify_aspect(score: i32, aspect: Aspect) -> SeverityLevel {
    bands(aspect)
        .iter()
        .find(|band| (band.min..=band.max).contains(&score))
        .map(|band| band.severity)
        .unwrap_or(SeverityLevel::UNKNOWN)
}

impl NormalizedResult {
    pub fn severity(&self, aspect: Aspect) -> SeverityLevel {
        classify_aspect(self.score(aspect), aspect)
    }
}

/// Latest score and severity per aspect. Expects a newest-first sequence.
pub fn summarize_latest(results: &[NormalizedResult]) -> Vec<AspectSummary> {
    let Some(latest) = results.first() else {
        return Vec::new();
    };

    Aspect::ALL
        .iter()
        .map(|&aspect| AspectSummary {
            aspect,
            score: latest.score(aspect),
            severity: latest.severity(aspect),
        })
        .collect()
}
