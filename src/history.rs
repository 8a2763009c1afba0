use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{ApiResponse, NormalizedResult, RawTestRecord};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Normalize a history response. Missing or empty `data` yields an empty list.
pub fn transform_history(response: &ApiResponse) -> Vec<NormalizedResult> {
    match response.data.as_deref() {
        Some(records) => transform_records(records),
        None => Vec::new(),
    }
}

/// Records must arrive newest-first: index 0 becomes test number `len`, the
/// last index becomes test number 1. Output keeps the input order.
pub fn transform_records(records: &[RawTestRecord]) -> Vec<NormalizedResult> {
    let total = records.len();
    let results: Vec<NormalizedResult> = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize(record, total - index))
        .collect();

    if !is_newest_first(&results) {
        tracing::warn!(
            records = total,
            "history is not ordered newest-first; test numbers follow list position"
        );
    }
    tracing::debug!(records = total, "normalized test history");

    results
}

fn normalize(record: &RawTestRecord, test_number: usize) -> NormalizedResult {
    let tested_at = parse_test_date(&record.tanggal_tes);
    let tanggal_tes = match tested_at {
        Some(value) => format_test_date(value.date()),
        None => {
            tracing::warn!(id = %record.id_hasil, raw = %record.tanggal_tes, "unparseable test date");
            record.tanggal_tes.clone()
        }
    };

    NormalizedResult {
        id: record.id_hasil.clone(),
        nim: record.nim.clone(),
        nama: record.nama.clone(),
        kelas: record.kelas.clone(),
        current_semester: record.current_semester,
        klasifikasi: record.klasifikasi.clone(),
        depression: record.skor_depression,
        anxiety: record.skor_anxiety,
        stress: record.skor_stress,
        total: record.total_skor,
        kesimpulan: record.kesimpulan.clone(),
        saran: record.saran.clone(),
        tanggal_tes,
        tanggal_tes_raw: record.tanggal_tes.clone(),
        tested_at,
        test_number,
    }
}

fn is_newest_first(results: &[NormalizedResult]) -> bool {
    let dates: Vec<NaiveDateTime> = results.iter().filter_map(|r| r.tested_at).collect();
    dates.windows(2).all(|pair| pair[0] >= pair[1])
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS[.f]` or a bare date.
/// Offsets are dropped; the wall-clock time written in the string is kept.
pub fn parse_test_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `5 Maret 2024`
pub fn format_test_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Keep one subject's records, preserving order.
pub fn filter_by_nim(records: &[RawTestRecord], nim: &str) -> Vec<RawTestRecord> {
    records
        .iter()
        .filter(|record| record.nim == nim)
        .cloned()
        .collect()
}

/// Most recent test and the one before it.
pub fn latest_pair(results: &[NormalizedResult]) -> Option<(&NormalizedResult, &NormalizedResult)> {
    match results {
        [current, previous, ..] => Some((current, previous)),
        _ => None,
    }
}
