use crate::history::transform_records;
use crate::models::{NormalizedResult, RawTestRecord, RecordId};

pub fn raw_record(
    id: i64,
    tanggal_tes: &str,
    depression: i32,
    anxiety: i32,
    stress: i32,
) -> RawTestRecord {
    RawTestRecord {
        id_hasil: RecordId::Number(id),
        nim: "2101001".to_string(),
        nama: "Siti Rahma".to_string(),
        kelas: Some("TI-3A".to_string()),
        current_semester: Some(5),
        klasifikasi: Some("Sedang".to_string()),
        tanggal_tes: tanggal_tes.to_string(),
        skor_depression: depression,
        skor_anxiety: anxiety,
        skor_stress: stress,
        total_skor: depression + anxiety + stress,
        kesimpulan: Some("Perlu pemantauan".to_string()),
        saran: Some("Konsultasi dengan dosen wali".to_string()),
    }
}

pub fn result(depression: i32, anxiety: i32, stress: i32) -> NormalizedResult {
    let mut results = transform_records(&[raw_record(1, "2024-01-10", depression, anxiety, stress)]);
    results.remove(0)
}
