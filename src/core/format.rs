use crate::domain::model::{
    LookupTable, RelationshipRecord, ReportMode, ReportResult, ReportStats,
};

/// 解析 tab 分隔的關聯檔，每行應該是 left \t right \t score
///
/// 回傳解析成功的記錄與被跳過的壞行數
pub fn parse_relationships(tsv_text: &str) -> (Vec<RelationshipRecord>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(tsv_text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unparsable relationship line: {}", e);
                skipped += 1;
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 3 {
            tracing::warn!(
                "⚠️ Skipping malformed relationship line {}: expected 3 fields, got {}",
                line,
                record.len()
            );
            skipped += 1;
            continue;
        }

        let score_field = record.get(2).unwrap_or_default();
        let score = match score_field.trim().parse::<f64>() {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!(
                    "⚠️ Skipping relationship line {}: score '{}' is not a number",
                    line,
                    score_field
                );
                skipped += 1;
                continue;
            }
        };

        records.push(RelationshipRecord {
            left_key: record.get(0).unwrap_or_default().to_string(),
            right_key: record.get(1).unwrap_or_default().to_string(),
            score,
        });
    }

    (records, skipped)
}

/// 依模式把存活的關聯記錄排版成報告文字
///
/// 分數低於門檻的記錄整筆丟棄（剛好等於門檻的保留）。
pub fn format_report(
    lookup: &LookupTable,
    records: &[RelationshipRecord],
    mode: ReportMode,
    threshold: f64,
) -> ReportResult {
    let mut report = String::new();
    let mut stats = ReportStats {
        records_parsed: records.len(),
        ..ReportStats::default()
    };

    match mode {
        ReportMode::Grouped => {
            let mut current_group: Option<&str> = None;

            for record in records {
                if record.score < threshold {
                    stats.skipped_low_score += 1;
                    continue;
                }

                if current_group != Some(record.left_key.as_str()) {
                    // 開啟群組的那一筆只輸出標題行，右側 key 不印
                    current_group = Some(record.left_key.as_str());
                    report.push_str(&resolve(lookup, &record.left_key, &mut stats));
                    report.push('\n');
                    stats.group_headers += 1;
                    stats.lines_emitted += 1;
                    continue;
                }

                report.push('\t');
                report.push_str(&resolve(lookup, &record.right_key, &mut stats));
                report.push('\n');
                stats.lines_emitted += 1;
            }
        }
        ReportMode::Flat => {
            for record in records {
                if record.score < threshold {
                    stats.skipped_low_score += 1;
                    continue;
                }

                report.push_str(&resolve(lookup, &record.left_key, &mut stats));
                report.push(',');
                report.push_str(&resolve(lookup, &record.right_key, &mut stats));
                report.push('\n');
                stats.lines_emitted += 1;
            }
        }
    }

    if stats.unresolved_keys > 0 {
        tracing::warn!(
            "⚠️ {} key(s) could not be resolved through the lookup table",
            stats.unresolved_keys
        );
    }

    ReportResult { report, stats }
}

fn resolve(lookup: &LookupTable, key: &str, stats: &mut ReportStats) -> String {
    match lookup.get(key) {
        Some(display) => display.to_string(),
        None => {
            stats.unresolved_keys += 1;
            format!("<unknown:{}>", key)
        }
    }
}
