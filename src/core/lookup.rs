use crate::domain::model::{LookupTable, LookupVariant};
use crate::utils::error::Result;

/// 從 CSV 文字建立查詢表，第一列是標頭會被跳過
///
/// 回傳查詢表與被跳過的壞列數。壞列只記 warning，不會中斷整個流程。
pub fn build_lookup(csv_text: &str, variant: LookupVariant) -> Result<(LookupTable, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut table = LookupTable::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unparsable lookup row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());

        match parse_lookup_row(&record, variant) {
            Some((key, display)) => table.insert(key, display),
            None => {
                tracing::warn!(
                    "⚠️ Skipping malformed lookup row at line {}: expected at least {} fields, got {}",
                    line,
                    variant.min_fields(),
                    record.len()
                );
                skipped += 1;
            }
        }
    }

    Ok((table, skipped))
}

fn parse_lookup_row(
    record: &csv::StringRecord,
    variant: LookupVariant,
) -> Option<(String, String)> {
    match variant {
        LookupVariant::BillTitle => {
            if record.len() < 2 {
                return None;
            }
            let key = record.get(0)?.to_string();
            // key 之後的所有欄位合併成一個標題字串
            let display = record.iter().skip(1).collect::<Vec<_>>().join(",");
            Some((key, display))
        }
        LookupVariant::PersonName => {
            if record.len() < 3 {
                return None;
            }
            let key = record.get(0)?.to_string();
            let display = format!("{} {}", record.get(1)?, record.get(2)?);
            Some((key, display))
        }
    }
}

impl LookupVariant {
    fn min_fields(self) -> usize {
        match self {
            LookupVariant::BillTitle => 2,
            LookupVariant::PersonName => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_title_basic() {
        let csv = "id,title\nB1,Clean Air Act\nB2,Water Act\n";
        let (table, skipped) = build_lookup(csv, LookupVariant::BillTitle).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("B1"), Some("Clean Air Act"));
        assert_eq!(table.get("B2"), Some("Water Act"));
    }

    #[test]
    fn test_bill_title_joins_trailing_fields() {
        let csv = "id,title,extra\nB1,Clean Air Act,extra\n";
        let (table, _) = build_lookup(csv, LookupVariant::BillTitle).unwrap();

        assert_eq!(table.get("B1"), Some("Clean Air Act,extra"));
    }

    #[test]
    fn test_bill_title_quoted_embedded_comma() {
        // The quoted title parses as a single field, no corruption
        let csv = "id,title\nB1,\"Clean Air Act, Amendments of 1990\"\n";
        let (table, skipped) = build_lookup(csv, LookupVariant::BillTitle).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(table.get("B1"), Some("Clean Air Act, Amendments of 1990"));
    }

    #[test]
    fn test_person_name_composition() {
        let csv = "id,first,last\nP1,John,Smith\nP2,Jane,Doe\n";
        let (table, skipped) = build_lookup(csv, LookupVariant::PersonName).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(table.get("P1"), Some("John Smith"));
        assert_eq!(table.get("P2"), Some("Jane Doe"));
    }

    #[test]
    fn test_header_row_is_skipped() {
        let csv = "id,name\nA,Alpha\n";
        let (table, _) = build_lookup(csv, LookupVariant::BillTitle).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("id"), None);
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let csv = "id,first,last\nP1,John,Smith\nP2\nP3,Jane\nP4,Mary,Major\n";
        let (table, skipped) = build_lookup(csv, LookupVariant::PersonName).unwrap();

        assert_eq!(skipped, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("P4"), Some("Mary Major"));
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let csv = "id,name\nA,First\nA,Second\n";
        let (table, _) = build_lookup(csv, LookupVariant::BillTitle).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some("Second"));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let (table, skipped) = build_lookup("", LookupVariant::BillTitle).unwrap();

        assert!(table.is_empty());
        assert_eq!(skipped, 0);
    }
}
