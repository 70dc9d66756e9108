use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{GlobeError, Result};
use crate::trade::TradeRecord;

/// One CSV row before numeric conversion. Fields stay text so that a bad
/// value degrades to zero instead of failing the whole table.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Commodity Group")]
    commodity_group: String,
    #[serde(rename = "VALUE", default)]
    value: String,
}

/// Read trade records from CSV with a `Country, Year, Commodity Group, VALUE` header.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TradeRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in csv.deserialize() {
        let row: Row = row?;
        records.push(TradeRecord::from_text(
            &row.country,
            &row.year,
            &row.commodity_group,
            &row.value,
        ));
    }
    Ok(records)
}

/// Load the record table. A missing file yields an empty table.
pub fn load_records(path: &Path) -> Result<Vec<TradeRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "records file not found; starting with an empty table");
            return Ok(Vec::new());
        }
        Err(source) => return Err(GlobeError::Io { path: path.to_path_buf(), source }),
    };
    let records = read_records(file)?;
    info!(path = %path.display(), records = records.len(), "loaded trade records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let text = "Country,Year,Commodity Group,VALUE\n\
                    USA,2023,Food (0),100.5\n\
                    France, 2023 ,Food (0),n/a\n";
        let records = read_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TradeRecord::new("USA", "2023", "Food (0)", 100.5));
        assert_eq!(records[1].year, "2023");
        assert_eq!(records[1].value, 0.0);
    }

    #[test]
    fn test_quoted_fields() {
        let text = "Country,Year,Commodity Group,VALUE\n\
                    \"Korea, Republic of\",2022,\"Machinery and transport equipment (7)\",\"1234\"\n";
        let records = read_records(text.as_bytes()).unwrap();
        assert_eq!(records[0].country, "Korea, Republic of");
        assert_eq!(records[0].value, 1234.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let text = "Country,Year\nUSA,2023\n";
        assert!(matches!(read_records(text.as_bytes()), Err(GlobeError::Records(_))));
    }

    #[test]
    fn test_missing_file_is_empty() {
        assert!(load_records(Path::new("/nonexistent/exports.csv")).unwrap().is_empty());
    }
}
