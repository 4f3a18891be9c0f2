use super::domain::CollateralRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioLoadError {
    #[error("failed to read portfolio {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid portfolio JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid portfolio CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("portfolio JSON must be an array of records, found {0}")]
    NotAnArray(&'static str),
    #[error("unsupported portfolio format for {0}; expected .json or .csv")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioFormat {
    Json,
    Csv,
}

impl PortfolioFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub struct PortfolioLoader;

impl PortfolioLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CollateralRecord>, PortfolioLoadError> {
        let path = path.as_ref();
        let format = PortfolioFormat::from_path(path)
            .ok_or_else(|| PortfolioLoadError::UnsupportedFormat(path.to_path_buf()))?;
        let file = std::fs::File::open(path).map_err(|source| PortfolioLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file), format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: PortfolioFormat,
    ) -> Result<Vec<CollateralRecord>, PortfolioLoadError> {
        match format {
            PortfolioFormat::Json => parse_json(reader),
            PortfolioFormat::Csv => parse_csv(reader),
        }
    }
}

fn parse_json<R: Read>(reader: R) -> Result<Vec<CollateralRecord>, PortfolioLoadError> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;
    let serde_json::Value::Array(items) = document else {
        return Err(PortfolioLoadError::NotAnArray(json_kind(&document)));
    };

    // Rows that are not objects carry no fields; they still occupy a slot.
    let records = items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::Object(_) => serde_json::from_value(item),
            _ => Ok(CollateralRecord::default()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

fn parse_csv<R: Read>(reader: R) -> Result<Vec<CollateralRecord>, PortfolioLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    // Cells stay text; codes like "007" must not be coerced into numbers.
    for row in csv_reader.records() {
        let row = row?;
        let fields: serde_json::Map<String, serde_json::Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                (
                    header.to_string(),
                    serde_json::Value::String(cell.to_string()),
                )
            })
            .collect();
        records.push(serde_json::from_value(serde_json::Value::Object(fields))?);
    }

    Ok(records)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::revaluation::domain::FieldValue;
    use std::io::Cursor;

    #[test]
    fn json_portfolio_keeps_order_and_tolerates_odd_rows() {
        let json = r#"[
            {"reference": "A-1", "collateralType": "Недвижимость"},
            42,
            {"reference": 3, "collateralValue": 1500000}
        ]"#;
        let records = PortfolioLoader::from_reader(Cursor::new(json), PortfolioFormat::Json)
            .expect("portfolio parses");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].reference, Some(FieldValue::text("A-1")));
        assert_eq!(records[1], CollateralRecord::default());
        assert_eq!(records[2].reference, Some(FieldValue::Integer(3)));
        assert_eq!(records[2].collateral_value, Some(FieldValue::Integer(1_500_000)));
    }

    #[test]
    fn json_root_must_be_an_array() {
        let error = PortfolioLoader::from_reader(
            Cursor::new(r#"{"reference": "A-1"}"#),
            PortfolioFormat::Json,
        )
        .expect_err("object root rejected");
        assert!(matches!(error, PortfolioLoadError::NotAnArray("an object")));

        let error = PortfolioLoader::from_reader(Cursor::new("[{"), PortfolioFormat::Json)
            .expect_err("truncated JSON rejected");
        assert!(matches!(error, PortfolioLoadError::Json(_)));
    }

    #[test]
    fn csv_export_is_read_with_camel_case_headers() {
        let csv = "reference,type,collateralValue,lastRevaluationDate,owner\n\
R-1,Транспорт,\"1 000 000\",15.03.2024,\n\
R-2,,250000.5,,Иванов\n";
        let records = PortfolioLoader::from_reader(Cursor::new(csv), PortfolioFormat::Csv)
            .expect("csv parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, Some(FieldValue::text("Транспорт")));
        assert_eq!(
            records[0].collateral_value,
            Some(FieldValue::text("1 000 000"))
        );
        assert!(records[0].owner.is_none());
        assert!(records[1].kind.is_none());
        assert_eq!(records[1].collateral_value, Some(FieldValue::text("250000.5")));
        assert_eq!(records[1].owner, Some(FieldValue::text("Иванов")));
    }

    #[test]
    fn csv_cells_are_not_coerced() {
        let csv = "reference,borrower,owner,collateralType,collateralValue\n\
007,00123,0,0,1000\n\
1e3,true,false,,\n";
        let records = PortfolioLoader::from_reader(Cursor::new(csv), PortfolioFormat::Csv)
            .expect("csv parses");

        assert_eq!(records[0].reference, Some(FieldValue::text("007")));
        assert_eq!(records[0].borrower, Some(FieldValue::text("00123")));
        assert_eq!(records[0].owner, Some(FieldValue::text("0")));
        assert_eq!(records[0].collateral_value, Some(FieldValue::text("1000")));
        assert_eq!(records[1].reference, Some(FieldValue::text("1e3")));
        assert_eq!(records[1].borrower, Some(FieldValue::text("true")));
        assert_eq!(records[1].owner, Some(FieldValue::text("false")));
        assert!(records[1].collateral_type.is_none());
        assert!(records[1].collateral_value.is_none());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            PortfolioFormat::from_path(Path::new("public/portfolioData.JSON")),
            Some(PortfolioFormat::Json)
        );
        assert_eq!(
            PortfolioFormat::from_path(Path::new("export.csv")),
            Some(PortfolioFormat::Csv)
        );
        assert_eq!(PortfolioFormat::from_path(Path::new("portfolio.xlsx")), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = PortfolioLoader::from_path("./does-not-exist.json")
            .expect_err("expected io error");

        match error {
            PortfolioLoadError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("./does-not-exist.json"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
