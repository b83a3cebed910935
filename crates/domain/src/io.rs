use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetRow};
use crate::error::DomainError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    JsonLines,
}

pub trait DatasetExporter {
    fn export(&self, dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>, DomainError>;
}

pub struct JsonExporter;

impl DatasetExporter for JsonExporter {
    fn export(&self, dataset: &Dataset, format: ExportFormat) -> Result<Vec<u8>, DomainError> {
        match format {
            ExportFormat::Json => serde_json::to_vec(dataset)
                .map_err(|err| DomainError::Serialization(err.to_string())),
            ExportFormat::JsonLines => {
                let mut out = Vec::new();
                for row in &dataset.rows {
                    serde_json::to_writer(&mut out, row)
                        .map_err(|err| DomainError::Serialization(err.to_string()))?;
                    out.push(b'\n');
                }
                Ok(out)
            }
        }
    }
}

impl JsonExporter {
    pub fn import(&self, bytes: &[u8], format: ExportFormat) -> Result<Dataset, DomainError> {
        match format {
            ExportFormat::Json => serde_json::from_slice(bytes)
                .map_err(|err| DomainError::Serialization(err.to_string())),
            ExportFormat::JsonLines => {
                let rows: Vec<DatasetRow> = serde_json::Deserializer::from_slice(bytes)
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| DomainError::Serialization(err.to_string()))?;
                Ok(Dataset::new(rows))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, GolferProfile, MetadataFeatures, NormalizedSequence, SwingMetadata};

    fn dataset() -> Dataset {
        let metadata: SwingMetadata =
            serde_json::from_str(r#"{"swing_id": "s", "angle_type": "face-on"}"#).unwrap();
        let raw = vec![vec![0.125, -0.3, 0.7]; 75];
        Dataset::new(vec![
            DatasetRow::new(
                "a",
                Category::Good,
                "driver",
                NormalizedSequence::from_raw(&raw).unwrap(),
                MetadataFeatures::from_parts(&GolferProfile::fallback(), &metadata),
            ),
            DatasetRow::new(
                "b",
                Category::EarlyExtension,
                "7-iron",
                NormalizedSequence::from_raw(&raw[..3]).unwrap(),
                MetadataFeatures::from_parts(&GolferProfile::fallback(), &metadata),
            ),
        ])
    }

    #[test]
    fn json_restores_rows_exactly() {
        let exporter = JsonExporter;
        let original = dataset();
        let bytes = exporter.export(&original, ExportFormat::Json).unwrap();
        let output = String::from_utf8(bytes.clone()).unwrap();
        assert!(output.contains("\"category\":\"early_extension\""));
        assert_eq!(exporter.import(&bytes, ExportFormat::Json).unwrap(), original);
    }

    #[test]
    fn json_lines_writes_one_row_per_line() {
        let exporter = JsonExporter;
        let original = dataset();
        let bytes = exporter.export(&original, ExportFormat::JsonLines).unwrap();
        assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), 2);
        assert_eq!(
            exporter.import(&bytes, ExportFormat::JsonLines).unwrap(),
            original
        );
    }
}
