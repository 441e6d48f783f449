use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_chunk_size() -> u64 {
    50
}

fn default_feature_count() -> u64 {
    3
}

fn default_std_dev() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CsvFileParameters {
    #[schemars(
        with = "String",
        title = "CSV Path",
        description = "Path to a .csv file with a header row",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv"]
        )
    )]
    pub path: PathBuf,

    #[serde(default = "default_chunk_size")]
    #[schemars(
        title = "Chunk Size",
        description = "Rows per chunk (the first chunk seeds the prior)",
        range(min = 2),
        default = "default_chunk_size"
    )]
    pub chunk_size: u64,
}

impl Default for CsvFileParameters {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            chunk_size: default_chunk_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GaussianParameters {
    #[serde(default = "default_feature_count")]
    #[schemars(
        title = "Features",
        description = "Number of independent features to generate",
        range(min = 1),
        default = "default_feature_count"
    )]
    pub feature_count: u64,

    #[schemars(title = "Mean", description = "Generating mean of the first feature")]
    pub mean: f64,

    #[serde(default)]
    #[schemars(
        title = "Mean Step",
        description = "Added to the generating mean for each further feature"
    )]
    pub mean_step: f64,

    #[serde(default = "default_std_dev")]
    #[schemars(
        title = "Std Dev",
        description = "Generating standard deviation, shared by all features (> 0)",
        extend("exclusiveMinimum" = 0.0),
        default = "default_std_dev"
    )]
    pub std_dev: f64,

    #[serde(default = "default_chunk_size")]
    #[schemars(
        title = "Chunk Size",
        description = "Observations per feature per chunk",
        range(min = 2),
        default = "default_chunk_size"
    )]
    pub chunk_size: u64,

    #[serde(default)]
    #[schemars(
        title = "Max Chunks",
        description = "Upper bound on generated chunks; empty = infinite"
    )]
    pub max_chunks: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for GaussianParameters {
    fn default() -> Self {
        Self {
            feature_count: default_feature_count(),
            mean: 0.0,
            mean_step: 0.0,
            std_dev: default_std_dev(),
            chunk_size: default_chunk_size(),
            max_chunks: Some(20),
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(FeedKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum FeedChoice {
    #[strum_discriminants(strum(
        message = "CSV File",
        detailed_message = "Numeric columns of a CSV file, split into row chunks."
    ))]
    CsvFile(CsvFileParameters),

    #[strum_discriminants(strum(
        message = "Gaussian Generator",
        detailed_message = "Synthetic i.i.d. Gaussian features with known means."
    ))]
    GaussianGenerator(GaussianParameters),
}

impl UIChoice for FeedChoice {
    type Kind = FeedKind;

    fn schema() -> Schema {
        schema_for!(FeedChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a data feed:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        let params = match kind {
            FeedKind::CsvFile => serde_json::to_value(CsvFileParameters::default()),
            FeedKind::GaussianGenerator => serde_json::to_value(GaussianParameters::default()),
        };
        params.unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::EnumMessage;

    #[test]
    fn tagged_enum_serialization() {
        let choice = FeedChoice::GaussianGenerator(GaussianParameters::default());
        let v = serde_json::to_value(choice).unwrap();
        assert_eq!(
            v.get("type").and_then(Value::as_str),
            Some("gaussian-generator")
        );
        let params = v.get("params").and_then(Value::as_object).unwrap();
        assert_eq!(params["feature_count"].as_u64(), Some(3));
        assert_eq!(params["seed"].as_u64(), Some(42));
    }

    #[test]
    fn missing_fields_apply_defaults() {
        let choice: FeedChoice = serde_json::from_value(json!({
            "type": "gaussian-generator",
            "params": { "mean": 5.0 }
        }))
        .unwrap();
        let FeedChoice::GaussianGenerator(p) = choice else {
            panic!("wrong variant");
        };
        assert_eq!(p.mean, 5.0);
        assert_eq!(p.chunk_size, 50);
        assert_eq!(p.std_dev, 1.0);
        assert_eq!(p.max_chunks, None);
    }

    #[test]
    fn default_params_rebuild_through_from_parts() {
        let v = FeedChoice::default_params(FeedKind::CsvFile);
        let rebuilt = FeedChoice::from_parts(FeedKind::CsvFile, v).unwrap();
        assert_eq!(rebuilt, FeedChoice::CsvFile(CsvFileParameters::default()));
    }

    #[test]
    fn discriminant_messages_available() {
        assert_eq!(FeedKind::CsvFile.get_message(), Some("CSV File"));
        assert!(FeedKind::GaussianGenerator.get_detailed_message().is_some());
    }
}
