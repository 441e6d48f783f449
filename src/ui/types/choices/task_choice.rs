use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{FeedChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_export_format() -> String {
    "csv".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SequentialUpdateParams {
    #[schemars(skip)]
    pub feed: FeedChoice,

    #[serde(default)]
    #[schemars(
        title = "Max Chunks",
        description = "Stop after this many chunks (None = until the feed ends)"
    )]
    pub max_chunks: Option<u64>,

    #[serde(default)]
    #[schemars(
        title = "Export Path",
        description = "Where to write the posterior trace (blank = timestamped file in the working directory)"
    )]
    pub export_path: String,

    #[serde(default = "default_export_format")]
    #[schemars(
        title = "Export Format",
        description = "csv, tsv or json",
        default = "default_export_format"
    )]
    pub export_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Sequential Update",
        detailed_message = "Seed a prior from the first chunk, then refine it chunk by chunk."
    ))]
    SequentialUpdate(SequentialUpdateParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::SequentialUpdate => json!({
                "max_chunks": null,
                "export_path": "",
                "export_format": default_export_format(),
            }),
        }
    }

    fn subprompts<D: PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        match kind {
            TaskKind::SequentialUpdate => {
                let feed = prompt_choice::<FeedChoice, _>(driver)?;
                let mut m = Map::new();
                m.insert("feed".into(), serde_json::to_value(feed)?);
                Ok(Some(m))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{GaussianParameters, schema_for, specs_for_kind};

    #[test]
    fn config_file_layout_parses() {
        let text = r#"{
            "type": "sequential-update",
            "params": {
                "feed": {
                    "type": "gaussian-generator",
                    "params": { "mean": 10.0, "std_dev": 2.0, "max_chunks": 5 }
                },
                "export_format": "json"
            }
        }"#;
        let TaskChoice::SequentialUpdate(p) = TaskChoice::from_config_str(text).unwrap();
        assert_eq!(p.max_chunks, None);
        assert_eq!(p.export_path, "");
        assert_eq!(p.export_format, "json");
        let FeedChoice::GaussianGenerator(g) = p.feed else {
            panic!("wrong feed");
        };
        assert_eq!(g.mean, 10.0);
        assert_eq!(g.max_chunks, Some(5));
    }

    #[test]
    fn missing_feed_is_rejected() {
        let text = r#"{ "type": "sequential-update", "params": {} }"#;
        assert!(TaskChoice::from_config_str(text).is_err());
    }

    #[test]
    fn feed_is_not_a_prompted_field() {
        let schema = schema_for::<TaskChoice>();
        let specs = specs_for_kind(&schema, "sequential-update").unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert!(!names.contains(&"feed"));
        assert!(names.contains(&"export_format"));
    }

    #[test]
    fn from_parts_merges_defaults_and_feed() {
        let mut params = TaskChoice::default_params(TaskKind::SequentialUpdate);
        let feed = FeedChoice::GaussianGenerator(GaussianParameters::default());
        params
            .as_object_mut()
            .unwrap()
            .insert("feed".into(), serde_json::to_value(&feed).unwrap());

        let TaskChoice::SequentialUpdate(p) =
            TaskChoice::from_parts(TaskKind::SequentialUpdate, params).unwrap();
        assert_eq!(p.feed, feed);
        assert_eq!(p.export_format, "csv");
    }
}
