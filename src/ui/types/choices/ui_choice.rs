use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::path::Path;
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;

/// Contract for a configurable choice enum: serde-tagged as
/// `{ "type": <kind>, "params": { .. } }` and describable by JSON Schema.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose a type:"
    }

    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Default `params` object for a kind.
    fn default_params(kind: Self::Kind) -> Value;

    /// Extra params collected through nested wizards (e.g. the feed of a task).
    fn subprompts<D: PromptDriver>(
        _driver: &D,
        _kind: Self::Kind,
    ) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    /// Build the typed enum from kind + params.
    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        let v = json!({ "type": key, "params": params });
        Ok(serde_json::from_value(v)?)
    }

    /// Parses a saved configuration in the tagged JSON layout.
    fn from_config_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid configuration JSON")
    }

    fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_config_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
