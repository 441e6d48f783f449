use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Name of one independently tracked numeric feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FeatureId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
