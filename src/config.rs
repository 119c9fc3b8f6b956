// Task config, e.g.
// {
//   "numeric": true,
//   "queries": [
//     { "filter": "1" },
//     { "filter": "46,70" },
//     { "filter_any": "46" }
//   ]
// }

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::Result;
use crate::iputils::filter::Query;
use crate::iputils::order::Collation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum QueryEntry {
    Filter(String),
    FilterAny(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default)]
    numeric: bool,
    #[serde(default)]
    queries: Vec<QueryEntry>,
}

impl TaskConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn collation(&self) -> Collation {
        if self.numeric {
            Collation::Numeric
        } else {
            Collation::Lexicographic
        }
    }

    pub fn queries(&self) -> Result<Vec<Query>> {
        self.queries
            .iter()
            .map(|q| match q {
                QueryEntry::Filter(s) => Ok(Query::At(s.parse()?)),
                QueryEntry::FilterAny(v) => Ok(Query::Any(v.clone())),
            })
            .collect()
    }
}
