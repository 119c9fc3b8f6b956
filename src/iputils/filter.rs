// Address filters
//   - filter_at: every (position, value) pair must match, positions past the
//     end of an address never match
//   - filter_any: value matches at any position
//   - both select from a borrowed pool and keep its order

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use super::{Address, Pool};
use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec(Vec<(usize, String)>);

impl FilterSpec {
    pub fn new(pairs: Vec<(usize, String)>) -> Self {
        FilterSpec(pairs)
    }

    pub fn matches(&self, ip: &Address) -> bool {
        self.0.iter().all(|(pos, v)| ip.get(*pos) == Some(v.as_str()))
    }
}

// "46,70" -> [(0, "46"), (1, "70")]
// "*,46"  -> [(1, "46")]
// "3=5"   -> [(3, "5")]
// nothing is trimmed, " 0=5" is an error and "0= 5" matches " 5"
impl FromStr for FilterSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(FilterSpec::default());
        }
        let mut pairs = vec![];
        for (i, term) in s.split(',').enumerate() {
            if term == "*" {
                continue;
            }
            match term.split_once('=') {
                Some((pos, v)) => {
                    let pos = pos
                        .parse::<usize>()
                        .map_err(|_| Error::Query(format!("bad position in {:?}", term)))?;
                    pairs.push((pos, v.to_string()));
                }
                None => pairs.push((i, term.to_string())),
            }
        }
        Ok(FilterSpec::new(pairs))
    }
}

pub fn filter_at(pool: &[Address], spec: &FilterSpec) -> Pool {
    pool.iter().filter(|ip| spec.matches(ip)).cloned().collect()
}

pub fn filter_any(pool: &[Address], value: &str) -> Pool {
    pool.iter()
        .filter(|ip| ip.components().iter().any(|c| c == value))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    At(FilterSpec),
    Any(String),
}

impl Query {
    pub fn apply(&self, pool: &[Address]) -> Pool {
        match self {
            Query::At(spec) => filter_at(pool, spec),
            Query::Any(v) => filter_any(pool, v),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::At(spec) => write!(
                f,
                "filter({})",
                spec.0.iter().map(|(p, v)| format!("{}={}", p, v)).join(",")
            ),
            Query::Any(v) => write!(f, "filter_any({})", v),
        }
    }
}
