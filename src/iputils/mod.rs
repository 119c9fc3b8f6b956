// Utilities for ipfilter
//   - split: delimiter tokenizer, never collapses empty fields
//   - Address: ordered components of one dotted input line
//     - no arity or 0..=255 checks, "1..2" and "" are valid addresses
//   - read_pool: one Address per input line, only the first TAB field is used

pub mod filter;
pub mod order;

use std::fmt;
use std::io::BufRead;

use itertools::Itertools;

use crate::error::Result;

// ("",  '.') -> [""]
// ("11", '.') -> ["11"]
// ("..", '.') -> ["", "", ""]
// ("11.", '.') -> ["11", ""]
// (".11", '.') -> ["", "11"]
// ("11.22", '.') -> ["11", "22"]
pub fn split(text: &str, d: char) -> Vec<String> {
    text.split(d).map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(Vec<String>);

impl Address {
    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, pos: usize) -> Option<&str> {
        self.0.get(pos).map(|c| c.as_str())
    }
}

impl From<Vec<String>> for Address {
    fn from(components: Vec<String>) -> Self {
        Address(components)
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Address(split(text, '.'))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

pub type Pool = Vec<Address>;

// "1.2.3.4\t5\t6" -> ["1", "2", "3", "4"]
pub fn parse_line(line: &str) -> Address {
    // split always yields at least one field
    let field = line.split('\t').next().unwrap_or_default();
    Address::from(split(field, '.'))
}

pub fn read_pool<R: BufRead>(reader: R) -> Result<Pool> {
    let mut pool = Pool::new();
    for line in reader.lines() {
        pool.push(parse_line(&line?));
    }
    Ok(pool)
}
