//! Reading raw stat values out of the host page.
//!
//! The host uses generated, versioned class names, so each value is looked
//! up through an ordered list of strategies; the first one that yields a
//! number wins. Nothing here fails: a stat that cannot be read is zero.

use super::stats::{Stat, StatSample};

/// A located stat container.
pub trait StatNode {
    /// Text content of the first descendant matching `selector`.
    fn query_text(&self, selector: &str) -> Option<String>;

    /// Attribute `name` of the first descendant matching `selector`.
    fn query_attr(&self, selector: &str, name: &str) -> Option<String>;
}

/// The page as far as extraction is concerned.
pub trait StatPage {
    type Node: StatNode;

    fn find(&self, selector: &str) -> Option<Self::Node>;
}

/// One way of finding a value element inside a stat container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Substring match on a generated class, e.g. `propertyValue___x1Yz`.
    ClassPattern(&'static str),
    /// A plain class name that older markup revisions used.
    StableClass(&'static str),
    /// An element carrying the value in a data attribute.
    DataAttribute(&'static str),
}

pub const VALUE_LOOKUPS: [Lookup; 3] = [
    Lookup::ClassPattern("[class*=\"propertyValue___\"]"),
    Lookup::StableClass(".propertyValue"),
    Lookup::DataAttribute("data-value"),
];

impl Lookup {
    pub fn read<N: StatNode>(&self, node: &N) -> Option<u64> {
        match *self {
            Lookup::ClassPattern(selector) | Lookup::StableClass(selector) => node
                .query_text(selector)
                .as_deref()
                .and_then(parse_stat_value),
            Lookup::DataAttribute(attr) => {
                let selector = format!("[{attr}]");
                node.query_attr(&selector, attr)
                    .as_deref()
                    .and_then(parse_stat_value)
                    .or_else(|| {
                        node.query_text(&selector)
                            .as_deref()
                            .and_then(parse_stat_value)
                    })
            }
        }
    }
}

/// Selector for the `<li>` that holds one stat, e.g. `li[class*="speed___"]`.
pub fn container_selector(stat: Stat) -> String {
    format!("li[class*=\"{}___\"]", stat.key())
}

/// Leading integer of `text` after removing thousands separators.
/// `"1,234,567"` → 1234567, `" 42 pts"` → 42, `"n/a"` → None.
pub fn parse_stat_value(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

pub fn read_stat<P: StatPage>(page: &P, stat: Stat) -> u64 {
    let Some(container) = page.find(&container_selector(stat)) else {
        return 0;
    };
    VALUE_LOOKUPS
        .iter()
        .find_map(|lookup| lookup.read(&container))
        .unwrap_or(0)
}

pub fn extract_sample<P: StatPage>(page: &P) -> StatSample {
    StatSample::from_fn(|stat| read_stat(page, stat))
}
