//! Deterministic corpora for the `diffattr` benchmarks.
//!
//! Every corpus renders a reference and a test JSON document from a fixed
//! recipe, so benchmark runs are comparable across machines without
//! shipping fixture files.
//!
//! # Examples
//!
//! ```
//! let corpus = diffattr_benches::available_corpora()
//!     .iter()
//!     .find(|corpus| corpus.name() == "wide-list")
//!     .expect("registered corpus");
//! let dataset = corpus.load()?;
//! assert!(dataset.difference_count()? > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fmt::Write as _;

use diffattr_core::{compare, report, DiffError, ParseError, Value};

/// A named recipe for a pair of documents.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    shape: Shape,
}

#[derive(Clone, Copy, Debug)]
enum Shape {
    /// One object with many scalar members, a few of them changed.
    FlatMap { keys: usize, every: usize },
    /// Objects nested `depth` levels deep, `fanout` children each.
    NestedConfig { depth: usize, fanout: usize },
    /// A long list of integers with periodic substitutions.
    WideList { len: usize, every: usize },
}

const CORPORA: [Corpus; 3] = [
    Corpus { name: "flat-map", shape: Shape::FlatMap { keys: 2_000, every: 97 } },
    Corpus { name: "nested-config", shape: Shape::NestedConfig { depth: 5, fanout: 5 } },
    Corpus { name: "wide-list", shape: Shape::WideList { len: 20_000, every: 100 } },
];

/// Lists the registered corpora.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

impl Corpus {
    /// Returns the corpus name used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size in bytes of both rendered documents together.
    #[must_use]
    pub fn fixture_bytes(&self) -> usize {
        let (reference, test) = self.render();
        reference.len() + test.len()
    }

    /// Renders both documents and loads them into values.
    pub fn load(&self) -> Result<Dataset, ParseError> {
        let (reference, test) = self.render();
        Ok(Dataset {
            reference: Value::from_json_str(&reference)?,
            test: Value::from_json_str(&test)?,
        })
    }

    fn render(&self) -> (String, String) {
        match self.shape {
            Shape::FlatMap { keys, every } => {
                (flat_map(keys, every, false), flat_map(keys, every, true))
            }
            Shape::NestedConfig { depth, fanout } => {
                (nested(depth, fanout, false), nested(depth, fanout, true))
            }
            Shape::WideList { len, every } => {
                (wide_list(len, every, false), wide_list(len, every, true))
            }
        }
    }
}

/// A loaded pair of documents.
#[derive(Clone, Debug)]
pub struct Dataset {
    reference: Value,
    test: Value,
}

impl Dataset {
    /// Returns the reference value.
    #[must_use]
    pub fn reference(&self) -> &Value {
        &self.reference
    }

    /// Returns the test value.
    #[must_use]
    pub fn test(&self) -> &Value {
        &self.test
    }

    /// Counts the differences by draining the lazy traversal.
    pub fn difference_count(&self) -> Result<usize, DiffError> {
        compare(&self.reference, &self.test).try_fold(0, |count, item| item.map(|_| count + 1))
    }

    /// Renders the plain-text report.
    pub fn report(&self) -> Result<Option<String>, DiffError> {
        report(&self.reference, &self.test)
    }
}

fn flat_map(keys: usize, every: usize, changed: bool) -> String {
    let mut out = String::from("{");
    for idx in 0..keys {
        if idx > 0 {
            out.push(',');
        }
        let value = if changed && idx % every == 0 { idx * 2 } else { idx };
        let _ = write!(out, "\"key{idx:05}\":{value}");
    }
    out.push('}');
    out
}

fn nested(depth: usize, fanout: usize, changed: bool) -> String {
    let mut out = String::new();
    write_nested(&mut out, depth, fanout, changed, 0);
    out
}

fn write_nested(out: &mut String, depth: usize, fanout: usize, changed: bool, seed: usize) {
    if depth == 0 {
        let flag = changed && seed % 7 == 0;
        let _ = write!(out, "{{\"id\":{seed},\"enabled\":{flag},\"ratio\":{}.5}}", seed % 10);
        return;
    }
    out.push_str("{\"name\":");
    let _ = write!(out, "\"node{seed}\",\"children\":[");
    for child in 0..fanout {
        if child > 0 {
            out.push(',');
        }
        write_nested(out, depth - 1, fanout, changed, seed * fanout + child + 1);
    }
    out.push_str("]}");
}

fn wide_list(len: usize, every: usize, changed: bool) -> String {
    let mut out = String::from("[");
    for idx in 0..len {
        if idx > 0 {
            out.push(',');
        }
        let value = if changed && idx % every == 0 { -(idx as i64) - 1 } else { idx as i64 };
        let _ = write!(out, "{value}");
    }
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpora_load_and_differ() {
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("corpus loads");
            assert_ne!(dataset.reference(), dataset.test(), "{}", corpus.name());
            assert!(dataset.difference_count().expect("comparable") > 1, "{}", corpus.name());
        }
    }

    #[test]
    fn wide_list_changes_every_hundredth_element() {
        let corpus = available_corpora()
            .iter()
            .find(|corpus| corpus.name() == "wide-list")
            .expect("registered corpus");
        let dataset = corpus.load().expect("corpus loads");
        // Root record plus one per substituted element.
        assert_eq!(dataset.difference_count().unwrap(), 1 + 20_000 / 100);
    }
}
