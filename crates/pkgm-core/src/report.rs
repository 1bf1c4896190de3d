//! Per-item results of batch operations

use crate::{Error, Result};

/// Result of one item of a batch.
#[derive(Debug)]
pub struct Outcome<T> {
    /// The identifier or name as requested
    pub name: String,
    pub result: Result<T>,
}

/// Ordered outcomes of a batch operation, one per requested item.
#[derive(Debug)]
pub struct Report<T> {
    outcomes: Vec<Outcome<T>>,
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<T> Report<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, result: Result<T>) {
        self.outcomes.push(Outcome {
            name: name.into(),
            result,
        });
    }

    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<T>> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for `name`, the first if it was requested more than once.
    pub fn get(&self, name: &str) -> Option<&Outcome<T>> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|v| (o.name.as_str(), v)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

impl<T> IntoIterator for Report<T> {
    type Item = Outcome<T>;
    type IntoIter = std::vec::IntoIter<Outcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_do_not_hide_successes() {
        let mut report: Report<u32> = Report::new();
        report.push("a", Ok(1));
        report.push(
            "b",
            Err(Error::NotFound {
                name: "b".to_string(),
            }),
        );
        report.push("c", Ok(3));

        assert_eq!(report.len(), 3);
        assert!(!report.all_succeeded());
        assert_eq!(
            report.succeeded().map(|(n, _)| n).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(report.failed().map(|(n, _)| n).collect::<Vec<_>>(), vec!["b"]);
        assert!(report.get("b").unwrap().result.is_err());
    }
}
