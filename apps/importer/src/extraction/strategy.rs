use crate::extraction::segmenter::SegmentedDocument;

/// Result of a single field extractor: a value, or a recorded miss.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Found { value: T, strategy: &'static str },
    Missing { reason: String },
}

impl<T> FieldOutcome<T> {
    pub fn missing(reason: impl Into<String>) -> Self {
        FieldOutcome::Missing {
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FieldOutcome::Found { value, .. } => Some(value),
            FieldOutcome::Missing { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            FieldOutcome::Found { value, .. } => Some(value),
            FieldOutcome::Missing { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldOutcome::Found { .. })
    }
}

/// One matching attempt in a cascade.
pub struct Strategy<T> {
    pub name: &'static str,
    pub run: fn(&SegmentedDocument) -> Option<T>,
}

/// Runs strategies in order and returns the first hit. Later strategies are
/// not evaluated once one succeeds.
pub fn first_match<T>(
    field: &str,
    doc: &SegmentedDocument,
    strategies: &[Strategy<T>],
) -> FieldOutcome<T> {
    for strategy in strategies {
        if let Some(value) = (strategy.run)(doc) {
            tracing::debug!("{field}: matched by '{}' strategy", strategy.name);
            return FieldOutcome::Found {
                value,
                strategy: strategy.name,
            };
        }
    }
    let tried = strategies
        .iter()
        .map(|s| s.name)
        .collect::<Vec<_>>()
        .join(", ");
    FieldOutcome::missing(format!("No {field} found (tried: {tried})"))
}
