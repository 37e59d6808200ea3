//! Keyword intent classifier.
//!
//! Maps raw user text to a response template by walking the category table
//! in priority order. First match wins; no match yields the general template.

use crate::catalog::{CategoryId, CategoryTable};

/// Outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: CategoryId,
    /// Table position of the matched category, `None` for the fallback.
    pub priority: Option<usize>,
    pub template: &'static str,
}

impl Classification {
    pub fn is_fallback(&self) -> bool {
        self.priority.is_none()
    }
}

/// Rule-based classifier over an ordered [`CategoryTable`].
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    table: CategoryTable,
}

impl IntentClassifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Classify a raw user message.
    ///
    /// Input is lowercased, then each category is tested in table order.
    /// Never fails: unmatched input resolves to the fallback template.
    pub fn classify(&self, input: &str) -> Classification {
        let normalized = input.to_lowercase();

        for (priority, category) in self.table.categories().iter().enumerate() {
            if category.matches(&normalized) {
                tracing::debug!(category = %category.id, priority, "Message classified");
                return Classification {
                    category: category.id,
                    priority: Some(priority),
                    template: category.template,
                };
            }
        }

        tracing::debug!("No category matched, using general response");
        Classification {
            category: CategoryId::General,
            priority: None,
            template: self.table.fallback(),
        }
    }
}
