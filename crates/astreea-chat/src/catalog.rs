//! Response catalog: the ordered category table and quick-action presets.
//!
//! Each category pairs a list of lowercase keyword fragments with an authored
//! response template. The table is evaluated top to bottom and the first
//! category with a matching fragment wins, so position is priority.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Stable identifier of a response category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    About,
    Specifications,
    Installation,
    MobileApp,
    Warranty,
    Pricing,
    AccessControl,
    LoadBalancing,
    Weather,
    Firmware,
    Connectors,
    SlowCharging,
    Optimization,
    Maintenance,
    StatusLights,
    Troubleshooting,
    /// Fallback response when no table entry matches. Not a table entry.
    General,
    /// The message that seeds every session. Not a table entry.
    Greeting,
}

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::About => "about",
            CategoryId::Specifications => "specifications",
            CategoryId::Installation => "installation",
            CategoryId::MobileApp => "mobile_app",
            CategoryId::Warranty => "warranty",
            CategoryId::Pricing => "pricing",
            CategoryId::AccessControl => "access_control",
            CategoryId::LoadBalancing => "load_balancing",
            CategoryId::Weather => "weather",
            CategoryId::Firmware => "firmware",
            CategoryId::Connectors => "connectors",
            CategoryId::SlowCharging => "slow_charging",
            CategoryId::Optimization => "optimization",
            CategoryId::Maintenance => "maintenance",
            CategoryId::StatusLights => "status_lights",
            CategoryId::Troubleshooting => "troubleshooting",
            CategoryId::General => "general",
            CategoryId::Greeting => "greeting",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single response rule: keyword fragments linked to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    /// Lowercase substrings; the category matches if any one is present.
    pub fragments: &'static [&'static str],
    pub template: &'static str,
}

impl Category {
    /// Test the category predicate against already-lowercased input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.fragments.iter().any(|f| normalized.contains(f))
    }
}

/// Ordered collection of categories plus the fallback template.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
    fallback: &'static str,
}

impl CategoryTable {
    /// Build a table from categories in priority order.
    pub fn new(categories: Vec<Category>, fallback: &'static str) -> Self {
        Self {
            categories,
            fallback,
        }
    }

    /// The built-in Astreea charger support table.
    pub fn builtin() -> Self {
        BUILTIN_TABLE.clone()
    }

    /// Categories in priority order (index 0 is evaluated first).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Table position of a category, which is also its priority.
    pub fn priority_of(&self, id: CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Greeting shown as the first assistant message of every session.
pub const GREETING_TEMPLATE: &str = include_str!("../templates/greeting.txt");

/// Response used when no category matches.
pub const GENERAL_TEMPLATE: &str = include_str!("../templates/general.txt");

static BUILTIN_TABLE: LazyLock<CategoryTable> = LazyLock::new(|| {
    let categories = vec![
        Category {
            id: CategoryId::About,
            fragments: &["astreea", "about", "company"],
            template: include_str!("../templates/about.txt"),
        },
        Category {
            id: CategoryId::Specifications,
            fragments: &["model", "specification", "specs"],
            template: include_str!("../templates/specifications.txt"),
        },
        Category {
            id: CategoryId::Installation,
            fragments: &["installation", "install", "setup"],
            template: include_str!("../templates/installation.txt"),
        },
        Category {
            id: CategoryId::MobileApp,
            fragments: &["app", "mobile", "smartphone"],
            template: include_str!("../templates/mobile_app.txt"),
        },
        Category {
            id: CategoryId::Warranty,
            fragments: &["warranty", "support", "service"],
            template: include_str!("../templates/warranty.txt"),
        },
        Category {
            id: CategoryId::Pricing,
            fragments: &["price", "cost", "buy", "purchase"],
            template: include_str!("../templates/pricing.txt"),
        },
        Category {
            id: CategoryId::AccessControl,
            fragments: &["rfid", "access", "card", "authentication"],
            template: include_str!("../templates/access_control.txt"),
        },
        Category {
            id: CategoryId::LoadBalancing,
            fragments: &["load balancing", "power sharing", "multiple chargers"],
            template: include_str!("../templates/load_balancing.txt"),
        },
        Category {
            id: CategoryId::Weather,
            fragments: &["weather", "outdoor", "ip65", "waterproof"],
            template: include_str!("../templates/weather.txt"),
        },
        Category {
            id: CategoryId::Firmware,
            fragments: &["firmware", "update", "software"],
            template: include_str!("../templates/firmware.txt"),
        },
        Category {
            id: CategoryId::Connectors,
            fragments: &["connector", "cable", "type 2", "plug"],
            template: include_str!("../templates/connectors.txt"),
        },
        Category {
            id: CategoryId::SlowCharging,
            fragments: &["slow", "charging slowly"],
            template: include_str!("../templates/slow_charging.txt"),
        },
        Category {
            id: CategoryId::Optimization,
            fragments: &["optim", "efficiency"],
            template: include_str!("../templates/optimization.txt"),
        },
        // Warranty also lists "service" and wins on position.
        Category {
            id: CategoryId::Maintenance,
            fragments: &["maintenance", "service"],
            template: include_str!("../templates/maintenance.txt"),
        },
        Category {
            id: CategoryId::StatusLights,
            fragments: &["status", "light", "amber", "warning"],
            template: include_str!("../templates/status_lights.txt"),
        },
        Category {
            id: CategoryId::Troubleshooting,
            fragments: &["error", "problem", "issue"],
            template: include_str!("../templates/troubleshooting.txt"),
        },
    ];

    CategoryTable::new(categories, GENERAL_TEMPLATE)
});

// =============================================================================
// Quick actions
// =============================================================================

/// Icon grouping for a quick-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickActionKind {
    Troubleshooting,
    Optimization,
    Maintenance,
}

/// A preset question offered by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub text: &'static str,
    pub kind: QuickActionKind,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        text: "Why is my charger running slowly?",
        kind: QuickActionKind::Troubleshooting,
    },
    QuickAction {
        text: "How can I optimize charging efficiency?",
        kind: QuickActionKind::Optimization,
    },
    QuickAction {
        text: "When should I schedule maintenance?",
        kind: QuickActionKind::Maintenance,
    },
    QuickAction {
        text: "What does the amber status light mean?",
        kind: QuickActionKind::Troubleshooting,
    },
];
