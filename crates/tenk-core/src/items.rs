//! The closed enumeration of 10-K section labels and their static registry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 10-K section label, e.g. `Item 1A`.
///
/// Closed enumeration: `Item 14` does not exist in Form 10-K and is
/// intentionally absent, matching SEC's own numbering gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemName {
    Item1,
    Item1A,
    Item1B,
    Item1C,
    Item2,
    Item3,
    Item4,
    Item5,
    Item6,
    Item7,
    Item7A,
    Item8,
    Item9,
    Item9A,
    Item9B,
    Item9C,
    Item10,
    Item11,
    Item12,
    Item13,
    Item15,
    Item16,
}

impl ItemName {
    /// All items in canonical document order.
    pub const ALL: &'static [ItemName] = &[
        ItemName::Item1,
        ItemName::Item1A,
        ItemName::Item1B,
        ItemName::Item1C,
        ItemName::Item2,
        ItemName::Item3,
        ItemName::Item4,
        ItemName::Item5,
        ItemName::Item6,
        ItemName::Item7,
        ItemName::Item7A,
        ItemName::Item8,
        ItemName::Item9,
        ItemName::Item9A,
        ItemName::Item9B,
        ItemName::Item9C,
        ItemName::Item10,
        ItemName::Item11,
        ItemName::Item12,
        ItemName::Item13,
        ItemName::Item15,
        ItemName::Item16,
    ];

    /// Display form used in TOC matching and as the `item` field stamped onto nodes/chunks,
    /// e.g. `Item 1A`.
    pub fn label(self) -> &'static str {
        match self {
            ItemName::Item1 => "Item 1",
            ItemName::Item1A => "Item 1A",
            ItemName::Item1B => "Item 1B",
            ItemName::Item1C => "Item 1C",
            ItemName::Item2 => "Item 2",
            ItemName::Item3 => "Item 3",
            ItemName::Item4 => "Item 4",
            ItemName::Item5 => "Item 5",
            ItemName::Item6 => "Item 6",
            ItemName::Item7 => "Item 7",
            ItemName::Item7A => "Item 7A",
            ItemName::Item8 => "Item 8",
            ItemName::Item9 => "Item 9",
            ItemName::Item9A => "Item 9A",
            ItemName::Item9B => "Item 9B",
            ItemName::Item9C => "Item 9C",
            ItemName::Item10 => "Item 10",
            ItemName::Item11 => "Item 11",
            ItemName::Item12 => "Item 12",
            ItemName::Item13 => "Item 13",
            ItemName::Item15 => "Item 15",
            ItemName::Item16 => "Item 16",
        }
    }

    /// Parses a normalized TOC key such as `"1"`, `"1A"`, `"7A"` into an [`ItemName`].
    /// Returns `None` for numbers SEC does not use (e.g. `14`) or unknown letters.
    pub fn from_key(key: &str) -> Option<ItemName> {
        ItemName::ALL.iter().copied().find(|item| item.key() == key)
    }

    /// The bare `<num><letter?>` key, e.g. `"1A"`, used when matching TOC anchor text.
    pub fn key(self) -> &'static str {
        self.label().trim_start_matches("Item ").trim()
    }

    pub fn info(self) -> &'static ItemInfo {
        ITEMS.get(&self).expect("every ItemName has a registry entry")
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Static descriptive metadata for one [`ItemName`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub item: &'static str,
    pub technical_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Process-wide immutable registry of item metadata, initialized once on first access.
pub static ITEMS: Lazy<BTreeMap<ItemName, ItemInfo>> = Lazy::new(|| {
    use ItemName::*;
    let mut m = BTreeMap::new();
    m.insert(
        Item1,
        ItemInfo {
            item: "Item 1",
            technical_name: "business",
            display_name: "Business",
            description: "Overview of the company's operations, products, services, and strategy",
        },
    );
    m.insert(
        Item1A,
        ItemInfo {
            item: "Item 1A",
            technical_name: "risk_factors",
            display_name: "Risk Factors",
            description: "Material risks that could affect the company's business or financial condition",
        },
    );
    m.insert(
        Item1B,
        ItemInfo {
            item: "Item 1B",
            technical_name: "unresolved_staff_comments",
            display_name: "Unresolved Staff Comments",
            description: "Comments from the SEC staff that remain unresolved",
        },
    );
    m.insert(
        Item1C,
        ItemInfo {
            item: "Item 1C",
            technical_name: "cybersecurity",
            display_name: "Cybersecurity",
            description: "Company cybersecurity risk management, strategy, and governance",
        },
    );
    m.insert(
        Item2,
        ItemInfo {
            item: "Item 2",
            technical_name: "properties",
            display_name: "Properties",
            description: "Description of principal properties owned or leased",
        },
    );
    m.insert(
        Item3,
        ItemInfo {
            item: "Item 3",
            technical_name: "legal_proceedings",
            display_name: "Legal Proceedings",
            description: "Material pending legal proceedings",
        },
    );
    m.insert(
        Item4,
        ItemInfo {
            item: "Item 4",
            technical_name: "mine_safety",
            display_name: "Mine Safety Disclosures",
            description: "Mine safety information (typically not applicable)",
        },
    );
    m.insert(
        Item5,
        ItemInfo {
            item: "Item 5",
            technical_name: "market_information",
            display_name: "Market for Registrant's Common Equity",
            description: "Market information, dividends, and issuer purchases of equity securities",
        },
    );
    m.insert(
        Item6,
        ItemInfo {
            item: "Item 6",
            technical_name: "selected_financial_data",
            display_name: "Selected Financial Data",
            description: "Historical financial highlights (largely deprecated but still present)",
        },
    );
    m.insert(
        Item7,
        ItemInfo {
            item: "Item 7",
            technical_name: "mdna",
            display_name: "Management's Discussion and Analysis",
            description: "Management's perspective on financial condition and results of operations",
        },
    );
    m.insert(
        Item7A,
        ItemInfo {
            item: "Item 7A",
            technical_name: "quantitative_market_risk",
            display_name: "Quantitative and Qualitative Disclosures About Market Risk",
            description: "Exposure to market risk such as interest rates, FX, or commodity prices",
        },
    );
    m.insert(
        Item8,
        ItemInfo {
            item: "Item 8",
            technical_name: "financial_statements",
            display_name: "Financial Statements and Supplementary Data",
            description: "Audited financial statements and notes",
        },
    );
    m.insert(
        Item9,
        ItemInfo {
            item: "Item 9",
            technical_name: "accounting_changes",
            display_name: "Changes in and Disagreements with Accountants",
            description: "Changes in accountants and accounting disagreements",
        },
    );
    m.insert(
        Item9A,
        ItemInfo {
            item: "Item 9A",
            technical_name: "controls_and_procedures",
            display_name: "Controls and Procedures",
            description: "Disclosure controls and internal control over financial reporting",
        },
    );
    m.insert(
        Item9B,
        ItemInfo {
            item: "Item 9B",
            technical_name: "other_information",
            display_name: "Other Information",
            description: "Information not required elsewhere",
        },
    );
    m.insert(
        Item9C,
        ItemInfo {
            item: "Item 9C",
            technical_name: "foreign_jurisdiction_disclosure",
            display_name: "Disclosure Regarding Foreign Jurisdictions",
            description: "Disclosure related to foreign jurisdiction restrictions (newer item)",
        },
    );
    m.insert(
        Item10,
        ItemInfo {
            item: "Item 10",
            technical_name: "directors_and_officers",
            display_name: "Directors, Executive Officers and Corporate Governance",
            description: "Information about directors, officers, and governance",
        },
    );
    m.insert(
        Item11,
        ItemInfo {
            item: "Item 11",
            technical_name: "executive_compensation",
            display_name: "Executive Compensation",
            description: "Compensation of executive officers",
        },
    );
    m.insert(
        Item12,
        ItemInfo {
            item: "Item 12",
            technical_name: "security_ownership",
            display_name: "Security Ownership of Certain Beneficial Owners",
            description: "Equity ownership by management and major shareholders",
        },
    );
    m.insert(
        Item13,
        ItemInfo {
            item: "Item 13",
            technical_name: "related_transactions",
            display_name: "Certain Relationships and Related Transactions",
            description: "Related-party transactions",
        },
    );
    m.insert(
        Item15,
        ItemInfo {
            item: "Item 15",
            technical_name: "exhibits",
            display_name: "Exhibits and Financial Statement Schedules",
            description: "List of exhibits and schedules",
        },
    );
    m.insert(
        Item16,
        ItemInfo {
            item: "Item 16",
            technical_name: "form_10k_summary",
            display_name: "Form 10-K Summary",
            description: "Optional summary of the Form 10-K",
        },
    );
    m
});
