// src/schema/mod.rs
use std::fmt;

use crate::utils::error::SchemaError;

// The target site has no machine-readable schema, so the field lists below
// are hand-curated per tab. Labels double as both the match pattern and the
// row key in the report, and must stay unique across all tabs.

const PROPERTY_FIELDS: &[&str] = &[
    "Location",
    "County",
    "Assessor Parcel Number",
    "Radar ID",
    "Lat/Lon",
    "Subdivision",
    "Congressional District",
    "School Tax District",
    "Census Tract",
    "Census Block",
    "Carrier Route",
    "Tax Rate Area",
    "Legal Book/Page/Block/Lot",
    "Legal Description",
    "Lot SqFt",
    "Lot Acres",
    "Zoning",
    "View Type",
    "Flood Zone Code",
    "Flood Risk",
    "FEMA Map Date",
    "Year Built",
    "Square Feet",
    "Beds",
    "Baths",
    "Units",
    "Stories",
    "Rooms",
    "Pool",
    "Fireplace",
    "Air Conditioning",
    "Heating",
    "Improvement Condition",
    "Building Quality",
    "Assessed Land Value",
    "Assessed Improvements",
    "Annual Taxes",
    "Tax Payment 1 Amount/Status",
    "Tax Payment 2 Amount/Status",
    "Taxpayer",
    "Homeowner Tax Exemption",
];

const CONTACTS_FIELDS: &[&str] = &[
    "Contact Name",
    "Phone Number",
    "Email",
    "Mailing Address",
    "Primary Contact",
    "Ownership Role",
    "Gender",
    "Age",
];

const VALUE_EQUITY_FIELDS: &[&str] = &[
    "Estimated Value",
    "Assessed Value",
    "Estimated Open Loans Balance",
    "Estimated Equity",
    "Purchase Date",
    "Purchase Amount",
    "Market Value",
    "Rent Break Even",
    "Market Rent",
    "HUD Fair Market Rent",
];

const TRANSACTIONS_FIELDS: &[&str] = &[
    "Transaction Type",
    "Sale Date",
    "Sale Price",
    "Buyer",
    "Seller",
];

const LISTINGS_FIELDS: &[&str] = &[
    "Listing Price",
    "Listed Date",
    "Price History",
    "Agent",
];

/// The five fixed detail tabs of a property record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Property,
    Contacts,
    ValueEquity,
    Transactions,
    Listings,
}

impl Tab {
    /// All tabs, in the order they are visited and written to the report.
    pub const ALL: [Tab; 5] = [
        Tab::Property,
        Tab::Contacts,
        Tab::ValueEquity,
        Tab::Transactions,
        Tab::Listings,
    ];

    /// Display name as rendered in the site's tab strip (and used as the
    /// sheet name in the report).
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Property => "Property",
            Tab::Contacts => "Contacts",
            Tab::ValueEquity => "Value & Equity",
            Tab::Transactions => "Transactions",
            Tab::Listings => "Listings",
        }
    }

    /// Resolves a tab from its display name. An unrecognized name is a
    /// configuration error, fatal to the current invocation.
    #[allow(dead_code)]
    pub fn from_name(name: &str) -> Result<Tab, SchemaError> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.name() == name)
            .ok_or_else(|| SchemaError::UnknownTab(name.to_string()))
    }

    /// The ordered list of field labels to extract for this tab.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Tab::Property => PROPERTY_FIELDS,
            Tab::Contacts => CONTACTS_FIELDS,
            Tab::ValueEquity => VALUE_EQUITY_FIELDS,
            Tab::Transactions => TRANSACTIONS_FIELDS,
            Tab::Listings => LISTINGS_FIELDS,
        }
    }

    /// XPath locator for the tab's navigation control. The tab strip
    /// carries no stable ids, so controls are located by their visible text.
    pub fn nav_xpath(&self) -> String {
        format!(r#"//*[text()="{}"]"#, self.name())
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn schema_sizes_match_documented_counts() {
        assert_eq!(Tab::Property.fields().len(), 41);
        assert_eq!(Tab::Contacts.fields().len(), 8);
        assert_eq!(Tab::ValueEquity.fields().len(), 10);
        assert_eq!(Tab::Transactions.fields().len(), 5);
        assert_eq!(Tab::Listings.fields().len(), 4);
    }

    #[test]
    fn schemas_are_non_empty_and_order_stable() {
        for tab in Tab::ALL {
            let first = tab.fields();
            let second = tab.fields();
            assert!(!first.is_empty(), "empty schema for {}", tab);
            assert_eq!(first, second, "field order changed for {}", tab);
        }
        // Spot-check declared ordering
        assert_eq!(Tab::Property.fields()[0], "Location");
        assert_eq!(Tab::Transactions.fields()[4], "Seller");
        assert_eq!(Tab::Listings.fields()[0], "Listing Price");
    }

    #[test]
    fn labels_are_unique_across_all_tabs() {
        let mut seen = HashSet::new();
        for tab in Tab::ALL {
            for label in tab.fields() {
                assert!(seen.insert(*label), "duplicate label across tabs: {}", label);
            }
        }
    }

    #[test]
    fn tab_order_is_fixed() {
        let names: Vec<&str> = Tab::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            ["Property", "Contacts", "Value & Equity", "Transactions", "Listings"]
        );
    }

    #[test]
    fn from_name_resolves_all_tabs() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_name(tab.name()).unwrap(), tab);
        }
    }

    #[test]
    fn from_name_rejects_unknown_tab() {
        let err = Tab::from_name("Permits").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTab(name) if name == "Permits"));
    }

    #[test]
    fn nav_xpath_targets_visible_text() {
        assert_eq!(Tab::ValueEquity.nav_xpath(), r#"//*[text()="Value & Equity"]"#);
    }
}
