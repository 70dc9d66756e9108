use std::collections::HashMap;

/// Trade-table names that differ from the boundary dataset's names.
/// The first trade name registered for a geo name is the one reported back.
const STANDARD_ALIASES: &[(&str, &str)] = &[
    ("USA", "United States of America"),
    ("Great Britain", "United Kingdom"),
    ("Northern Ireland", "United Kingdom"),
    ("Czech Republic", "Czechia"),
    ("Russian Federation", "Russia"),
    ("Korea, Republic of", "South Korea"),
    ("Bosnia and Herzegovina", "Bosnia and Herz."),
    ("Dominican Republic", "Dominican Rep."),
    ("Central African Republic", "Central African Rep."),
    ("Ivory Coast", "Côte d'Ivoire"),
];

/// Bidirectional mapping between trade-record country names and geo feature
/// names, consulted by aggregation and by click selection alike.
#[derive(Clone, Debug)]
pub struct AliasTable {
    to_geo: HashMap<String, String>,
    to_trade: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self { to_geo: HashMap::new(), to_trade: HashMap::new() }
    }

    /// Register `trade` as an alias of `geo`. Several trade names may share a
    /// geo name (constituent countries merged into one feature).
    pub fn with_alias(mut self, trade: impl Into<String>, geo: impl Into<String>) -> Self {
        let (trade, geo) = (trade.into(), geo.into());
        self.to_trade.entry(geo.clone()).or_insert_with(|| trade.clone());
        self.to_geo.insert(trade, geo);
        self
    }

    /// Geo feature name for a trade-record country name.
    pub fn geo_name<'a>(&'a self, trade_name: &'a str) -> &'a str {
        self.to_geo.get(trade_name).map(String::as_str).unwrap_or(trade_name)
    }

    /// Trade-record country name for a geo feature name.
    pub fn trade_name<'a>(&'a self, geo_name: &'a str) -> &'a str {
        self.to_trade.get(geo_name).map(String::as_str).unwrap_or(geo_name)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        STANDARD_ALIASES
            .iter()
            .fold(Self::empty(), |table, &(trade, geo)| table.with_alias(trade, geo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.geo_name("USA"), "United States of America");
        assert_eq!(aliases.trade_name("United States of America"), "USA");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.geo_name("France"), "France");
        assert_eq!(aliases.trade_name("France"), "France");
    }

    #[test]
    fn test_constituent_merge_reports_first_alias() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.geo_name("Great Britain"), "United Kingdom");
        assert_eq!(aliases.geo_name("Northern Ireland"), "United Kingdom");
        assert_eq!(aliases.trade_name("United Kingdom"), "Great Britain");
    }
}
