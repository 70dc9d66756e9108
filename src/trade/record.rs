use crate::trade::AliasTable;

/// Source values are reported in thousands of currency units.
pub const UNIT_SCALE: f64 = 1000.0;

/// Commodity group row carrying a destination's grand total.
pub const TOTAL_SENTINEL: &str = "Total merchandise trade (0 - 9)";

/// One export row: the focal country's exports to `country` for a year and
/// commodity group. Tables are not deduplicated.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRecord {
    pub country: String,
    pub year: String,
    pub commodity_group: String,
    pub value: f64,
}

impl TradeRecord {
    pub fn new(
        country: impl Into<String>,
        year: impl Into<String>,
        commodity_group: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            country: country.into(),
            year: year.into(),
            commodity_group: commodity_group.into(),
            value: sanitize(value),
        }
    }

    /// Build from raw text fields; a non-numeric value becomes zero.
    pub fn from_text(country: &str, year: &str, commodity_group: &str, value: &str) -> Self {
        Self::new(country, year.trim(), commodity_group, parse_numeric(value))
    }

    /// Value converted to base currency units.
    #[inline]
    pub fn scaled_value(&self) -> f64 {
        self.value * UNIT_SCALE
    }

    pub fn is_total(&self) -> bool {
        self.commodity_group == TOTAL_SENTINEL
    }
}

/// Lenient numeric conversion: anything unparsable or non-finite is zero.
pub fn parse_numeric(text: &str) -> f64 {
    text.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
}

#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Display label for a commodity group: the text before the first `(`.
pub fn category_label(group: &str) -> &str {
    group.split('(').next().unwrap_or(group).trim()
}

/// Distinct commodity groups in first-seen order, total sentinel excluded.
pub fn categories(records: &[TradeRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .filter(|r| !r.is_total())
        .filter(|r| seen.insert(r.commodity_group.as_str()))
        .map(|r| r.commodity_group.clone())
        .collect()
}

/// Distinct years sorted numerically (non-numeric years sort first).
pub fn years(records: &[TradeRecord]) -> Vec<String> {
    let mut years: Vec<String> = records.iter().map(|r| r.year.clone()).collect();
    years.sort_by(|a, b| parse_numeric(a).total_cmp(&parse_numeric(b)).then_with(|| a.cmp(b)));
    years.dedup();
    years
}

/// Exports to one destination feature for a year, in base units.
///
/// Every trade name the alias table maps onto `geo_name` contributes, the
/// same rows an arc to that feature sums. Each contributing name counts its
/// total row when present, otherwise the sum of its commodity groups.
pub fn destination_total(
    records: &[TradeRecord],
    aliases: &AliasTable,
    geo_name: &str,
    year: &str,
) -> f64 {
    // (trade name, total row, group sum) in first-seen order
    let mut parts: Vec<(&str, Option<f64>, f64)> = Vec::new();
    let rows = records
        .iter()
        .filter(|r| r.year == year && aliases.geo_name(&r.country) == geo_name);
    for r in rows {
        let i = match parts.iter().position(|(name, ..)| *name == r.country) {
            Some(i) => i,
            None => {
                parts.push((r.country.as_str(), None, 0.0));
                parts.len() - 1
            }
        };
        let (_, total_row, group_sum) = &mut parts[i];
        if r.is_total() {
            *total_row.get_or_insert(0.0) += r.scaled_value();
        } else {
            *group_sum += r.scaled_value();
        }
    }
    parts.iter().map(|(_, total_row, group_sum)| total_row.unwrap_or(*group_sum)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_lenient() {
        assert_eq!(parse_numeric("12.5"), 12.5);
        assert_eq!(parse_numeric(" 7 "), 7.0);
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric(".."), 0.0);
        assert_eq!(parse_numeric("NaN"), 0.0);
        assert_eq!(parse_numeric("inf"), 0.0);
    }

    #[test]
    fn test_from_text() {
        let r = TradeRecord::from_text("France", "2023 ", "Food (0)", "n/a");
        assert_eq!(r.year, "2023");
        assert_eq!(r.value, 0.0);
        assert_eq!(TradeRecord::from_text("France", "2023", "Food", "3").scaled_value(), 3000.0);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("Food and live animals (0)"), "Food and live animals");
        assert_eq!(category_label("Machinery"), "Machinery");
    }

    #[test]
    fn test_categories_and_years() {
        let records = vec![
            TradeRecord::new("France", "2023", "Food", 1.0),
            TradeRecord::new("France", "2001", TOTAL_SENTINEL, 1.0),
            TradeRecord::new("USA", "2010", "Fuel", 1.0),
            TradeRecord::new("USA", "2023", "Food", 1.0),
        ];
        assert_eq!(categories(&records), vec!["Food", "Fuel"]);
        assert_eq!(years(&records), vec!["2001", "2010", "2023"]);
    }

    #[test]
    fn test_destination_total_prefers_total_row() {
        let aliases = AliasTable::default();
        let mut records = vec![
            TradeRecord::new("France", "2023", "Food", 2.0),
            TradeRecord::new("France", "2023", "Fuel", 3.0),
            TradeRecord::new("USA", "2023", "Food", 9.0),
        ];
        assert_eq!(destination_total(&records, &aliases, "France", "2023"), 5000.0);
        records.push(TradeRecord::new("France", "2023", TOTAL_SENTINEL, 6.0));
        assert_eq!(destination_total(&records, &aliases, "France", "2023"), 6000.0);
        assert_eq!(destination_total(&records, &aliases, "France", "1999"), 0.0);
        let usa = destination_total(&records, &aliases, "United States of America", "2023");
        assert_eq!(usa, 9000.0);
    }

    #[test]
    fn test_destination_total_sums_merged_constituents() {
        let aliases = AliasTable::default();
        let mut records = vec![
            TradeRecord::new("Great Britain", "2023", "Food", 30.0),
            TradeRecord::new("Northern Ireland", "2023", "Food", 10.0),
            TradeRecord::new("Northern Ireland", "2022", "Food", 99.0),
        ];
        assert_eq!(destination_total(&records, &aliases, "United Kingdom", "2023"), 40_000.0);

        // A constituent's total row replaces only its own groups
        records.push(TradeRecord::new("Great Britain", "2023", TOTAL_SENTINEL, 35.0));
        assert_eq!(destination_total(&records, &aliases, "United Kingdom", "2023"), 45_000.0);
    }
}
