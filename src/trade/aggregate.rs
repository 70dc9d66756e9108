use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geo::{CountryCatalog, LonLat};
use crate::trade::alias::AliasTable;
use crate::trade::record::{category_label, TradeRecord};

/// Categories below this share of the yearly total merge into "other".
pub const OTHER_THRESHOLD: f64 = 0.02;

/// Id of the synthetic bucket absorbing small categories.
pub const OTHER_ID: &str = "__other__";

/// Host-supplied filter, matched exactly against record fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub category: String,
    pub year: String,
}

impl Filter {
    pub fn new(category: impl Into<String>, year: impl Into<String>) -> Self {
        Self { category: category.into(), year: year.into() }
    }
}

/// Weighted great-circle flow from the focal country to one destination.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowArc {
    /// Geo feature name of the destination.
    pub destination: String,
    pub origin: LonLat,
    pub dest: LonLat,
    pub raw_value: f64,
    /// `raw_value / max(raw_value)` over the current set, in [0, 1].
    pub normalized_weight: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Category,
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryNode {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub kind: NodeKind,
}

/// Directed link between node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Root (focal country) linked to each category node. Node 0 is the root when
/// the tree is non-empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryTree {
    pub nodes: Vec<CategoryNode>,
    pub links: Vec<CategoryLink>,
}

impl CategoryTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Sum of link values touching a node.
    pub fn flow_through(&self, node: usize) -> f64 {
        self.links
            .iter()
            .filter(|l| l.source == node || l.target == node)
            .map(|l| l.value)
            .sum()
    }
}

/// Turns the flat record table into arcs and the category breakdown.
/// Pure: the same table and filter always produce identical output.
pub struct Aggregator<'a> {
    countries: &'a CountryCatalog,
    aliases: &'a AliasTable,
    focal: &'a str,
}

impl<'a> Aggregator<'a> {
    pub fn new(countries: &'a CountryCatalog, aliases: &'a AliasTable, focal: &'a str) -> Self {
        Self { countries, aliases, focal }
    }

    /// Arcs for one (category, year). Destinations are summed across
    /// duplicate rows and alias merges, in first-seen order. Records whose
    /// country has no boundary feature are skipped without error.
    pub fn arcs(&self, records: &[TradeRecord], filter: &Filter) -> Vec<FlowArc> {
        let Some(origin) = self.countries.find_by_name(self.focal).map(|f| f.centroid()) else {
            warn!(focal = self.focal, "focal country has no boundary feature; no arcs");
            return Vec::new();
        };

        let mut arcs: Vec<FlowArc> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut missed = 0usize;

        let filtered = records
            .iter()
            .filter(|r| r.commodity_group == filter.category && r.year == filter.year);

        for record in filtered {
            let geo_name = self.aliases.geo_name(&record.country);
            if geo_name == self.focal {
                continue;
            }
            let Some(feature) = self.countries.find_by_name(geo_name) else {
                missed += 1;
                continue;
            };
            let raw = record.scaled_value();
            match index.get(feature.name()) {
                Some(&i) => arcs[i].raw_value += raw,
                None => {
                    index.insert(feature.name(), arcs.len());
                    arcs.push(FlowArc {
                        destination: feature.name().to_string(),
                        origin,
                        dest: feature.centroid(),
                        raw_value: raw,
                        normalized_weight: 0.0,
                    });
                }
            }
        }

        let max = arcs.iter().map(|a| a.raw_value).fold(0.0_f64, f64::max);
        for arc in &mut arcs {
            arc.normalized_weight = if max > 0.0 {
                (arc.raw_value / max).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }

        debug!(
            category = %filter.category,
            year = %filter.year,
            arcs = arcs.len(),
            lookup_misses = missed,
            "aggregated arcs"
        );
        arcs
    }

    /// Category breakdown for a year across all destinations. Groups below
    /// [`OTHER_THRESHOLD`] of the total merge into a single "other" node.
    pub fn category_tree(&self, records: &[TradeRecord], year: &str) -> CategoryTree {
        let mut groups: Vec<(&str, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records.iter().filter(|r| r.year == year && !r.is_total()) {
            let group = record.commodity_group.as_str();
            match index.get(group) {
                Some(&i) => groups[i].1 += record.scaled_value(),
                None => {
                    index.insert(group, groups.len());
                    groups.push((group, record.scaled_value()));
                }
            }
        }

        let total: f64 = groups.iter().map(|(_, v)| v).sum();
        if groups.is_empty() || total <= 0.0 {
            return CategoryTree::default();
        }

        let (mut kept, merged): (Vec<_>, Vec<_>) =
            groups.into_iter().partition(|(_, v)| v / total >= OTHER_THRESHOLD);
        kept.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut tree = CategoryTree {
            nodes: vec![CategoryNode {
                id: self.focal.to_string(),
                label: self.focal.to_string(),
                value: 0.0,
                kind: NodeKind::Root,
            }],
            links: Vec::new(),
        };

        for (group, value) in kept {
            tree.links.push(CategoryLink { source: 0, target: tree.nodes.len(), value });
            tree.nodes.push(CategoryNode {
                id: group.to_string(),
                label: category_label(group).to_string(),
                value,
                kind: NodeKind::Category,
            });
        }

        if !merged.is_empty() {
            let value: f64 = merged.iter().map(|(_, v)| v).sum();
            tree.links.push(CategoryLink { source: 0, target: tree.nodes.len(), value });
            tree.nodes.push(CategoryNode {
                id: OTHER_ID.to_string(),
                label: "Other".to_string(),
                value,
                kind: NodeKind::Other,
            });
        }

        tree.nodes[0].value = tree.links.iter().map(|l| l.value).sum();
        debug!(
            year,
            nodes = tree.nodes.len(),
            links = tree.links.len(),
            "aggregated category tree"
        );
        tree
    }
}
