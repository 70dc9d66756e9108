//! Trade Record Aggregator: filters the flat export table into weighted
//! arcs and the category breakdown behind the flow diagram.

mod aggregate;
mod alias;
mod record;

pub use aggregate::{
    Aggregator, CategoryLink, CategoryNode, CategoryTree, Filter, FlowArc, NodeKind, OTHER_ID,
    OTHER_THRESHOLD,
};
pub use alias::AliasTable;
pub use record::{
    categories, category_label, destination_total, parse_numeric, years, TradeRecord,
    TOTAL_SENTINEL, UNIT_SCALE,
};
