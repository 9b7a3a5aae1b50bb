//! Price aggregation over a catalog subtree.
//!
//! A category's price is the arithmetic mean of its direct children's
//! prices, computed recursively: a category of categories averages the
//! children's computed values, not the underlying offers. The arithmetic
//! runs over an in-memory snapshot of the subtree; the caller is
//! responsible for loading the nodes from the store.

use std::collections::HashMap;

use uuid::Uuid;

use crate::unit::UnitType;

/// Minimal view of a unit needed for aggregation.
#[derive(Debug, Clone)]
pub struct PriceNode {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub unit_type: UnitType,
    pub price: Option<f64>,
}

/// Computed price of `root` within `nodes`.
///
/// An offer contributes its own price (0 when absent). A category with
/// no children contributes 0; otherwise the mean of its children's
/// computed prices, using floating-point division.
pub fn computed_price(nodes: &[PriceNode], root: Uuid) -> f64 {
    let mut by_id: HashMap<Uuid, &PriceNode> = HashMap::new();
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for node in nodes {
        by_id.insert(node.id, node);
        if let Some(parent_id) = node.parent_id {
            children.entry(parent_id).or_default().push(node.id);
        }
    }
    price_of(root, &by_id, &children)
}

/// Price to persist for a category: absent while it has no direct
/// children, otherwise the recursively computed mean.
pub fn aggregate_for_category(nodes: &[PriceNode], root: Uuid) -> Option<f64> {
    nodes
        .iter()
        .any(|n| n.parent_id == Some(root))
        .then(|| computed_price(nodes, root))
}

fn price_of(
    id: Uuid,
    by_id: &HashMap<Uuid, &PriceNode>,
    children: &HashMap<Uuid, Vec<Uuid>>,
) -> f64 {
    let Some(node) = by_id.get(&id) else {
        return 0.0;
    };
    match node.unit_type {
        UnitType::Offer => node.price.unwrap_or(0.0),
        UnitType::Category => match children.get(&id) {
            None => 0.0,
            Some(ids) => {
                let total: f64 = ids.iter().map(|c| price_of(*c, by_id, children)).sum();
                total / ids.len() as f64
            }
        },
    }
}
