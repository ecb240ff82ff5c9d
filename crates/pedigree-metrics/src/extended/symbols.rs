use crate::vocab::Symbol;
use pedigree_core::PedigreeNode;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbols {
    /// All six symbols, zero-filled. `Carrier` has no source field.
    pub symbol_counts: BTreeMap<Symbol, usize>,
}

impl Symbols {
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbol_counts.get(&symbol).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Edges {
    pub dztwin_count: usize,
    pub mztwin_count: usize,
}

fn symbols_of(node: &PedigreeNode) -> impl Iterator<Item = Symbol> {
    [
        (node.is_deceased(), Symbol::Deceased),
        (node.adopted_in, Symbol::AdoptedIn),
        (node.adopted_out, Symbol::AdoptedOut),
        (!node.divorced.is_empty(), Symbol::Divorce),
        (node.proband, Symbol::Patient),
    ]
    .into_iter()
    .filter_map(|(present, symbol)| present.then_some(symbol))
}

pub(super) fn compute_symbols(nodes: &[PedigreeNode]) -> Symbols {
    let mut symbol_counts: BTreeMap<Symbol, usize> =
        Symbol::ALL.iter().map(|s| (*s, 0)).collect();
    for symbol in nodes.iter().flat_map(symbols_of) {
        *symbol_counts.entry(symbol).or_default() += 1;
    }
    Symbols { symbol_counts }
}

pub(super) fn compute_edges(nodes: &[PedigreeNode]) -> Edges {
    Edges {
        dztwin_count: nodes.iter().filter(|n| n.dztwin).count(),
        mztwin_count: nodes.iter().filter(|n| n.mztwin).count(),
    }
}
