//! Propagation strategies and the merge engine.

use std::fmt;

use crate::context::Context;
use crate::model::{chain, Chain, Columns};

/// How a call site's fragment relates to the state in its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Inherit and extend for this record only; the context is returned as is.
    #[default]
    ForkLeaf,
    /// Inherit and extend; descendants of the returned context inherit too.
    ForkBranch,
    /// Start over from the fragment alone and store it for descendants.
    NewTree,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::ForkLeaf => "fork_leaf",
            Strategy::ForkBranch => "fork_branch",
            Strategy::NewTree => "new_tree",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one propagation step.
#[derive(Debug, Clone)]
pub struct Propagation {
    /// Chain attached to the record.
    pub chain: Chain,
    /// Columns attached to the record.
    pub columns: Columns,
    /// Context handed back to the caller.
    pub context: Context,
}

/// Combine the state stored in `ctx` with a call site's fragments.
///
/// | strategy   | record state         | returned context          |
/// |------------|----------------------|---------------------------|
/// | ForkLeaf   | inherited ⊕ fragment | `ctx` itself              |
/// | ForkBranch | inherited ⊕ fragment | `ctx` + record state      |
/// | NewTree    | fragment             | `ctx` + fragment          |
pub fn propagate(
    ctx: &Context,
    chain_fragment: &Chain,
    columns_fragment: &Columns,
    strategy: Strategy,
) -> Propagation {
    match strategy {
        Strategy::ForkLeaf => {
            let (chain, columns) = inherit(ctx, chain_fragment, columns_fragment);
            Propagation {
                chain,
                columns,
                context: ctx.clone(),
            }
        }
        Strategy::ForkBranch => {
            let (chain, columns) = inherit(ctx, chain_fragment, columns_fragment);
            let context = store(ctx, &chain, &columns);
            Propagation {
                chain,
                columns,
                context,
            }
        }
        Strategy::NewTree => {
            let chain = chain_fragment.clone();
            let columns = columns_fragment.clone();
            let context = store(ctx, &chain, &columns);
            Propagation {
                chain,
                columns,
                context,
            }
        }
    }
}

fn inherit(ctx: &Context, chain_fragment: &Chain, columns_fragment: &Columns) -> (Chain, Columns) {
    let chain = chain::join(ctx.chain(), Some(chain_fragment)).unwrap_or_default();
    let columns = match ctx.columns() {
        Some(inherited) => inherited.combine(columns_fragment),
        None => columns_fragment.clone(),
    };
    (chain, columns)
}

fn store(ctx: &Context, chain: &Chain, columns: &Columns) -> Context {
    ctx.with_chain(chain.clone()).with_columns(columns.clone())
}
