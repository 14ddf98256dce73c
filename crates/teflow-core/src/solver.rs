use crate::descent::{aggregate_flow, min_cost_path, path_cost, update_commodity, UpdateEvents};
use crate::network::{Commodity, Network};
use crate::{SplitOptions, TeError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// State committed by one iteration: the per-link flow snapshot, the cost of
/// every path evaluated against it, and the reference (minimum-cost) path
/// chosen per commodity. Entry 0 is the initial uniform split; entry `t` is
/// the state after round `t`, together with the events that round produced.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub link_flow: Vec<f64>,
    pub path_costs: Vec<Vec<f64>>,
    pub beta: Vec<usize>,
    /// `(commodity index, requirement - achieved)` for commodities whose
    /// residual had to be clamped this round.
    pub shortfalls: Vec<(usize, f64)>,
    /// `(commodity index, path index)` pairs whose step was forced to zero.
    pub zero_curvature: Vec<(usize, usize)>,
}

fn snapshot(network: &Network, commodities: &[Commodity], saturation: f64) -> IterationRecord {
    let link_flow = aggregate_flow(network, commodities);
    let path_costs: Vec<Vec<f64>> = commodities
        .iter()
        .map(|commodity| {
            commodity
                .paths
                .iter()
                .map(|path| path_cost(network, &path.links, &link_flow, saturation))
                .collect()
        })
        .collect();
    let beta = path_costs.iter().map(|costs| min_cost_path(costs)).collect();
    IterationRecord {
        link_flow,
        path_costs,
        beta,
        shortfalls: Vec::new(),
        zero_curvature: Vec::new(),
    }
}

/// Every commodity reads the same frozen snapshot and writes only its own
/// paths, so the update order over commodities cannot influence the result.
fn run_round(
    network: &Network,
    commodities: &mut [Commodity],
    previous: &IterationRecord,
    saturation: f64,
) -> Vec<UpdateEvents> {
    #[cfg(feature = "parallel")]
    {
        commodities
            .par_iter_mut()
            .enumerate()
            .map(|(idx, commodity)| {
                update_commodity(
                    network,
                    commodity,
                    &previous.path_costs[idx],
                    previous.beta[idx],
                    &previous.link_flow,
                    saturation,
                )
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        commodities
            .iter_mut()
            .enumerate()
            .map(|(idx, commodity)| {
                update_commodity(
                    network,
                    commodity,
                    &previous.path_costs[idx],
                    previous.beta[idx],
                    &previous.link_flow,
                    saturation,
                )
            })
            .collect()
    }
}

pub fn validate(network: &Network, commodities: &[Commodity]) -> Result<(), TeError> {
    for (idx, commodity) in commodities.iter().enumerate() {
        if !(commodity.requirement > 0.0) {
            return Err(TeError::InvalidInput(format!(
                "commodity {idx} has non-positive requirement {}",
                commodity.requirement
            )));
        }
        if commodity.paths.is_empty() {
            return Err(TeError::InvalidInput(format!(
                "commodity {idx} has no candidate paths"
            )));
        }
        for (path_idx, path) in commodity.paths.iter().enumerate() {
            if path.links.is_empty() {
                return Err(TeError::InvalidInput(format!(
                    "commodity {idx} path {path_idx} has an empty link sequence"
                )));
            }
            for link in &path.links {
                if link.0 >= network.link_count() {
                    return Err(TeError::InvalidInput(format!(
                        "commodity {idx} path {path_idx} references unknown link {}",
                        link.0
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Runs the gradient-projection loop for exactly `opts.iterations` rounds.
///
/// Round `t` aggregates flow from the traffic committed by round `t - 1`,
/// selects each commodity's reference path against that snapshot, and only
/// then rewrites traffic (Jacobi update). Returns one record per committed
/// snapshot, `opts.iterations + 1` in total; the final traffic itself is
/// left on the commodities.
pub fn optimize(
    network: &Network,
    commodities: &mut [Commodity],
    opts: &SplitOptions,
) -> Result<Vec<IterationRecord>, TeError> {
    validate(network, commodities)?;

    for commodity in commodities.iter_mut() {
        commodity.split_uniformly();
    }

    let mut history = Vec::with_capacity(opts.iterations + 1);
    let mut previous = snapshot(network, commodities, opts.saturation);
    for _round in 1..=opts.iterations {
        let events = run_round(network, commodities, &previous, opts.saturation);
        history.push(previous);

        let mut record = snapshot(network, commodities, opts.saturation);
        for (idx, event) in events.into_iter().enumerate() {
            if let Some(shortfall) = event.shortfall {
                record.shortfalls.push((idx, shortfall));
            }
            for path_idx in event.zero_curvature {
                record.zero_curvature.push((idx, path_idx));
            }
        }
        previous = record;
    }
    history.push(previous);
    Ok(history)
}
