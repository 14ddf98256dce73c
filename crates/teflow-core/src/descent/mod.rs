mod flow;
mod step;

pub use flow::{aggregate_flow, network_cost, path_cost};
pub use step::{curvature_sum, min_cost_path};

use crate::network::{Commodity, Network};

/// Events produced while updating a single commodity for one round.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvents {
    /// `requirement - achieved`, set when the residual for the reference
    /// path had to be clamped.
    pub shortfall: Option<f64>,
    /// Path indices whose curvature sum was zero (step forced to zero).
    pub zero_curvature: Vec<usize>,
}

/// One projected-gradient round for a commodity, against the frozen flow
/// snapshot and path costs of the previous iteration.
///
/// Every non-reference path sheds `(cost gap) / (curvature sum)` units of
/// traffic, floored at zero; the reference path `beta` then absorbs the
/// conservation residual, clamped to `[0, saturation * bottleneck(beta)]`.
/// A residual outside that interval means the candidate path set cannot
/// carry the requirement at feasible flows; the discrepancy is reported
/// instead of silently absorbed.
pub fn update_commodity(
    network: &Network,
    commodity: &mut Commodity,
    costs: &[f64],
    beta: usize,
    link_flow: &[f64],
    saturation: f64,
) -> UpdateEvents {
    let mut events = UpdateEvents::default();
    let beta_cost = costs[beta];
    let beta_links = commodity.paths[beta].links.clone();

    let mut others = 0.0;
    for idx in 0..commodity.paths.len() {
        if idx == beta {
            continue;
        }
        let gap = costs[idx] - beta_cost;
        let hessian = curvature_sum(
            network,
            &commodity.paths[idx].links,
            &beta_links,
            link_flow,
            saturation,
        );
        let step = if hessian > 0.0 {
            gap / hessian
        } else {
            events.zero_curvature.push(idx);
            0.0
        };
        let updated = (commodity.paths[idx].traffic - step).max(0.0);
        commodity.paths[idx].traffic = updated;
        others += updated;
    }

    let residual = commodity.requirement - others;
    let ceiling = saturation * network.bottleneck(&beta_links);
    let assigned = residual.min(ceiling).max(0.0);
    commodity.paths[beta].traffic = assigned;
    if residual < 0.0 || residual > ceiling {
        events.shortfall = Some(commodity.requirement - (others + assigned));
    }
    events
}
