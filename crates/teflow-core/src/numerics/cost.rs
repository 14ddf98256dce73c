/// Marginal cost of one extra unit of flow on a link: the derivative
/// `capacity / (capacity - flow)^2` of a delay-type convex penalty.
///
/// The effective flow is clamped at `saturation * capacity`, so the value
/// stays finite and positive once a link is driven into saturation.
pub fn marginal_cost(capacity: f64, flow: f64, saturation: f64) -> f64 {
    let effective = flow.min(saturation * capacity);
    capacity / (capacity - effective).powi(2)
}

/// Second derivative `2 * capacity / (capacity - flow)^3`, clamped at the
/// same point as `marginal_cost`. Used for curvature-based step sizing.
pub fn curvature(capacity: f64, flow: f64, saturation: f64) -> f64 {
    let effective = flow.min(saturation * capacity);
    2.0 * capacity / (capacity - effective).powi(3)
}
