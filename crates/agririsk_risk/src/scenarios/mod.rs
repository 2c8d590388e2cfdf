//! Scenario-conditioned projections and indices.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                 Scenario Projector                  │
//! ├────────────────────────────────────────────────────┤
//! │  projection - revenue paths and discounted value   │
//! │  carbon     - present-state cost / profit / risk   │
//! │  indices    - environmental and future indices     │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! Every cost-type column is `proxy × price` shifted so that its minimum
//! across rows is exactly zero. Magnitudes are therefore relative within one
//! run and one scenario.

mod carbon;
mod indices;
mod projection;

pub use carbon::{add_adjusted_profit, add_carbon_cost_index, add_carbon_risk_score};
pub use indices::{
    add_environmental_risk_index, add_future_carbon_risk_index, add_future_profit_index,
    floored_cost,
};
pub use projection::{add_discounted_revenue, discounted_revenue_npv, project_revenue_paths};
