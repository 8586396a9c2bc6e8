//! Debt payoff projection: interest, minimums, and snowball allocation

mod allocation;
mod engine;
mod minimum;
mod results;
mod state;

pub use allocation::{rank_accounts, SnowballMethod};
pub use engine::{simulate_debts, DebtSimulator, SimulationConfig};
pub use minimum::{MinimumPayment, MinimumPaymentRule};
pub use results::{DebtProjection, MonthRow, ProjectionSummary};
pub use state::SimulationState;
