//! Service layer: transaction-scoped orchestration over the domain core.

pub mod game_flow;
