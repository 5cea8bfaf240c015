//! SeaORM adapters: query functions generic over `ConnectionTrait`.
//!
//! Adapters speak `DbErr`; the repos layer converts to `DomainError`.

pub mod games_sea;
pub mod players_sea;
