pub mod calculate;
pub mod db;
pub mod dispatch;
pub mod payoff;
pub mod settings;
