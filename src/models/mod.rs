pub mod budget;
pub mod business;
pub mod conversion;
pub mod debt;
pub mod history;
pub mod loan;
pub mod personal;
pub mod projection;
pub mod property;
