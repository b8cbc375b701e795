pub mod money;

pub use money::MoneyAmount;
