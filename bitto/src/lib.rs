pub mod abi;
pub mod addresses;
pub mod token;
pub mod units;

pub use addresses::*;
pub use token::*;
pub use units::*;
