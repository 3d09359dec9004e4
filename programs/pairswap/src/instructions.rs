#![allow(ambiguous_glob_reexports)]

pub mod initialize;
pub mod set_platform_status;
pub mod create_pool;
pub mod add_liquidity;
pub mod remove_liquidity;
pub mod swap;

pub use initialize::*;
pub use set_platform_status::*;
pub use create_pool::*;
pub use add_liquidity::*;
pub use remove_liquidity::*;
pub use swap::*;
