pub mod units;

pub use units::{TOKEN_DECIMALS, format_gwei, parse_gwei, parse_token_amount};
