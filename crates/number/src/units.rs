use {
    alloy::primitives::{
        U256,
        utils::{ParseUnits, Unit, format_units, parse_units},
    },
    anyhow::{Context, Result, anyhow, ensure},
};

/// Number of decimals the deployed token contracts use for their supply.
pub const TOKEN_DECIMALS: u8 = 18;

/// Parses a decimal gas price denominated in Gwei (e.g. `"1.5"`) into wei.
///
/// Only strictly positive prices are accepted.
pub fn parse_gwei(value: &str) -> Result<U256> {
    let wei = parse_unsigned(value, Unit::GWEI.get())?;
    ensure!(!wei.is_zero(), "gas price must be greater than zero");
    Ok(wei)
}

/// Scales a decimal token amount (e.g. `"1000000"`) to its integer
/// representation with `decimals` fractional digits.
pub fn parse_token_amount(value: &str, decimals: u8) -> Result<U256> {
    parse_unsigned(value, decimals)
}

/// Formats a wei amount as Gwei without trailing zeros, e.g. `1.5`.
pub fn format_gwei(wei: u128) -> String {
    let formatted = format_units(U256::from(wei), Unit::GWEI.get())
        .unwrap_or_else(|_| wei.to_string());
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => formatted,
    }
}

fn parse_unsigned(value: &str, decimals: u8) -> Result<U256> {
    let value = value.trim();
    match parse_units(value, decimals).with_context(|| format!("invalid number {value:?}"))? {
        ParseUnits::U256(val) => Ok(val),
        ParseUnits::I256(_) => Err(anyhow!("negative number {value:?}")),
    }
}
