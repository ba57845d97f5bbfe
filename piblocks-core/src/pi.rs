use crate::bracket;
use crate::config::MAX_DIGITS;
use crate::error::{Error, Result};
use num_bigint::BigInt;

/// Most digits [`leading_digits`] will produce: one more than the largest `N`
pub const MAX_PI_DIGITS: usize = MAX_DIGITS as usize + 1;

/// The first `count` decimal digits of pi (`"314"` for 3), computed
/// independently of any collision count.
pub fn leading_digits(count: usize) -> Result<String> {
    if count == 0 {
        return Ok(String::new());
    }
    let exponent = u32::try_from(count - 1)
        .ok()
        .filter(|_| count <= MAX_PI_DIGITS)
        .ok_or_else(|| {
            Error::invalid_configuration(format!(
                "cannot produce {} digits of pi, the maximum is {}",
                count, MAX_PI_DIGITS
            ))
        })?;

    let multiplier = BigInt::from(10u32).pow(exponent);
    // exponent is at most MAX_DIGITS, so this cannot overflow
    let mut bits = 64 + 4 * (exponent + 1);
    loop {
        // pi·10^k is never an integer, so this always settles
        if let Some(digits) = bracket::pi(bits).floor_scaled(&multiplier) {
            return Ok(digits.to_string());
        }
        bits = bits.saturating_mul(2);
    }
}
