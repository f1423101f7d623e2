//! Venue order-flag bitmask and the post-only enforcer.
//!
//! Flag bits are independently meaningful to the venue and may be
//! combined freely. Enforcement only ever sets `POST_ONLY`; every other
//! bit, including bits this crate does not know about, passes through
//! unchanged.

use crate::error::{CoreError, CoreResult};
use crate::order_type::is_market_style;

/// Hide the order from the public book.
pub const HIDDEN: u32 = 64;
/// Close the position on execution.
pub const CLOSE: u32 = 512;
/// Only ever reduce an existing position.
pub const REDUCE_ONLY: u32 = 1024;
/// Maker-only: rest on the book or be cancelled, never cross the spread.
pub const POST_ONLY: u32 = 4096;
/// One-cancels-other pair.
pub const OCO: u32 = 16384;
/// Exclude variable-rate funding offers.
pub const NO_VAR_RATES: u32 = 524288;

/// Merges `POST_ONLY` into `flags`, preserving all other bits.
///
/// Absent flags are treated as zero. Idempotent: re-applying to its own
/// output changes nothing.
///
/// # Errors
///
/// Returns [`CoreError::MarketStyleOrder`] when `order_type` names a
/// market-style matching mode. Such an order would execute immediately
/// regardless of flags, so it must not be submitted at all.
pub fn enforce_post_only(flags: Option<u32>, order_type: Option<&str>) -> CoreResult<u32> {
    if let Some(order_type) = order_type {
        if is_market_style(order_type) {
            return Err(CoreError::MarketStyleOrder(order_type.to_owned()));
        }
    }

    Ok(POST_ONLY | flags.unwrap_or(0))
}
