//! Engine-wide constants.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Timezone used to interpret transaction timestamps supplied without zone
/// info. Matches the market-hours convention of the backtest dataset.
pub const DEFAULT_TRANSACTION_TZ: Tz = chrono_tz::US::Mountain;

/// Wire format for naive transaction timestamps, e.g. "2019-01-02 09:30".
pub const TRANSACTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Floor applied to the displayed annual VaR magnitude, in percent.
pub const MIN_DISPLAY_VAR_PCT: Decimal = dec!(5);

/// Decimal places used when rendering amounts and percentages for display.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Axis annotation label for user buys.
pub const BUY_MARKER_LABEL: &str = "B";

/// Axis annotation label for user sells.
pub const SELL_MARKER_LABEL: &str = "S";

/// Prefix and suffix wrapped around a raw benchmark id to form the id of its
/// buy-and-hold series in the backtest dataset.
pub const BENCHMARK_ID_PREFIX: &str = "bah_";
pub const BENCHMARK_ID_SUFFIX: &str = "_bah";
