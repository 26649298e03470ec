pub mod calculator;
pub mod date_range;
pub mod fee;
pub mod price_area;
pub mod prices;
pub mod sample;

use chrono_tz::Tz;

/// Prices are published per Norwegian calendar day, and the grid fee tiers follow the Norwegian clock.
pub const TIME_ZONE: Tz = chrono_tz::Europe::Oslo;
