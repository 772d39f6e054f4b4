//! Terminal presentation for human output mode (JSON envelopes are printed
//! by the binary directly)

pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{empty, error, header, section, status, success, summary_row};
pub use progress::Spinner;
pub use table::{
    TableBuilder, card_table, country_count_table, customer_table, order_count_table, stats_table,
};
pub use theme::{theme, Theme};
