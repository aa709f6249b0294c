pub mod formatter;

pub use formatter::{
    format_amount, format_breakdown_table, format_currency, format_json, format_tsv,
    should_use_colors,
};
