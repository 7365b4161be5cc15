//! Shared extraction toolkit used by every platform rule set

mod cascade;
mod currency;
mod date;
mod items;
mod status;
mod validate;

pub use cascade::{
    Candidate, Cascade, FieldRule, RuleSpec, select_by_priority, select_by_priority_magnitude,
};
pub use currency::{detect_currency, format_amount, normalize_currency, parse_amount};
pub use date::{is_date_shaped, month_from_name, parse_date, start_of_day};
pub use items::{
    ItemMatch, ItemSet, clean_item_name, match_item_lines, normalize_item_name, subject_item_name,
};
pub use status::{detect_status, status_from_text};
pub use validate::{
    is_leakage, is_markup_leakage, validate_amount, validate_identifier, validate_text,
};
