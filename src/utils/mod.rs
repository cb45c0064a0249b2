pub mod dates;
pub mod table;
pub mod validation;

pub use dates::{format_request_date, previous_month_range, today};
pub use table::Table;
pub use validation::is_valid_rate;
