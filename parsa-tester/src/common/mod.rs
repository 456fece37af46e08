pub mod fixture;
pub mod util;

pub use fixture::{AdminCredentials, Fixture};
pub use util::{report_timestamp, split_csv};
