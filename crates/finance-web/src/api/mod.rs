mod finance;
mod http;

pub use finance::{get_dataset, get_settings};
