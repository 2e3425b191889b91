mod ads_error;
mod graph_error;

pub use ads_error::{AdsError, AdsErrorKind};
pub use graph_error::GraphApiError;
