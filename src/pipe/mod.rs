mod filter;
mod regrid;
mod skip_missing;

pub use filter::filter;
pub use regrid::{Regrid, regrid};
pub use skip_missing::skip_missing;
