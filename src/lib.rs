pub mod cli;
pub mod config;
pub mod distance;
pub mod driver;
pub mod error;
pub mod location;
pub mod ordering;
pub mod source;
pub mod toplist;

pub use config::Opts;
pub use distance::{Distance, Metric};
pub use error::RecordError;
pub use location::Point;
pub use ordering::Ordering;
pub use toplist::{Method, TopList, TopListBuilder};
