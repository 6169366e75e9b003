pub mod analysis;
pub mod etl;
pub mod extract;
pub mod reader;
pub mod throttle;
pub mod writer;

pub use crate::domain::model::{RawRecord, TabularRow};
pub use crate::domain::ports::{ChatSession, ConfigProvider, Pipeline, Storage, Throttle};
pub use crate::utils::error::Result;
