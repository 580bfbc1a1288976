pub mod fetcher;
pub mod reconciler;
pub mod shell;
pub mod table;

pub use crate::domain::model::{Artwork, ArtworkPage, PageWindow};
pub use crate::domain::ports::{ArtworkSource, ConfigProvider};
pub use crate::domain::selection::SelectionSet;
pub use crate::utils::error::Result;
