pub mod feed;
pub mod profile;

pub use feed::{reconcile_rows, FeedPresenter, FeedView, PhotoRow, RowHeight, RowUpdate};
pub use profile::{ProfilePresenter, ProfileView};
