mod object_url;
mod selected_file;

#[cfg(test)]
pub use object_url::MockObjectUrlProvider;
pub use object_url::{LocalFileUrlProvider, ObjectUrlProvider};
#[cfg(test)]
pub use selected_file::MAX_VIDEO_SIZE;
pub use selected_file::{MediaKind, SelectedFile};
