use super::PHOTO_LOAD_SIZE;
use super::scatter::Scatter;
use derive_more::{AsRef, Deref, Display, From, Into};
use gdk_pixbuf::Pixbuf;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Position of the photo in the configured list, which is also its handle in
/// the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct PhotoId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct PhotoName(String);

crate::impl_string_newtype!(PhotoName);

impl PhotoName {
    pub fn from_path(path: &Path) -> Self {
        path.file_stem()
            .or_else(|| path.file_name())
            .map(|s| Self::new(s.to_string_lossy()))
            .unwrap_or_else(|| Self::new(path.display().to_string()))
    }
}

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Failed to load photo {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: glib::Error,
    },
}

#[derive(Clone)]
pub struct Photo {
    pub id: PhotoId,
    pub name: PhotoName,
    pub path: PathBuf,
    pub pixbuf: Option<Pixbuf>,
    pub scatter: Scatter,
}

impl Photo {
    /// A photo that fails to load is kept as a placeholder card.
    pub fn load(id: PhotoId, path: PathBuf, scatter: Scatter) -> Self {
        let pixbuf = Self::load_pixbuf(&path)
            .inspect_err(|e| log::error!("{}", e))
            .ok();
        Self {
            id,
            name: PhotoName::from_path(&path),
            path,
            pixbuf,
            scatter,
        }
    }

    fn load_pixbuf(path: &Path) -> Result<Pixbuf, PhotoError> {
        Pixbuf::from_file_at_scale(path, PHOTO_LOAD_SIZE, PHOTO_LOAD_SIZE, true).map_err(
            |source| PhotoError::Load {
                path: path.to_path_buf(),
                source,
            },
        )
    }

    pub fn is_placeholder(&self) -> bool {
        self.pixbuf.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_path() {
        assert_eq!(
            PhotoName::from_path(Path::new("/photos/beach-2019.jpg")).as_str(),
            "beach-2019"
        );
        assert_eq!(PhotoName::from_path(Path::new("cat")).as_str(), "cat");
    }

    #[test]
    fn test_photo_id_round_trip() {
        let id = PhotoId::from(3);

        assert_eq!(usize::from(id), 3);
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn test_missing_file_becomes_placeholder() {
        let photo = Photo::load(
            PhotoId::from(0),
            PathBuf::from("/nonexistent/photostack/missing.png"),
            Scatter::default(),
        );

        assert!(photo.is_placeholder());
        assert_eq!(photo.name.as_str(), "missing");
    }
}
