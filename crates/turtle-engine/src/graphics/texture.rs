use std::path::Path;

/// Opaque handle to an image loaded into an [`ImageStore`].
///
/// Ids are never reused; the GPU texture cache is keyed by them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) usize);

#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("Image file does not exist: {0}")]
    NotFound(String),
    #[error("Could not decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded pixels in premultiplied RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Wraps straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> Self {
        for px in rgba.chunks_exact_mut(4) {
            let a = px[3] as u32;
            for c in &mut px[..3] {
                *c = ((*c as u32 * a + 127) / 255) as u8;
            }
        }
        Self { width, height, rgba }
    }
}

/// Owns every image loaded during a session.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: Vec<Option<ImageData>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_file(&mut self, path: &Path) -> Result<ImageId, ImageLoadError> {
        if !path.is_file() {
            return Err(ImageLoadError::NotFound(path.display().to_string()));
        }
        let decoded = image::open(path).map_err(|source| ImageLoadError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded image {} ({width}x{height})", path.display());
        Ok(self.insert(ImageData::from_straight_rgba(width, height, rgba.into_raw())))
    }

    pub fn insert(&mut self, data: ImageData) -> ImageId {
        let id = ImageId(self.images.len());
        self.images.push(Some(data));
        id
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageData> {
        self.images.get(id.0).and_then(Option::as_ref)
    }

    pub fn dimensions(&self, id: ImageId) -> Option<(u32, u32)> {
        self.get(id).map(|d| (d.width, d.height))
    }

    pub fn release(&mut self, id: ImageId) -> bool {
        self.images.get_mut(id.0).and_then(Option::take).is_some()
    }

    /// Drops every live image and returns how many there were.
    pub fn release_all(&mut self) -> usize {
        self.images.iter_mut().filter_map(Option::take).count()
    }

    pub fn live_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_some()).count()
    }

    pub fn is_live(&self, id: ImageId) -> bool {
        self.get(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplies_on_wrap() {
        let data = ImageData::from_straight_rgba(1, 1, vec![255, 128, 0, 128]);
        assert_eq!(data.rgba, vec![128, 64, 0, 128]);
    }

    #[test]
    fn ids_are_not_reused_after_release() {
        let mut store = ImageStore::new();
        let a = store.insert(ImageData::from_straight_rgba(1, 1, vec![0; 4]));
        assert!(store.release(a));
        assert!(!store.release(a));
        let b = store.insert(ImageData::from_straight_rgba(2, 1, vec![0; 8]));
        assert_ne!(a, b);
        assert_eq!(store.dimensions(b), Some((2, 1)));
        assert_eq!(store.dimensions(a), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let mut store = ImageStore::new();
        let err = store.load_file(Path::new("nowhere/icon.png")).unwrap_err();
        assert_eq!(err.to_string(), "Image file does not exist: nowhere/icon.png");
    }
}
