use crate::content::CrisisLevel;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Looks up the illustration for each crisis level under a fixed directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, level: CrisisLevel) -> PathBuf {
        self.root.join(level.image_file())
    }

    /// Base64 of the level's image, or `None` when it is missing or unreadable.
    pub async fn load_base64(&self, level: CrisisLevel) -> Option<String> {
        let path = self.path_for(level);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(BASE64.encode(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No image for level {} at {}", level, path.display());
                None
            }
            Err(e) => {
                warn!("Failed to read image {}: {}", path.display(), e);
                None
            }
        }
    }
}
