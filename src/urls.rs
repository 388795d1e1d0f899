use url::{ParseError, Url};

/// Convenience wrapper for building profile service URLs.
#[derive(Clone, Debug)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,
}

impl Urls {
    /// Creates a new instance. A missing trailing slash on `base` is
    /// added so that relative joins keep the full path.
    pub fn new(base: &Url) -> Self {
        let mut base = base.clone();

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Urls { base }
    }

    pub fn parse(base: impl AsRef<str>) -> Result<Self, ParseError> {
        Ok(Urls::new(&Url::parse(base.as_ref())?))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn profile(&self) -> Result<Url, ParseError> {
        self.base.join("profile")
    }

    /// The profile photo.
    pub fn photo(&self) -> Result<Url, ParseError> {
        self.base.join("profile/photo")
    }

    /// The additional photos collection.
    pub fn photos(&self) -> Result<Url, ParseError> {
        self.base.join("profile/photos")
    }

    /// One additional photo, addressed by its index in the photo list.
    pub fn photo_at(&self, index: usize) -> Result<Url, ParseError> {
        self.base.join(&format!("profile/photos/{}", index))
    }
}
