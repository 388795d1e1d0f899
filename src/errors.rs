use thiserror::Error;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A local precondition was not met. No request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Represents a transport error talking to the profile service.
    #[error("Could not reach the profile service")]
    Transport { source: reqwest::Error },

    /// The profile service answered with a non-success status.
    #[error("Profile service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The profile service answered with a body we could not decode.
    #[error("Malformed response from the profile service")]
    Decode { source: serde_json::Error },

    /// A request URL could not be built.
    #[error("Invalid URL")]
    Url { source: url::ParseError },

    /// Represents a configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProfileError {
    /// Whether the error was raised locally, before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, ProfileError::Validation(_))
    }
}

impl From<reqwest::Error> for ProfileError {
    fn from(source: reqwest::Error) -> Self {
        ProfileError::Transport { source }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(source: serde_json::Error) -> Self {
        ProfileError::Decode { source }
    }
}

impl From<url::ParseError> for ProfileError {
    fn from(source: url::ParseError) -> Self {
        ProfileError::Url { source }
    }
}

/// Enumerates local validation failures. Every message here is shown to
/// the user as-is.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please enter your name.")]
    NameEmpty,

    #[error("Please enter your age as a number.")]
    AgeNotNumeric,

    #[error("Age must be between {min} and {max}.")]
    AgeOutOfRange { age: u16, min: u16, max: u16 },

    #[error("Your bio can be at most {max} characters ({length} entered).")]
    BioTooLong { length: usize, max: usize },

    #[error("Please select at least {required} interests ({selected} selected).")]
    TooFewInterests { selected: usize, required: usize },

    #[error("You can have at most {max} photos.")]
    TooManyPhotos { count: usize, max: usize },

    #[error("Please choose at least one photo.")]
    NoPhotosChosen,

    #[error("There is no photo at position {index}.")]
    NoSuchPhoto { index: usize },

    #[error("Use the profile photo option to remove your main photo.")]
    PrimaryPhotoIndex,

    #[error("Only image files can be uploaded ({0} given).")]
    NotAnImage(String),
}

/// Enumerates errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("must define {0} environment variable")]
    Missing(String),

    #[error("could not parse {name}: {message}")]
    Invalid { name: String, message: String },
}
