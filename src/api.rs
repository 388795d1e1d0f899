use bytes::Bytes;
use futures::future::BoxFuture;
use mime::Mime;

use crate::errors::{ProfileError, ValidationError};
use crate::profile::{ProfileRecord, ProfileUpdate};

pub mod mock;

/// The remote profile service. Every mutation answers with the whole
/// updated record.
pub trait ProfileApi {
    fn get_profile(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>>;

    fn update_profile(&self, update: ProfileUpdate) -> BoxFuture<Result<ProfileRecord, ProfileError>>;

    /// Sets or replaces the profile photo.
    fn upload_profile_photo(&self, file: PhotoFile) -> BoxFuture<Result<ProfileRecord, ProfileError>>;

    /// Appends photos after the existing ones.
    fn upload_additional_photos(
        &self,
        files: Vec<PhotoFile>,
    ) -> BoxFuture<Result<ProfileRecord, ProfileError>>;

    /// Deletes a non-profile photo by its index in the photo list.
    fn delete_photo(&self, index: usize) -> BoxFuture<Result<ProfileRecord, ProfileError>>;

    fn delete_profile_photo(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>>;
}

/// An image chosen on the device, ready to upload.
#[derive(Clone, Debug)]
pub struct PhotoFile {
    file_name: String,
    mime: Mime,
    bytes: Bytes,
}

impl PhotoFile {
    /// Creates a new instance. Only `image/*` types are accepted.
    pub fn new(
        file_name: impl Into<String>,
        mime: Mime,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ValidationError> {
        if mime.type_() != mime::IMAGE {
            return Err(ValidationError::NotAnImage(mime.to_string()));
        }

        Ok(PhotoFile {
            file_name: file_name.into(),
            mime,
            bytes: bytes.into(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

pub use self::http::*;

mod http {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use reqwest::multipart::{Form, Part};
    use reqwest::{Client, Method, RequestBuilder};
    use serde::Deserialize;
    use url::Url;

    use super::PhotoFile;
    use crate::config::Config;
    use crate::errors::ProfileError;
    use crate::profile::{ProfileRecord, ProfileUpdate};
    use crate::urls::Urls;

    const PHOTO_FIELD: &str = "photo";
    const PHOTOS_FIELD: &str = "photos";

    /// Talks to the profile service over HTTPS with JSON bodies.
    pub struct HttpProfileApi {
        client: Client,
        urls: Urls,
        token: Option<String>,
    }

    impl HttpProfileApi {
        pub fn new(urls: Urls, token: Option<String>) -> Result<Self, ProfileError> {
            let client = Client::builder()
                .user_agent(info::user_agent())
                .build()?;

            Ok(HttpProfileApi {
                client,
                urls,
                token,
            })
        }

        pub fn from_config(config: &Config) -> Result<Self, ProfileError> {
            HttpProfileApi::new(Urls::new(&config.api_base_url), config.api_token.clone())
        }

        fn request(&self, method: Method, url: Url) -> RequestBuilder {
            let builder = self.client.request(method, url);

            match &self.token {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            }
        }
    }

    // these can be simplified once async functions in traits are stabilized
    impl super::ProfileApi for HttpProfileApi {
        fn get_profile(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.profile()?;

                send(self.request(Method::GET, url)).await
            }
            .boxed()
        }

        fn update_profile(
            &self,
            update: ProfileUpdate,
        ) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.profile()?;

                send(self.request(Method::PUT, url).json(&update)).await
            }
            .boxed()
        }

        fn upload_profile_photo(
            &self,
            file: PhotoFile,
        ) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.photo()?;
                let form = Form::new().part(PHOTO_FIELD, part(&file)?);

                send(self.request(Method::POST, url).multipart(form)).await
            }
            .boxed()
        }

        fn upload_additional_photos(
            &self,
            files: Vec<PhotoFile>,
        ) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.photos()?;

                let mut form = Form::new();
                for file in &files {
                    form = form.part(PHOTOS_FIELD, part(file)?);
                }

                send(self.request(Method::POST, url).multipart(form)).await
            }
            .boxed()
        }

        fn delete_photo(&self, index: usize) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.photo_at(index)?;

                send(self.request(Method::DELETE, url)).await
            }
            .boxed()
        }

        fn delete_profile_photo(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
            async move {
                let url = self.urls.photo()?;

                send(self.request(Method::DELETE, url)).await
            }
            .boxed()
        }
    }

    fn part(file: &PhotoFile) -> Result<Part, ProfileError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_owned())
            .mime_str(file.mime().as_ref())?;

        Ok(part)
    }

    /// Error bodies look like `{"message": "..."}`.
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    async fn send(builder: RequestBuilder) -> Result<ProfileRecord, ProfileError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_owned()
                });

            return Err(ProfileError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_files_must_be_images() {
        let photo = PhotoFile::new("me.jpg", mime::IMAGE_JPEG, vec![1u8, 2, 3]).expect("jpeg photo");
        assert_eq!(photo.file_name(), "me.jpg");
        assert_eq!(photo.bytes().len(), 3);

        let result = PhotoFile::new("notes.txt", mime::TEXT_PLAIN, Vec::<u8>::new());
        assert_eq!(
            result.map(|_| ()),
            Err(ValidationError::NotAnImage("text/plain".to_owned()))
        );
    }
}
