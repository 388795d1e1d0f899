use std::sync::{Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt};

use crate::api::{PhotoFile, ProfileApi};
use crate::errors::{ProfileError, ValidationError};
use crate::profile::{ProfileRecord, ProfileUpdate};

const PHOTO_BASE_URL: &str = "https://photos.example.com/";

/// A request seen by [`MockApi`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    GetProfile,
    UpdateProfile(ProfileUpdate),
    UploadProfilePhoto(String),
    UploadAdditionalPhotos(Vec<String>),
    DeletePhoto(usize),
    DeleteProfilePhoto,
}

#[derive(Default)]
struct State {
    profile: ProfileRecord,
    calls: Vec<Call>,
    fail_next: Option<ProfileError>,
}

/// An in-memory profile service. Records every call and can be told
/// to fail the next one.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<State>,
}

impl MockApi {
    pub fn new(profile: ProfileRecord) -> Self {
        MockApi {
            state: Mutex::new(State {
                profile,
                ..Default::default()
            }),
        }
    }

    /// Makes the next call fail with `error` without touching the profile.
    pub fn fail_next(&self, error: ProfileError) {
        self.state().fail_next = Some(error);
    }

    /// Makes the next call fail with the given HTTP status.
    pub fn fail_next_with_status(&self, status: u16) {
        self.fail_next(ProfileError::Status {
            status,
            message: "Request failed".to_owned(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn profile(&self) -> ProfileRecord {
        self.state().profile.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn handle<F>(&self, call: Call, mutate: F) -> Result<ProfileRecord, ProfileError>
    where F: FnOnce(&mut ProfileRecord) -> Result<(), ValidationError> {
        let mut state = self.state();
        state.calls.push(call);

        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }

        let mut updated = state.profile.clone();
        mutate(&mut updated).map_err(|e| ProfileError::Status {
            status: 422,
            message: e.to_string(),
        })?;
        state.profile = updated;

        Ok(state.profile.clone())
    }
}

fn photo_url(file: &PhotoFile) -> String {
    format!("{}{}", PHOTO_BASE_URL, file.file_name())
}

impl ProfileApi for MockApi {
    fn get_profile(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let result = self.handle(Call::GetProfile, |_| Ok(()));

        async move { result }.boxed()
    }

    fn update_profile(&self, update: ProfileUpdate) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let result = self.handle(Call::UpdateProfile(update.clone()), |profile| {
            update.apply_to(profile);
            Ok(())
        });

        async move { result }.boxed()
    }

    fn upload_profile_photo(&self, file: PhotoFile) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let url = photo_url(&file);
        let result = self.handle(Call::UploadProfilePhoto(file.file_name().to_owned()), |profile| {
            profile.photos.set_primary(url);
            Ok(())
        });

        async move { result }.boxed()
    }

    fn upload_additional_photos(
        &self,
        files: Vec<PhotoFile>,
    ) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let names = files.iter().map(|f| f.file_name().to_owned()).collect();
        let urls = files.iter().map(photo_url).collect();
        let result = self.handle(Call::UploadAdditionalPhotos(names), |profile| {
            profile.photos.extend(urls)
        });

        async move { result }.boxed()
    }

    fn delete_photo(&self, index: usize) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let result = self.handle(Call::DeletePhoto(index), |profile| {
            profile.photos.remove_additional(index).map(|_| ())
        });

        async move { result }.boxed()
    }

    fn delete_profile_photo(&self) -> BoxFuture<Result<ProfileRecord, ProfileError>> {
        let result = self.handle(Call::DeleteProfilePhoto, |profile| {
            profile.photos.remove_primary().map(|_| ())
        });

        async move { result }.boxed()
    }
}
