//! Profile editing.
//!
//! Each field group (basic info, bio, interests) is edited on a shadow
//! copy and committed with a single request. Validation runs first and a
//! rejected save never reaches the service. Whatever the outcome, the
//! user gets a notice; on failure the shadow copy and the committed
//! record are left exactly as they were.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, o, Logger};

use crate::api::{PhotoFile, ProfileApi};
use crate::completion::Completion;
use crate::config::Config;
use crate::errors::{ProfileError, ValidationError};
use crate::interests::InterestSelection;
use crate::normalization::normalize_text;
use crate::notice::{NoticeBoard, NoticeKind};
use crate::profile::{BasicInfo, ProfileRecord, ProfileUpdate};
use crate::validation;

pub type SafeApi = dyn ProfileApi + Send + Sync;

/// The parts of a profile that are saved independently.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Group {
    BasicInfo,
    Bio,
    Interests,
    Photos,
}

impl Group {
    fn key(self) -> &'static str {
        match self {
            Group::BasicInfo => "basic_info",
            Group::Bio => "bio",
            Group::Interests => "interests",
            Group::Photos => "photos",
        }
    }

    fn saved_message(self) -> &'static str {
        match self {
            Group::BasicInfo => "Your details have been saved.",
            Group::Bio => "Your bio has been saved.",
            Group::Interests => "Your interests have been saved.",
            Group::Photos => "Your photos have been updated.",
        }
    }

    fn failed_message(self) -> &'static str {
        match self {
            Group::BasicInfo => "We couldn't save your details. Please try again.",
            Group::Bio => "We couldn't save your bio. Please try again.",
            Group::Interests => "We couldn't save your interests. Please try again.",
            Group::Photos => "We couldn't update your photos. Please try again.",
        }
    }
}

pub struct ProfileEditor {
    logger: Arc<Logger>,
    api: Arc<SafeApi>,
    committed: ProfileRecord,
    basic_info: BasicInfo,
    bio: String,
    interests: InterestSelection,
    notices: NoticeBoard,
}

impl ProfileEditor {
    /// Fetches the profile and opens an editor on it.
    pub async fn load(
        api: Arc<SafeApi>,
        logger: Arc<Logger>,
        config: &Config,
    ) -> Result<Self, ProfileError> {
        debug!(logger, "Loading profile...");

        let profile = api.get_profile().await.map_err(|e| {
            error!(logger, "Could not load profile"; "error" => ?e, "message" => %e);
            e
        })?;

        Ok(ProfileEditor::new(api, logger, profile, config.notice_ttl))
    }

    pub fn new(
        api: Arc<SafeApi>,
        logger: Arc<Logger>,
        profile: ProfileRecord,
        notice_ttl: Duration,
    ) -> Self {
        let logger = Arc::new(logger.new(o!("component" => "profile_editor")));

        ProfileEditor {
            logger,
            api,
            basic_info: profile.basic_info(),
            bio: profile.bio.clone(),
            interests: profile.interest_selection(),
            committed: profile,
            notices: NoticeBoard::new(notice_ttl),
        }
    }

    /// The profile as last confirmed by the service.
    pub fn profile(&self) -> &ProfileRecord {
        &self.committed
    }

    pub fn completion(&self) -> Completion {
        Completion::of(&self.committed)
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    /// Fetches the profile again and discards every shadow copy.
    pub async fn reload(&mut self) -> Result<&ProfileRecord, ProfileError> {
        debug!(self.logger, "Reloading profile...");

        let api = self.api.clone();
        let profile = api.get_profile().await.map_err(|e| {
            error!(self.logger, "Could not reload profile"; "error" => ?e, "message" => %e);
            e
        })?;

        self.basic_info = profile.basic_info();
        self.bio = profile.bio.clone();
        self.interests = profile.interest_selection();
        self.committed = profile;

        Ok(&self.committed)
    }

    // basic info

    pub fn basic_info(&self) -> &BasicInfo {
        &self.basic_info
    }

    pub fn basic_info_mut(&mut self) -> &mut BasicInfo {
        &mut self.basic_info
    }

    pub fn basic_info_dirty(&self) -> bool {
        ProfileUpdate::basic_info(&self.basic_info) != ProfileUpdate::basic_info(&self.committed.basic_info())
    }

    pub fn revert_basic_info(&mut self) {
        self.basic_info = self.committed.basic_info();
    }

    pub async fn save_basic_info(&mut self) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::BasicInfo;

        if let Err(e) = validation::validate_basic_info(&self.basic_info) {
            return Err(self.reject(group, e));
        }

        let update = ProfileUpdate::basic_info(&self.basic_info);
        let updated = self.send_update(group, update).await?;

        self.basic_info = updated.basic_info();
        Ok(self.commit(group, updated))
    }

    // bio

    pub fn bio(&self) -> &str {
        &self.bio
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.bio = bio.into();
    }

    pub fn bio_dirty(&self) -> bool {
        normalize_text(&self.bio) != self.committed.bio
    }

    pub fn revert_bio(&mut self) {
        self.bio = self.committed.bio.clone();
    }

    pub async fn save_bio(&mut self) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Bio;

        if let Err(e) = validation::validate_bio(&self.bio) {
            return Err(self.reject(group, e));
        }

        let update = ProfileUpdate::bio(&self.bio);
        let updated = self.send_update(group, update).await?;

        self.bio = updated.bio.clone();
        Ok(self.commit(group, updated))
    }

    // interests

    pub fn interests(&self) -> &InterestSelection {
        &self.interests
    }

    pub fn toggle_interest(&mut self, name: impl AsRef<str>) -> &InterestSelection {
        self.interests.toggle(name)
    }

    pub fn can_save_interests(&self) -> bool {
        self.interests.can_save()
    }

    pub fn interests_dirty(&self) -> bool {
        !self.interests.same_as(&self.committed.interests)
    }

    pub fn revert_interests(&mut self) {
        self.interests = self.committed.interest_selection();
    }

    pub async fn save_interests(&mut self) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Interests;

        if let Err(e) = validation::validate_interests(&self.interests) {
            return Err(self.reject(group, e));
        }

        let update = ProfileUpdate::interests(&self.interests);
        let updated = self.send_update(group, update).await?;

        self.interests = updated.interest_selection();
        Ok(self.commit(group, updated))
    }

    // photos

    pub async fn upload_profile_photo(
        &mut self,
        file: PhotoFile,
    ) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Photos;

        if let Err(e) = validation::validate_profile_photo_upload(&self.committed.photos) {
            return Err(self.reject(group, e));
        }

        debug!(self.logger, "Uploading profile photo..."; "file_name" => file.file_name());
        let api = self.api.clone();
        let result = api.upload_profile_photo(file).await;

        self.finish(group, result)
    }

    pub async fn upload_additional_photos(
        &mut self,
        files: Vec<PhotoFile>,
    ) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Photos;

        if let Err(e) = validation::validate_photo_upload(&self.committed.photos, files.len()) {
            return Err(self.reject(group, e));
        }

        debug!(self.logger, "Uploading photos..."; "count" => files.len());
        let api = self.api.clone();
        let result = api.upload_additional_photos(files).await;

        self.finish(group, result)
    }

    /// Deletes one of the additional photos, addressed by its index in
    /// the photo list.
    pub async fn delete_photo(&mut self, index: usize) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Photos;

        if let Err(e) = validation::validate_photo_index(&self.committed.photos, index) {
            return Err(self.reject(group, e));
        }

        debug!(self.logger, "Deleting photo..."; "index" => index);
        let api = self.api.clone();
        let result = api.delete_photo(index).await;

        self.finish(group, result)
    }

    pub async fn delete_profile_photo(&mut self) -> Result<&ProfileRecord, ProfileError> {
        let group = Group::Photos;

        if let Err(e) = validation::validate_profile_photo_exists(&self.committed.photos) {
            return Err(self.reject(group, e));
        }

        debug!(self.logger, "Deleting profile photo...");
        let api = self.api.clone();
        let result = api.delete_profile_photo().await;

        self.finish(group, result)
    }

    // plumbing

    async fn send_update(
        &mut self,
        group: Group,
        update: ProfileUpdate,
    ) -> Result<ProfileRecord, ProfileError> {
        debug!(self.logger, "Saving..."; "group" => group.key());

        let api = self.api.clone();
        api.update_profile(update)
            .await
            .map_err(|e| self.fail(group, e))
    }

    fn finish(
        &mut self,
        group: Group,
        result: Result<ProfileRecord, ProfileError>,
    ) -> Result<&ProfileRecord, ProfileError> {
        match result {
            Ok(updated) => Ok(self.commit(group, updated)),
            Err(e) => Err(self.fail(group, e)),
        }
    }

    fn commit(&mut self, group: Group, updated: ProfileRecord) -> &ProfileRecord {
        debug!(self.logger, "Saved"; "group" => group.key());

        self.committed = updated;
        self.notices.push(NoticeKind::Success, group.saved_message());

        &self.committed
    }

    fn reject(&mut self, group: Group, reason: ValidationError) -> ProfileError {
        debug!(self.logger, "Rejected before sending"; "group" => group.key(), "reason" => %reason);

        self.notices.push(NoticeKind::Warning, reason.to_string());

        ProfileError::from(reason)
    }

    fn fail(&mut self, group: Group, e: ProfileError) -> ProfileError {
        error!(self.logger, "Save failed"; "group" => group.key(), "error" => ?e, "message" => %e);

        self.notices.push(NoticeKind::Error, group.failed_message());

        e
    }
}
