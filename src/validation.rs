//! Local preconditions checked before anything is sent to the profile
//! service. A failure here means no request is made.

use crate::errors::ValidationError;
use crate::interests::InterestSelection;
use crate::profile::{parse_age, BasicInfo, Photos, MAX_PHOTOS};

/// Youngest age accepted on the basic-info form.
pub const MIN_AGE: u16 = 50;

/// Oldest age accepted on the basic-info form.
pub const MAX_AGE: u16 = 120;

/// Longest bio accepted, in characters.
pub const MAX_BIO_CHARS: usize = 500;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::NameEmpty)
    } else {
        Ok(())
    }
}

pub fn validate_age(age: &str) -> Result<u16, ValidationError> {
    let parsed = parse_age(age).ok_or(ValidationError::AgeNotNumeric)?;

    if (MIN_AGE..=MAX_AGE).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ValidationError::AgeOutOfRange {
            age: parsed,
            min: MIN_AGE,
            max: MAX_AGE,
        })
    }
}

/// Checks the basic-info group. Name comes first, then age, matching
/// the order of the form.
pub fn validate_basic_info(info: &BasicInfo) -> Result<(), ValidationError> {
    validate_name(&info.name)?;
    validate_age(&info.age)?;

    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), ValidationError> {
    let length = bio.trim().chars().count();

    if length > MAX_BIO_CHARS {
        Err(ValidationError::BioTooLong {
            length,
            max: MAX_BIO_CHARS,
        })
    } else {
        Ok(())
    }
}

pub fn validate_interests(selection: &InterestSelection) -> Result<(), ValidationError> {
    selection.check()
}

/// Checks that `adding` more photos fit next to the existing ones.
pub fn validate_photo_upload(photos: &Photos, adding: usize) -> Result<(), ValidationError> {
    if adding == 0 {
        return Err(ValidationError::NoPhotosChosen);
    }

    let count = photos.len() + adding;

    if count > MAX_PHOTOS {
        Err(ValidationError::TooManyPhotos {
            count,
            max: MAX_PHOTOS,
        })
    } else {
        Ok(())
    }
}

/// Checks that replacing or adding the profile photo keeps the limit.
pub fn validate_profile_photo_upload(photos: &Photos) -> Result<(), ValidationError> {
    if photos.is_empty() {
        validate_photo_upload(photos, 1)
    } else {
        Ok(())
    }
}

/// Checks an index that addresses one of the additional photos.
pub fn validate_photo_index(photos: &Photos, index: usize) -> Result<(), ValidationError> {
    if index == 0 {
        Err(ValidationError::PrimaryPhotoIndex)
    } else if index >= photos.len() {
        Err(ValidationError::NoSuchPhoto { index })
    } else {
        Ok(())
    }
}

pub fn validate_profile_photo_exists(photos: &Photos) -> Result<(), ValidationError> {
    if photos.is_empty() {
        Err(ValidationError::NoSuchPhoto { index: 0 })
    } else {
        Ok(())
    }
}
