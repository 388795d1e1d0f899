use std::convert::TryFrom;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::interests::InterestSelection;
use crate::normalization;
use crate::validation;

/// The maximum number of photos a profile may carry, primary included.
pub const MAX_PHOTOS: usize = 6;

/// A dating profile as returned by the profile service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// The display name.
    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub name: String,

    /// The age as entered. Kept as text because the service stores it
    /// that way; see [`ProfileRecord::parsed_age`].
    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub age: String,

    /// The location provided (a place name).
    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub location: String,

    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub bio: String,

    /// Photo URLs. The first one is the profile photo.
    #[serde(default)]
    pub photos: Photos,

    #[serde(default, deserialize_with = "normalization::deserialize_list")]
    pub interests: Vec<String>,

    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub gender: String,

    /// Who the user would like to meet.
    #[serde(default, deserialize_with = "normalization::deserialize")]
    pub looking_for: String,
}

impl ProfileRecord {
    /// The age as a number, if the stored text is one.
    pub fn parsed_age(&self) -> Option<u16> {
        parse_age(&self.age)
    }

    /// The number of characters in the bio.
    pub fn bio_length(&self) -> usize {
        self.bio.chars().count()
    }

    pub fn basic_info(&self) -> BasicInfo {
        BasicInfo {
            name: self.name.clone(),
            age: self.age.clone(),
            location: self.location.clone(),
            gender: self.gender.clone(),
            looking_for: self.looking_for.clone(),
        }
    }

    pub fn interest_selection(&self) -> InterestSelection {
        InterestSelection::from_names(self.interests.iter())
    }
}

/// Parses an age entered as text. Surrounding whitespace is ignored;
/// anything else that is not a plain number yields `None`. Numbers too
/// large for a `u16` saturate at `u16::MAX`.
pub fn parse_age(age: &str) -> Option<u16> {
    let age = age.trim();

    if age.is_empty() || !age.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(age.parse::<u16>().unwrap_or(u16::MAX))
}

/// An ordered list of photo URLs holding at most [`MAX_PHOTOS`] entries.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Photos(Vec<String>);

impl Photos {
    pub fn new() -> Self {
        Photos(Vec::new())
    }

    /// The profile photo, if any.
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Every photo after the profile photo.
    pub fn additional(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// How many more photos can be added.
    pub fn remaining(&self) -> usize {
        MAX_PHOTOS - self.0.len()
    }

    /// Sets the profile photo, replacing the current one if present.
    pub fn set_primary(&mut self, url: String) {
        match self.0.first_mut() {
            Some(first) => *first = url,
            None => self.0.push(url),
        }
    }

    /// Appends photos after the existing ones.
    pub fn extend(&mut self, urls: Vec<String>) -> Result<(), ValidationError> {
        validation::validate_photo_upload(self, urls.len())?;
        self.0.extend(urls);

        Ok(())
    }

    /// Removes an additional photo by its index in the list.
    pub fn remove_additional(&mut self, index: usize) -> Result<String, ValidationError> {
        validation::validate_photo_index(self, index)?;

        Ok(self.0.remove(index))
    }

    /// Removes the profile photo. The next photo, if any, takes its place.
    pub fn remove_primary(&mut self) -> Result<String, ValidationError> {
        validation::validate_profile_photo_exists(self)?;

        Ok(self.0.remove(0))
    }
}

impl TryFrom<Vec<String>> for Photos {
    type Error = ValidationError;

    fn try_from(urls: Vec<String>) -> Result<Self, Self::Error> {
        if urls.len() > MAX_PHOTOS {
            return Err(ValidationError::TooManyPhotos {
                count: urls.len(),
                max: MAX_PHOTOS,
            });
        }

        Ok(Photos(urls))
    }
}

impl From<Photos> for Vec<String> {
    fn from(photos: Photos) -> Self {
        photos.0
    }
}

impl Deref for Photos {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

/// The basic-info field group: everything edited on the "About you" form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasicInfo {
    pub name: String,
    pub age: String,
    pub location: String,
    pub gender: String,
    pub looking_for: String,
}

/// A partial update. Only the fields that are set are sent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<String>,
}

impl ProfileUpdate {
    pub fn basic_info(info: &BasicInfo) -> Self {
        ProfileUpdate {
            name: Some(normalization::normalize_text(&info.name)),
            age: Some(info.age.trim().to_owned()),
            location: Some(normalization::normalize_text(&info.location)),
            gender: Some(normalization::normalize_text(&info.gender)),
            looking_for: Some(normalization::normalize_text(&info.looking_for)),
            ..Default::default()
        }
    }

    pub fn bio(bio: &str) -> Self {
        ProfileUpdate {
            bio: Some(normalization::normalize_text(bio)),
            ..Default::default()
        }
    }

    pub fn interests(selection: &InterestSelection) -> Self {
        ProfileUpdate {
            interests: Some(selection.to_vec()),
            ..Default::default()
        }
    }

    /// Applies the update to a record, the way the service does.
    pub fn apply_to(&self, record: &mut ProfileRecord) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut record.name, &self.name);
        set(&mut record.age, &self.age);
        set(&mut record.location, &self.location);
        set(&mut record.bio, &self.bio);
        set(&mut record.gender, &self.gender);
        set(&mut record.looking_for, &self.looking_for);

        if let Some(interests) = &self.interests {
            record.interests = interests.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_service_json() {
        let record: ProfileRecord = serde_json::from_value(json!({
            "name": "  Rosa ",
            "age": "62",
            "location": "Manila",
            "bio": "",
            "photos": ["https://cdn.example.com/a.jpg"],
            "interests": ["Reading", " ", "Travel"],
            "gender": "Female",
            "lookingFor": "Men"
        }))
        .expect("parse profile");

        assert_eq!(record.name, "Rosa");
        assert_eq!(record.parsed_age(), Some(62));
        assert_eq!(record.photos.primary(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(record.interests, vec!["Reading", "Travel"]);
        assert_eq!(record.looking_for, "Men");
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let record: ProfileRecord =
            serde_json::from_value(json!({ "name": null, "photos": [] })).expect("parse profile");

        assert_eq!(record, ProfileRecord::default());
    }

    #[test]
    fn rejects_more_than_six_photos() {
        let result = serde_json::from_value::<ProfileRecord>(json!({
            "photos": ["1", "2", "3", "4", "5", "6", "7"]
        }));

        assert!(result.is_err());
    }

    #[test]
    fn ages_parse_from_plain_digits_only() {
        assert_eq!(parse_age(" 71 "), Some(71));
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("sixty"), None);
        assert_eq!(parse_age("-55"), None);
        assert_eq!(parse_age("+55"), None);
        assert_eq!(parse_age("5.5"), None);
        assert_eq!(parse_age("99999999"), Some(u16::MAX));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = ProfileUpdate::bio("  Hello there ");
        let value = serde_json::to_value(&update).expect("serialize update");

        assert_eq!(value, json!({ "bio": "Hello there" }));

        let update = ProfileUpdate::basic_info(&BasicInfo {
            looking_for: "Women".to_owned(),
            ..Default::default()
        });
        let value = serde_json::to_value(&update).expect("serialize update");

        assert_eq!(value["lookingFor"], "Women");
        assert!(value.get("bio").is_none());
    }

    #[test]
    fn photos_split_into_primary_and_additional() {
        let photos = Photos::try_from(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
            .expect("build photos");

        assert_eq!(photos.primary(), Some("a"));
        assert_eq!(photos.additional(), &["b".to_owned(), "c".to_owned()]);
        assert_eq!(photos.remaining(), 3);
        assert!(Photos::new().additional().is_empty());
    }

    #[test]
    fn photo_mutations_keep_the_limit() {
        let mut photos = Photos::new();

        photos.set_primary("a".to_owned());
        photos.set_primary("b".to_owned());
        assert_eq!(photos.to_vec(), vec!["b"]);

        photos
            .extend(vec!["c".to_owned(), "d".to_owned()])
            .expect("add photos");
        assert_eq!(
            photos.extend(vec!["x".to_owned(); 4]),
            Err(ValidationError::TooManyPhotos { count: 7, max: 6 })
        );

        assert_eq!(photos.remove_additional(1), Ok("c".to_owned()));
        assert_eq!(photos.remove_additional(0), Err(ValidationError::PrimaryPhotoIndex));
        assert_eq!(photos.remove_primary(), Ok("b".to_owned()));
        assert_eq!(photos.primary(), Some("d"));
    }
}
