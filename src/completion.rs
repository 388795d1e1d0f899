//! Profile completeness.
//!
//! The score is a fixed-weight sum over independent criteria. It only
//! drives the progress ring and the "complete your profile" nudges; it
//! never gates a save.

use serde::Serialize;

use crate::interests::MIN_INTERESTS;
use crate::profile::ProfileRecord;

/// The youngest age that counts toward completion.
pub const MIN_SCORED_AGE: u16 = 50;

/// A bio must be longer than this many characters to count.
pub const MIN_SCORED_BIO_CHARS: usize = 50;

/// Photos needed for the "more photos" criterion.
pub const SCORED_PHOTO_COUNT: usize = 3;

/// One weighted criterion of the completion score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    Name,
    Age,
    Location,
    Bio,
    FirstPhoto,
    MorePhotos,
    Interests,
    Gender,
    LookingFor,
}

impl Criterion {
    /// Every criterion, in table order.
    pub const ALL: [Criterion; 9] = [
        Criterion::Name,
        Criterion::Age,
        Criterion::Location,
        Criterion::Bio,
        Criterion::FirstPhoto,
        Criterion::MorePhotos,
        Criterion::Interests,
        Criterion::Gender,
        Criterion::LookingFor,
    ];

    pub fn weight(self) -> u8 {
        use Criterion::*;

        match self {
            Name => 10,
            Age => 10,
            Location => 10,
            Bio => 15,
            FirstPhoto => 15,
            MorePhotos => 10,
            Interests => 15,
            Gender => 10,
            LookingFor => 5,
        }
    }

    /// Text fields count as filled only when something other than
    /// whitespace is left after trimming.
    pub fn is_met(self, profile: &ProfileRecord) -> bool {
        use Criterion::*;

        match self {
            Name => !profile.name.trim().is_empty(),
            Age => profile
                .parsed_age()
                .map_or(false, |age| age >= MIN_SCORED_AGE),
            Location => !profile.location.trim().is_empty(),
            Bio => profile.bio_length() > MIN_SCORED_BIO_CHARS,
            FirstPhoto => !profile.photos.is_empty(),
            MorePhotos => profile.photos.len() >= SCORED_PHOTO_COUNT,
            Interests => profile.interest_selection().len() >= MIN_INTERESTS,
            Gender => !profile.gender.trim().is_empty(),
            LookingFor => !profile.looking_for.trim().is_empty(),
        }
    }

    /// A short suggestion shown on a nudge card.
    pub fn hint(self) -> &'static str {
        use Criterion::*;

        match self {
            Name => "Add your name so others know what to call you.",
            Age => "Add your age.",
            Location => "Tell people where you live.",
            Bio => "Write a few sentences about yourself.",
            FirstPhoto => "Add a profile photo.",
            MorePhotos => "Add a few more photos.",
            Interests => "Pick at least three interests.",
            Gender => "Add your gender.",
            LookingFor => "Say who you would like to meet.",
        }
    }
}

/// Computes the completion score of a profile, between 0 and 100.
pub fn score(profile: &ProfileRecord) -> u8 {
    let total: u32 = Criterion::ALL
        .iter()
        .filter(|c| c.is_met(profile))
        .map(|c| u32::from(c.weight()))
        .sum();

    total.min(100) as u8
}

/// The score of a profile together with what is still missing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Completion {
    pub score: u8,
    pub missing: Vec<Criterion>,
}

impl Completion {
    pub fn of(profile: &ProfileRecord) -> Self {
        Completion {
            score: score(profile),
            missing: Criterion::ALL
                .iter()
                .copied()
                .filter(|c| !c.is_met(profile))
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.score == 100
    }

    /// The missing criterion worth the most; ties go to table order.
    pub fn next_step(&self) -> Option<Criterion> {
        self.missing
            .iter()
            .copied()
            .fold(None, |best: Option<Criterion>, c| match best {
                Some(b) if b.weight() >= c.weight() => Some(b),
                _ => Some(c),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;
    use crate::profile::Photos;

    fn photos(count: usize) -> Photos {
        Photos::try_from(
            (0..count)
                .map(|i| format!("https://cdn.example.com/{}.jpg", i))
                .collect::<Vec<_>>(),
        )
        .expect("build photos")
    }

    fn rosa(bio: &str) -> ProfileRecord {
        ProfileRecord {
            name: "Rosa".to_owned(),
            age: "62".to_owned(),
            location: "Manila".to_owned(),
            bio: bio.to_owned(),
            photos: photos(1),
            interests: vec!["Reading".to_owned(), "Travel".to_owned(), "Cooking".to_owned()],
            gender: "Female".to_owned(),
            looking_for: "Men".to_owned(),
        }
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        let total: u32 = Criterion::ALL.iter().map(|c| u32::from(c.weight())).sum();

        assert_eq!(total, 100);
    }

    #[test]
    fn empty_profile_scores_zero() {
        let completion = Completion::of(&ProfileRecord::default());

        assert_eq!(completion.score, 0);
        assert_eq!(completion.missing, Criterion::ALL.to_vec());
    }

    #[test]
    fn rosa_scores_ninety_with_a_long_bio() {
        let bio = "Retired teacher who loves long walks and good books ok";
        assert_eq!(bio.chars().count(), 54);

        let completion = Completion::of(&rosa(bio));

        assert_eq!(completion.score, 90);
        assert_eq!(completion.missing, vec![Criterion::MorePhotos]);
        assert_eq!(completion.next_step(), Some(Criterion::MorePhotos));
    }

    #[test]
    fn short_bio_does_not_count() {
        let bio = "x".repeat(MIN_SCORED_BIO_CHARS);

        assert_eq!(score(&rosa(&bio)), 75);
        assert_eq!(score(&rosa(&format!("{}y", bio))), 90);
    }

    #[test]
    fn age_below_fifty_does_not_count() {
        let mut profile = ProfileRecord {
            age: "49".to_owned(),
            ..Default::default()
        };

        assert_eq!(score(&profile), 0);

        profile.age = "50".to_owned();
        assert_eq!(score(&profile), 10);

        profile.age = "fifty".to_owned();
        assert_eq!(score(&profile), 0);
    }

    #[test]
    fn very_large_ages_still_count() {
        let profile = ProfileRecord {
            age: "70000".to_owned(),
            ..Default::default()
        };

        assert_eq!(score(&profile), 10);
        assert!(crate::validation::validate_age(&profile.age).is_err());
    }

    #[test]
    fn whitespace_only_fields_are_empty() {
        let profile = ProfileRecord {
            name: "   ".to_owned(),
            location: "\t".to_owned(),
            gender: " ".to_owned(),
            looking_for: "\n".to_owned(),
            ..Default::default()
        };

        assert_eq!(score(&profile), 0);
    }

    #[test]
    fn repeated_interests_count_once() {
        let profile = ProfileRecord {
            interests: vec!["Reading".to_owned(), "Reading".to_owned(), " Reading ".to_owned()],
            ..Default::default()
        };
        assert_eq!(score(&profile), 0);

        let record: ProfileRecord = serde_json::from_value(serde_json::json!({
            "interests": ["Reading", "Reading", " Reading ", "Travel"]
        }))
        .expect("deserialize profile");

        assert_eq!(record.interests, vec!["Reading", "Travel"]);
        assert_eq!(score(&record), 0);
    }

    #[test]
    fn full_profile_is_complete() {
        let mut profile = rosa(&"z".repeat(80));
        profile.photos = photos(3);

        let completion = Completion::of(&profile);

        assert!(completion.is_complete());
        assert_eq!(completion.next_step(), None);
    }

    #[test]
    fn next_step_prefers_heaviest_then_table_order() {
        let profile = ProfileRecord {
            name: "Ana".to_owned(),
            ..Default::default()
        };

        assert_eq!(Completion::of(&profile).next_step(), Some(Criterion::Bio));
    }

    fn profile_strategy() -> impl Strategy<Value = ProfileRecord> {
        (
            "[a-zA-Z ]{0,6}",
            prop_oneof!["[0-9]{1,3}", ".{0,4}"],
            "[a-zA-Z ]{0,6}",
            ".{0,80}",
            0..=6usize,
            vec("[a-z]{1,6}", 0..5),
            "[a-zA-Z]{0,6}",
            "[a-zA-Z]{0,6}",
        )
            .prop_map(
                |(name, age, location, bio, photo_count, interests, gender, looking_for)| {
                    ProfileRecord {
                        name,
                        age,
                        location,
                        bio,
                        photos: photos(photo_count),
                        interests,
                        gender,
                        looking_for,
                    }
                },
            )
    }

    fn fill(criterion: Criterion, profile: &mut ProfileRecord) {
        use Criterion::*;

        match criterion {
            Name => profile.name = "Rosa".to_owned(),
            Age => profile.age = "70".to_owned(),
            Location => profile.location = "Cebu".to_owned(),
            Bio => profile.bio = "b".repeat(MIN_SCORED_BIO_CHARS + 1),
            FirstPhoto => profile.photos = photos(profile.photos.len().max(1)),
            MorePhotos => profile.photos = photos(profile.photos.len().max(SCORED_PHOTO_COUNT)),
            Interests => {
                profile.interests = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]
            }
            Gender => profile.gender = "Male".to_owned(),
            LookingFor => profile.looking_for = "Anyone".to_owned(),
        }
    }

    proptest! {
        #[test]
        fn score_stays_in_range(profile in profile_strategy()) {
            prop_assert!(score(&profile) <= 100);
        }

        #[test]
        fn meeting_a_criterion_never_lowers_the_score(profile in profile_strategy(), index in 0..9usize) {
            let criterion = Criterion::ALL[index];
            let before = score(&profile);

            let mut filled = profile.clone();
            fill(criterion, &mut filled);

            prop_assert!(criterion.is_met(&filled));
            prop_assert!(score(&filled) >= before);
        }
    }
}
