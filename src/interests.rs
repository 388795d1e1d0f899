//! Interest selection and the catalog of suggested interests.
//!
//! A selection behaves as a set: toggling a name adds it when absent and
//! removes it when present. Insertion order is kept so the picker renders
//! chips in a stable order, but nothing depends on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::normalization::normalize_text;

/// The minimum number of interests a user must pick before saving.
pub const MIN_INTERESTS: usize = 3;

/// The set of interests a user has picked.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InterestSelection(Vec<String>);

impl InterestSelection {
    pub fn new() -> Self {
        InterestSelection(Vec::new())
    }

    /// Builds a selection from a list of names, dropping blanks and
    /// duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = InterestSelection::new();

        for name in names {
            let name = normalize_text(name);

            if !name.is_empty() && !selection.0.contains(&name) {
                selection.0.push(name);
            }
        }

        selection
    }

    /// Adds `name` if it is not selected, removes it if it is.
    pub fn toggle(&mut self, name: impl AsRef<str>) -> &Self {
        let name = normalize_text(name);

        if name.is_empty() {
            return self;
        }

        match self.0.iter().position(|n| *n == name) {
            Some(index) => {
                self.0.remove(index);
            }
            None => self.0.push(name),
        }

        self
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        let name = normalize_text(name);
        self.0.iter().any(|n| *n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    /// Whether the selection is large enough to save.
    pub fn can_save(&self) -> bool {
        can_save(self.len())
    }

    /// Like [`InterestSelection::can_save`], but says why not.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.can_save() {
            Ok(())
        } else {
            Err(ValidationError::TooFewInterests {
                selected: self.len(),
                required: MIN_INTERESTS,
            })
        }
    }

    /// Whether this selection holds the same names as `names`, in any
    /// order.
    pub fn same_as(&self, names: &[String]) -> bool {
        let other = InterestSelection::from_names(names);
        self.len() == other.len() && other.iter().all(|n| self.0.iter().any(|m| m == n))
    }
}

pub fn can_save(selected: usize) -> bool {
    selected >= MIN_INTERESTS
}

/// Groups shown as sections in the interest picker.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Creative,
    Outdoors,
    Social,
    Wellness,
    Learning,
}

/// Icons the picker can draw next to an interest. Unknown names are
/// rejected when parsed rather than when drawn.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Book,
    Plane,
    ChefHat,
    Music,
    Palette,
    Leaf,
    Walking,
    Fish,
    Camera,
    Heart,
    Users,
    Coffee,
    Film,
    Dumbbell,
    Puzzle,
    Globe,
    Sun,
    Paw,
}

impl Icon {
    const ALL: [(Icon, &'static str); 18] = [
        (Icon::Book, "book"),
        (Icon::Plane, "plane"),
        (Icon::ChefHat, "chef-hat"),
        (Icon::Music, "music"),
        (Icon::Palette, "palette"),
        (Icon::Leaf, "leaf"),
        (Icon::Walking, "walking"),
        (Icon::Fish, "fish"),
        (Icon::Camera, "camera"),
        (Icon::Heart, "heart"),
        (Icon::Users, "users"),
        (Icon::Coffee, "coffee"),
        (Icon::Film, "film"),
        (Icon::Dumbbell, "dumbbell"),
        (Icon::Puzzle, "puzzle"),
        (Icon::Globe, "globe"),
        (Icon::Sun, "sun"),
        (Icon::Paw, "paw"),
    ];

    pub fn name(self) -> &'static str {
        Icon::ALL[self as usize].1
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(icon, _)| *icon)
            .ok_or_else(|| UnknownIcon(s.to_owned()))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown icon {0:?}")]
pub struct UnknownIcon(pub String);

/// A suggested interest in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Interest {
    pub name: &'static str,
    pub category: Category,
    pub icon: Icon,
}

const fn interest(name: &'static str, category: Category, icon: Icon) -> Interest {
    Interest {
        name,
        category,
        icon,
    }
}

/// Interests offered in the picker, in display order.
pub const CATALOG: &[Interest] = &[
    interest("Reading", Category::Learning, Icon::Book),
    interest("Travel", Category::Outdoors, Icon::Plane),
    interest("Cooking", Category::Creative, Icon::ChefHat),
    interest("Music", Category::Creative, Icon::Music),
    interest("Painting", Category::Creative, Icon::Palette),
    interest("Gardening", Category::Outdoors, Icon::Leaf),
    interest("Walking", Category::Wellness, Icon::Walking),
    interest("Fishing", Category::Outdoors, Icon::Fish),
    interest("Photography", Category::Creative, Icon::Camera),
    interest("Volunteering", Category::Social, Icon::Heart),
    interest("Dancing", Category::Social, Icon::Users),
    interest("Coffee", Category::Social, Icon::Coffee),
    interest("Movies", Category::Social, Icon::Film),
    interest("Fitness", Category::Wellness, Icon::Dumbbell),
    interest("Puzzles", Category::Learning, Icon::Puzzle),
    interest("Languages", Category::Learning, Icon::Globe),
    interest("Yoga", Category::Wellness, Icon::Sun),
    interest("Pets", Category::Social, Icon::Paw),
];

/// Looks up a catalog entry by name.
pub fn find(name: &str) -> Option<&'static Interest> {
    let name = normalize_text(name);
    CATALOG.iter().find(|i| i.name.eq_ignore_ascii_case(&name))
}

/// Catalog entries in one category, in display order.
pub fn in_category(category: Category) -> impl Iterator<Item = &'static Interest> {
    CATALOG.iter().filter(move |i| i.category == category)
}
