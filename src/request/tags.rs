use log::warn;
use std::fmt;

/// Value a form uses to clear a multi-select group.
pub const NONE_SENTINEL: &str = "none";

/// A closed set of string-tagged options.
///
/// Parsing is case-insensitive against [`Tag::ALL`]; anything outside the set
/// is rejected instead of being mapped onto a neighbouring value.
pub trait Tag: Copy + Eq + fmt::Debug + 'static {
    /// Every value of the set, in display order.
    const ALL: &'static [Self];

    /// Wire/display name of the tag.
    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(value))
    }
}

/// Dietary preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Vegetarian,
    Vegan,
    GlutenFree,
    LowCarb,
    HighProtein,
    Spicy,
    LowSodium,
}

impl Tag for Preference {
    const ALL: &'static [Self] = &[
        Preference::Vegetarian,
        Preference::Vegan,
        Preference::GlutenFree,
        Preference::LowCarb,
        Preference::HighProtein,
        Preference::Spicy,
        Preference::LowSodium,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Preference::Vegetarian => "vegetarian",
            Preference::Vegan => "vegan",
            Preference::GlutenFree => "gluten-free",
            Preference::LowCarb => "low-carb",
            Preference::HighProtein => "high-protein",
            Preference::Spicy => "spicy",
            Preference::LowSodium => "low-sodium",
        }
    }
}

/// Food allergies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allergy {
    Dairy,
    Nuts,
    Shellfish,
    Gluten,
    Egg,
    Soy,
    Fish,
}

impl Tag for Allergy {
    const ALL: &'static [Self] = &[
        Allergy::Dairy,
        Allergy::Nuts,
        Allergy::Shellfish,
        Allergy::Gluten,
        Allergy::Egg,
        Allergy::Soy,
        Allergy::Fish,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Allergy::Dairy => "dairy",
            Allergy::Nuts => "nuts",
            Allergy::Shellfish => "shellfish",
            Allergy::Gluten => "gluten",
            Allergy::Egg => "egg",
            Allergy::Soy => "soy",
            Allergy::Fish => "fish",
        }
    }
}

/// Nutrients the dish should be rich in (the form calls these "deficiencies")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientFocus {
    Iron,
    Calcium,
    Protein,
    VitaminD,
    VitaminC,
    Omega3,
    Fiber,
}

impl Tag for NutrientFocus {
    const ALL: &'static [Self] = &[
        NutrientFocus::Iron,
        NutrientFocus::Calcium,
        NutrientFocus::Protein,
        NutrientFocus::VitaminD,
        NutrientFocus::VitaminC,
        NutrientFocus::Omega3,
        NutrientFocus::Fiber,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            NutrientFocus::Iron => "iron",
            NutrientFocus::Calcium => "calcium",
            NutrientFocus::Protein => "protein",
            NutrientFocus::VitaminD => "vitamin-d",
            NutrientFocus::VitaminC => "vitamin-c",
            NutrientFocus::Omega3 => "omega-3",
            NutrientFocus::Fiber => "fiber",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cuisine {
    #[default]
    Any,
    Italian,
    Indian,
    Mexican,
    Chinese,
    Japanese,
    Thai,
    American,
    Mediterranean,
    French,
}

impl Tag for Cuisine {
    const ALL: &'static [Self] = &[
        Cuisine::Any,
        Cuisine::Italian,
        Cuisine::Indian,
        Cuisine::Mexican,
        Cuisine::Chinese,
        Cuisine::Japanese,
        Cuisine::Thai,
        Cuisine::American,
        Cuisine::Mediterranean,
        Cuisine::French,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Any => "any",
            Cuisine::Italian => "italian",
            Cuisine::Indian => "indian",
            Cuisine::Mexican => "mexican",
            Cuisine::Chinese => "chinese",
            Cuisine::Japanese => "japanese",
            Cuisine::Thai => "thai",
            Cuisine::American => "american",
            Cuisine::Mediterranean => "mediterranean",
            Cuisine::French => "french",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MealType {
    #[default]
    Any,
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
}

impl Tag for MealType {
    const ALL: &'static [Self] = &[
        MealType::Any,
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Dessert,
        MealType::Snack,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            MealType::Any => "any",
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Dessert => "dessert",
            MealType::Snack => "snack",
        }
    }
}

macro_rules! display_as_tag {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_tag!(Preference, Allergy, NutrientFocus, Cuisine, MealType);

/// Parse a single-choice field, falling back to the `Any`-style default for
/// blank or unknown input.
pub fn parse_choice<T: Tag + Default>(field: &str, value: Option<&str>) -> T {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => T::default(),
        Some(raw) => T::parse(raw).unwrap_or_else(|| {
            warn!("Ignoring unknown {} '{}'", field, raw);
            T::default()
        }),
    }
}

/// One click on a multi-select group: either the clearing sentinel or a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSelection<T> {
    None,
    Tag(T),
}

impl<T: Tag> TagSelection<T> {
    /// Parse a raw selection; `None` for values outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case(NONE_SENTINEL) {
            Some(TagSelection::None)
        } else {
            T::parse(value).map(TagSelection::Tag)
        }
    }
}

/// Ordered set of tags; selection order is kept because the first preference
/// names fallback recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet<T> {
    tags: Vec<T>,
}

impl<T> Default for TagSet<T> {
    fn default() -> Self {
        Self { tags: Vec::new() }
    }
}

impl<T: Tag> TagSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from values present at submission time.
    ///
    /// Values are kept in order and deduplicated. A submission containing the
    /// `"none"` sentinel is the empty set; unknown values are skipped.
    pub fn from_submitted<S: AsRef<str>>(field: &str, values: &[S]) -> Self {
        let mut set = Self::new();
        for raw in values {
            let raw = raw.as_ref();
            match TagSelection::<T>::parse(raw) {
                Some(TagSelection::None) => return Self::new(),
                Some(TagSelection::Tag(tag)) => set.insert(tag),
                None => warn!("Ignoring unknown {} '{}'", field, raw),
            }
        }
        set
    }

    /// Apply one interactive selection: the sentinel clears the set, any other
    /// tag toggles its membership.
    pub fn toggle(&mut self, selection: TagSelection<T>) {
        match selection {
            TagSelection::None => self.tags.clear(),
            TagSelection::Tag(tag) => {
                if let Some(pos) = self.tags.iter().position(|t| *t == tag) {
                    self.tags.remove(pos);
                } else {
                    self.tags.push(tag);
                }
            }
        }
    }

    pub fn insert(&mut self, tag: T) {
        if !self.contains(tag) {
            self.tags.push(tag);
        }
    }

    pub fn contains(&self, tag: T) -> bool {
        self.tags.contains(&tag)
    }

    pub fn first(&self) -> Option<T> {
        self.tags.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.tags.iter().copied()
    }

    /// Tag names joined with `", "`
    pub fn joined(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T: Tag> FromIterator<T> for TagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
