//! Per-kind filter and sort fields.
//!
//! Each kind gets two closed enums: the fields it can be filtered on and the
//! fields it can be sorted on. Both parse from their snake_case names, which
//! are also the query-parameter names of the HTTP API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use holonet_core::error::HolonetError;
use holonet_core::types::{CharacterSummary, FilmSummary, PlanetSummary, StarshipSummary};

use crate::filter::Filterable;
use crate::sort::{SortKey, Sortable};

/// Declares a field enum with its wire names.
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every field, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of the field.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = HolonetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|field| field.as_str() == s)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|f| f.as_str()).collect();
                        HolonetError::Validation(format!(
                            "unknown field '{s}', expected one of: {}",
                            allowed.join(", ")
                        ))
                    })
            }
        }
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHARACTERS
// ═══════════════════════════════════════════════════════════════════════════════

field_enum! {
    /// Character filter fields. `gender` matches exactly.
    CharacterFilter {
        /// Gender (exact)
        Gender => "gender",
        /// Eye color
        EyeColor => "eye_color",
        /// Hair color
        HairColor => "hair_color",
        /// Skin color
        SkinColor => "skin_color",
    }
}

field_enum! {
    /// Character sort fields.
    #[derive(Default)]
    CharacterField {
        /// Name
        #[default]
        Name => "name",
        /// Height, numeric
        Height => "height",
        /// Mass, numeric
        Mass => "mass",
        /// Birth year, as text
        BirthYear => "birth_year",
    }
}

impl Filterable for CharacterSummary {
    type Field = CharacterFilter;

    fn filter_text(&self, field: CharacterFilter) -> &str {
        match field {
            CharacterFilter::Gender => &self.gender,
            CharacterFilter::EyeColor => &self.eye_color,
            CharacterFilter::HairColor => &self.hair_color,
            CharacterFilter::SkinColor => &self.skin_color,
        }
    }

    fn is_exact(field: CharacterFilter) -> bool {
        field == CharacterFilter::Gender
    }
}

impl Sortable for CharacterSummary {
    type Field = CharacterField;

    fn sort_key(&self, field: CharacterField) -> SortKey<'_> {
        match field {
            CharacterField::Name => SortKey::Text(&self.name),
            CharacterField::Height => SortKey::Numeric(&self.height),
            CharacterField::Mass => SortKey::Numeric(&self.mass),
            CharacterField::BirthYear => SortKey::Text(&self.birth_year),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLANETS
// ═══════════════════════════════════════════════════════════════════════════════

field_enum! {
    /// Planet filter fields.
    PlanetFilter {
        /// Climate
        Climate => "climate",
        /// Terrain
        Terrain => "terrain",
    }
}

field_enum! {
    /// Planet sort fields.
    #[derive(Default)]
    PlanetField {
        /// Name
        #[default]
        Name => "name",
        /// Population, numeric
        Population => "population",
        /// Diameter, numeric
        Diameter => "diameter",
        /// Climate
        Climate => "climate",
    }
}

impl Filterable for PlanetSummary {
    type Field = PlanetFilter;

    fn filter_text(&self, field: PlanetFilter) -> &str {
        match field {
            PlanetFilter::Climate => &self.climate,
            PlanetFilter::Terrain => &self.terrain,
        }
    }

    fn is_exact(_: PlanetFilter) -> bool {
        false
    }
}

impl Sortable for PlanetSummary {
    type Field = PlanetField;

    fn sort_key(&self, field: PlanetField) -> SortKey<'_> {
        match field {
            PlanetField::Name => SortKey::Text(&self.name),
            PlanetField::Population => SortKey::Numeric(&self.population),
            PlanetField::Diameter => SortKey::Numeric(&self.diameter),
            PlanetField::Climate => SortKey::Text(&self.climate),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STARSHIPS
// ═══════════════════════════════════════════════════════════════════════════════

field_enum! {
    /// Starship filter fields.
    StarshipFilter {
        /// Starship class
        StarshipClass => "starship_class",
        /// Manufacturer
        Manufacturer => "manufacturer",
    }
}

field_enum! {
    /// Starship sort fields.
    #[derive(Default)]
    StarshipField {
        /// Name
        #[default]
        Name => "name",
        /// Model
        Model => "model",
        /// Starship class
        StarshipClass => "starship_class",
    }
}

impl Filterable for StarshipSummary {
    type Field = StarshipFilter;

    fn filter_text(&self, field: StarshipFilter) -> &str {
        match field {
            StarshipFilter::StarshipClass => &self.starship_class,
            StarshipFilter::Manufacturer => &self.manufacturer,
        }
    }

    fn is_exact(_: StarshipFilter) -> bool {
        false
    }
}

impl Sortable for StarshipSummary {
    type Field = StarshipField;

    fn sort_key(&self, field: StarshipField) -> SortKey<'_> {
        match field {
            StarshipField::Name => SortKey::Text(&self.name),
            StarshipField::Model => SortKey::Text(&self.model),
            StarshipField::StarshipClass => SortKey::Text(&self.starship_class),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILMS
// ═══════════════════════════════════════════════════════════════════════════════

field_enum! {
    /// Film filter fields.
    FilmFilter {
        /// Director
        Director => "director",
        /// Producer
        Producer => "producer",
    }
}

field_enum! {
    /// Film sort fields. Films default to episode order.
    #[derive(Default)]
    FilmField {
        /// Title
        Title => "title",
        /// Episode number
        #[default]
        EpisodeId => "episode_id",
        /// Release date
        ReleaseDate => "release_date",
    }
}

impl Filterable for FilmSummary {
    type Field = FilmFilter;

    fn filter_text(&self, field: FilmFilter) -> &str {
        match field {
            FilmFilter::Director => &self.director,
            FilmFilter::Producer => &self.producer,
        }
    }

    fn is_exact(_: FilmFilter) -> bool {
        false
    }
}

impl Sortable for FilmSummary {
    type Field = FilmField;

    fn sort_key(&self, field: FilmField) -> SortKey<'_> {
        match field {
            FilmField::Title => SortKey::Text(&self.title),
            FilmField::EpisodeId => SortKey::Integer(i64::from(self.episode_id)),
            FilmField::ReleaseDate => SortKey::Text(&self.release_date),
        }
    }
}
