//! Characters (upstream `people`).

use serde::{Deserialize, Serialize};

use super::{EntityId, EntityKind, Planet};
use crate::traits::Resource;

/// A character, as served by the upstream.
///
/// Measurements are text: the upstream uses `"unknown"` and thousands
/// separators freely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Identifier (from the fetch target)
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Height in centimeters, as text
    pub height: String,
    /// Mass in kilograms, as text
    pub mass: String,
    /// Hair color
    pub hair_color: String,
    /// Skin color
    pub skin_color: String,
    /// Eye color
    pub eye_color: String,
    /// Birth year, e.g. "19BBY"
    pub birth_year: String,
    /// Gender ("male", "female", "n/a", ...)
    pub gender: String,
    /// Locator of the homeworld planet
    #[serde(rename(deserialize = "homeworld"))]
    pub homeworld_url: String,
    /// Locators of the films the character appears in
    #[serde(default, rename(deserialize = "films"))]
    pub film_urls: Vec<String>,
    /// Locators of the character's species
    #[serde(default, rename(deserialize = "species"))]
    pub species_urls: Vec<String>,
    /// Locators of vehicles driven
    #[serde(default, rename(deserialize = "vehicles"))]
    pub vehicle_urls: Vec<String>,
    /// Locators of starships piloted
    #[serde(default, rename(deserialize = "starships"))]
    pub starship_urls: Vec<String>,
    /// Homeworld, embedded only when explicitly requested
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub homeworld: Option<Box<Planet>>,
}

/// Lightweight character for lists and references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSummary {
    /// Identifier
    #[serde(default)]
    pub id: EntityId,
    /// Name
    pub name: String,
    /// Gender
    pub gender: String,
    /// Birth year
    pub birth_year: String,
    /// Eye color
    #[serde(default)]
    pub eye_color: String,
    /// Hair color
    #[serde(default)]
    pub hair_color: String,
    /// Skin color
    #[serde(default)]
    pub skin_color: String,
    /// Height, as text
    #[serde(default)]
    pub height: String,
    /// Mass, as text
    #[serde(default)]
    pub mass: String,
}

impl_record!(Character, CharacterSummary);

impl Resource for Character {
    const KIND: EntityKind = EntityKind::Character;
    type Summary = CharacterSummary;

    fn references(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Planet if !self.homeworld_url.is_empty() => {
                vec![self.homeworld_url.as_str()]
            }
            EntityKind::Film => self.film_urls.iter().map(String::as_str).collect(),
            EntityKind::Starship => self.starship_urls.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Record;

    fn luke() -> serde_json::Value {
        serde_json::json!({
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "skin_color": "fair",
            "eye_color": "blue",
            "birth_year": "19BBY",
            "gender": "male",
            "homeworld": "https://swapi.dev/api/planets/1/",
            "films": [
                "https://swapi.dev/api/films/1/",
                "https://swapi.dev/api/films/2/"
            ],
            "species": [],
            "vehicles": ["https://swapi.dev/api/vehicles/14/"],
            "starships": ["https://swapi.dev/api/starships/12/"],
            "url": "https://swapi.dev/api/people/1/"
        })
    }

    #[test]
    fn test_decode_character() {
        let character = Character::from_raw(1, &luke()).unwrap();
        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Luke Skywalker");
        assert_eq!(character.homeworld_url, "https://swapi.dev/api/planets/1/");
        assert_eq!(character.film_urls.len(), 2);
        assert!(character.homeworld.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let character = Character::from_raw(1, &luke()).unwrap();
        let json = serde_json::to_value(&character).unwrap();
        assert_eq!(json["homeworld_url"], "https://swapi.dev/api/planets/1/");
        assert_eq!(json["film_urls"][0], "https://swapi.dev/api/films/1/");
        assert!(json.get("homeworld").is_none());
    }

    #[test]
    fn test_summary_from_listing_item() {
        let summary = CharacterSummary::from_listing_item(&luke()).unwrap();
        assert_eq!(summary.id, 1);
        assert_eq!(summary.gender, "male");
        assert_eq!(summary.height, "172");
    }

    #[test]
    fn test_references() {
        let character = Character::from_raw(1, &luke()).unwrap();
        assert_eq!(character.references(EntityKind::Planet).len(), 1);
        assert_eq!(character.references(EntityKind::Film).len(), 2);
        assert_eq!(character.references(EntityKind::Starship).len(), 1);
        assert!(character.references(EntityKind::Character).is_empty());
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let mut raw = luke();
        raw.as_object_mut().unwrap().remove("name");
        assert!(Character::from_raw(1, &raw).is_err());
    }
}
