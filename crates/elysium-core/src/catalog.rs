//! Prize and reason catalog.
//!
//! The wheel draws from two fixed lists: museum visits (relics) and reasons
//! (echoes). A built-in set ships with the library; a TOML file can replace
//! it through `journey.catalog_path` in the config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{CoreError, ValidationError};
use crate::journey::{OutcomeKind, SpinEntry};

/// A museum visit that can be won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
}

/// A reason text that can be unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub id: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub prizes: Vec<Prize>,
    #[serde(default)]
    pub reasons: Vec<Reason>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(prizes: Vec<Prize>, reasons: Vec<Reason>) -> Result<Self, ValidationError> {
        let catalog = Self { prizes, reasons };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ValidationError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a TOML catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn prize(&self, id: u32) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    pub fn reason(&self, id: u32) -> Option<&Reason> {
        self.reasons.iter().find(|r| r.id == id)
    }

    /// Whether the entry points at something in this catalog.
    pub fn contains(&self, entry: SpinEntry) -> bool {
        match entry.kind {
            OutcomeKind::Win => self.prize(entry.id).is_some(),
            OutcomeKind::Reason => self.reason(entry.id).is_some(),
        }
    }

    /// Every outcome the wheel could produce, prizes first.
    pub fn entries(&self) -> impl Iterator<Item = SpinEntry> + '_ {
        self.prizes
            .iter()
            .map(|p| SpinEntry::win(p.id))
            .chain(self.reasons.iter().map(|r| SpinEntry::reason(r.id)))
    }

    /// Display title for an entry: the museum name or the reason text.
    pub fn title(&self, entry: SpinEntry) -> Option<&str> {
        match entry.kind {
            OutcomeKind::Win => self.prize(entry.id).map(|p| p.name.as_str()),
            OutcomeKind::Reason => self.reason(entry.id).map(|r| r.text.as_str()),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for prize in &self.prizes {
            if !seen.insert(prize.id) {
                return Err(ValidationError::DuplicateId {
                    collection: "prize",
                    id: prize.id,
                });
            }
        }
        seen.clear();
        for reason in &self.reasons {
            if !seen.insert(reason.id) {
                return Err(ValidationError::DuplicateId {
                    collection: "reason",
                    id: reason.id,
                });
            }
        }
        Ok(())
    }

    /// The catalog bundled with the app: ten museums and fifteen reasons,
    /// exactly one journey's worth.
    pub fn builtin() -> Self {
        let museum = |id: u32, name: &str, description: &str| Prize {
            id,
            name: name.to_string(),
            description: description.to_string(),
            image: None,
            ticket_url: None,
        };
        let prizes = vec![
            museum(1, "National Museum of Lithuania", "Old Arsenal halls, amber and royal treasures."),
            museum(2, "MO Museum", "Modern and contemporary Lithuanian art under one white roof."),
            museum(3, "Vilnius Picture Gallery", "Baroque portraits in the Chodkiewicz Palace."),
            museum(4, "Palace of the Grand Dukes", "Walk the rebuilt royal palace at the foot of Gediminas Hill."),
            museum(5, "National Gallery of Art", "Twentieth-century art across the Neris."),
            museum(6, "Museum of Illusions", "A slightly crooked afternoon together."),
            museum(7, "Amber Museum-Gallery", "Sunstone in every shade of honey."),
            museum(8, "Money Museum", "Coins, banknotes, and your weight in gold."),
            museum(9, "Theatre, Music and Cinema Museum", "Stage costumes and old instruments in Vokiečių street."),
            museum(10, "Kaunas Museum of Devils", "Three thousand devils and one angel."),
        ];

        let texts = [
            "The way you laugh before the joke is finished.",
            "You make ordinary Tuesdays feel like holidays.",
            "You remember the small things I forget to say.",
            "Your hands are always warm when mine are cold.",
            "You read the museum plaques out loud for me.",
            "You hum when you cook and do not notice.",
            "You are brave in the quiet ways that matter.",
            "Every plan with you turns into a story.",
            "You believe in me on the days I do not.",
            "You make coffee exactly the way I like it.",
            "The way you say my name.",
            "You are kind to strangers, and to me most of all.",
            "You turn getting lost into an adventure.",
            "Your curiosity never runs out.",
            "Home is wherever you are standing.",
        ];
        let reasons = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Reason {
                id: i as u32,
                text: (*text).to_string(),
            })
            .collect();

        Self { prizes, reasons }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
