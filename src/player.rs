use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A value outside one of the closed sets (`Strength`, `CardType`, `Stat`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {kind}, expected one of: {expected}")]
pub(crate) struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Defines a closed set of names with a case-insensitive parser.
///
/// The enum is stored by its canonical name and offered to Discord as a choice list.
macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, poise::ChoiceParameter)]
        #[serde(try_from = "String", into = "String")]
        pub(crate) enum $name {
            $($variant),+
        }

        impl $name {
            pub(crate) const ALL: &'static [$name] = &[$($name::$variant),+];

            pub(crate) fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .copied()
                    .ok_or_else(|| UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                        expected: concat!($(stringify!($variant), " "),+).trim_end(),
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownValue;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> String {
                v.as_str().to_string()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set!(
    /// How powerful a card is.
    Strength, "strength", [Weak, Normal, Strong]
);

closed_set!(
    /// What kind of thing a card represents.
    CardType, "card type", [Warrior, Item, Invocation]
);

closed_set!(
    /// A player stat usable as a roll modifier.
    Stat, "stat", [Passion, Skill, Friendship]
);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Card {
    pub name: String,
    pub strength: Strength,
    #[serde(rename = "type")]
    pub kind: CardType,
    /// URL of the image the card was created with.
    #[serde(rename = "image")]
    pub image_reference: String,
}

impl Card {
    pub(crate) fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Renders as `name (Type | Strength)`.
impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} | {})", self.name, self.kind, self.strength)
    }
}

/// Everything stored for a single registered user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PlayerRecord {
    pub passion: i64,
    pub skill: i64,
    pub friendship: i64,
    // Not used by any command yet.
    pub baggage: Vec<serde_json::Value>,
    pub deck: Vec<Card>,
    pub hand: Vec<Card>,
}

impl PlayerRecord {
    /// The modifier a roll on `stat` adds to the dice.
    pub(crate) fn modifier(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Passion => self.passion,
            Stat::Skill => self.skill,
            Stat::Friendship => self.friendship,
        }
    }

    /// First card in the deck whose name matches, ignoring case.
    pub(crate) fn find_card(&self, name: &str) -> Option<&Card> {
        self.deck.iter().find(|card| card.matches(name))
    }
}
