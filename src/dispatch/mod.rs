//! The operations behind each slash command.
//!
//! Every operation loads the player document, checks its preconditions, and only
//! then reads or changes the caller's record. A failed precondition is not an
//! error: it comes back as [`Reply::Rejected`] with guidance for the user, and the
//! document is left untouched. `Err` is reserved for storage failures.


use std::fmt::Display;

use rand::Rng;

use crate::{
    player::{Card, PlayerRecord, Stat, UnknownValue},
    roll,
    store::{RecordStore, Result},
};

/// Why a command was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("You are not registered yet. Use `/register` first.")]
    NotRegistered,
    #[error("You are already registered.")]
    AlreadyRegistered,
    #[error("A card needs a name.")]
    EmptyCardName,
    #[error("No card named `{0}` in your deck.")]
    CardNotFound(String),
    #[error("{0}")]
    InvalidStat(#[from] UnknownValue),
}

/// What a command answers with.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Reply {
    Text(String),
    /// A single card, shown with its image.
    Card { title: String, card: Card },
    Roll(roll::Output),
    Rejected(Rejection),
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Text(text) => f.write_str(text),
            Reply::Card { title, card } => write!(f, "{title}: {card}"),
            Reply::Roll(output) => write!(f, "{output}"),
            Reply::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

impl From<Rejection> for Reply {
    fn from(rejection: Rejection) -> Self {
        Reply::Rejected(rejection)
    }
}

pub(crate) const NO_CARDS: &str = "You have no cards in your deck.";

/// Creates an empty record for `user_id`.
pub(crate) fn register(store: &RecordStore, user_id: &str) -> Result<Reply> {
    store.update(|players| {
        if players.contains_key(user_id) {
            return (Rejection::AlreadyRegistered.into(), false);
        }

        players.insert(user_id.to_string(), PlayerRecord::default());
        log::info!("Registered player {user_id}");
        (
            Reply::Text("You are registered! Your deck is empty for now.".to_string()),
            true,
        )
    })
}

/// Appends `card` to the caller's deck.
pub(crate) fn add_card(store: &RecordStore, user_id: &str, mut card: Card) -> Result<Reply> {
    card.name = card.name.trim().to_string();
    if card.name.is_empty() {
        return Ok(Rejection::EmptyCardName.into());
    }

    store.update(|players| match players.get_mut(user_id) {
        Some(record) => {
            log::info!("Adding card `{}` to {user_id}'s deck", card.name);
            record.deck.push(card.clone());
            (
                Reply::Card {
                    title: "Card added".to_string(),
                    card,
                },
                true,
            )
        }
        None => (Rejection::NotRegistered.into(), false),
    })
}

/// Lists the caller's deck, one card per line.
pub(crate) fn view_deck(store: &RecordStore, user_id: &str) -> Result<Reply> {
    store.read(|players| {
        let deck = players
            .get(user_id)
            .map(|record| record.deck.as_slice())
            .unwrap_or_default();

        if deck.is_empty() {
            return Reply::Text(NO_CARDS.to_string());
        }

        let lines = deck
            .iter()
            .enumerate()
            .map(|(i, card)| format!("{}. {}", i + 1, card))
            .collect::<Vec<_>>()
            .join("\n");
        Reply::Text(format!("**Your deck**\n{lines}"))
    })
}

/// Finds the first card in the caller's deck named `name`, ignoring case.
pub(crate) fn search_card(store: &RecordStore, user_id: &str, name: &str) -> Result<Reply> {
    store.read(|players| {
        let Some(record) = players.get(user_id) else {
            return Rejection::NotRegistered.into();
        };

        match record.find_card(name) {
            Some(card) => Reply::Card {
                title: "Card found".to_string(),
                card: card.clone(),
            },
            None => Rejection::CardNotFound(name.trim().to_string()).into(),
        }
    })
}

/// Rolls 2d6 plus the caller's value for `stat`.
pub(crate) fn roll<R: Rng + ?Sized>(
    store: &RecordStore,
    rng: &mut R,
    user_id: &str,
    stat: &str,
) -> Result<Reply> {
    store.read(|players| {
        let Some(record) = players.get(user_id) else {
            return Rejection::NotRegistered.into();
        };

        match stat.parse::<Stat>() {
            Ok(stat) => Reply::Roll(roll::roll(rng, stat, record.modifier(stat))),
            Err(e) => Rejection::from(e).into(),
        }
    })
}
