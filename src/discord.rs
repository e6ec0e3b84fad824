use poise::{serenity_prelude as serenity, CreateReply};

use crate::{
    dispatch::Reply,
    player::Card,
    store,
};

const CARD_COLOUR: u32 = 0x8e44ad;

pub(crate) const STORAGE_FAILURE: &str =
    "Something went wrong while reading your deck. Please try again later.";

/// Builds the embed shown for a single card.
pub(crate) fn card_embed(title: &str, card: &Card) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title(format!("{title}: {}", card.name))
        .colour(CARD_COLOUR)
        .field("Type", card.kind.as_str(), true)
        .field("Strength", card.strength.as_str(), true);

    if card.image_reference.is_empty() {
        embed
    } else {
        embed.image(&card.image_reference)
    }
}

/// Turns a dispatcher reply into a Discord message.
///
/// Rejections are only shown to the caller.
pub(crate) fn render(reply: Reply) -> CreateReply {
    match reply {
        Reply::Card { title, card } => CreateReply::default().embed(card_embed(&title, &card)),
        Reply::Rejected(rejection) => CreateReply::default()
            .content(rejection.to_string())
            .ephemeral(true),
        Reply::Roll(output) => CreateReply::default().content(format!("🎲 {output}")),
        Reply::Text(text) => CreateReply::default().content(text),
    }
}

/// Renders the outcome of a dispatcher call, hiding storage details from the user.
pub(crate) fn render_result(command: &str, result: store::Result<Reply>) -> CreateReply {
    match result {
        Ok(reply) => render(reply),
        Err(e) => {
            log::error!("Storage failure in /{command}: {e}");
            CreateReply::default()
                .content(STORAGE_FAILURE)
                .ephemeral(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatch::Rejection,
        player::{CardType, Strength},
    };
    use std::path::PathBuf;

    #[test]
    fn text_replies_are_public() {
        let reply = render(Reply::Text("hello".to_string()));
        assert_eq!(reply.content.as_deref(), Some("hello"));
        assert_eq!(reply.ephemeral, None);
        assert!(reply.embeds.is_empty());
    }

    #[test]
    fn rejections_are_ephemeral() {
        let reply = render(Reply::Rejected(Rejection::NotRegistered));
        assert_eq!(reply.ephemeral, Some(true));
        assert_eq!(
            reply.content.as_deref(),
            Some("You are not registered yet. Use `/register` first.")
        );
    }

    #[test]
    fn cards_render_as_embeds() {
        let card = Card {
            name: "Dragon".to_string(),
            strength: Strength::Strong,
            kind: CardType::Invocation,
            image_reference: "http://x/y.png".to_string(),
        };

        let reply = render(Reply::Card {
            title: "Card found".to_string(),
            card,
        });

        assert_eq!(reply.embeds.len(), 1);
        assert!(reply.content.is_none());
    }

    #[test_log::test]
    fn storage_errors_become_a_generic_message() {
        let err = store::Error::Io {
            path: PathBuf::from("players.json"),
            source: std::io::Error::other("disk on fire"),
        };

        let reply = render_result("deck", Err(err));

        assert_eq!(reply.content.as_deref(), Some(STORAGE_FAILURE));
        assert_eq!(reply.ephemeral, Some(true));
    }
}
