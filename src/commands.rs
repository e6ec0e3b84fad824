use crate::{
    discord, dispatch,
    player::{Card, CardType, Strength},
    Context, Data, Error, Result,
};
use poise::{command, serenity_prelude as serenity};

/// Every slash command the bot serves, in registration order.
pub(crate) fn all() -> Vec<poise::Command<Data, Error>> {
    vec![register(), add_card(), deck(), card(), roll(), ping()]
}

fn caller_id(ctx: &Context<'_>) -> String {
    ctx.author().id.to_string()
}

/// Register as a player
#[command(slash_command)]
pub(crate) async fn register(ctx: Context<'_>) -> Result<()> {
    let result = dispatch::register(&ctx.data().store, &caller_id(&ctx));
    ctx.send(discord::render_result("register", result)).await?;
    Ok(())
}

/// Add a card to your deck
#[command(slash_command, rename = "addcard")]
pub(crate) async fn add_card(
    ctx: Context<'_>,
    #[description = "Card name"] name: String,
    #[description = "Card strength"] strength: Strength,
    #[description = "Card type"]
    #[rename = "type"]
    kind: CardType,
    #[description = "Card image"] image: serenity::Attachment,
) -> Result<()> {
    let card = Card {
        name,
        strength,
        kind,
        image_reference: image.url,
    };

    let result = dispatch::add_card(&ctx.data().store, &caller_id(&ctx), card);
    ctx.send(discord::render_result("addcard", result)).await?;
    Ok(())
}

/// Show the cards in your deck
#[command(slash_command)]
pub(crate) async fn deck(ctx: Context<'_>) -> Result<()> {
    let result = dispatch::view_deck(&ctx.data().store, &caller_id(&ctx));
    ctx.send(discord::render_result("deck", result)).await?;
    Ok(())
}

/// Look up a card in your deck by name
#[command(slash_command)]
pub(crate) async fn card(
    ctx: Context<'_>,
    #[description = "Card name"] name: String,
) -> Result<()> {
    let result = dispatch::search_card(&ctx.data().store, &caller_id(&ctx), &name);
    ctx.send(discord::render_result("card", result)).await?;
    Ok(())
}

/// Roll 2d6 plus one of your stats
#[command(slash_command)]
pub(crate) async fn roll(
    ctx: Context<'_>,
    #[description = "passion, skill or friendship"] stat: String,
) -> Result<()> {
    // The guard must be gone before the reply is awaited.
    let result = {
        let mut rng = ctx.data().rng.lock().map_err(|_| "Random generator lock poisoned")?;
        dispatch::roll(&ctx.data().store, &mut *rng, &caller_id(&ctx), &stat)
    };

    ctx.send(discord::render_result("roll", result)).await?;
    Ok(())
}

/// Check that the bot is alive
#[command(slash_command)]
pub(crate) async fn ping(ctx: Context<'_>) -> Result<()> {
    ctx.say("Pong!").await?;
    Ok(())
}
