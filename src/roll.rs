use std::fmt::Display;

use rand::Rng;

use crate::player::Stat;

const SIDES: u32 = 6;

/// Two six-sided dice plus the modifier of the stat they were rolled for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Output {
    pub stat: Stat,
    pub dice: [u32; 2],
    pub modifier: i64,
}

impl Output {
    /// Sum of the dice, before the modifier.
    pub(crate) fn base(&self) -> i64 {
        self.dice.iter().map(|&d| i64::from(d)).sum()
    }

    pub(crate) fn total(&self) -> i64 {
        self.base() + self.modifier
    }
}

/// Renders as `Passion: 7 [3, 4] + 2 = **9**`.
impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.modifier < 0 { '-' } else { '+' };
        write!(
            f,
            "{}: {} [{}, {}] {} {} = **{}**",
            self.stat,
            self.base(),
            self.dice[0],
            self.dice[1],
            sign,
            self.modifier.abs(),
            self.total()
        )
    }
}

/// Rolls 2d6 and adds `modifier`.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, stat: Stat, modifier: i64) -> Output {
    let dice = [rng.gen_range(1..=SIDES), rng.gen_range(1..=SIDES)];
    log::debug!("Rolled {dice:?} for {stat} with modifier {modifier}");
    Output {
        stat,
        dice,
        modifier,
    }
}
