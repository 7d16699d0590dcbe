//! Command line: `arcade [snake|tetris] [seed]`

use anyhow::{bail, Context, Result};

use crate::scores::current_timestamp_ms;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub game: GameId,
    /// None picks a seed from the clock
    pub seed: Option<u32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            game: GameId::Snake,
            seed: None,
        }
    }
}

impl RunOptions {
    /// Parse arguments after the program name
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        if let Some(game) = args.next() {
            let game = game.as_ref();
            options.game = match GameId::from_str(game) {
                Some(id @ (GameId::Snake | GameId::BlockStacker)) => id,
                Some(id) => bail!("{} is not playable in the terminal", id.as_str()),
                None => bail!("unknown game `{}` (expected snake or tetris)", game),
            };
        }

        if let Some(seed) = args.next() {
            let seed = seed.as_ref();
            options.seed = Some(
                seed.parse()
                    .with_context(|| format!("invalid seed `{}`", seed))?,
            );
        }

        if let Some(extra) = args.next() {
            bail!("unexpected argument `{}`", extra.as_ref());
        }

        Ok(options)
    }

    /// Seed for the first run
    pub fn initial_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| current_timestamp_ms() as u32)
    }

    /// Seed for the run started by the `switch`-th game switch.
    ///
    /// A fixed seed gives a reproducible but different sequence per switch;
    /// otherwise each switch reads the clock again.
    pub fn switch_seed(&self, switch: u32) -> u32 {
        match self.seed {
            Some(seed) => seed.wrapping_add(switch.wrapping_mul(0x9E37_79B9)),
            None => current_timestamp_ms() as u32,
        }
    }
}
