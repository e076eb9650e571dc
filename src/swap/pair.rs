//! Random trading pair selection

use crate::tokens::Token;
use rand::seq::SliceRandom;
use rand::Rng;

/// Direction of a single swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPair {
    pub token_in: Token,
    pub token_out: Token,
}

impl std::fmt::Display for TradingPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.token_in.symbol, self.token_out.symbol)
    }
}

/// Shuffle the token list and take the first two entries
///
/// Returns `None` when fewer than two tokens are configured.
pub fn select_pair<R: Rng + ?Sized>(tokens: &[Token], rng: &mut R) -> Option<TradingPair> {
    let mut shuffled = tokens.to_vec();
    shuffled.shuffle(rng);

    let mut picked = shuffled.into_iter();
    let token_in = picked.next()?;
    let token_out = picked.next()?;
    Some(TradingPair {
        token_in,
        token_out,
    })
}
