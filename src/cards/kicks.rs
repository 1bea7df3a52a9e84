use super::rank::Rank;

/// Kicker ranks packed into the low 13 bits of a u16.
/// Ord on the raw mask orders kicker sets correctly because a higher
/// rank always outweighs any combination of lower ones.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Kickers(u16);

impl Kickers {
    pub const NONE: Self = Self(0);

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n & 0x1FFF)
    }
}

impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13u16)
            .rev()
            .filter(|i| k.0 & (1 << i) != 0)
            .map(|i| Rank::from(i as u8))
            .collect()
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_rank_beats_lower_pair() {
        let ace = Kickers::from(1u16 << 12);
        let kq = Kickers::from((1u16 << 11) | (1u16 << 10));
        assert!(ace > kq);
    }

    #[test]
    fn ranks_descend() {
        let k = Kickers::from((1u16 << 12) | (1u16 << 3) | (1u16 << 0));
        let ranks = Vec::<Rank>::from(k);
        assert_eq!(ranks, vec![Rank::Ace, Rank::Five, Rank::Two]);
    }
}
