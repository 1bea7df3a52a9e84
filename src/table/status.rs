/// A player's orthogonal status flags packed into one byte,
/// queried and mutated by bit.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Status(u8);

impl Status {
    pub const ADMIN: u8 = 1 << 0;
    pub const PLAYING: u8 = 1 << 1;
    pub const SITOUT: u8 = 1 << 2;
    pub const FOLDED: u8 = 1 << 3;
    pub const ALL_IN: u8 = 1 << 4;
    pub const ACTED: u8 = 1 << 5;

    pub fn has(&self, bits: u8) -> bool {
        self.0 & bits != 0
    }
    pub fn set(&mut self, bits: u8) {
        self.0 |= bits;
    }
    pub fn clear(&mut self, bits: u8) {
        self.0 &= !bits;
    }
}

impl From<u8> for Status {
    fn from(n: u8) -> Self {
        Self(n)
    }
}
impl From<Status> for u8 {
    fn from(s: Status) -> Self {
        s.0
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut sep = "";
        for (bit, label) in [
            (Self::ADMIN, "admin"),
            (Self::PLAYING, "playing"),
            (Self::SITOUT, "sitout"),
            (Self::FOLDED, "folded"),
            (Self::ALL_IN, "allin"),
            (Self::ACTED, "acted"),
        ] {
            if self.has(bit) {
                write!(f, "{}{}", sep, label)?;
                sep = "|";
            }
        }
        Ok(())
    }
}
