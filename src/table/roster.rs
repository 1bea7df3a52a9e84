use super::player::{Player, PlayerId};

#[derive(Debug, Clone)]
struct Slot {
    exists: bool,
    player: Player,
}

/// An arena of seats in fixed seating order with a to-act cursor.
///
/// Removal marks a slot dead in O(1); once dead slots outnumber the
/// live ones the arena compacts, preserving the relative order of the
/// survivors and remapping the cursor. A cursor parked on a compacted
/// slot lands on the next surviving seat.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    slots: Vec<Slot>,
    cursor: usize,
    dead: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// live seat count
    pub fn len(&self) -> usize {
        self.slots.len() - self.dead
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, player: Player) {
        self.slots.push(Slot {
            exists: true,
            player,
        });
    }

    /// live seats in seating order
    pub fn seats(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().filter(|s| s.exists).map(|s| &s.player)
    }
    pub fn seats_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.slots
            .iter_mut()
            .filter(|s| s.exists)
            .map(|s| &mut s.player)
    }

    pub fn by_id(&self, id: PlayerId) -> Option<&Player> {
        self.seats().find(|p| p.id == id)
    }
    pub fn by_id_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.seats_mut().find(|p| p.id == id)
    }
    pub fn by_name(&self, name: &str) -> Option<&Player> {
        self.seats().find(|p| p.name == name)
    }

    /// slot index of a live player
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.exists && s.player.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Player> {
        self.slots
            .get(index)
            .filter(|s| s.exists)
            .map(|s| &s.player)
    }
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.slots
            .get_mut(index)
            .filter(|s| s.exists)
            .map(|s| &mut s.player)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }
    /// the live player under the cursor, if the cursor is on one
    pub fn current(&self) -> Option<&Player> {
        self.at(self.cursor)
    }

    /// the first live seat strictly after `from`, wrapping, that
    /// satisfies the predicate
    pub fn next_where(
        &self,
        from: usize,
        pred: impl Fn(&Player) -> bool,
    ) -> Option<usize> {
        let n = self.slots.len();
        (1..=n)
            .map(|step| (from + step) % n.max(1))
            .find(|i| self.at(*i).is_some_and(&pred))
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.index_of(id)?;
        self.slots[index].exists = false;
        self.dead += 1;
        let player = self.slots[index].player.clone();
        if self.dead * 2 > self.slots.len() {
            self.compact();
        }
        Some(player)
    }

    /// drop dead slots, keeping survivor order, and remap the cursor to
    /// the count of survivors seated before it
    pub(crate) fn compact(&mut self) {
        let survivors_before = self
            .slots
            .iter()
            .take(self.cursor)
            .filter(|s| s.exists)
            .count();
        self.slots.retain(|s| s.exists);
        self.dead = 0;
        self.cursor = match self.slots.len() {
            0 => 0,
            n => survivors_before % n,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for (i, name) in names.iter().enumerate() {
            roster.push(Player::new(i as PlayerId, name.to_string(), 100));
        }
        roster
    }

    #[test]
    fn removal_is_lazy_then_compacts() {
        let mut roster = roster(&["a", "b", "c", "d", "e"]);
        roster.remove(1);
        roster.remove(3);
        // 2 dead of 5 leaves the slots alone
        assert_eq!(roster.slots.len(), 5);
        assert_eq!(roster.len(), 3);
        roster.remove(0);
        // 3 dead of 5 compacts
        assert_eq!(roster.slots.len(), 2);
        let order: Vec<&str> = roster.seats().map(|p| p.name()).collect();
        assert_eq!(order, vec!["c", "e"]);
    }

    #[test]
    fn compaction_remaps_the_cursor() {
        let mut roster = roster(&["a", "b", "c", "d", "e"]);
        roster.set_cursor(3); // d to act
        roster.remove(0);
        roster.remove(1);
        roster.remove(2);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.current().map(|p| p.name()), Some("d"));
    }

    #[test]
    fn cursor_on_a_dead_slot_lands_on_the_next_seat() {
        let mut roster = roster(&["a", "b", "c", "d"]);
        roster.set_cursor(1); // b to act
        roster.remove(1);
        roster.remove(0);
        roster.remove(3);
        // compaction ran; the cursor falls through to c
        assert_eq!(roster.current().map(|p| p.name()), Some("c"));
    }

    #[test]
    fn next_where_wraps_and_skips_the_dead() {
        let mut roster = roster(&["a", "b", "c", "d"]);
        roster.remove(2);
        let next = roster.next_where(3, |p| p.chips() > 0);
        assert_eq!(next.and_then(|i| roster.at(i)).map(|p| p.name()), Some("a"));
        let next = roster.next_where(1, |_| true);
        assert_eq!(next.and_then(|i| roster.at(i)).map(|p| p.name()), Some("d"));
    }
}
