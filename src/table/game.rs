use super::action::{Action, MoveRequest};
use super::error::{Result, TableError};
use super::event::TableEvent;
use super::player::{Player, PlayerId, PlayerView};
use super::pot::{Contribution, Ledger, Pot};
use super::roster::Roster;
use super::settings::Settings;
use super::showdown::{Entry, Showdown};
use super::status::Status;
use super::street::Street;
use crate::cards::{CardSet, Deck, Strength};
use crate::Chips;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CODE_ALPHABET: &[u8] = b"abcdefghjkmnpqrstuvwxyz23456789";

/// What a batched move request resolved to for the actor.
enum Decision {
    Check,
    Fold,
    Call(Chips),
    Raise(Chips),
}

/// One table: settings, seats, button, the current street and board,
/// the pot ledger, and an event outbox.
///
/// Every mutating operation is checked before any write, returns its
/// error synchronously, and appends its update events in mutation
/// order. A single logical actor drives one Game at a time; the room
/// module provides that discipline.
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    join_code: String,
    paused: bool,
    roster: Roster,
    button: PlayerId,
    street: Street,
    board: CardSet,
    deck: Deck,
    ledger: Ledger,
    resolved: bool,
    rounds: usize,
    rng: SmallRng,
    events: Vec<TableEvent>,
    pot_sizes: Vec<Chips>,
}

/// Defensive copy of the public table state.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub street: Street,
    pub board: CardSet,
    pub pots: Vec<Pot>,
    pub players: Vec<PlayerView>,
    pub paused: bool,
    pub public: bool,
    pub rounds: usize,
}

impl Game {
    /// a fresh table; the creator takes the first seat and admin rights
    pub fn new(creator: &str, settings: Settings) -> Result<(Self, PlayerId)> {
        let seed = rand::rng().random();
        Self::seeded(creator, settings, seed)
    }

    pub fn seeded(creator: &str, settings: Settings, seed: u64) -> Result<(Self, PlayerId)> {
        settings.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let join_code = (0..6)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        let mut game = Self {
            settings,
            join_code,
            paused: true,
            roster: Roster::new(),
            button: 0,
            street: Street::Idle,
            board: CardSet::empty(),
            deck: Deck::new(),
            ledger: Ledger::default(),
            resolved: true,
            rounds: 0,
            rng,
            events: Vec::new(),
            pot_sizes: Vec::new(),
        };
        let id = game.seat(creator)?;
        if let Some(player) = game.roster.by_id_mut(id) {
            player.status.set(Status::ADMIN);
        }
        game.button = id;
        Ok((game, id))
    }

    // ------------------------------------------------------- joining

    pub fn join(&mut self, name: &str, code: Option<&str>) -> Result<PlayerId> {
        if !self.settings.public && code != Some(self.join_code.as_str()) {
            return Err(TableError::Unauthorized("wrong join code".into()));
        }
        self.seat(name)
    }

    fn seat(&mut self, name: &str) -> Result<PlayerId> {
        if name.is_empty() {
            return Err(TableError::InvalidRequest("empty player name".into()));
        }
        if self.roster.len() >= self.settings.max_players {
            return Err(TableError::IllegalState("table is full".into()));
        }
        if self.roster.by_name(name).is_some() {
            return Err(TableError::InvalidRequest(format!("name {} is taken", name)));
        }
        let chips = self.settings.starting_chips()?;
        let id = loop {
            let id: PlayerId = self.rng.random();
            if id != 0 && self.roster.by_id(id).is_none() {
                break id;
            }
        };
        let mut player = Player::new(id, name.to_string(), chips);
        // a mid-round joiner waits out the hand in progress
        if self.street != Street::Idle {
            player.status.set(Status::FOLDED);
        }
        self.roster.push(player);
        self.events.push(TableEvent::PlayerJoined {
            id,
            name: name.to_string(),
            chips,
        });
        log::debug!("{} joined with {} chips", name, chips);
        Ok(id)
    }

    pub fn leave(&mut self, id: PlayerId) -> Result<()> {
        self.unseat(id)
    }

    pub fn kick(&mut self, admin: PlayerId, target: PlayerId) -> Result<()> {
        self.require_admin(admin)?;
        self.unseat(target)
    }

    fn unseat(&mut self, id: PlayerId) -> Result<()> {
        let index = self
            .roster
            .index_of(id)
            .ok_or_else(|| TableError::NotFound(format!("player {}", id)))?;
        if self.street != Street::Idle && index == self.roster.cursor() {
            if let Some(next) = self.roster.next_where(index, |p| p.can_act() && p.id() != id) {
                self.roster.set_cursor(next);
            }
        }
        if let Some(player) = self.roster.remove(id) {
            self.ledger.forfeit(player.spent);
        }
        self.events.push(TableEvent::PlayerLeft { id });
        if self.street != Street::Idle {
            self.sync_pots();
            if self.live_count() <= 1 {
                self.close_round();
            } else if self.betting_complete() {
                self.roll_forward();
            }
        }
        Ok(())
    }

    // ------------------------------------------------------- admin

    fn require_admin(&self, id: PlayerId) -> Result<()> {
        let player = self
            .roster
            .by_id(id)
            .ok_or_else(|| TableError::NotFound(format!("player {}", id)))?;
        if player.status().has(Status::ADMIN) {
            Ok(())
        } else {
            Err(TableError::Unauthorized(format!(
                "{} is not an admin",
                player.name()
            )))
        }
    }

    pub fn promote(&mut self, admin: PlayerId, target: PlayerId) -> Result<()> {
        self.moderate(admin, target, true)
    }
    pub fn demote(&mut self, admin: PlayerId, target: PlayerId) -> Result<()> {
        self.moderate(admin, target, false)
    }
    fn moderate(&mut self, admin: PlayerId, target: PlayerId, grant: bool) -> Result<()> {
        self.require_admin(admin)?;
        let player = self
            .roster
            .by_id_mut(target)
            .ok_or_else(|| TableError::NotFound(format!("player {}", target)))?;
        match grant {
            true => player.status.set(Status::ADMIN),
            false => player.status.clear(Status::ADMIN),
        }
        let status = player.status;
        self.events.push(TableEvent::StatusChanged { id: target, status });
        Ok(())
    }

    pub fn give_chips(&mut self, admin: PlayerId, target: PlayerId, chips: Chips) -> Result<()> {
        self.require_admin(admin)?;
        let player = self
            .roster
            .by_id_mut(target)
            .ok_or_else(|| TableError::NotFound(format!("player {}", target)))?;
        player.chips = player.chips.checked_add(chips).ok_or(TableError::Overflow)?;
        let chips = player.chips;
        self.events.push(TableEvent::ChipsChanged { id: target, chips });
        Ok(())
    }

    /// the namer renames themselves, or anyone if they are an admin
    pub fn rename_player(&mut self, namer: PlayerId, target: PlayerId, name: &str) -> Result<()> {
        if namer != target {
            self.require_admin(namer)?;
        }
        if name.is_empty() {
            return Err(TableError::InvalidRequest("empty player name".into()));
        }
        if self.roster.by_name(name).is_some_and(|p| p.id() != target) {
            return Err(TableError::InvalidRequest(format!("name {} is taken", name)));
        }
        let player = self
            .roster
            .by_id_mut(target)
            .ok_or_else(|| TableError::NotFound(format!("player {}", target)))?;
        player.name = name.to_string();
        self.events.push(TableEvent::NameChanged {
            id: target,
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn rename_game(&mut self, admin: PlayerId, name: &str) -> Result<()> {
        self.require_admin(admin)?;
        self.settings.name = name.to_string();
        self.events.push(TableEvent::GameNameChanged {
            name: name.to_string(),
        });
        Ok(())
    }

    /// settings change between rounds only
    pub fn configure(&mut self, admin: PlayerId, settings: Settings) -> Result<()> {
        self.require_admin(admin)?;
        if self.street != Street::Idle {
            return Err(TableError::IllegalState("round in progress".into()));
        }
        settings.validate()?;
        self.settings = settings;
        self.events.push(TableEvent::SettingsChanged {
            stakes: self.settings.stakes,
            max_players: self.settings.max_players,
        });
        Ok(())
    }

    pub fn pause(&mut self, admin: PlayerId) -> Result<()> {
        self.require_admin(admin)?;
        self.paused = true;
        self.push_game_status();
        Ok(())
    }

    pub fn resume(&mut self, admin: PlayerId) -> Result<()> {
        self.require_admin(admin)?;
        if self.roster.len() < 2 {
            return Err(TableError::IllegalState(
                "a round needs at least two players".into(),
            ));
        }
        self.paused = false;
        self.push_game_status();
        Ok(())
    }

    pub fn make_private(&mut self, admin: PlayerId, code: &str) -> Result<()> {
        self.require_admin(admin)?;
        if code.is_empty() {
            return Err(TableError::InvalidRequest("empty join code".into()));
        }
        self.settings.public = false;
        self.join_code = code.to_string();
        self.push_game_status();
        Ok(())
    }

    pub fn make_public(&mut self, admin: PlayerId) -> Result<()> {
        self.require_admin(admin)?;
        self.settings.public = true;
        self.push_game_status();
        Ok(())
    }

    fn push_game_status(&mut self) {
        self.events.push(TableEvent::GameStatusChanged {
            paused: self.paused,
            public: self.settings.public,
        });
    }

    // ------------------------------------------------------- rounds

    /// deal the next hand: apply deferred sit-outs, drop busted stacks,
    /// rotate the button, deal holes, post blinds
    pub fn new_round(&mut self) -> Result<()> {
        if self.paused {
            return Err(TableError::IllegalState("game is paused".into()));
        }
        if self.street != Street::Idle {
            return Err(TableError::IllegalState("round in progress".into()));
        }
        if !self.resolved {
            return Err(TableError::IllegalState(
                "previous round is not resolved".into(),
            ));
        }
        let busted: Vec<PlayerId> = self
            .roster
            .seats()
            .filter(|p| p.chips() == 0)
            .map(|p| p.id())
            .collect();
        for id in busted {
            log::debug!("dropping busted player {}", id);
            self.roster.remove(id);
            self.events.push(TableEvent::PlayerLeft { id });
        }
        for player in self.roster.seats_mut() {
            if player.status.has(Status::SITOUT) {
                player.status.clear(Status::SITOUT | Status::PLAYING);
            } else {
                player.status.set(Status::PLAYING);
            }
            player.status.clear(Status::FOLDED | Status::ALL_IN | Status::ACTED);
            player.stake = 0;
            player.spent = 0;
            player.hole = CardSet::empty();
        }
        let playing = self.playing_count();
        if playing < 2 {
            self.paused = true;
            self.push_game_status();
            log::debug!("auto-paused with {} players ready", playing);
            return Ok(());
        }

        let from = self.roster.index_of(self.button).unwrap_or(0);
        let button = match self.roster.next_where(from, |p| p.status().has(Status::PLAYING)) {
            Some(index) => index,
            None => return Err(TableError::IllegalState("no playing seats".into())),
        };
        if let Some(player) = self.roster.at(button) {
            self.button = player.id();
        }

        self.rounds += 1;
        self.resolved = false;
        self.board = CardSet::empty();
        self.events.push(TableEvent::BoardCleared);
        self.ledger.reset();
        self.pot_sizes.clear();
        self.deck = Deck::new();
        self.street = Street::Pref;
        self.events.push(TableEvent::StreetChanged {
            street: Street::Pref,
        });

        // seat order from the button's left, button last
        let mut order = Vec::with_capacity(playing);
        let mut index = button;
        while order.len() < playing {
            index = match self
                .roster
                .next_where(index, |p| p.status().has(Status::PLAYING))
            {
                Some(index) => index,
                None => return Err(TableError::IllegalState("no playing seats".into())),
            };
            order.push(index);
        }
        // two consecutive draws per player, no burn cards
        for &seat in &order {
            let hole = self.deck.deal(2, &mut self.rng);
            if let Some(player) = self.roster.at_mut(seat) {
                player.hole = hole;
            }
        }
        // small and big blind from the first two seats after the button
        let stakes = self.settings.stakes;
        let small = self.contribute(order[0], stakes / 2);
        self.log_action(Action::Blind(self.seat_id(order[0]), small));
        let big = self.contribute(order[1], stakes);
        self.log_action(Action::Blind(self.seat_id(order[1]), big));

        if let Some(next) = self.roster.next_where(order[1], |p| p.can_act()) {
            self.roster.set_cursor(next);
        }
        if self.betting_complete() {
            self.roll_forward();
        }
        Ok(())
    }

    /// apply one move request for one player
    pub fn act(&mut self, id: PlayerId, request: MoveRequest) -> Result<()> {
        if self.paused {
            return Err(TableError::IllegalState("game is paused".into()));
        }
        if request.mask
            & !(MoveRequest::CHECK
                | MoveRequest::FOLD
                | MoveRequest::CALL
                | MoveRequest::CALL_ANY
                | MoveRequest::BET
                | MoveRequest::SITOUT)
            != 0
        {
            return Err(TableError::InvalidRequest("unknown move bits".into()));
        }
        if request.is_conflicted() {
            return Err(TableError::InvalidRequest("conflicting move bits".into()));
        }
        if request.is_empty() {
            return Ok(()); // the null move does nothing
        }
        if self.roster.by_id(id).is_none() {
            return Err(TableError::NotFound(format!("player {}", id)));
        }
        // sit-out is a deferred flag, not a turn move: it applies only
        // as the whole request, and then even off turn
        if request.mask == MoveRequest::SITOUT {
            return self.sit_out(id);
        }
        if self.street == Street::Idle {
            return Err(TableError::IllegalState("no betting round in progress".into()));
        }
        let index = match self.roster.index_of(id) {
            Some(index) => index,
            None => return Err(TableError::NotFound(format!("player {}", id))),
        };
        if index != self.roster.cursor() {
            return Err(TableError::IllegalState("not your turn".into()));
        }

        let decision = self.decide(index, request)?;
        self.execute(index, decision);
        self.advance();
        Ok(())
    }

    /// resolve the batched request to the first applicable move by
    /// precedence; if none applies, fail with the reason the
    /// highest-precedence requested move could not
    fn decide(&self, index: usize, request: MoveRequest) -> Result<Decision> {
        let me = match self.roster.at(index) {
            Some(me) => me,
            None => return Err(TableError::IllegalState("empty seat to act".into())),
        };
        let outstanding = self.outstanding();
        let to_call = outstanding - me.stake;
        let mut blocked: Option<TableError> = None;
        for bit in MoveRequest::PRECEDENCE {
            if !request.wants(bit) {
                continue;
            }
            let reason = match bit {
                MoveRequest::CHECK if to_call == 0 => return Ok(Decision::Check),
                MoveRequest::CHECK => "cannot check facing a bet",
                MoveRequest::FOLD => return Ok(Decision::Fold),
                MoveRequest::CALL if to_call <= me.chips => return Ok(Decision::Call(to_call)),
                MoveRequest::CALL => "insufficient chips to call",
                MoveRequest::CALL_ANY => return Ok(Decision::Call(to_call.min(me.chips))),
                MoveRequest::BET => match request.amount {
                    None => "bet requires an amount",
                    Some(amount) if amount <= outstanding => {
                        "raise must exceed the outstanding bet"
                    }
                    Some(amount) if amount - me.stake > me.chips => {
                        "insufficient chips to raise"
                    }
                    Some(amount) => return Ok(Decision::Raise(amount)),
                },
                _ => continue,
            };
            blocked.get_or_insert(TableError::InvalidRequest(reason.into()));
        }
        Err(blocked.unwrap_or_else(|| TableError::InvalidRequest("no applicable move".into())))
    }

    fn execute(&mut self, index: usize, decision: Decision) {
        let id = self.seat_id(index);
        match decision {
            Decision::Check => {
                self.log_action(Action::Check(id));
            }
            Decision::Fold => {
                if let Some(player) = self.roster.at_mut(index) {
                    player.status.set(Status::FOLDED);
                }
                self.log_action(Action::Fold(id));
                self.sync_pots();
            }
            Decision::Call(amount) => {
                let paid = self.contribute(index, amount);
                self.log_action(Action::Call(id, paid));
            }
            Decision::Raise(amount) => {
                let stake = self.roster.at(index).map(|p| p.stake).unwrap_or(0);
                let paid = self.contribute(index, amount - stake);
                let shoved = self
                    .roster
                    .at(index)
                    .is_some_and(|p| p.status().has(Status::ALL_IN));
                match shoved {
                    true => self.log_action(Action::Shove(id, paid)),
                    false => self.log_action(Action::Raise(id, paid)),
                }
                // a raise reopens the action for everyone else
                for player in self.roster.seats_mut() {
                    if player.id() != id && player.can_act() {
                        player.status.clear(Status::ACTED);
                    }
                }
            }
        }
        if let Some(player) = self.roster.at_mut(index) {
            player.status.set(Status::ACTED);
            let status = player.status;
            self.events.push(TableEvent::StatusChanged { id, status });
        }
    }

    fn sit_out(&mut self, id: PlayerId) -> Result<()> {
        let player = self
            .roster
            .by_id_mut(id)
            .ok_or_else(|| TableError::NotFound(format!("player {}", id)))?;
        player.status.set(Status::SITOUT);
        let status = player.status;
        self.events.push(TableEvent::StatusChanged { id, status });
        Ok(())
    }

    /// after a committed move: end the round on a fold-through,
    /// advance the street when betting is complete, or pass the turn
    fn advance(&mut self) {
        if self.live_count() <= 1 {
            self.close_round();
            return;
        }
        if self.betting_complete() {
            self.roll_forward();
            return;
        }
        let cursor = self.roster.cursor();
        if let Some(next) = self
            .roster
            .next_where(cursor, |p| p.can_act() && !p.status().has(Status::ACTED))
        {
            self.roster.set_cursor(next);
        }
    }

    /// close streets until someone can act again or the hand ends,
    /// revealing board cards along the way
    fn roll_forward(&mut self) {
        loop {
            self.refund_uncalled();
            for player in self.roster.seats_mut() {
                player.stake = 0;
                player.status.clear(Status::ACTED);
            }
            self.street = self.street.next();
            self.events.push(TableEvent::StreetChanged {
                street: self.street,
            });
            log::trace!("street -> {}", self.street);
            if self.street == Street::Idle {
                return;
            }
            let n = self.street.n_revealed();
            if n > 0 {
                let cards = self.deck.deal(n, &mut self.rng);
                self.board |= cards;
                self.events.push(TableEvent::BoardRevealed { cards });
            }
            let actable = self.roster.seats().filter(|p| p.can_act()).count();
            if actable >= 2 {
                let from = self.roster.index_of(self.button).unwrap_or(0);
                if let Some(next) = self.roster.next_where(from, |p| p.can_act()) {
                    self.roster.set_cursor(next);
                }
                return;
            }
            // everyone is all in; fast-forward to showdown
        }
    }

    /// the street is over; park in Idle awaiting an explicit resolve
    fn close_round(&mut self) {
        self.refund_uncalled();
        self.street = Street::Idle;
        self.events.push(TableEvent::StreetChanged {
            street: Street::Idle,
        });
    }

    /// if exactly one player committed above everyone else this
    /// street, the unmatched slice goes back to them
    fn refund_uncalled(&mut self) {
        let seats: Vec<(PlayerId, Chips)> = self
            .roster
            .seats()
            .filter(|p| p.status().has(Status::PLAYING))
            .map(|p| (p.id(), p.stake))
            .collect();
        let top = match seats.iter().map(|(_, s)| *s).max() {
            Some(top) if top > 0 => top,
            _ => return,
        };
        let mut leaders = seats.iter().filter(|(_, s)| *s == top);
        let leader = match (leaders.next(), leaders.next()) {
            (Some((id, _)), None) => *id,
            _ => return,
        };
        let second = seats
            .iter()
            .map(|(_, s)| *s)
            .filter(|s| *s < top)
            .max()
            .unwrap_or(0);
        let refund = top - second;
        if let Some(player) = self.roster.by_id_mut(leader) {
            player.chips += refund;
            player.stake -= refund;
            player.spent -= refund;
            if player.chips > 0 {
                player.status.clear(Status::ALL_IN);
            }
            let chips = player.chips;
            let status = player.status;
            self.events.push(TableEvent::ChipsChanged { id: leader, chips });
            self.events.push(TableEvent::StatusChanged { id: leader, status });
            log::trace!("refunding {} uncalled chips to {}", refund, leader);
        }
        self.sync_pots();
    }

    /// pay the pots and clear per-round state; a fold-through pays the
    /// survivor without a showdown
    pub fn resolve(&mut self) -> Result<String> {
        if self.street != Street::Idle {
            return Err(TableError::IllegalState("round still in progress".into()));
        }
        if self.resolved {
            return Err(TableError::IllegalState("round already resolved".into()));
        }
        let live: Vec<(PlayerId, String, CardSet)> = self
            .roster
            .seats()
            .filter(|p| p.is_live())
            .map(|p| (p.id(), p.name().to_string(), p.hole))
            .collect();
        let summary = match live.as_slice() {
            [] => String::from("nobody to pay"),
            [(id, name, _)] => {
                let total = self.ledger.total();
                let player = self
                    .roster
                    .by_id_mut(*id)
                    .ok_or_else(|| TableError::NotFound(format!("player {}", id)))?;
                player.chips = player.chips.checked_add(total).ok_or(TableError::Overflow)?;
                let chips = player.chips;
                self.events.push(TableEvent::ChipsChanged { id: *id, chips });
                format!("{} wins {} uncontested", name, total)
            }
            _ => {
                let board = self.board;
                let entries = live
                    .iter()
                    .map(|(id, name, hole)| Entry {
                        id: *id,
                        name: name.clone(),
                        strength: Strength::from(*hole | board),
                    })
                    .collect::<Vec<Entry>>();
                let (payouts, summary) = Showdown::from(entries).settle(self.ledger.pots());
                // checked before any stack is touched
                let mut awards = Vec::new();
                for (id, reward) in payouts.into_iter().filter(|(_, r)| *r > 0) {
                    let player = self
                        .roster
                        .by_id(id)
                        .ok_or_else(|| TableError::NotFound(format!("player {}", id)))?;
                    let chips = player
                        .chips()
                        .checked_add(reward)
                        .ok_or(TableError::Overflow)?;
                    awards.push((id, chips));
                }
                for (id, chips) in awards {
                    if let Some(player) = self.roster.by_id_mut(id) {
                        player.chips = chips;
                    }
                    self.events.push(TableEvent::ChipsChanged { id, chips });
                }
                summary
            }
        };
        for player in self.roster.seats_mut() {
            player.stake = 0;
            player.spent = 0;
            player.hole = CardSet::empty();
            player.status.clear(Status::FOLDED | Status::ALL_IN | Status::ACTED);
        }
        self.resolved = true;
        self.events.push(TableEvent::RoundResolved {
            summary: summary.clone(),
        });
        log::debug!("round {} resolved: {}", self.rounds, summary);
        Ok(summary)
    }

    // ------------------------------------------------------- helpers

    fn contribute(&mut self, index: usize, amount: Chips) -> Chips {
        let (id, pay, chips, all_in, status) = match self.roster.at_mut(index) {
            None => return 0,
            Some(player) => {
                let pay = amount.min(player.chips);
                player.chips -= pay;
                player.stake += pay;
                player.spent += pay;
                let all_in = player.chips == 0;
                if all_in {
                    player.status.set(Status::ALL_IN);
                }
                (player.id, pay, player.chips, all_in, player.status)
            }
        };
        self.events.push(TableEvent::ChipsChanged { id, chips });
        if all_in {
            self.events.push(TableEvent::StatusChanged { id, status });
        }
        self.sync_pots();
        pay
    }

    fn sync_pots(&mut self) {
        let contributions: Vec<Contribution> = self
            .roster
            .seats()
            .filter(|p| p.status().has(Status::PLAYING))
            .map(|p| Contribution {
                id: p.id(),
                spent: p.spent,
                folded: p.status().has(Status::FOLDED),
                capped: p.status().has(Status::ALL_IN),
            })
            .collect();
        self.ledger.rebuild(&contributions);
        for (index, pot) in self.ledger.pots().iter().enumerate() {
            match self.pot_sizes.get(index) {
                None => self.events.push(TableEvent::PotCreated {
                    index,
                    chips: pot.chips,
                }),
                Some(prev) if *prev != pot.chips => self.events.push(TableEvent::PotUpdated {
                    index,
                    chips: pot.chips,
                }),
                _ => {}
            }
        }
        self.pot_sizes = self.ledger.pots().iter().map(|p| p.chips).collect();
    }

    fn betting_complete(&self) -> bool {
        let outstanding = self.outstanding();
        self.roster
            .seats()
            .filter(|p| p.is_live())
            .all(|p| {
                p.status().has(Status::ALL_IN)
                    || (p.status().has(Status::ACTED) && p.stake == outstanding)
            })
    }

    fn outstanding(&self) -> Chips {
        self.roster
            .seats()
            .filter(|p| p.is_live())
            .map(|p| p.stake)
            .max()
            .unwrap_or(0)
    }

    fn live_count(&self) -> usize {
        self.roster.seats().filter(|p| p.is_live()).count()
    }
    fn playing_count(&self) -> usize {
        self.roster
            .seats()
            .filter(|p| p.status().has(Status::PLAYING))
            .count()
    }
    fn seat_id(&self, index: usize) -> PlayerId {
        self.roster.at(index).map(|p| p.id()).unwrap_or(0)
    }
    fn log_action(&self, action: Action) {
        log::trace!("{}", action);
    }

    // ------------------------------------------------------- views

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn board(&self) -> CardSet {
        self.board
    }
    pub fn is_paused(&self) -> bool {
        self.paused
    }
    pub fn join_code(&self) -> &str {
        &self.join_code
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    /// whose turn it is, when a street is live
    pub fn turn(&self) -> Option<PlayerId> {
        match self.street {
            Street::Idle => None,
            _ => self.roster.current().map(|p| p.id()),
        }
    }
    /// a round has ended but its pots are unpaid
    pub fn unresolved(&self) -> bool {
        self.street == Street::Idle && !self.resolved
    }
    pub fn players(&self) -> Vec<PlayerView> {
        self.roster.seats().map(PlayerView::from).collect()
    }
    pub fn pots(&self) -> Vec<Pot> {
        self.ledger.pots().to_vec()
    }
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.settings.name.clone(),
            street: self.street,
            board: self.board,
            pots: self.pots(),
            players: self.players(),
            paused: self.paused,
            public: self.settings.public,
            rounds: self.rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads_up() -> (Game, PlayerId, PlayerId) {
        let (mut game, alice) = Game::seeded("alice", Settings::default(), 42).unwrap();
        let bob = game.join("bob", None).unwrap();
        game.resume(alice).unwrap();
        (game, alice, bob)
    }

    fn rig_hole(game: &mut Game, id: PlayerId, hole: &str) {
        game.roster.by_id_mut(id).unwrap().hole = CardSet::from(hole);
    }

    fn check(game: &mut Game, id: PlayerId) {
        game.act(id, MoveRequest::of(MoveRequest::CHECK)).unwrap();
    }

    #[test]
    fn dealing_posts_blinds_and_disjoint_holes() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        assert_eq!(game.street(), Street::Pref);
        let players = game.players();
        assert!(players.iter().all(|p| p.hole.size() == 2));
        let overlap = players[0].hole & players[1].hole;
        assert_eq!(overlap, CardSet::empty());
        // button rotated to bob, so alice posts small and bob big
        assert_eq!(players[0].stake + players[1].stake, 1500);
        assert_eq!(game.pots()[0].chips, 1500);
        assert_eq!(game.turn(), Some(alice));
        let _ = bob;
    }

    #[test]
    fn aces_beat_kings_end_to_end() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        game.act(alice, MoveRequest::of(MoveRequest::CALL)).unwrap();
        check(&mut game, bob);
        for _ in 0..3 {
            check(&mut game, alice);
            check(&mut game, bob);
        }
        assert_eq!(game.street(), Street::Idle);
        assert!(game.unresolved());
        rig_hole(&mut game, alice, "AC AD");
        rig_hole(&mut game, bob, "KC KD");
        game.board = CardSet::from("AS 7D 8H 9C 2S");
        let summary = game.resolve().unwrap();
        assert!(summary.contains("alice"));
        let players = game.players();
        assert_eq!(players[0].chips, 101_000);
        assert_eq!(players[1].chips, 99_000);
    }

    #[test]
    fn three_all_in_depths_make_exactly_two_pots() {
        let (mut game, alice, bob) = heads_up();
        let carol = game.join("carol", None).unwrap();
        game.give_chips(alice, bob, 50_000).unwrap();
        game.give_chips(alice, carol, 100_000).unwrap();
        game.new_round().unwrap();
        // button is bob; carol posts small, alice big, bob opens
        assert_eq!(game.turn(), Some(bob));
        game.act(bob, MoveRequest::bet(150_000)).unwrap();
        game.act(carol, MoveRequest::bet(200_000)).unwrap();
        game.act(alice, MoveRequest::of(MoveRequest::CALL | MoveRequest::CALL_ANY))
            .unwrap();
        // streets fast-forward once everyone is committed
        assert_eq!(game.street(), Street::Idle);
        assert_eq!(game.board().size(), 5);
        // carol's unmatched 50k came back to her
        let pots = game.pots();
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].chips, 300_000);
        assert_eq!(pots[0].eligible, vec![alice, bob, carol]);
        assert_eq!(pots[1].chips, 100_000);
        assert_eq!(pots[1].eligible, vec![bob, carol]);

        rig_hole(&mut game, alice, "AC AD");
        rig_hole(&mut game, bob, "KC KD");
        rig_hole(&mut game, carol, "QC QD");
        game.board = CardSet::from("AS KS 7D 8H 2S");
        let summary = game.resolve().unwrap();
        assert!(summary.contains("alice"));
        assert!(summary.contains("bob"));
        let players = game.players();
        assert_eq!(players[0].chips, 300_000);
        assert_eq!(players[1].chips, 100_000);
        assert_eq!(players[2].chips, 50_000);
    }

    #[test]
    fn uncalled_raise_is_refunded() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        game.act(alice, MoveRequest::bet(5_000)).unwrap();
        game.act(bob, MoveRequest::of(MoveRequest::FOLD)).unwrap();
        game.resolve().unwrap();
        let players = game.players();
        assert_eq!(players[0].chips, 101_000);
        assert_eq!(players[1].chips, 99_000);
    }

    #[test]
    fn precedence_picks_the_first_applicable_bit() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        // facing the big blind, a lone check is rejected outright
        let err = game.act(alice, MoveRequest::of(MoveRequest::CHECK));
        assert!(matches!(err, Err(TableError::InvalidRequest(_))));
        assert_eq!(game.turn(), Some(alice));
        // batched check/fold falls through to the fold
        game.act(alice, MoveRequest::of(MoveRequest::CHECK | MoveRequest::FOLD))
            .unwrap();
        assert_eq!(game.street(), Street::Idle);
        let summary = game.resolve().unwrap();
        assert!(summary.contains("bob"));
        let _ = bob;
    }

    #[test]
    fn conflicting_bits_are_rejected() {
        let (mut game, alice, _) = heads_up();
        game.new_round().unwrap();
        let err = game.act(alice, MoveRequest::of(MoveRequest::FOLD | MoveRequest::BET));
        assert!(matches!(err, Err(TableError::InvalidRequest(_))));
        assert_eq!(game.turn(), Some(alice));
    }

    #[test]
    fn null_move_is_a_no_op() {
        let (mut game, alice, _) = heads_up();
        game.new_round().unwrap();
        game.act(alice, MoveRequest::default()).unwrap();
        assert_eq!(game.turn(), Some(alice));
    }

    #[test]
    fn sitting_out_defers_to_the_round_boundary() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        // off turn, a lone sit-out is accepted and deferred
        game.act(bob, MoveRequest::of(MoveRequest::SITOUT)).unwrap();
        assert_eq!(game.turn(), Some(alice));
        game.act(alice, MoveRequest::of(MoveRequest::FOLD)).unwrap();
        game.resolve().unwrap();
        // bob sits out, one player is not enough, the table pauses
        game.new_round().unwrap();
        assert!(game.is_paused());
        assert_eq!(game.street(), Street::Idle);
    }

    #[test]
    fn batched_sitout_loses_to_the_applicable_move() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        game.act(alice, MoveRequest::of(MoveRequest::CALL | MoveRequest::SITOUT))
            .unwrap();
        let status = game.players().iter().find(|p| p.id == alice).unwrap().status;
        assert!(!status.has(Status::SITOUT));
        assert_eq!(game.turn(), Some(bob));
    }

    #[test]
    fn resolution_is_gated_both_ways() {
        let (mut game, alice, _) = heads_up();
        game.new_round().unwrap();
        assert!(matches!(game.resolve(), Err(TableError::IllegalState(_))));
        game.act(alice, MoveRequest::of(MoveRequest::FOLD)).unwrap();
        assert!(matches!(game.new_round(), Err(TableError::IllegalState(_))));
        game.resolve().unwrap();
        assert!(matches!(game.resolve(), Err(TableError::IllegalState(_))));
        game.new_round().unwrap();
        assert_eq!(game.street(), Street::Pref);
    }

    #[test]
    fn admin_gates_and_lookups() {
        let (mut game, alice, bob) = heads_up();
        assert!(matches!(
            game.kick(bob, alice),
            Err(TableError::Unauthorized(_))
        ));
        assert!(matches!(
            game.give_chips(alice, 404, 10),
            Err(TableError::NotFound(_))
        ));
        assert!(matches!(
            game.give_chips(alice, bob, Chips::MAX),
            Err(TableError::Overflow)
        ));
        game.promote(alice, bob).unwrap();
        game.kick(bob, alice).unwrap();
        assert_eq!(game.players().len(), 1);
    }

    #[test]
    fn table_capacity_is_bounded_by_the_deck() {
        let (mut game, alice, _) = heads_up();
        let oversized = Settings {
            max_players: 24,
            ..Settings::default()
        };
        assert!(matches!(
            game.configure(alice, oversized),
            Err(TableError::InvalidRequest(_))
        ));
        assert_eq!(game.settings().max_players, crate::DEFAULT_MAX_PLAYERS);
    }

    #[test]
    fn private_tables_demand_the_code() {
        let (mut game, alice, _) = heads_up();
        game.make_private(alice, "secret").unwrap();
        assert!(matches!(
            game.join("carol", None),
            Err(TableError::Unauthorized(_))
        ));
        assert!(matches!(
            game.join("carol", Some("wrong")),
            Err(TableError::Unauthorized(_))
        ));
        game.join("carol", Some("secret")).unwrap();
    }

    #[test]
    fn paused_tables_reject_moves() {
        let (mut game, alice, _) = heads_up();
        game.new_round().unwrap();
        game.pause(alice).unwrap();
        assert!(matches!(
            game.act(alice, MoveRequest::of(MoveRequest::CALL)),
            Err(TableError::IllegalState(_))
        ));
    }

    #[test]
    fn events_come_out_in_mutation_order() {
        let (mut game, _, _) = heads_up();
        let events = game.drain_events();
        let joins: Vec<&TableEvent> = events
            .iter()
            .filter(|e| matches!(e, TableEvent::PlayerJoined { .. }))
            .collect();
        assert_eq!(joins.len(), 2);
        game.new_round().unwrap();
        let events = game.drain_events();
        assert!(matches!(events[0], TableEvent::BoardCleared));
        assert!(events
            .iter()
            .any(|e| matches!(e, TableEvent::PotCreated { .. })));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn renaming_the_game_is_announced() {
        let (mut game, alice, _) = heads_up();
        game.drain_events();
        game.rename_game(alice, "high stakes").unwrap();
        assert_eq!(
            game.drain_events(),
            vec![TableEvent::GameNameChanged {
                name: "high stakes".into()
            }]
        );
        assert_eq!(game.settings().name, "high stakes");
    }

    #[test]
    fn mid_round_joiner_waits_out_the_hand() {
        let (mut game, alice, bob) = heads_up();
        game.new_round().unwrap();
        let carol = game.join("carol", None).unwrap();
        assert!(game
            .players()
            .iter()
            .find(|p| p.id == carol)
            .unwrap()
            .status
            .has(Status::FOLDED));
        game.act(alice, MoveRequest::of(MoveRequest::CALL)).unwrap();
        check(&mut game, bob);
        for _ in 0..3 {
            check(&mut game, alice);
            check(&mut game, bob);
        }
        game.resolve().unwrap();
        game.new_round().unwrap();
        // dealt in like everyone else now
        assert_eq!(
            game.players()
                .iter()
                .find(|p| p.id == carol)
                .unwrap()
                .hole
                .size(),
            2
        );
    }

    #[test]
    fn snapshot_serializes() {
        let (game, _, _) = heads_up();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game.snapshot());
    }
}
