use super::channel::Channel;
use crate::table::{Game, MoveRequest, PlayerId, Result, Street, TableEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Inbound table commands from the transport layer.
#[derive(Debug)]
pub enum Command {
    Act {
        player: PlayerId,
        request: MoveRequest,
    },
    Leave {
        player: PlayerId,
    },
}

/// Single-writer host for one table.
///
/// One async task owns the Game; all mutations arrive serialized over
/// one command channel, so independent tables run fully in parallel
/// with no shared state. After each command the room settles any
/// finished round, deals the next hand when the table is ready, and
/// broadcasts the drained event outbox to every watcher. A dead
/// watcher is logged, never panicked on.
#[derive(Debug)]
pub struct Room {
    game: Game,
    commands: UnboundedReceiver<Command>,
    watchers: Vec<UnboundedSender<TableEvent>>,
}

impl Room {
    pub fn new(game: Game) -> (Self, UnboundedSender<Command>) {
        let channel = Channel::default();
        let tx = channel.sender();
        let room = Self {
            game,
            commands: channel.into_receiver(),
            watchers: Vec::new(),
        };
        (room, tx)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// subscribe to the table's event stream
    pub fn watch(&mut self) -> UnboundedReceiver<TableEvent> {
        let (tx, rx) = unbounded_channel();
        self.watchers.push(tx);
        rx
    }

    /// process commands until every sender is gone
    pub async fn run(mut self) {
        self.settle_and_deal();
        self.publish();
        while let Some(command) = self.commands.recv().await {
            if let Err(e) = self.apply(command) {
                log::warn!("rejected command: {}", e);
            }
            self.settle_and_deal();
            self.publish();
        }
        log::debug!("all command senders dropped, room closing");
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Act { player, request } => self.game.act(player, request),
            Command::Leave { player } => self.game.leave(player),
        }
    }

    /// pay a finished round and deal the next hand when the table is
    /// unpaused and idle; at most one of each per inbound command
    fn settle_and_deal(&mut self) {
        if self.game.unresolved() {
            match self.game.resolve() {
                Ok(summary) => log::info!("{}", summary),
                Err(e) => log::warn!("cannot resolve round: {}", e),
            }
        }
        if !self.game.is_paused() && self.game.street() == Street::Idle {
            if let Err(e) = self.game.new_round() {
                log::warn!("cannot deal next round: {}", e);
            }
        }
    }

    fn publish(&mut self) {
        for event in self.game.drain_events() {
            self.watchers
                .iter()
                .map(|watcher| watcher.send(event.clone()))
                .enumerate()
                .filter_map(|(i, sent)| sent.err().map(|e| (i, e)))
                .for_each(|(i, e)| log::warn!("failed broadcast to watcher {}: {:?}", i, e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Settings;

    #[tokio::test]
    async fn commands_drive_the_table_and_watchers_see_events() {
        let (mut game, alice) = Game::seeded("alice", Settings::default(), 7).unwrap();
        game.join("bob", None).unwrap();
        game.resume(alice).unwrap();
        game.new_round().unwrap();
        let first = game.turn().unwrap();

        let (mut room, tx) = Room::new(game);
        let mut rx = room.watch();
        let handle = tokio::spawn(room.run());

        // first to act folds; the room resolves and deals again
        tx.send(Command::Act {
            player: first,
            request: MoveRequest::of(MoveRequest::FOLD),
        })
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        let mut deals = 0;
        let mut resolutions = 0;
        while let Some(event) = rx.recv().await {
            match event {
                TableEvent::StreetChanged {
                    street: Street::Pref,
                } => deals += 1,
                TableEvent::RoundResolved { .. } => resolutions += 1,
                _ => {}
            }
        }
        assert_eq!(deals, 2);
        assert_eq!(resolutions, 1);
    }
}
