/// The room's inbound command queue: an unbounded mpsc pair kept
/// together so the endpoints cannot drift apart in type or ownership.
/// Senders are handed out by clone; the owning room takes the receiving
/// half and must not retain a sender, or its command stream never ends.
#[derive(Debug)]
pub struct Channel<T> {
    tx: tokio::sync::mpsc::UnboundedSender<T>,
    rx: tokio::sync::mpsc::UnboundedReceiver<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl<T> Channel<T> {
    /// a fresh sending handle
    pub fn sender(&self) -> tokio::sync::mpsc::UnboundedSender<T> {
        self.tx.clone()
    }

    /// the receiving half; drops the channel's own sender, so the
    /// stream closes once every handed-out sender is gone
    pub fn into_receiver(self) -> tokio::sync::mpsc::UnboundedReceiver<T> {
        self.rx
    }
}
