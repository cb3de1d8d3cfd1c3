//! User-facing notification sink.
//!
//! Fire-and-forget: the cart never waits for a notification to be shown.

use tokio::sync::mpsc;
use tracing::warn;

/// Shown when a requested quantity exceeds what the stock service reports.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Shown when a product could not be added to the cart.
pub const ADD_FAILED: &str = "Erro na adição do produto";
/// Shown when a product could not be removed from the cart.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Shown when a product's quantity could not be changed.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
}

pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Writes notices to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(notice = message, "User notification");
    }
}

/// Forwards notices to a UI layer over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify_error(&self, message: &str) {
        // A closed receiver means nobody is listening anymore.
        if self.sender.send(Notification::Error(message.to_string())).is_err() {
            warn!(notice = message, "Notification dropped, no listener");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        notifier.notify_error(OUT_OF_STOCK);
        notifier.notify_error(REMOVE_FAILED);

        assert_eq!(receiver.try_recv().unwrap(), Notification::Error(OUT_OF_STOCK.to_string()));
        assert_eq!(receiver.try_recv().unwrap(), Notification::Error(REMOVE_FAILED.to_string()));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn channel_notifier_survives_closed_receiver() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify_error(ADD_FAILED);
    }
}
