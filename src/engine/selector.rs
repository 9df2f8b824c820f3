use async_channel::{Receiver, Sender};

use crate::entities::Variant;

/// Pick-up/drop-off toggle of a map view. Whether the chosen variant has any
/// stops is not its concern.
#[derive(Debug)]
pub struct RouteVariantSelector {
    current: Variant,
    tx: Sender<Variant>,
    rx: Receiver<Variant>,
}

impl RouteVariantSelector {
    pub fn new() -> Self {
        let (tx, rx) = async_channel::unbounded();

        Self {
            current: Variant::default(),
            tx,
            rx,
        }
    }

    pub fn current(&self) -> Variant {
        self.current
    }

    /// Receives one `Variant` per change.
    pub fn subscribe(&self) -> Receiver<Variant> {
        self.rx.clone()
    }

    /// Returns whether the variant changed. Re-selecting the active variant is
    /// not a toggle and raises nothing.
    #[tracing::instrument(skip(self))]
    pub fn set_variant(&mut self, variant: Variant) -> bool {
        if variant == self.current {
            return false;
        }

        self.current = variant;
        self.notify();

        true
    }

    pub fn toggle(&mut self) -> Variant {
        self.current = self.current.other();
        self.notify();

        self.current
    }

    pub fn close(&self) {
        self.tx.close();
    }

    fn notify(&self) {
        if let Err(err) = self.tx.try_send(self.current) {
            tracing::warn!("dropping variant change: {}", err);
        }
    }
}

impl Default for RouteVariantSelector {
    fn default() -> Self {
        Self::new()
    }
}
