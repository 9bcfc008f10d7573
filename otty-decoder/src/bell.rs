use std::fmt;

/// Handle returned by [`Decoder::on_bell`](crate::Decoder::on_bell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BellListenerId(u64);

type Listener = Box<dyn FnMut() + Send>;

/// Listeners notified synchronously whenever BEL is decoded.
#[derive(Default)]
pub(crate) struct BellListeners {
    next_id: u64,
    listeners: Vec<(BellListenerId, Listener)>,
}

impl BellListeners {
    pub fn attach(&mut self, listener: Listener) -> BellListenerId {
        let id = BellListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn detach(&mut self, id: BellListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn ring(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for BellListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BellListeners")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
