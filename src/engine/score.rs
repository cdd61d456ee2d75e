/// ScoreTracker accumulates merge points for the current round and reports
/// every change synchronously to a single registered listener. Registration
/// is single-slot: the latest listener wins.
#[derive(Default)]
pub(crate) struct ScoreTracker {
    total: u32,
    listener: Option<Box<dyn FnMut(u32, u32)>>,
}

impl ScoreTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn total(&self) -> u32 {
        self.total
    }

    pub(crate) fn on_change(&mut self, listener: impl FnMut(u32, u32) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Add a move's score delta. A zero delta leaves the total alone and is
    /// not reported.
    pub(crate) fn add(&mut self, delta: u32) {
        if delta == 0 {
            return;
        }
        let old = self.total;
        self.total += delta;
        self.notify(old);
    }

    /// Zero the total. The reset is reported through the listener like any
    /// other change.
    pub(crate) fn reset(&mut self) {
        let old = self.total;
        self.total = 0;
        if old != 0 {
            self.notify(old);
        }
    }

    fn notify(&mut self, old: u32) {
        if let Some(listener) = self.listener.as_mut() {
            listener(old, self.total);
        }
    }
}
