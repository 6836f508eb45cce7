//! Minimal publish-subscribe value holder used by the state controllers.
//! The renderer polls rather than registers callbacks, so "subscription"
//! here is a version counter: every write bumps it, and a [`Watcher`]
//! remembers the last version it saw. This keeps the controllers free of
//! any rendering-framework types while still letting observers tell
//! whether a recomputation actually changed anything they care about.

/// A value with a monotonically increasing change version.
#[derive(Debug)]
pub struct Observed<T> {
    value: T,
    version: u64,
}

impl<T> Observed<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    /// Read access for observers. Reads never change the version.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify observers via the version bump.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version += 1;
    }

    /// Current change version. Starts at zero and bumps on every `set`.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<T: Default> Default for Observed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Observer-side handle that tracks which version of an [`Observed`] it
/// last consumed. Each screen keeps its own watchers, so one screen
/// consuming a change never hides it from another.
#[derive(Debug, Default, Clone, Copy)]
pub struct Watcher {
    seen: u64,
}

impl Watcher {
    /// Whether the observed value changed since the last call, marking the
    /// current version as seen either way.
    pub fn changed<T>(&mut self, observed: &Observed<T>) -> bool {
        let changed = observed.version() != self.seen;
        self.seen = observed.version();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_bumps_version_and_watcher_sees_it_once() {
        let mut observed = Observed::new(1u32);
        let mut watcher = Watcher::default();

        // A fresh watcher starts aligned with version zero, so the first
        // check after construction reports no change.
        assert!(!watcher.changed(&observed));

        observed.set(2);
        assert!(watcher.changed(&observed));
        assert!(!watcher.changed(&observed));
        assert_eq!(*observed.get(), 2);
    }

    #[test]
    fn independent_watchers_each_observe_the_change() {
        let mut observed = Observed::new("a".to_string());
        let mut first = Watcher::default();
        let mut second = Watcher::default();
        first.changed(&observed);
        second.changed(&observed);

        observed.set("b".to_string());
        assert!(first.changed(&observed));
        assert!(second.changed(&observed));
    }
}
