//! Page scroll lock.

use tracing::debug;

/// Prevents the page behind an open modal from scrolling.
///
/// Implementations are a single flag: there is no reference counting, so one
/// `unlock` releases the page no matter how many `lock` calls preceded it.
pub trait ScrollLock {
    fn lock(&mut self);

    fn unlock(&mut self);

    fn is_locked(&self) -> bool;
}

/// Scroll lock on the document's `html` element.
#[derive(Debug, Default, Clone)]
pub struct HtmlScrollLock {
    locked: bool,
}

impl ScrollLock for HtmlScrollLock {
    fn lock(&mut self) {
        if !self.locked {
            debug!("Locking page scroll");
        }
        self.locked = true;
    }

    fn unlock(&mut self) {
        if self.locked {
            debug!("Unlocking page scroll");
        }
        self.locked = false;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_unlock_releases_repeated_locks() {
        let mut lock = HtmlScrollLock::default();
        lock.lock();
        lock.lock();
        assert!(lock.is_locked());

        lock.unlock();
        assert!(!lock.is_locked());
    }
}
