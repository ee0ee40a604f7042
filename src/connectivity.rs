//! Network reachability flag, owned by the environment and observed here.
//!
//! The UI shell (or platform layer) detects connectivity changes and flips
//! this flag; the core only reads or subscribes. Modeled as an injected
//! observable resource rather than an ambient global so the pipeline stays
//! testable with a hand-set flag.

use std::sync::Arc;

use tokio::sync::watch;

/// Observable online/offline flag backed by a watch channel.
///
/// Cheap to clone; all clones share the same flag.
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    online: Arc<watch::Sender<bool>>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _) = watch::channel(initially_online);
        Self { online: Arc::new(tx) }
    }

    /// Called by the owner when reachability changes.
    pub fn set_online(&self, online: bool) {
        let previous = self.online.send_replace(online);
        if previous != online {
            tracing::info!(online, "Connectivity changed");
        }
    }

    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    /// Subscribe to reachability changes.
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.online.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_reads_back_what_was_set() {
        let monitor = ConnectivityMonitor::new(true);
        assert!(monitor.is_online());

        monitor.set_online(false);
        assert!(!monitor.is_online());
    }

    #[test]
    fn clones_share_the_same_flag() {
        let monitor = ConnectivityMonitor::new(true);
        let clone = monitor.clone();

        clone.set_online(false);
        assert!(!monitor.is_online());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let monitor = ConnectivityMonitor::new(true);
        let mut watcher = monitor.watch();

        monitor.set_online(false);
        watcher.changed().await.unwrap();
        assert!(!*watcher.borrow());
    }
}
