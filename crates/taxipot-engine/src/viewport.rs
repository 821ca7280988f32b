//! Sentinel observation for infinite scrolling.
//!
//! A [`ViewportRegistry`] stands in for the browser's intersection observer:
//! the renderer reports which list rows are visible, and every live
//! [`SentinelSubscription`] whose target row *crosses into* that range is
//! reported once. Notifications are edge-triggered; a sentinel that stays
//! visible does not fire again until it leaves and re-enters, or until the
//! subscription is replaced.
//!
//! Subscriptions unregister themselves on drop, so releasing the observation
//! is tied to scope and happens on every exit path.
//!
//! The registry outlives any single search page, so it also hands out the
//! search generations: two pages mounted one after another never share one.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    generation: u64,
    observed: BTreeMap<SubscriptionId, Observation>,
}

#[derive(Debug)]
struct Observation {
    target: usize,
    intersecting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewportRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ViewportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching row `target`. A fresh subscription has never been
    /// visible, so it fires on the first report that includes its row.
    pub fn observe(&self, target: usize) -> SentinelSubscription {
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.observed.insert(
            id,
            Observation {
                target,
                intersecting: false,
            },
        );
        tracing::trace!(?id, target, "sentinel observed");

        SentinelSubscription {
            id,
            target,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Report the currently visible rows; returns subscriptions that just
    /// became visible.
    pub fn report_visible(&self, visible: Range<usize>) -> Vec<SubscriptionId> {
        let mut registry = self.lock();
        let mut crossed = Vec::new();
        for (id, observation) in registry.observed.iter_mut() {
            let now_visible = visible.contains(&observation.target);
            if now_visible && !observation.intersecting {
                crossed.push(*id);
            }
            observation.intersecting = now_visible;
        }
        crossed
    }

    /// A search generation no earlier caller has been given.
    pub fn next_generation(&self) -> u64 {
        let mut registry = self.lock();
        registry.generation += 1;
        registry.generation
    }

    /// Number of live observations.
    pub fn active_count(&self) -> usize {
        self.lock().observed.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for one observed sentinel row; dropping it stops the observation.
#[derive(Debug)]
pub struct SentinelSubscription {
    id: SubscriptionId,
    target: usize,
    registry: Weak<Mutex<Registry>>,
}

impl SentinelSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

impl Drop for SentinelSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.observed.remove(&self.id);
            tracing::trace!(id = ?self.id, "sentinel released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_crossing() {
        let registry = ViewportRegistry::new();
        let sub = registry.observe(10);

        assert!(registry.report_visible(0..5).is_empty());
        assert_eq!(registry.report_visible(6..11), vec![sub.id()]);
        assert!(registry.report_visible(6..11).is_empty());

        assert!(registry.report_visible(0..5).is_empty());
        assert_eq!(registry.report_visible(8..12), vec![sub.id()]);
    }

    #[test]
    fn test_new_subscription_fires_when_already_visible() {
        let registry = ViewportRegistry::new();
        let first = registry.observe(3);
        assert_eq!(registry.report_visible(0..4), vec![first.id()]);
        drop(first);

        let second = registry.observe(3);
        assert_eq!(registry.report_visible(0..4), vec![second.id()]);
    }

    #[test]
    fn test_drop_releases_observation() {
        let registry = ViewportRegistry::new();
        {
            let _a = registry.observe(1);
            let _b = registry.observe(2);
            assert_eq!(registry.active_count(), 2);
        }
        assert_eq!(registry.active_count(), 0);
        assert!(registry.report_visible(0..10).is_empty());
    }

    #[test]
    fn test_released_on_unwind() {
        let registry = ViewportRegistry::new();
        let cloned = registry.clone();
        let result = std::panic::catch_unwind(move || {
            let _sub = cloned.observe(0);
            panic!("render failed");
        });
        assert!(result.is_err());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_generations_are_shared_by_clones() {
        let registry = ViewportRegistry::new();
        let other = registry.clone();
        let a = registry.next_generation();
        let b = other.next_generation();
        let c = registry.next_generation();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let registry = ViewportRegistry::new();
        let sub = registry.observe(5);
        drop(registry);
        assert_eq!(sub.target(), 5);
        drop(sub);
    }
}
