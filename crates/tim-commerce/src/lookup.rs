//! Product resolution for the detail page.
//!
//! A detail page can load before the page that publishes the catalog has
//! filled the [`ProductRegistry`]. Lookups therefore poll the registry
//! under a [`LookupPolicy`] and end in a typed outcome.

use std::time::Duration;

use crate::catalog::{Product, ProductRegistry};
use crate::error::LookupError;
use crate::ids::ProductId;
use crate::search::product_id_from_query;
use crate::timer::Sleeper;

/// Delay between registry polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backoff {
    /// Poll again immediately.
    None,
    /// Same delay every time.
    Fixed(Duration),
    /// Doubling delay from `base`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                base.saturating_mul(multiplier).min(*max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Fixed(Duration::from_millis(200))
    }
}

/// Bounds on a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupPolicy {
    /// Polls after the first one.
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Cap on the total time spent waiting between polls.
    pub timeout: Duration,
}

impl LookupPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Check once, never wait.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: Backoff::None,
            timeout: Duration::ZERO,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            backoff: Backoff::default(),
            timeout: Duration::from_secs(3),
        }
    }
}

/// Resolve the product named by a detail page query string (`?id=7`).
pub async fn resolve_product<S>(
    registry: &ProductRegistry,
    query: &str,
    policy: &LookupPolicy,
    sleeper: &S,
) -> Result<Product, LookupError>
where
    S: Sleeper + ?Sized,
{
    let id = product_id_from_query(query).ok_or(LookupError::MissingId)?;
    resolve_product_id(registry, id, policy, sleeper).await
}

/// Resolve `id`, polling until it appears or the policy runs out.
pub async fn resolve_product_id<S>(
    registry: &ProductRegistry,
    id: ProductId,
    policy: &LookupPolicy,
    sleeper: &S,
) -> Result<Product, LookupError>
where
    S: Sleeper + ?Sized,
{
    let mut waited = Duration::ZERO;

    for attempt in 0..=policy.max_attempts {
        if let Some(product) = registry.find(id) {
            return Ok(product);
        }
        if attempt == policy.max_attempts {
            break;
        }

        let delay = policy.backoff.delay_for_attempt(attempt);
        if waited + delay > policy.timeout {
            return Err(LookupError::TimedOut { id, waited });
        }
        sleeper.sleep(delay).await;
        waited += delay;
    }

    Err(LookupError::NotFound {
        id,
        attempts: policy.max_attempts.saturating_add(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::new_arrivals;
    use crate::timer::RecordingSleeper;
    use async_trait::async_trait;
    use futures::executor::block_on;

    /// Publishes the catalog after a number of waits.
    struct PublishingSleeper<'a> {
        registry: &'a ProductRegistry,
        publish_after: usize,
        inner: RecordingSleeper,
    }

    #[async_trait(?Send)]
    impl Sleeper for PublishingSleeper<'_> {
        async fn sleep(&self, duration: Duration) {
            self.inner.sleep(duration).await;
            if self.inner.waits().len() == self.publish_after {
                self.registry.publish(new_arrivals());
            }
        }
    }

    #[test]
    fn test_backoff_delays() {
        assert_eq!(Backoff::None.delay_for_attempt(3), Duration::ZERO);
        assert_eq!(Backoff::default().delay_for_attempt(7), Duration::from_millis(200));

        let exp = Backoff::Exponential {
            base: Duration::from_millis(50),
            max: Duration::from_millis(300),
        };
        assert_eq!(exp.delay_for_attempt(0), Duration::from_millis(50));
        assert_eq!(exp.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(exp.delay_for_attempt(3), Duration::from_millis(300));
        assert_eq!(exp.delay_for_attempt(40), Duration::from_millis(300));
    }

    #[test]
    fn test_found_immediately() {
        let registry = ProductRegistry::new();
        registry.publish(new_arrivals());
        let sleeper = RecordingSleeper::new();

        let product =
            block_on(resolve_product(&registry, "?id=3", &LookupPolicy::default(), &sleeper)).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert!(sleeper.waits().is_empty());
    }

    #[test]
    fn test_missing_id() {
        let registry = ProductRegistry::new();
        let sleeper = RecordingSleeper::new();
        for query in ["", "?id=", "?id=shoes", "?ref=home"] {
            let err = block_on(resolve_product(&registry, query, &LookupPolicy::default(), &sleeper))
                .unwrap_err();
            assert_eq!(err, LookupError::MissingId);
        }
        assert!(sleeper.waits().is_empty());
    }

    #[test]
    fn test_found_after_late_publish() {
        let registry = ProductRegistry::new();
        let sleeper = PublishingSleeper {
            registry: &registry,
            publish_after: 4,
            inner: RecordingSleeper::new(),
        };

        let product = block_on(resolve_product_id(
            &registry,
            ProductId::new(12),
            &LookupPolicy::default(),
            &sleeper,
        ))
        .unwrap();
        assert_eq!(product.name, "Safari Leather Belt");
        assert_eq!(sleeper.inner.total(), Duration::from_millis(800));
    }

    #[test]
    fn test_not_found_after_budget() {
        let registry = ProductRegistry::new();
        registry.publish(new_arrivals());
        let sleeper = RecordingSleeper::new();

        let err = block_on(resolve_product_id(
            &registry,
            ProductId::new(999),
            &LookupPolicy::default(),
            &sleeper,
        ))
        .unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                id: ProductId::new(999),
                attempts: 11
            }
        );
        assert_eq!(sleeper.waits().len(), 10);
        assert_eq!(sleeper.total(), Duration::from_millis(2000));
    }

    #[test]
    fn test_timeout_caps_waiting() {
        let registry = ProductRegistry::new();
        let sleeper = RecordingSleeper::new();
        let policy = LookupPolicy::new(10).with_timeout(Duration::from_millis(500));

        let err = block_on(resolve_product_id(&registry, ProductId::new(1), &policy, &sleeper))
            .unwrap_err();
        assert_eq!(
            err,
            LookupError::TimedOut {
                id: ProductId::new(1),
                waited: Duration::from_millis(400)
            }
        );
    }

    #[test]
    fn test_no_retry_policy() {
        let registry = ProductRegistry::new();
        let sleeper = RecordingSleeper::new();
        let err = block_on(resolve_product_id(
            &registry,
            ProductId::new(1),
            &LookupPolicy::none(),
            &sleeper,
        ))
        .unwrap_err();
        assert!(matches!(err, LookupError::NotFound { attempts: 1, .. }));
    }
}
