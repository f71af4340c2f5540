//! Newsletter signup form with a simulated subscription request.
//!
//! There is no backend. A submission waits [`NewsletterSettings::delay`] on
//! the injected [`Sleeper`] and then succeeds with probability
//! [`NewsletterSettings::success_rate`]. Failures are shown to the user and
//! never retried automatically.

use std::sync::OnceLock;
use std::time::Duration;

use rand::Rng;
use regex::Regex;
use tim_observability::StructuredLogger;

use crate::error::NewsletterError;
use crate::timer::{Sleeper, Timestamp};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUBMITTING_MESSAGE: &str = "Subscribing...";
pub const SUCCESS_MESSAGE: &str = "Thank you for subscribing! Check your email for confirmation.";
pub const FAILURE_MESSAGE: &str = "Subscription failed. Please try again.";

/// How long a success message stays before it clears itself.
pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Check an address against `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn validate_email(email: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Simulated request parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewsletterSettings {
    pub delay: Duration,
    /// Probability in `[0, 1]` that a request succeeds.
    pub success_rate: f64,
}

impl Default for NewsletterSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            success_rate: 0.8,
        }
    }
}

/// What the inline message area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NewsletterStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl NewsletterStatus {
    /// Message text, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            NewsletterStatus::Idle => None,
            NewsletterStatus::Submitting => Some(SUBMITTING_MESSAGE),
            NewsletterStatus::Succeeded(msg) | NewsletterStatus::Failed(msg) => Some(msg),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, NewsletterStatus::Submitting)
    }
}

/// Result of a simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed,
    Rejected,
}

/// An in-flight subscription for one address.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a subscription does nothing until resolved"]
pub struct Subscription {
    email: String,
    settings: NewsletterSettings,
}

impl Subscription {
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Wait out the simulated delay and roll for success.
    pub async fn resolve<S, R>(&self, sleeper: &S, rng: &mut R) -> SubscriptionOutcome
    where
        S: Sleeper + ?Sized,
        R: Rng,
    {
        sleeper.sleep(self.settings.delay).await;
        if rng.gen::<f64>() < self.settings.success_rate {
            SubscriptionOutcome::Subscribed
        } else {
            SubscriptionOutcome::Rejected
        }
    }
}

/// The signup form.
#[derive(Debug, Clone)]
pub struct NewsletterForm {
    email: String,
    status: NewsletterStatus,
    dismiss_at: Option<Timestamp>,
    settings: NewsletterSettings,
    logger: StructuredLogger,
}

impl Default for NewsletterForm {
    fn default() -> Self {
        Self::new(NewsletterSettings::default())
    }
}

impl NewsletterForm {
    pub fn new(settings: NewsletterSettings) -> Self {
        Self {
            email: String::new(),
            status: NewsletterStatus::Idle,
            dismiss_at: None,
            settings,
            logger: StructuredLogger::disabled(),
        }
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("newsletter");
        self
    }

    /// Current input value.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replace the input value.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn status(&self) -> &NewsletterStatus {
        &self.status
    }

    /// Whether the submit button is disabled.
    pub fn is_busy(&self) -> bool {
        self.status.is_submitting()
    }

    /// Validate and start a subscription.
    ///
    /// An invalid address shows the validation message, keeps the input
    /// and never reaches `Submitting`.
    pub fn submit(&mut self) -> Result<Subscription, NewsletterError> {
        if self.is_busy() {
            return Err(NewsletterError::InProgress);
        }

        let email = self.email.trim().to_string();
        if !validate_email(&email) {
            self.status = NewsletterStatus::Failed(INVALID_EMAIL_MESSAGE.to_string());
            self.dismiss_at = None;
            return Err(NewsletterError::InvalidEmail(email));
        }

        self.status = NewsletterStatus::Submitting;
        self.dismiss_at = None;
        self.logger.debug("subscription submitted");
        Ok(Subscription {
            email,
            settings: self.settings,
        })
    }

    /// Apply the result of a resolved subscription at time `now`.
    pub fn finish(&mut self, outcome: SubscriptionOutcome, now: Timestamp) {
        match outcome {
            SubscriptionOutcome::Subscribed => {
                self.logger.info("newsletter subscription succeeded");
                self.status = NewsletterStatus::Succeeded(SUCCESS_MESSAGE.to_string());
                self.email.clear();
                self.dismiss_at = Some(now + SUCCESS_DISMISS_AFTER);
            }
            SubscriptionOutcome::Rejected => {
                self.logger.warn("newsletter subscription failed");
                self.status = NewsletterStatus::Failed(FAILURE_MESSAGE.to_string());
                self.dismiss_at = None;
            }
        }
    }

    /// When the current message clears itself, if it does.
    pub fn dismiss_at(&self) -> Option<Timestamp> {
        self.dismiss_at
    }

    /// Clear the message once its auto-dismiss deadline has passed.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        match self.dismiss_at {
            Some(deadline) if now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    /// Clear any message. An in-flight submission is left alone.
    pub fn dismiss(&mut self) {
        if !self.is_busy() {
            self.status = NewsletterStatus::Idle;
        }
        self.dismiss_at = None;
    }
}
