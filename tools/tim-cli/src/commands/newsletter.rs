//! Newsletter signup.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tim_commerce::newsletter::{NewsletterForm, NewsletterStatus, SUBMITTING_MESSAGE};
use tim_commerce::timer::Timestamp;
use tim_commerce::NewsletterError;

use super::NewsletterArgs;
use crate::context::Context;
use crate::sleeper::TokioSleeper;

/// Run the newsletter command.
pub async fn run(args: NewsletterArgs, ctx: &Context) -> Result<()> {
    let mut form =
        NewsletterForm::new(ctx.config.newsletter_settings()).with_logger(ctx.logger.clone());
    form.set_email(args.email);

    let subscription = match form.submit() {
        Ok(subscription) => subscription,
        Err(NewsletterError::InvalidEmail(email)) => {
            if let Some(message) = form.status().message() {
                ctx.output.warn(message);
            }
            bail!("Invalid email address: {:?}", email);
        }
        Err(e) => return Err(e.into()),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(Timestamp::now().as_millis()),
    };

    let spinner = ctx.output.spinner(SUBMITTING_MESSAGE);
    let outcome = subscription.resolve(&TokioSleeper, &mut rng).await;
    spinner.finish_and_clear();

    form.finish(outcome, Timestamp::now());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "email": subscription.email(),
            "subscribed": matches!(form.status(), NewsletterStatus::Succeeded(_)),
            "message": form.status().message(),
        }));
        return Ok(());
    }

    match form.status() {
        NewsletterStatus::Succeeded(message) => {
            ctx.output.success(message);
            Ok(())
        }
        NewsletterStatus::Failed(message) => bail!("{}", message),
        _ => Ok(()),
    }
}
