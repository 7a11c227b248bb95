//! Step transitions.
//!
//! Each function is a pure transition over a borrowed [`Session`]: it checks
//! that the session is on the expected step, validates its inputs, and either
//! mutates the session (fields plus step) or returns an error without
//! touching it. `current_step` never decreases; the only way back to step 1
//! is [`Session::reset`] via [`play_again`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::campaign::{CampaignInput, FieldError};
use crate::client::Client;
use crate::session::Session;
use crate::step::Step;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    #[error("action not available on step {0}")]
    WrongStep(Step),

    #[error("validation failed")]
    Invalid(Vec<FieldError>),
}

impl TransitionError {
    fn invalid(field: &str, message: &str) -> Self {
        TransitionError::Invalid(vec![FieldError::new(field, message)])
    }
}

fn expect_step(session: &Session, step: Step) -> Result<(), TransitionError> {
    if session.current_step == step {
        Ok(())
    } else {
        Err(TransitionError::WrongStep(session.current_step))
    }
}

/// Step 1 → 2. Records the player's name.
pub fn start_run(session: &mut Session, name: &str) -> Result<(), TransitionError> {
    expect_step(session, Step::Welcome)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(TransitionError::invalid(
            "user_name",
            "Please enter your name to continue",
        ));
    }
    session.user_name = name.to_string();
    session.current_step = Step::ClientSelection;
    Ok(())
}

/// Step 2 → 3. Commits the selected client; immutable until reset.
pub fn choose_client(session: &mut Session, client: Client) -> Result<(), TransitionError> {
    expect_step(session, Step::ClientSelection)?;
    session.client = Some(client);
    session.current_step = Step::Brief;
    Ok(())
}

/// Step 3 → 4. Starts the countdown. `timer_start` is set at most once per
/// run; a value that already exists is never overwritten.
pub fn accept_brief(session: &mut Session, now: DateTime<Utc>) -> Result<(), TransitionError> {
    expect_step(session, Step::Brief)?;
    if session.timer_start.is_none() {
        session.timer_start = Some(now);
    }
    session.current_step = Step::CampaignForm;
    Ok(())
}

/// Step 4, no step change. Commits the campaign form and the poster prompt
/// assembled from it; the session advances only via [`proceed_to_caption`]
/// after a poster exists.
pub fn submit_campaign(
    session: &mut Session,
    input: CampaignInput,
    image_prompt: String,
) -> Result<(), TransitionError> {
    expect_step(session, Step::CampaignForm)?;
    input.validate().map_err(TransitionError::Invalid)?;
    session.campaign = input;
    session.image_prompt = image_prompt;
    Ok(())
}

/// Step 4 → 5. Requires a generated (or fallback) poster reference.
pub fn proceed_to_caption(session: &mut Session) -> Result<(), TransitionError> {
    expect_step(session, Step::CampaignForm)?;
    if session.generated_image.is_none() {
        return Err(TransitionError::invalid(
            "generated_image",
            "Generate a poster before continuing",
        ));
    }
    session.current_step = Step::CaptionInput;
    Ok(())
}

/// Step 5 → 6. Commits the caption as typed.
pub fn submit_caption(session: &mut Session, text: &str) -> Result<(), TransitionError> {
    expect_step(session, Step::CaptionInput)?;
    if text.trim().is_empty() {
        return Err(TransitionError::invalid(
            "caption_text",
            "Please enter a caption before continuing",
        ));
    }
    session.caption_text = text.to_string();
    session.current_step = Step::Mockup;
    Ok(())
}

/// Step 6 → 7. Records the client's review. The score is clamped to 0..=100
/// no matter which gateway path produced it.
pub fn record_review(
    session: &mut Session,
    message: String,
    score: u8,
) -> Result<(), TransitionError> {
    expect_step(session, Step::Mockup)?;
    session.feedback_message = message;
    session.score = Some(score.min(100));
    session.current_step = Step::Feedback;
    Ok(())
}

/// Step 7 only. Discards the run and returns to the welcome screen.
pub fn play_again(session: &mut Session) -> Result<(), TransitionError> {
    expect_step(session, Step::Feedback)?;
    session.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer;

    fn campaign() -> CampaignInput {
        CampaignInput {
            headline: "Fresh Fade Friday".into(),
            usp: "Precision cuts, no waiting".into(),
            cta: "Book today".into(),
            visual_description: "Monochrome, clean lines".into(),
        }
    }

    fn run_to_form(session: &mut Session) {
        start_run(session, "Sam").unwrap();
        choose_client(session, Client::roster().remove(2)).unwrap();
        accept_brief(session, Utc::now()).unwrap();
    }

    #[test]
    fn happy_path_is_monotonic() {
        let mut session = Session::default();
        let mut numbers = vec![session.current_step.number()];

        run_to_form(&mut session);
        numbers.push(session.current_step.number());
        submit_campaign(&mut session, campaign(), "prompt".into()).unwrap();
        session.generated_image = Some("https://example.com/poster.png".into());
        proceed_to_caption(&mut session).unwrap();
        numbers.push(session.current_step.number());
        submit_caption(&mut session, "Look sharp.").unwrap();
        numbers.push(session.current_step.number());
        record_review(&mut session, "Well done".into(), 88).unwrap();
        numbers.push(session.current_step.number());

        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted, "step numbers must never decrease");
        assert_eq!(session.current_step, Step::Feedback);
    }

    #[test]
    fn empty_name_blocks_start() {
        let mut session = Session::default();
        let err = start_run(&mut session, "   ").unwrap_err();
        assert!(matches!(err, TransitionError::Invalid(_)));
        assert_eq!(session.current_step, Step::Welcome);
        assert!(session.user_name.is_empty());
    }

    #[test]
    fn empty_usp_blocks_the_form_and_names_the_field() {
        let mut session = Session::default();
        run_to_form(&mut session);

        let mut input = campaign();
        input.usp = String::new();
        let err = submit_campaign(&mut session, input, "prompt".into()).unwrap_err();
        match err {
            TransitionError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "usp");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.current_step, Step::CampaignForm);
        assert!(session.campaign.usp.is_empty());
    }

    #[test]
    fn timer_start_is_set_exactly_once() {
        let mut session = Session::default();
        start_run(&mut session, "Sam").unwrap();
        choose_client(&mut session, Client::roster().remove(0)).unwrap();

        let earlier = Utc::now() - chrono::Duration::seconds(30);
        session.timer_start = Some(earlier);
        accept_brief(&mut session, Utc::now()).unwrap();
        assert_eq!(session.timer_start, Some(earlier));
    }

    #[test]
    fn transitions_reject_the_wrong_step() {
        let mut session = Session::default();
        assert!(matches!(
            submit_caption(&mut session, "caption"),
            Err(TransitionError::WrongStep(Step::Welcome))
        ));
        assert!(matches!(
            play_again(&mut session),
            Err(TransitionError::WrongStep(Step::Welcome))
        ));
        assert_eq!(session.current_step, Step::Welcome);
    }

    #[test]
    fn caption_screen_requires_a_poster_first() {
        let mut session = Session::default();
        run_to_form(&mut session);
        submit_campaign(&mut session, campaign(), "prompt".into()).unwrap();
        assert!(proceed_to_caption(&mut session).is_err());
        session.generated_image = Some("ref".into());
        proceed_to_caption(&mut session).unwrap();
        assert_eq!(session.current_step, Step::CaptionInput);
    }

    #[test]
    fn review_score_is_clamped() {
        let mut session = Session::default();
        run_to_form(&mut session);
        submit_campaign(&mut session, campaign(), "prompt".into()).unwrap();
        session.generated_image = Some("ref".into());
        proceed_to_caption(&mut session).unwrap();
        submit_caption(&mut session, "caption").unwrap();
        record_review(&mut session, "msg".into(), 255).unwrap();
        assert_eq!(session.score, Some(100));
    }

    #[test]
    fn play_again_discards_everything() {
        let mut session = Session::default();
        run_to_form(&mut session);
        submit_campaign(&mut session, campaign(), "prompt".into()).unwrap();
        session.generated_image = Some("ref".into());
        session.elapsed_secs = timer::COUNTDOWN_SECS;
        proceed_to_caption(&mut session).unwrap();
        submit_caption(&mut session, "caption").unwrap();
        record_review(&mut session, "msg".into(), 90).unwrap();

        play_again(&mut session).unwrap();
        assert_eq!(session, Session::default());
    }
}
