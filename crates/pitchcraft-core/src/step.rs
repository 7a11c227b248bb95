use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven sequential wizard screens.
///
/// Steps are ordered; a run only ever moves forward through them until an
/// explicit reset returns the session to `Welcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    ClientSelection,
    Brief,
    CampaignForm,
    CaptionInput,
    Mockup,
    Feedback,
}

impl Step {
    pub const ALL: &[Step] = &[
        Step::Welcome,
        Step::ClientSelection,
        Step::Brief,
        Step::CampaignForm,
        Step::CaptionInput,
        Step::Mockup,
        Step::Feedback,
    ];

    /// 1-based screen number, 1..=7.
    pub fn number(&self) -> u8 {
        match self {
            Step::Welcome => 1,
            Step::ClientSelection => 2,
            Step::Brief => 3,
            Step::CampaignForm => 4,
            Step::CaptionInput => 5,
            Step::Mockup => 6,
            Step::Feedback => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Step::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// The screen that follows this one, or `None` for the terminal step.
    pub fn next(&self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Welcome => "welcome",
            Step::ClientSelection => "client_selection",
            Step::Brief => "brief",
            Step::CampaignForm => "campaign_form",
            Step::CaptionInput => "caption_input",
            Step::Mockup => "mockup",
            Step::Feedback => "feedback",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Welcome => "Welcome",
            Step::ClientSelection => "Choose Your Client",
            Step::Brief => "Your Brief",
            Step::CampaignForm => "Campaign Form",
            Step::CaptionInput => "Write Your Caption",
            Step::Mockup => "Post Preview",
            Step::Feedback => "Client Feedback",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_cover_one_through_seven() {
        let numbers: Vec<u8> = Step::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn from_number_round_trips() {
        for &step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(8), None);
    }

    #[test]
    fn next_walks_the_sequence_and_stops() {
        let mut step = Step::Welcome;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, Step::ALL);
        assert_eq!(Step::Feedback.next(), None);
    }

    #[test]
    fn ordering_matches_numbers() {
        assert!(Step::Welcome < Step::ClientSelection);
        assert!(Step::Mockup < Step::Feedback);
    }
}
