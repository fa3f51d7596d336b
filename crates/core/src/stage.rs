//! Conversation stages for the booking flow
//!
//! The expected agent script is a fixed 15-step flow from greeting to a
//! confirmed booking. The enum declaration order IS the flow order: the
//! derived discriminant is the sole progress index used for regression and
//! skip checks, so there is exactly one source of truth for ordering.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One checkpoint in the expected booking conversation.
///
/// Serde labels match the SCREAMING_SNAKE_CASE strings used in transcripts
/// and historical reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStage {
    /// Initial greeting
    #[default]
    Greeting,
    /// Full name obtained
    NameCollected,
    /// Mobile number obtained
    PhoneCollected,
    /// Coorg or Kodai chosen
    ResortSelected,
    /// Travel dates confirmed
    DatesProvided,
    /// Guest count and children checked
    OccupancyChecked,
    /// Restful vs experiential preference
    ExperienceIntent,
    /// Room type recommended
    RoomPositioned,
    /// Price quoted with value framing
    RateQuoted,
    /// Optional experience shaping
    ExperienceShaped,
    /// Special occasions checked
    OccasionAsked,
    /// Email address obtained
    EmailCollected,
    /// Booking details recapped
    RecapDone,
    /// "Shall I go ahead?" asked
    ConfirmationAsked,
    /// Booking confirmed with number (success)
    BookingConfirmed,
}

/// All stages in flow order, most advanced last
pub const ALL_STAGES: [ConversationStage; 15] = [
    ConversationStage::Greeting,
    ConversationStage::NameCollected,
    ConversationStage::PhoneCollected,
    ConversationStage::ResortSelected,
    ConversationStage::DatesProvided,
    ConversationStage::OccupancyChecked,
    ConversationStage::ExperienceIntent,
    ConversationStage::RoomPositioned,
    ConversationStage::RateQuoted,
    ConversationStage::ExperienceShaped,
    ConversationStage::OccasionAsked,
    ConversationStage::EmailCollected,
    ConversationStage::RecapDone,
    ConversationStage::ConfirmationAsked,
    ConversationStage::BookingConfirmed,
];

/// Static transition map for O(1) lookup. Some edges deliberately skip an
/// adjacent stage (e.g. dates straight to room positioning when occupancy is
/// obvious) - real calls are flexible and the graph reflects that.
static STAGE_TRANSITIONS: Lazy<HashMap<ConversationStage, &'static [ConversationStage]>> =
    Lazy::new(|| {
        use ConversationStage::*;
        let mut map = HashMap::new();
        map.insert(Greeting, &[NameCollected, PhoneCollected] as &[_]);
        map.insert(NameCollected, &[PhoneCollected] as &[_]);
        map.insert(PhoneCollected, &[ResortSelected] as &[_]);
        map.insert(ResortSelected, &[DatesProvided] as &[_]);
        map.insert(DatesProvided, &[OccupancyChecked, RoomPositioned] as &[_]);
        map.insert(OccupancyChecked, &[ExperienceIntent, RoomPositioned] as &[_]);
        map.insert(ExperienceIntent, &[RoomPositioned] as &[_]);
        map.insert(RoomPositioned, &[RateQuoted, ExperienceShaped] as &[_]);
        map.insert(
            RateQuoted,
            &[ExperienceShaped, OccasionAsked, EmailCollected] as &[_],
        );
        map.insert(ExperienceShaped, &[OccasionAsked, EmailCollected] as &[_]);
        map.insert(OccasionAsked, &[EmailCollected] as &[_]);
        map.insert(EmailCollected, &[RecapDone, ConfirmationAsked] as &[_]);
        map.insert(RecapDone, &[ConfirmationAsked] as &[_]);
        map.insert(ConfirmationAsked, &[BookingConfirmed] as &[_]);
        map.insert(BookingConfirmed, &[] as &[_]);
        map
    });

impl ConversationStage {
    /// Progress index, 0 (Greeting) to 14 (BookingConfirmed).
    /// This is the only ordering relation in the system.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Number of stages in the flow
    pub const fn total() -> usize {
        ALL_STAGES.len()
    }

    /// SCREAMING_SNAKE_CASE wire label
    pub fn label(&self) -> &'static str {
        match self {
            ConversationStage::Greeting => "GREETING",
            ConversationStage::NameCollected => "NAME_COLLECTED",
            ConversationStage::PhoneCollected => "PHONE_COLLECTED",
            ConversationStage::ResortSelected => "RESORT_SELECTED",
            ConversationStage::DatesProvided => "DATES_PROVIDED",
            ConversationStage::OccupancyChecked => "OCCUPANCY_CHECKED",
            ConversationStage::ExperienceIntent => "EXPERIENCE_INTENT",
            ConversationStage::RoomPositioned => "ROOM_POSITIONED",
            ConversationStage::RateQuoted => "RATE_QUOTED",
            ConversationStage::ExperienceShaped => "EXPERIENCE_SHAPED",
            ConversationStage::OccasionAsked => "OCCASION_ASKED",
            ConversationStage::EmailCollected => "EMAIL_COLLECTED",
            ConversationStage::RecapDone => "RECAP_DONE",
            ConversationStage::ConfirmationAsked => "CONFIRMATION_ASKED",
            ConversationStage::BookingConfirmed => "BOOKING_CONFIRMED",
        }
    }

    /// Progress as (current step, total steps), 1-based
    pub fn progress(&self) -> (usize, usize) {
        (self.index() + 1, Self::total())
    }

    /// Stages legally reachable next (staying put is always allowed)
    pub fn allowed_transitions(&self) -> &'static [ConversationStage] {
        STAGE_TRANSITIONS.get(self).copied().unwrap_or(&[])
    }

    /// Check if a direct transition to `target` is on the graph
    pub fn can_transition_to(&self, target: ConversationStage) -> bool {
        target == *self || self.allowed_transitions().contains(&target)
    }

    /// Terminal success state has no outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationStage::BookingConfirmed)
    }

    /// Canned description of what a call stuck at this stage failed to do.
    /// Used only when a call terminates here without confirmation.
    pub fn failure_description(&self) -> &'static str {
        match self {
            ConversationStage::Greeting => {
                "Failed at initial greeting - conversation didn't start properly"
            }
            ConversationStage::NameCollected => {
                "Failed after name collection - didn't progress to phone"
            }
            ConversationStage::PhoneCollected => {
                "Failed after phone collection - didn't select resort"
            }
            ConversationStage::ResortSelected => {
                "Failed after resort selection - didn't provide dates"
            }
            ConversationStage::DatesProvided => "Failed after dates - didn't check occupancy",
            ConversationStage::OccupancyChecked => {
                "Failed after occupancy check - didn't discuss experience intent"
            }
            ConversationStage::ExperienceIntent => {
                "Failed after experience intent - didn't position room"
            }
            ConversationStage::RoomPositioned => {
                "Failed after room positioning - didn't quote rate"
            }
            ConversationStage::RateQuoted => {
                "Failed after rate quote - didn't shape experience or proceed"
            }
            ConversationStage::ExperienceShaped => {
                "Failed after experience shaping - didn't ask about occasions"
            }
            ConversationStage::OccasionAsked => {
                "Failed after occasion question - didn't collect email"
            }
            ConversationStage::EmailCollected => "Failed after email - didn't recap booking",
            ConversationStage::RecapDone => "Failed after recap - didn't ask for confirmation",
            ConversationStage::ConfirmationAsked => {
                "Customer declined or didn't confirm - no booking made"
            }
            ConversationStage::BookingConfirmed => "Success - booking confirmed with number",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_follows_declaration_order() {
        assert_eq!(ConversationStage::Greeting.index(), 0);
        assert_eq!(ConversationStage::RateQuoted.index(), 8);
        assert_eq!(ConversationStage::BookingConfirmed.index(), 14);

        for window in ALL_STAGES.windows(2) {
            assert!(window[0].index() < window[1].index());
        }
    }

    #[test]
    fn test_terminal_stage_has_no_outgoing_edges() {
        assert!(ConversationStage::BookingConfirmed.is_terminal());
        assert!(ConversationStage::BookingConfirmed
            .allowed_transitions()
            .is_empty());
    }

    #[test]
    fn test_occupancy_skip_is_legal() {
        // Dates straight to room positioning skips the occupancy check
        assert!(ConversationStage::DatesProvided
            .can_transition_to(ConversationStage::RoomPositioned));
        // But not an arbitrary jump
        assert!(!ConversationStage::Greeting.can_transition_to(ConversationStage::RateQuoted));
    }

    #[test]
    fn test_self_loop_always_allowed() {
        for stage in ALL_STAGES {
            assert!(stage.can_transition_to(stage));
        }
    }

    #[test]
    fn test_serde_labels_are_screaming_snake_case() {
        let json = serde_json::to_string(&ConversationStage::BookingConfirmed).unwrap();
        assert_eq!(json, "\"BOOKING_CONFIRMED\"");

        let stage: ConversationStage = serde_json::from_str("\"RATE_QUOTED\"").unwrap();
        assert_eq!(stage, ConversationStage::RateQuoted);
    }
}
