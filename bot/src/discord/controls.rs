use poise::serenity_prelude::{ButtonStyle, CreateActionRow, CreateButton};

use crate::store::WarOutcome;

/// The interactive controls attached to a backup request.
///
/// Modeled as a tagged variant so every control renders and disables
/// through the same path; no type inspection at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarControl {
    EditOpps,
    Win,
    Loss,
    Truce,
}

impl WarControl {
    pub const ALL: [WarControl; 4] = [Self::EditOpps, Self::Win, Self::Loss, Self::Truce];

    /// Stable component id. Requests survive process restarts because these
    /// never change and the message itself carries the request state.
    pub fn custom_id(self) -> &'static str {
        match self {
            Self::EditOpps => "backup:edit_opps",
            Self::Win => "backup:win",
            Self::Loss => "backup:loss",
            Self::Truce => "backup:truce",
        }
    }

    pub fn from_custom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.custom_id() == id)
    }

    /// The terminal outcome this control applies, if it is a concluding one.
    pub fn outcome(self) -> Option<WarOutcome> {
        match self {
            Self::Win => Some(WarOutcome::Win),
            Self::Loss => Some(WarOutcome::Loss),
            Self::Truce => Some(WarOutcome::Truce),
            Self::EditOpps => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::EditOpps => "Edit Opps",
            Self::Win => "Win",
            Self::Loss => "Lose",
            Self::Truce => "Truce",
        }
    }

    fn style(self) -> ButtonStyle {
        match self {
            Self::EditOpps => ButtonStyle::Secondary,
            Self::Win => ButtonStyle::Success,
            Self::Loss => ButtonStyle::Danger,
            Self::Truce => ButtonStyle::Primary,
        }
    }

    fn button(self, disabled: bool) -> CreateButton {
        CreateButton::new(self.custom_id())
            .label(self.label())
            .style(self.style())
            .disabled(disabled)
    }
}

/// The full control row for a request message.
pub fn control_row(disabled: bool) -> CreateActionRow {
    CreateActionRow::Buttons(
        WarControl::ALL
            .iter()
            .map(|control| control.button(disabled))
            .collect(),
    )
}

/// Component id of the `/resetstats` confirmation button. Collected inline
/// by the command, never dispatched through the event handler.
pub const RESET_CONFIRM_ID: &str = "stats:reset_confirm";

/// Ids of the edit-opponents modal and its single text input.
pub const EDIT_OPPS_MODAL_ID: &str = "backup:edit_opps_modal";
pub const EDIT_OPPS_INPUT_ID: &str = "opps_input";

/// Single-button confirm row for the destructive stats reset.
pub fn reset_confirm_row(disabled: bool) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(RESET_CONFIRM_ID)
            .label("Confirm Reset")
            .style(ButtonStyle::Danger)
            .disabled(disabled),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_ids_round_trip() {
        for control in WarControl::ALL {
            assert_eq!(WarControl::from_custom_id(control.custom_id()), Some(control));
        }
    }

    #[test]
    fn test_unknown_custom_id_is_none() {
        assert_eq!(WarControl::from_custom_id("backup:unknown"), None);
        assert_eq!(WarControl::from_custom_id(RESET_CONFIRM_ID), None);
    }

    #[test]
    fn test_only_concluding_controls_carry_an_outcome() {
        assert_eq!(WarControl::EditOpps.outcome(), None);
        assert_eq!(WarControl::Win.outcome(), Some(WarOutcome::Win));
        assert_eq!(WarControl::Loss.outcome(), Some(WarOutcome::Loss));
        assert_eq!(WarControl::Truce.outcome(), Some(WarOutcome::Truce));
    }

    #[test]
    fn test_custom_ids_are_unique() {
        let mut ids: Vec<&str> = WarControl::ALL.iter().map(|c| c.custom_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), WarControl::ALL.len());
    }
}
