//! Badge styling for enum-valued cells.
//!
//! The per-enum mappings are exhaustive matches; [`badge_for`] is the
//! string-keyed entry point and is total: any value that does not parse into
//! the domain's enum gets the gray default, never an error.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::kinds::{AuditAction, LeaveStatus, ProcedureStatus, ShiftKind};

/// Which closed enumeration a badge cell draws its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeDomain {
    ProcedureStatus,
    Shift,
    LeaveStatus,
    AuditAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeColor {
    Gray,
    Green,
    Amber,
    Red,
    Blue,
    Indigo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct BadgeStyle {
    pub color: BadgeColor,
    pub icon: &'static str,
}

/// Fallback for values outside the known enumeration.
pub const DEFAULT_BADGE: BadgeStyle = BadgeStyle {
    color: BadgeColor::Gray,
    icon: "circle",
};

#[must_use]
pub const fn procedure_status_style(status: ProcedureStatus) -> BadgeStyle {
    match status {
        ProcedureStatus::Scheduled => BadgeStyle {
            color: BadgeColor::Blue,
            icon: "calendar",
        },
        ProcedureStatus::Completed => BadgeStyle {
            color: BadgeColor::Green,
            icon: "check-circle",
        },
        ProcedureStatus::Cancelled => BadgeStyle {
            color: BadgeColor::Red,
            icon: "x-circle",
        },
    }
}

#[must_use]
pub const fn shift_style(kind: ShiftKind) -> BadgeStyle {
    match kind {
        ShiftKind::Morning => BadgeStyle {
            color: BadgeColor::Amber,
            icon: "sun",
        },
        ShiftKind::Afternoon => BadgeStyle {
            color: BadgeColor::Blue,
            icon: "sunset",
        },
        ShiftKind::Night => BadgeStyle {
            color: BadgeColor::Indigo,
            icon: "moon",
        },
        ShiftKind::Off => BadgeStyle {
            color: BadgeColor::Gray,
            icon: "home",
        },
    }
}

#[must_use]
pub const fn leave_status_style(status: LeaveStatus) -> BadgeStyle {
    match status {
        LeaveStatus::Pending => BadgeStyle {
            color: BadgeColor::Amber,
            icon: "clock",
        },
        LeaveStatus::Approved => BadgeStyle {
            color: BadgeColor::Green,
            icon: "check-circle",
        },
        LeaveStatus::Rejected => BadgeStyle {
            color: BadgeColor::Red,
            icon: "x-circle",
        },
    }
}

#[must_use]
pub const fn audit_action_style(action: AuditAction) -> BadgeStyle {
    match action {
        AuditAction::Created => BadgeStyle {
            color: BadgeColor::Green,
            icon: "plus-circle",
        },
        AuditAction::Updated => BadgeStyle {
            color: BadgeColor::Blue,
            icon: "pencil",
        },
        AuditAction::Deleted => BadgeStyle {
            color: BadgeColor::Red,
            icon: "trash",
        },
        AuditAction::Restored => BadgeStyle {
            color: BadgeColor::Amber,
            icon: "arrow-path",
        },
        AuditAction::LoggedIn => BadgeStyle {
            color: BadgeColor::Indigo,
            icon: "arrow-right-circle",
        },
        AuditAction::LoggedOut => BadgeStyle {
            color: BadgeColor::Gray,
            icon: "arrow-left-circle",
        },
    }
}

/// Resolve a raw stored value into a badge style. Total: unknown values fall
/// back to [`DEFAULT_BADGE`].
#[must_use]
pub fn badge_for(domain: BadgeDomain, raw: &str) -> BadgeStyle {
    use sea_orm::ActiveEnum;

    let value = raw.trim().to_lowercase();
    match domain {
        BadgeDomain::ProcedureStatus => ProcedureStatus::try_from_value(&value)
            .map(procedure_status_style)
            .unwrap_or(DEFAULT_BADGE),
        BadgeDomain::Shift => ShiftKind::try_from_value(&value)
            .map(shift_style)
            .unwrap_or(DEFAULT_BADGE),
        BadgeDomain::LeaveStatus => LeaveStatus::try_from_value(&value)
            .map(leave_status_style)
            .unwrap_or(DEFAULT_BADGE),
        BadgeDomain::AuditAction => AuditAction::try_from_value(&value)
            .map(audit_action_style)
            .unwrap_or(DEFAULT_BADGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn every_known_value_has_a_style() {
        for status in ProcedureStatus::iter() {
            let style = badge_for(BadgeDomain::ProcedureStatus, &status.to_value());
            assert_eq!(style, procedure_status_style(status));
        }
        for kind in ShiftKind::iter() {
            let style = badge_for(BadgeDomain::Shift, &kind.to_value());
            assert_eq!(style, shift_style(kind));
        }
        for status in LeaveStatus::iter() {
            let style = badge_for(BadgeDomain::LeaveStatus, &status.to_value());
            assert_eq!(style, leave_status_style(status));
        }
        for action in AuditAction::iter() {
            let style = badge_for(BadgeDomain::AuditAction, &action.to_value());
            assert_eq!(style, audit_action_style(action));
        }
    }

    #[test]
    fn unknown_values_fall_back_to_gray() {
        for domain in [
            BadgeDomain::ProcedureStatus,
            BadgeDomain::Shift,
            BadgeDomain::LeaveStatus,
            BadgeDomain::AuditAction,
        ] {
            assert_eq!(badge_for(domain, "definitely-not-a-state"), DEFAULT_BADGE);
            assert_eq!(badge_for(domain, ""), DEFAULT_BADGE);
            assert_eq!(badge_for(domain, "   "), DEFAULT_BADGE);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(
            badge_for(BadgeDomain::LeaveStatus, "PENDING"),
            leave_status_style(LeaveStatus::Pending)
        );
        assert_eq!(
            badge_for(BadgeDomain::Shift, " Morning "),
            shift_style(ShiftKind::Morning)
        );
    }
}
