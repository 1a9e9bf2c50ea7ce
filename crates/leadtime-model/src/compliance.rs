//! Compliance categories and the remaining-days display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of comparing a shipment's lead time against its promise.
///
/// Exactly one category is assigned to every record. The declaration order is
/// the canonical reporting order (delivered first, then pending by urgency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplianceCategory {
    /// "Entregada - En Tiempo"
    DeliveredOnTime,
    /// "Entregada - Fuera de Tiempo"
    DeliveredLate,
    /// "Pendiente - En Tiempo"
    PendingOnTime,
    /// "Pendiente - Último Día"
    PendingLastDay,
    /// "Pendiente - Fuera de Tiempo"
    PendingLate,
    /// "Pendiente - Sin datos"
    PendingNoData,
}

impl ComplianceCategory {
    pub const ALL: [ComplianceCategory; 6] = [
        ComplianceCategory::DeliveredOnTime,
        ComplianceCategory::DeliveredLate,
        ComplianceCategory::PendingOnTime,
        ComplianceCategory::PendingLastDay,
        ComplianceCategory::PendingLate,
        ComplianceCategory::PendingNoData,
    ];

    /// Label written to the `Cumplimiento` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceCategory::DeliveredOnTime => "Entregada - En Tiempo",
            ComplianceCategory::DeliveredLate => "Entregada - Fuera de Tiempo",
            ComplianceCategory::PendingOnTime => "Pendiente - En Tiempo",
            ComplianceCategory::PendingLastDay => "Pendiente - Último Día",
            ComplianceCategory::PendingLate => "Pendiente - Fuera de Tiempo",
            ComplianceCategory::PendingNoData => "Pendiente - Sin datos",
        }
    }

    /// Hex colour used by charts and workbook exports.
    pub fn color(self) -> &'static str {
        match self {
            ComplianceCategory::DeliveredOnTime => "#28a745",
            ComplianceCategory::DeliveredLate => "#dc3545",
            ComplianceCategory::PendingOnTime => "#ffc107",
            ComplianceCategory::PendingLastDay => "#fd7e14",
            ComplianceCategory::PendingLate => "#6c757d",
            ComplianceCategory::PendingNoData => "#17a2b8",
        }
    }

    pub fn is_delivered(self) -> bool {
        matches!(
            self,
            ComplianceCategory::DeliveredOnTime | ComplianceCategory::DeliveredLate
        )
    }

    pub fn is_pending(self) -> bool {
        !self.is_delivered()
    }

    /// Delivered or pending past the promise.
    pub fn is_late(self) -> bool {
        matches!(
            self,
            ComplianceCategory::DeliveredLate | ComplianceCategory::PendingLate
        )
    }

    /// Pending categories that still have a countdown to show.
    pub fn shows_remaining_days(self) -> bool {
        matches!(
            self,
            ComplianceCategory::PendingOnTime | ComplianceCategory::PendingLastDay
        )
    }
}

impl fmt::Display for ComplianceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ComplianceCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == trimmed)
            .ok_or_else(|| format!("unknown compliance category: {trimmed}"))
    }
}

/// Days left before a pending shipment breaks its promise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemainingDays {
    /// Delivered, overdue or without data.
    #[default]
    NotApplicable,
    /// Promise expires today.
    DueToday,
    /// Business days left, always positive.
    Remaining(u32),
}

impl fmt::Display for RemainingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemainingDays::NotApplicable => Ok(()),
            RemainingDays::DueToday => f.write_str("Vence hoy"),
            RemainingDays::Remaining(days) => write!(f, "{days} días restantes"),
        }
    }
}
