use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational alerts raised independently for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Waiting for pickup too long; suggest returning it to the sender.
    SuggestReturn,
    /// Redispatch has been sitting longer than the redispatch window.
    RedispatchDelayed,
    /// Still pending after the promised lead time.
    CriticalOverdue,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [
        AlertKind::SuggestReturn,
        AlertKind::RedispatchDelayed,
        AlertKind::CriticalOverdue,
    ];

    /// Tag written into the alert column when the alert fires.
    pub fn tag(self) -> &'static str {
        match self {
            AlertKind::SuggestReturn => "Sugerir devolución",
            AlertKind::RedispatchDelayed => "Redespacho demorado",
            AlertKind::CriticalOverdue => "Fuera de tiempo crítico",
        }
    }

    /// Output column holding this alert's tag.
    pub fn column(self) -> &'static str {
        match self {
            AlertKind::SuggestReturn => "Alerta Devolución",
            AlertKind::RedispatchDelayed => "Alerta Redespacho",
            AlertKind::CriticalOverdue => "Alerta Pendiente Fuera Tiempo",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The set of alerts raised for one record (zero to three).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alerts {
    pub suggest_return: bool,
    pub redispatch_delayed: bool,
    pub critical_overdue: bool,
}

impl Alerts {
    pub fn contains(&self, kind: AlertKind) -> bool {
        match kind {
            AlertKind::SuggestReturn => self.suggest_return,
            AlertKind::RedispatchDelayed => self.redispatch_delayed,
            AlertKind::CriticalOverdue => self.critical_overdue,
        }
    }

    pub fn set(&mut self, kind: AlertKind, raised: bool) {
        match kind {
            AlertKind::SuggestReturn => self.suggest_return = raised,
            AlertKind::RedispatchDelayed => self.redispatch_delayed = raised,
            AlertKind::CriticalOverdue => self.critical_overdue = raised,
        }
    }

    /// Column value for `kind`: its tag when raised, empty otherwise.
    pub fn tag(&self, kind: AlertKind) -> &'static str {
        if self.contains(kind) { kind.tag() } else { "" }
    }

    pub fn iter(&self) -> impl Iterator<Item = AlertKind> + '_ {
        AlertKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn any(&self) -> bool {
        self.suggest_return || self.redispatch_delayed || self.critical_overdue
    }
}
