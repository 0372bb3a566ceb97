//! Sale status workflow.
//!
//! The workflow is a table, not control flow: each state lists the states it
//! may move to. Adding a stage means adding a variant and a row.

/// Sale status lifecycle.
///
/// `as_str` gives the exact strings clients send and stores persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaleStatus {
    AwaitingPayment,
    PaymentApproved,
    SentToCarrier,
}

/// Allowed transitions: current state -> permitted next states.
pub const TRANSITIONS: &[(SaleStatus, &[SaleStatus])] = &[
    (SaleStatus::AwaitingPayment, &[SaleStatus::PaymentApproved]),
    (SaleStatus::PaymentApproved, &[SaleStatus::SentToCarrier]),
    (SaleStatus::SentToCarrier, &[]),
];

impl SaleStatus {
    pub const ALL: [SaleStatus; 3] = [
        SaleStatus::AwaitingPayment,
        SaleStatus::PaymentApproved,
        SaleStatus::SentToCarrier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::AwaitingPayment => "Aguardando pagamento",
            SaleStatus::PaymentApproved => "Pagamento Aprovado",
            SaleStatus::SentToCarrier => "Enviado para Transportadora",
        }
    }

    /// Exact (case-sensitive) match against the wire names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn allowed_next(self) -> &'static [SaleStatus] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, next)| *next)
            .unwrap_or(&[])
    }

    pub fn can_transition_to(self, next: SaleStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

impl core::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a stored status string may move to `to`.
///
/// Unknown strings on either side never transition.
pub fn is_allowed_transition(from: &str, to: &str) -> bool {
    match (SaleStatus::parse(from), SaleStatus::parse(to)) {
        (Some(from), Some(to)) => from.can_transition_to(to),
        _ => false,
    }
}
