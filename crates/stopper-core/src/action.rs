//! Hand-off boundary to the attack subsystem.
//!
//! The core only names the request; what the subsystem does with it is
//! outside this crate.

use heapless::String;

use crate::network::{NetworkRecord, SSID_BYTES};

/// Banner rendered above the target name once a request is issued.
pub const ATTACK_BANNER: &str = "ATTACKING:\n";

pub type AttackText = String<{ ATTACK_BANNER.len() + SSID_BYTES }>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttackKind {
    Dos,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttackMethod {
    Broadcast,
    RogueAp,
    CombineAll,
}

/// Request naming an operation against one stored record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionRequest<'a> {
    pub kind: AttackKind,
    pub method: AttackMethod,
    /// 0 keeps the operation running until stopped externally.
    pub timeout_secs: u16,
    pub target: &'a NetworkRecord,
}

impl<'a> ActionRequest<'a> {
    /// The request issued by a SELECT long press.
    pub const fn long_press(target: &'a NetworkRecord) -> Self {
        Self {
            kind: AttackKind::Dos,
            method: AttackMethod::CombineAll,
            timeout_secs: 0,
            target,
        }
    }
}

/// Receiver of action requests.
pub trait AttackLauncher {
    type Error;

    fn start(&mut self, request: ActionRequest<'_>) -> Result<(), Self::Error>;
}

/// `ATTACKING:` banner followed by the target's name.
pub fn attack_message(target: &NetworkRecord) -> AttackText {
    let mut text = AttackText::new();
    let _ = text.push_str(ATTACK_BANNER);
    let _ = text.push_str(target.name());
    text
}
