//! Queue between the button loop and the attack subsystem.

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, TrySendError},
};
use log::info;
use stopper_core::{
    action::{ActionRequest, AttackKind, AttackLauncher, AttackMethod},
    network::NetworkRecord,
};

/// Owned copy of an [`ActionRequest`] that can cross task boundaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttackOrder {
    pub kind: AttackKind,
    pub method: AttackMethod,
    pub timeout_secs: u16,
    pub target: NetworkRecord,
}

impl From<ActionRequest<'_>> for AttackOrder {
    fn from(request: ActionRequest<'_>) -> Self {
        Self {
            kind: request.kind,
            method: request.method,
            timeout_secs: request.timeout_secs,
            target: request.target.clone(),
        }
    }
}

pub type AttackQueue<M, const N: usize> = Channel<M, AttackOrder, N>;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HandoffError {
    /// The consumer has not drained earlier orders.
    QueueFull,
}

/// Sends orders into an [`AttackQueue`] without waiting.
pub struct AttackHandoff<'a, M: RawMutex, const N: usize> {
    queue: &'a AttackQueue<M, N>,
}

impl<'a, M: RawMutex, const N: usize> AttackHandoff<'a, M, N> {
    pub const fn new(queue: &'a AttackQueue<M, N>) -> Self {
        Self { queue }
    }
}

impl<M: RawMutex, const N: usize> AttackLauncher for AttackHandoff<'_, M, N> {
    type Error = HandoffError;

    fn start(&mut self, request: ActionRequest<'_>) -> Result<(), Self::Error> {
        let order = AttackOrder::from(request);
        info!(
            "attack: queueing {:?}/{:?} for {:?}",
            order.kind,
            order.method,
            order.target.name()
        );
        self.queue.try_send(order).map_err(|err| match err {
            TrySendError::Full(_) => HandoffError::QueueFull,
        })
    }
}
