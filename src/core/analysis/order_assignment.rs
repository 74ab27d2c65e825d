use std::collections::BTreeMap;

use crate::core::analysis::errors::OrderConflict;

/// Caller-supplied mapping from measurement sequence number to ring order.
///
/// Orders are never guessed from positions; an order is only known because
/// the person operating the microscope said so.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderAssignment {
    orders: BTreeMap<u64, u32>,
}

impl OrderAssignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, OrderConflict>
    where
        I: IntoIterator<Item = (u64, u32)>,
    {
        let mut assignment = Self::new();
        for (sequence, order) in pairs {
            assignment.assign(sequence, order)?;
        }
        Ok(assignment)
    }

    /// Labels a measurement. Repeating an identical label is accepted;
    /// relabelling with a different order is a conflict.
    pub fn assign(&mut self, sequence: u64, order: u32) -> Result<(), OrderConflict> {
        match self.orders.get(&sequence) {
            Some(&existing) if existing != order => Err(OrderConflict::Reassigned {
                sequence,
                existing,
                requested: order,
            }),
            Some(_) => Ok(()),
            None => {
                self.orders.insert(sequence, order);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn order_of(&self, sequence: u64) -> Option<u32> {
        self.orders.get(&sequence).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.orders.iter().map(|(sequence, order)| (*sequence, *order))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
