use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderConflict {
    #[error("measurement {sequence} is not in the log")]
    UnknownMeasurement { sequence: u64 },
    #[error("measurement {sequence} is assigned to both order {existing} and order {requested}")]
    Reassigned {
        sequence: u64,
        existing: u32,
        requested: u32,
    },
    #[error("order {order} has {count} assigned positions, expected a left and a right edge")]
    IncompletePair { order: u32, count: usize },
    #[error("both edges of order {order} lie on the same side of the centre")]
    SameSide { order: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("not enough ring orders: {orders_available} available, {required} required")]
    InsufficientData {
        orders_available: usize,
        required: usize,
    },
    #[error("ambiguous order assignment: {0}")]
    AmbiguousOrderAssignment(#[from] OrderConflict),
}
