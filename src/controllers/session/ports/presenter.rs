use std::error::Error;

use crate::controllers::session::snapshot::SessionSnapshot;

/// A renderer of session snapshots. Implementations read the snapshot and
/// never touch the session itself.
pub trait SnapshotPresenterPort {
    type Frame;
    type Failure: Error;

    fn present(&self, snapshot: &SessionSnapshot) -> Result<Self::Frame, Self::Failure>;
}
