//! DTOs for sessions_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub date: OffsetDateTime,
    pub active: bool,
}
