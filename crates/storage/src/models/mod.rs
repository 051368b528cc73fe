mod admin;
mod department;
mod event_result;
mod media;

pub use admin::{Admin, AdminSession};
pub use department::{Department, DepartmentTotal};
pub use event_result::{EventResult, EventResultWithDepartment, EventType, NewEventResult};
pub use media::{Media, MediaType, NewMedia};
