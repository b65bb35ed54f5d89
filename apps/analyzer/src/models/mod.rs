pub mod analysis;
pub mod upload;

pub use analysis::{ErrorBody, ResultPayload};
pub use upload::{SlotName, UploadFile};
