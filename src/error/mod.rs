mod delivery_error;

pub use delivery_error::{DeliveryError, DeliveryResult};
