pub mod strip;

pub use strip::{PagerStrip, StripAction, Templates};
