pub mod engagement;
pub mod reconcile;

pub mod util;
