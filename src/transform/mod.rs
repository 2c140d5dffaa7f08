mod embed;
mod extract;

pub use embed::*;
pub use extract::*;
