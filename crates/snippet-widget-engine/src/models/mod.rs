pub mod snippet;

pub use snippet::{Icon, Snippet};
