// Licensed under the Apache-2.0 license

mod domain;
pub mod enums;
pub mod header;

pub use enums::*;
pub use header::*;
