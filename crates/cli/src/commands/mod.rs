pub mod generate;
pub mod inspect;
pub mod lookup;
pub mod names;
pub mod util;

pub use generate::*;
pub use inspect::*;
pub use lookup::*;
pub use names::*;
pub use util::*;
