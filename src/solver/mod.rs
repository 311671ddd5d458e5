pub mod driver;
pub mod parameters;
pub mod timing;
pub mod validate;

pub use driver::*;
pub use parameters::*;
pub use timing::*;
pub use validate::*;
