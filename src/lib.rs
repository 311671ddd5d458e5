pub mod build_info;
pub mod cli;
pub mod domain;
pub mod error;
pub mod par_slice;
pub mod par_stencil;
pub mod pool;
pub mod solver;
pub mod stencil;
pub mod util;
