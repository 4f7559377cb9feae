extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
extern crate rayon;
extern crate regex;
extern crate serde;
extern crate thiserror;

pub mod error;
pub mod geo;
pub mod topology;
pub mod simplify;

pub use error::{Result, SimplifyError};
pub use simplify::{simplify, SimplifyMethod, SimplifyOptions, SimplifyRecord};
pub use topology::{ArcCollection, Dataset};
