pub mod prelude;

pub mod searches;
