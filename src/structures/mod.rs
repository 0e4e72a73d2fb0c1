pub mod element;
pub mod gf;
pub mod poly;
