pub mod pages;
pub mod system;
