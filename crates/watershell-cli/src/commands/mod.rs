pub mod extract;
pub mod waters;
