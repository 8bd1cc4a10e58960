pub mod body;
pub mod upload;
