pub mod blob;
pub mod repository_address;
pub mod transport;

#[cfg(test)]
pub mod testing;
