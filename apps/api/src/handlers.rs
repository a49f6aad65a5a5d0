pub mod columns;
pub mod health;
pub mod positions;
pub mod records;
pub mod tickets;

#[cfg(test)]
pub(crate) mod test_support;
