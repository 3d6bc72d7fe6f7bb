pub mod bigtwo;
pub mod deck;
