pub mod cards;
pub mod graphql;
pub mod snake;
