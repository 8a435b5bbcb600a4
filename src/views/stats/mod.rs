pub mod stats_card;
