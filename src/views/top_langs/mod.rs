pub mod top_langs_card;
