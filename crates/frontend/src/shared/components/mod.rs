pub mod form;
pub mod page_header;
pub mod stat_card;
