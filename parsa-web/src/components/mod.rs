pub mod admin;
pub mod club;
pub mod consultation;
pub mod contact_form;
pub mod course_card;
pub mod course_list;
pub mod course_modal;
pub mod footer;
pub mod header;
pub mod language_grid;
pub mod modal;
pub mod profile;
pub mod quick_stats;
