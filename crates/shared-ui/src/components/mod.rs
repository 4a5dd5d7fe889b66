// Page chrome
pub mod layout;
pub mod navbar;
pub mod page_header;

// Content
pub mod badge;
pub mod card;
pub mod data_table;
pub mod detail_list;
pub mod form;

pub use badge::*;
pub use card::*;
pub use data_table::*;
pub use detail_list::*;
pub use form::*;
pub use layout::*;
pub use navbar::*;
pub use page_header::*;
