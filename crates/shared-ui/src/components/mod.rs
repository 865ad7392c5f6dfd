// Standalone components
pub mod access_denied;
pub mod badge;
pub mod button;
pub mod card;
pub mod chart;
pub mod data_table;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod pagination;
pub mod search_bar;
pub mod stat_card;

// Primitive wrappers
pub mod alert_dialog;
pub mod dialog;
pub mod switch;
pub mod tabs;
pub mod toast;

pub use access_denied::*;
pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use chart::*;
pub use data_table::*;
pub use dialog::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use pagination::*;
pub use search_bar::*;
pub use stat_card::*;
pub use switch::*;
pub use tabs::*;
pub use toast::*;
