mod use_fetch;
mod use_paged_list;
mod use_title;

pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_paged_list::{PagedList, use_paged_list};
pub use use_title::use_title;
