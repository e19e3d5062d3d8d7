mod main_layout;
mod sidebar;

pub use main_layout::MainLayout;
pub use sidebar::Sidebar;
