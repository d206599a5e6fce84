//! UI-side state that is independent of any particular frontend

pub mod feedback;
pub mod table;
pub mod virtual_list;

pub use self::feedback::{NotificationCenter, Toast, ToastLevel};
pub use self::virtual_list::{VirtualListState, VirtualRow};
