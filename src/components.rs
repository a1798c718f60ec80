//! Reusable HTML components for the viewer page
//!
//! Maud component functions for the page shell, the document navigation bar
//! and the heading outline sidebar.

pub mod layout;
pub mod nav;
pub mod sidebar;
