//! View state and renderers for the highlighted document

pub mod html;
pub mod state;
pub mod text;

pub use html::{HtmlOptions, render_html};
pub use state::{Effect, OrganizationView, PageView, SegmentEntry, SegmentEvent, SegmentView};
pub use text::render_text;
