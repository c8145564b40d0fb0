mod html;
mod report;

pub use html::render_html;
pub use report::write_report;
