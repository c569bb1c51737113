//! HTML output options.

/// Options of the built-in HTML renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Write raw HTML and dangerous link destinations through unchanged.
    pub unsafe_html: bool,
    /// Self-close void elements (`<br />`).
    pub xhtml: bool,
    /// Render soft line breaks as `<br>`.
    pub hard_wraps: bool,
}

impl HtmlOptions {
    pub(crate) const fn void_close(&self) -> &'static str {
        if self.xhtml { " />" } else { ">" }
    }
}
