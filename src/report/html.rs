use crate::graph::model::Glyph;
use crate::render::scene::{COMMAND_ANNOTATION, TITLE};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::{self, Write};

const STYLE: &str = r#"
    body { font-family: 'Arial', sans-serif; background-color: #f9f9fe; margin: 0; padding: 20px; }
    .container { max-width: 1200px; margin: 0 auto; background-color: white; padding: 20px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
    h1 { color: #333; text-align: center; margin-bottom: 30px; }
    .visualization { margin-bottom: 30px; text-align: center; }
    .code { font-family: 'Courier New', monospace; background: #f5f5f5; padding: 15px; border-radius: 5px; overflow-x: auto; }
    .glyph-legend { display: flex; justify-content: center; margin: 20px 0; }
    .glyph-item { margin: 0 15px; text-align: center; }
    .glyph { font-size: 24px; margin-bottom: 5px; }
    .description { font-size: 12px; color: #666; }
    .tabs { display: flex; margin-bottom: 20px; }
    .tab { padding: 10px 20px; cursor: pointer; background: #eee; margin-right: 5px; }
    .tab.active { background: #4285F4; color: white; }
    .tab-content { display: none; }
    .tab-content.active { display: block; }
"#;

const SCRIPT: &str = r#"
    function switchTab(name) {
      document.querySelectorAll('.tab-content').forEach(el => el.classList.remove('active'));
      document.querySelectorAll('.tab').forEach(el => el.classList.remove('active'));
      document.getElementById(name).classList.add('active');
      document.querySelector(`.tab[data-tab="${name}"]`).classList.add('active');
    }
"#;

/// Tab ids and captions, in display order.
const TABS: [(&str, &str); 2] = [("static", "Static Visualization"), ("animated", "Animation")];

/// Renders the HTML report page.
///
/// Both images are inlined as base64 data URIs, so the page has no external references.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReport;

impl HtmlReport {
    pub fn render(static_png: &[u8], animation_gif: &[u8]) -> String {
        Page {
            static_png,
            animation_gif,
        }
        .to_string()
    }
}

/// The report page; formatting it writes the whole document.
struct Page<'a> {
    static_png: &'a [u8],
    animation_gif: &'a [u8],
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = escape(TITLE);
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"utf-8\">")?;
        writeln!(out, "  <title>{title}</title>")?;
        writeln!(out, "  <style>{STYLE}  </style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "  <div class=\"container\">")?;
        writeln!(out, "    <h1>{title}</h1>")?;
        writeln!(out, "    <p class=\"code\">{}</p>", escape(COMMAND_ANNOTATION))?;

        writeln!(out, "    <div class=\"glyph-legend\">")?;
        for glyph in Glyph::ALL {
            writeln!(out, "      <div class=\"glyph-item\">")?;
            writeln!(out, "        <div class=\"glyph\">{}</div>", glyph.symbol())?;
            writeln!(out, "        <div class=\"description\">{}</div>", escape(glyph.label()))?;
            writeln!(out, "      </div>")?;
        }
        writeln!(out, "    </div>")?;

        writeln!(out, "    <div class=\"tabs\">")?;
        for (i, (id, caption)) in TABS.iter().enumerate() {
            let active = if i == 0 { " active" } else { "" };
            writeln!(
                out,
                "      <div class=\"tab{active}\" data-tab=\"{id}\" onclick=\"switchTab('{id}')\">{caption}</div>"
            )?;
        }
        writeln!(out, "    </div>")?;

        write_image_tab(
            out,
            TABS[0].0,
            true,
            "image/png",
            self.static_png,
            "Recursive QKOV Attribution Map",
        )?;
        write_image_tab(
            out,
            TABS[1].0,
            false,
            "image/gif",
            self.animation_gif,
            "QKOV Attribution Animation",
        )?;

        writeln!(out, "    <script>{SCRIPT}    </script>")?;
        writeln!(out, "  </div>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }
}

fn write_image_tab(
    out: &mut impl Write,
    id: &str,
    active: bool,
    mime: &str,
    bytes: &[u8],
    alt: &str,
) -> fmt::Result {
    let class = if active { "tab-content active" } else { "tab-content" };
    writeln!(out, "    <div class=\"{class}\" id=\"{id}\">")?;
    writeln!(out, "      <div class=\"visualization\">")?;
    writeln!(
        out,
        "        <img src=\"{}\" alt=\"{alt}\" style=\"max-width:100%;\">",
        data_uri(mime, bytes)
    )?;
    writeln!(out, "      </div>")?;
    writeln!(out, "    </div>")
}

/// `data:<mime>;base64,<payload>` with the standard base64 alphabet.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Escape text content (attribute values here are constants).
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/report/html.rs"]
mod tests;
