//! Stylesheet rendering for generators that only produce fonts
//!
//! Three fixed layouts, one per [`StyleTemplate`]. Each emits an
//! `@font-face` rule pointing at the generated files and one class per glyph.

use std::fmt::Write;

use webfont_core::types::{FontFormat, Glyph, StyleTemplate};

/// What a stylesheet needs to know about the font it describes
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub font_name: &'a str,
    /// Prefix of every font URL, e.g. `./fonts/`
    pub font_path: &'a str,
    pub formats: &'a [FontFormat],
    pub glyphs: &'a [Glyph],
}

/// Render the stylesheet for `template`
pub fn render_stylesheet(template: StyleTemplate, context: &StyleContext<'_>) -> String {
    let mut out = String::new();

    match template {
        StyleTemplate::Css => {
            write_font_face(&mut out, context);
            write_classes(&mut out, context, |glyph| {
                format!("\"{}\"", glyph.css_escape())
            });
        },
        StyleTemplate::Scss => {
            write_variables(&mut out, context, '$');
            write_font_face(&mut out, context);
            write_classes(&mut out, context, |glyph| {
                format!("${}", variable_name(context.font_name, glyph))
            });
        },
        StyleTemplate::Less => {
            write_variables(&mut out, context, '@');
            write_font_face(&mut out, context);
            write_classes(&mut out, context, |glyph| {
                format!("@{}", variable_name(context.font_name, glyph))
            });
        },
    }

    out
}

/// `prefix` + `fontName.ext`, inserting a separator only when needed
pub fn font_url(font_path: &str, font_name: &str, format: FontFormat) -> String {
    let separator = if font_path.is_empty() || font_path.ends_with('/') {
        ""
    } else {
        "/"
    };
    format!("{font_path}{separator}{font_name}.{}", format.extension())
}

fn write_font_face(out: &mut String, context: &StyleContext<'_>) {
    let name = context.font_name;
    let url = |format| font_url(context.font_path, name, format);

    // Browser preference order, whatever order the config listed them in
    let ordered: Vec<FontFormat> = FontFormat::ALL
        .into_iter()
        .filter(|format| context.formats.contains(format))
        .collect();

    let _ = writeln!(out, "@font-face {{");
    let _ = writeln!(out, "  font-family: \"{name}\";");

    if ordered.contains(&FontFormat::Eot) {
        let _ = writeln!(out, "  src: url(\"{}\");", url(FontFormat::Eot));
    }

    let sources: Vec<String> = ordered
        .iter()
        .map(|&format| {
            let suffix = match format {
                FontFormat::Eot => "?#iefix".to_string(),
                FontFormat::Svg => format!("#{name}"),
                _ => String::new(),
            };
            format!(
                "url(\"{}{suffix}\") format(\"{}\")",
                url(format),
                format.css_format()
            )
        })
        .collect();

    if !sources.is_empty() {
        let _ = writeln!(out, "  src: {};", sources.join(",\n    "));
    }

    let _ = writeln!(out, "  font-weight: normal;");
    let _ = writeln!(out, "  font-style: normal;");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
}

fn write_variables(out: &mut String, context: &StyleContext<'_>, sigil: char) {
    for glyph in context.glyphs {
        let _ = writeln!(
            out,
            "{sigil}{}: \"{}\";",
            variable_name(context.font_name, glyph),
            glyph.css_escape()
        );
    }
    if !context.glyphs.is_empty() {
        let _ = writeln!(out);
    }
}

fn write_classes(out: &mut String, context: &StyleContext<'_>, content: impl Fn(&Glyph) -> String) {
    let name = context.font_name;

    let _ = writeln!(out, ".{name} {{");
    let _ = writeln!(out, "  font-family: \"{name}\";");
    let _ = writeln!(out, "  font-style: normal;");
    let _ = writeln!(out, "  font-weight: normal;");
    let _ = writeln!(out, "  line-height: 1;");
    let _ = writeln!(out, "  -webkit-font-smoothing: antialiased;");
    let _ = writeln!(out, "  -moz-osx-font-smoothing: grayscale;");
    let _ = writeln!(out, "}}");

    for glyph in context.glyphs {
        let _ = writeln!(out);
        let _ = writeln!(out, ".{name}-{}::before {{", class_suffix(&glyph.name));
        let _ = writeln!(out, "  content: {};", content(glyph));
        let _ = writeln!(out, "}}");
    }
}

fn variable_name(font_name: &str, glyph: &Glyph) -> String {
    format!("{font_name}-{}", class_suffix(&glyph.name))
}

/// Icon names come from file stems; keep them usable as identifiers
fn class_suffix(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect()
}
