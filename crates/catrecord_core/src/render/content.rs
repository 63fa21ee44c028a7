//! PDF content stream builder.
//!
//! Only the text operators needed for plain line output are provided:
//! - BT/ET: begin/end text object
//! - Tf: set font and size
//! - Td: move text position
//! - Tj: show text string

/// Content stream builder.
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font resource and size (Tf)
    pub fn set_font(&mut self, resource_name: &str, size: f64) -> &mut Self {
        self.write_line(&format!("/{} {} Tf", resource_name, fmt_num(size)));
        self
    }

    /// Move the text position relative to the current line start (Td)
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.write_line(&format!("{} {} Td", fmt_num(tx), fmt_num(ty)));
        self
    }

    /// Show a text string (Tj)
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        self.data.extend_from_slice(&encode_literal(text));
        self.write_line(" Tj");
        self
    }

    fn write_line(&mut self, line: &str) {
        self.data.extend_from_slice(line.as_bytes());
        self.data.push(b'\n');
    }
}

/// Encodes `text` as a PDF literal string in WinAnsi encoding.
///
/// Characters outside Latin-1 are replaced with `?`; the standard Type1
/// fonts have no glyphs for them.
pub fn encode_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for ch in text.chars() {
        let code = u32::from(ch);
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(code as u8);
            }
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            ' '..='~' => out.push(code as u8),
            '\u{a0}'..='\u{ff}' => out.extend_from_slice(format!("\\{code:03o}").as_bytes()),
            _ => out.push(b'?'),
        }
    }
    out.push(b')');
    out
}

fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        let s = format!("{n:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
