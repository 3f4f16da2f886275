//! Minimal XML writer for request bodies
//!
//! Request shapes are few and fixed, so bodies are written directly into a
//! string buffer. All text and attribute values go through `escape`.

use quick_xml::escape::escape;

#[derive(Debug, Default)]
pub struct XmlWriter {
    buffer: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `<name attr="value" ...>`
    pub fn open_with(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.push_attributes(attributes);
        self.buffer.push('>');
    }

    pub fn open(&mut self, name: &str) {
        self.open_with(name, &[]);
    }

    /// Open an element carrying an `xsi:type` discriminator
    pub fn open_typed(&mut self, name: &str, xsi_type: &str) {
        self.open_with(name, &[("xsi:type", xsi_type)]);
    }

    pub fn close(&mut self, name: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.open(name);
        self.buffer.push_str(&escape(text));
        self.close(name);
    }

    /// `<?xml version="1.0" encoding="UTF-8"?>`
    pub fn declaration(&mut self) {
        self.buffer.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    }

    pub fn text(&mut self, text: &str) {
        self.buffer.push_str(&escape(text));
    }

    /// `<name attr="value"/>`
    pub fn empty_with(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.buffer.push('<');
        self.buffer.push_str(name);
        self.push_attributes(attributes);
        self.buffer.push_str("/>");
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    fn push_attributes(&mut self, attributes: &[(&str, &str)]) {
        for (key, value) in attributes {
            self.buffer.push(' ');
            self.buffer.push_str(key);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape(*value));
            self.buffer.push('"');
        }
    }
}
