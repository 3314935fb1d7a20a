//! Description-language compiler.
//!
//! Builds a widget tree from a declarative source string, producing exactly
//! the widgets the programmatic builders produce. The grammar is one
//! production deep:
//!
//! ```text
//! widget  = Identifier '(' (prop ':' value ','?)* ')'
//! value   = string | number | boolean | NEAR | CENTER | FAR
//!         | '#RRGGBB' | '(' r ',' g ',' b ')' | widget
//! ```
//!
//! Whitespace between tokens is insignificant. The reserved property `id`
//! binds the widget to a name in the tree instead of setting a field.
//! Unrecognized property names are silently ignored; structural failures
//! (missing parenthesis, unknown kind name) abort the enclosing widget
//! expression and yield `None` rather than an error.
//!
//! `Column` children are list-valued and have no grammar production, so
//! columns cannot be expressed in this format yet.

use crate::geometry::{Alignment, Color};
use crate::tree::{Tree, Wid};
use crate::widgets::{
    Button, Column, Container, Input, Layout, Placement, Root, Slider, Text, Widget,
};

/// Compile a source string into the tree. Returns the outermost widget's
/// identifier, or `None` when nothing parseable starts the string.
pub fn compile(tree: &mut Tree, source: &str) -> Option<Wid> {
    Cursor::new(source).widget(tree)
}

enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    Align(Alignment),
    Color(Color),
    Child(Wid),
}

impl Value {
    fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Num(n) => Some(*n as i32),
            _ => None,
        }
    }

    fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Num(n) => Some(*n as f32),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_child(&self) -> Option<Wid> {
        match self {
            Value::Child(wid) => Some(*wid),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn as_align(&self) -> Option<Alignment> {
        match self {
            Value::Align(a) => Some(*a),
            _ => None,
        }
    }

    /// Color properties additionally accept a bare number as a grey shade.
    fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            Value::Num(n) => Some(Color::shade(n.clamp(0.0, 255.0) as u8)),
            _ => None,
        }
    }
}

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> Option<String> {
        self.skip_whitespace();
        let start = self.pos;
        if !matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == b'_') {
            return None;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.pos += 1;
        }
        Some(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        self.eat(b'-');
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.eat(b'.') {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if self.pos == start {
            return None;
        }
        String::from_utf8_lossy(&self.src[start..self.pos]).parse().ok()
    }

    fn string(&mut self) -> Option<String> {
        if !self.eat(b'"') {
            return None;
        }
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'"' {
                let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                self.pos += 1;
                return Some(text);
            }
            self.pos += 1;
        }
        log::debug!("unterminated string at byte {start}");
        None
    }

    fn hex_color(&mut self) -> Option<Color> {
        if !self.eat(b'#') {
            return None;
        }
        let mut hex = 0u32;
        for _ in 0..6 {
            let digit = (self.bump()? as char).to_digit(16)?;
            hex = hex << 4 | digit;
        }
        Some(Color::from_hex(hex))
    }

    /// `(r, g, b)` with each component clamped to 0..255.
    fn triplet_color(&mut self) -> Option<Color> {
        if !self.eat(b'(') {
            return None;
        }
        let mut parts = [0u8; 3];
        for (i, part) in parts.iter_mut().enumerate() {
            self.skip_whitespace();
            *part = self.number()?.clamp(0.0, 255.0) as u8;
            self.skip_whitespace();
            if i < 2 && !self.eat(b',') {
                return None;
            }
        }
        self.skip_whitespace();
        if !self.eat(b')') {
            return None;
        }
        Some(Color::rgb(parts[0], parts[1], parts[2]))
    }

    fn value(&mut self, tree: &mut Tree) -> Option<Value> {
        self.skip_whitespace();
        match self.peek()? {
            b'"' => self.string().map(Value::Str),
            b'#' => self.hex_color().map(Value::Color),
            b'(' => self.triplet_color().map(Value::Color),
            c if c.is_ascii_digit() || c == b'-' || c == b'.' => self.number().map(Value::Num),
            _ => {
                let word = self.identifier()?;
                self.skip_whitespace();
                if self.peek() == Some(b'(') {
                    return self.widget_body(tree, &word).map(Value::Child);
                }
                match word.as_str() {
                    "NEAR" => Some(Value::Align(Alignment::Near)),
                    "CENTER" => Some(Value::Align(Alignment::Center)),
                    "FAR" => Some(Value::Align(Alignment::Far)),
                    // `true` is the boolean literal; any other bare word
                    // reads as false
                    other => Some(Value::Bool(other == "true")),
                }
            }
        }
    }

    fn widget(&mut self, tree: &mut Tree) -> Option<Wid> {
        self.skip_whitespace();
        let kind = self.identifier()?;
        self.skip_whitespace();
        self.widget_body(tree, &kind)
    }

    /// Parse `'(' props ')'` after the kind name and create the widget.
    /// Children are created as their values parse, so every child holds a
    /// smaller identifier than its parent.
    fn widget_body(&mut self, tree: &mut Tree, kind: &str) -> Option<Wid> {
        if !self.eat(b'(') {
            log::debug!("expected '(' after {kind:?} at byte {}", self.pos);
            return None;
        }

        let mut props = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(b')') {
                break;
            }
            let name = self.identifier().or_else(|| {
                log::debug!("expected property name or ')' at byte {}", self.pos);
                None
            })?;
            self.skip_whitespace();
            if !self.eat(b':') {
                log::debug!("expected ':' after property {name:?} at byte {}", self.pos);
                return None;
            }
            let value = self.value(tree)?;
            props.push((name, value));
            self.skip_whitespace();
            self.eat(b',');
        }

        build(tree, kind, props)
    }
}

fn build(tree: &mut Tree, kind: &str, props: Vec<(String, Value)>) -> Option<Wid> {
    let mut name = None;
    let widget: Widget = match kind {
        "Root" => {
            let mut w = Root::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "child" => w.child = value.as_child(),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Container" => {
            let mut w = Container::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "width" => w.width = value.as_i32().unwrap_or(w.width),
                    "height" => w.height = value.as_i32().unwrap_or(w.height),
                    "padding" => w.padding = value.as_i32().unwrap_or(w.padding),
                    "background" => w.background = value.as_bool().unwrap_or(w.background),
                    "child" => w.child = value.as_child(),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Layout" => {
            let mut w = Layout::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "top" => w.top = value.as_child(),
                    "bottom" => w.bottom = value.as_child(),
                    "left" => w.left = value.as_child(),
                    "right" => w.right = value.as_child(),
                    "center" => w.center = value.as_child(),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Column" => {
            // list-valued children have no grammar production; only the
            // scalar properties are settable here
            let mut w = Column::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "alignment" => w.alignment = value.as_align().unwrap_or(w.alignment),
                    "spacing" => w.spacing = value.as_i32().unwrap_or(w.spacing),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Placement" => {
            let mut w = Placement::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "x" => w.x = value.as_f32().unwrap_or(w.x),
                    "y" => w.y = value.as_f32().unwrap_or(w.y),
                    "child" => w.child = value.as_child(),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Text" => {
            let mut w = Text::new("");
            for (prop, value) in props {
                match prop.as_str() {
                    "text" => w.text = value.as_str().unwrap_or_default().to_string(),
                    "align" => w.align = value.as_align().unwrap_or(w.align),
                    "color" => w.color = value.as_color().unwrap_or(w.color),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Button" => {
            let mut w = Button::new("");
            for (prop, value) in props {
                match prop.as_str() {
                    "text" => w.text = value.as_str().unwrap_or_default().to_string(),
                    "disabled" => w.disabled = value.as_bool().unwrap_or(w.disabled),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Slider" => {
            let mut w = Slider::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "min" => w.min = value.as_i32().unwrap_or(w.min),
                    "max" => w.max = value.as_i32().unwrap_or(w.max),
                    "value" => w.value = value.as_i32().unwrap_or(w.value),
                    "disabled" => w.disabled = value.as_bool().unwrap_or(w.disabled),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        "Input" => {
            let mut w = Input::new();
            for (prop, value) in props {
                match prop.as_str() {
                    "text" => w = w.text(value.as_str().unwrap_or_default()),
                    "pattern" => w = w.pattern(value.as_str().unwrap_or(".")),
                    "masked" => w = w.masked(value.as_bool().unwrap_or(false)),
                    "disabled" => w = w.disabled(value.as_bool().unwrap_or(false)),
                    "id" => name = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
            w.into()
        }
        other => {
            log::debug!("unknown widget kind {other:?}");
            return None;
        }
    };

    Some(match name {
        Some(name) => tree.create_named(&name, widget),
        None => tree.create(widget),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AtlasMetrics, RecordingBackend};
    use crate::device::Device;
    use crate::geometry::Rect;

    fn device() -> Device<RecordingBackend> {
        Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8))
    }

    #[test]
    fn test_parses_a_nested_tree() {
        let mut tree = Tree::new();
        let root = compile(
            &mut tree,
            r#"Root(child: Container(background: true, child: Text(text: "hi", align: CENTER)), )"#,
        )
        .unwrap();

        let root_widget = tree.get::<Root>(root).unwrap();
        let container = tree.get::<Container>(root_widget.child.unwrap()).unwrap();
        assert!(container.background);
        let text = tree.get::<Text>(container.child.unwrap()).unwrap();
        assert_eq!(text.text, "hi");
        assert_eq!(text.align, Alignment::Center);
    }

    #[test]
    fn test_children_get_smaller_identifiers_than_parents() {
        let mut tree = Tree::new();
        let root = compile(&mut tree, r#"Root(child: Text(text: "a"))"#).unwrap();
        let child = tree.get::<Root>(root).unwrap().child.unwrap();
        assert!(child < root);
        assert_eq!(tree.newest(), Some(root));
    }

    #[test]
    fn test_id_binds_a_name() {
        let mut tree = Tree::new();
        compile(&mut tree, r#"Root(child: Button(text: "OK", id: "ok"))"#).unwrap();
        assert_eq!(tree.get_named::<Button>("ok").unwrap().text, "OK");
    }

    #[test]
    fn test_unknown_properties_are_ignored() {
        let mut tree = Tree::new();
        let t = compile(&mut tree, r#"Text(text: "x", wobble: 3)"#).unwrap();
        assert_eq!(tree.get::<Text>(t).unwrap().text, "x");
    }

    #[test]
    fn test_structural_failure_yields_nothing() {
        let mut tree = Tree::new();
        assert!(compile(&mut tree, "Gadget(text: \"x\")").is_none());
        assert!(compile(&mut tree, "Text text").is_none());
        assert!(compile(&mut tree, "Text(text \"x\")").is_none());
        assert!(compile(&mut tree, "").is_none());
    }

    #[test]
    fn test_nested_failure_aborts_the_enclosing_expression() {
        let mut tree = Tree::new();
        assert!(compile(&mut tree, "Root(child: Gadget())").is_none());
    }

    #[test]
    fn test_boolean_values() {
        let mut tree = Tree::new();
        let c = compile(&mut tree, "Container(background: true)").unwrap();
        assert!(tree.get::<Container>(c).unwrap().background);

        let c = compile(&mut tree, "Container(background: nope)").unwrap();
        assert!(!tree.get::<Container>(c).unwrap().background);
    }

    #[test]
    fn test_color_forms() {
        let mut tree = Tree::new();
        let t = compile(&mut tree, r#"Text(text: "x", color: #FF8000)"#).unwrap();
        assert_eq!(tree.get::<Text>(t).unwrap().color, Color::rgb(255, 128, 0));

        let t = compile(&mut tree, r#"Text(text: "x", color: (10, 20, 30))"#).unwrap();
        assert_eq!(tree.get::<Text>(t).unwrap().color, Color::rgb(10, 20, 30));

        // a bare number reads as a grey shade, clamped to the byte range
        let t = compile(&mut tree, r#"Text(text: "x", color: 300)"#).unwrap();
        assert_eq!(tree.get::<Text>(t).unwrap().color, Color::shade(255));
    }

    #[test]
    fn test_numbers_parse_signs_and_fractions() {
        let mut tree = Tree::new();
        let p = compile(&mut tree, "Placement(x: 0.25, y: .5)").unwrap();
        let placement = tree.get::<Placement>(p).unwrap();
        assert_eq!(placement.x, 0.25);
        assert_eq!(placement.y, 0.5);

        let s = compile(&mut tree, "Slider(min: -10, max: 10, value: -5)").unwrap();
        assert_eq!(tree.get::<Slider>(s).unwrap().value, -5);
    }

    #[test]
    fn test_whitespace_and_trailing_commas_are_insignificant() {
        let mut tree = Tree::new();
        let root = compile(
            &mut tree,
            "Root(\n  child :\n    Container( width: 40 , height: 20 , ) ,\n)",
        )
        .unwrap();
        let child = tree.get::<Root>(root).unwrap().child.unwrap();
        let container = tree.get::<Container>(child).unwrap();
        assert_eq!((container.width, container.height), (40, 20));
    }

    #[test]
    fn test_layout_slots_take_nested_widgets() {
        let mut tree = Tree::new();
        let l = compile(
            &mut tree,
            "Layout(top: Container(height: 50), center: Container())",
        )
        .unwrap();
        let layout = tree.get::<Layout>(l).unwrap();
        assert!(layout.top.is_some());
        assert!(layout.center.is_some());
        assert!(layout.bottom.is_none());
    }

    #[test]
    fn test_parsed_text_centers_like_the_builder() {
        let mut dev = device();
        let mut tree = Tree::new();
        let c = compile(
            &mut tree,
            r#"Container(width: 100, child: Text(text: "abc", align: CENTER))"#,
        )
        .unwrap();

        let allocation = Rect::new(0, 0, 100, 8);
        tree.resolve_bounds(&mut dev, c, allocation);
        tree.draw(&mut dev, c, allocation);
        dev.flush();

        // 50 - measured("abc")/2 = 44
        assert_eq!(dev.backend().blits[0].dst.x, 44);
    }
}
