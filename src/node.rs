//! Parsed value tree rendered against a shape.
//!
//! `Node` is a thin, order-preserving view over a parsed JSON document. Object
//! pairs keep their source order (serde_json is built with `preserve_order`),
//! which matters because members are emitted in that order.

use std::fmt;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Object(Vec<(String, Node)>),
    Array(Vec<Node>),
    String(String),
    Number(Number),
    Boolean(bool),
}

/// Numeric text exactly as it appeared, plus whether it was written as a
/// floating point literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub text: String,
    pub floating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Object,
    Array,
    String,
    Number,
    Boolean,
}

// ------------------------------- Node ------------------------------------- //

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::String(_) => NodeKind::String,
            Node::Number(_) => NodeKind::Number,
            Node::Boolean(_) => NodeKind::Boolean,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }
}

impl Number {
    pub fn as_f64(&self) -> Option<f64> {
        self.text.parse::<f64>().ok()
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Boolean(*b),
            Value::Number(n) => {
                // arbitrary_precision keeps the numeral as written
                let text = n.to_string();
                let floating = text.contains(['.', 'e', 'E']);
                Node::Number(Number { text, floating })
            }
            Value::String(s) => Node::String(s.clone()),
            Value::Array(xs) => Node::Array(xs.iter().map(Node::from).collect()),
            Value::Object(map) => Node::Object(
                map.iter().map(|(k, v)| (k.clone(), Node::from(v))).collect(),
            ),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_pairs_keep_source_order() {
        let node = Node::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let Node::Object(pairs) = node else { panic!("expected object") };
        let keys = pairs.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn numbers_carry_floating_flag() {
        let Node::Number(int) = Node::from(json!(7)) else { panic!() };
        assert_eq!(int.text, "7");
        assert!(!int.floating);

        let Node::Number(float) = Node::from(json!(1.5)) else { panic!() };
        assert_eq!(float.text, "1.5");
        assert!(float.floating);
        assert_eq!(float.as_f64(), Some(1.5));
    }

    #[test]
    fn numerals_survive_parsing_verbatim() {
        let parse = |src: &str| Node::from(serde_json::from_str::<Value>(src).unwrap());
        for (src, floating) in [
            ("123456789012345678901234567890", false),
            ("9223372036854775807", false),
            ("1.50", true),
            ("0.1000000000000000000001", true),
            ("1e2", true),
        ] {
            let Node::Number(n) = parse(src) else { panic!("expected number for {src}") };
            assert_eq!(n.text, src);
            assert_eq!(n.floating, floating, "{src}");
        }
    }

    #[test]
    fn kinds_display_lowercase() {
        assert_eq!(Node::Null.kind().to_string(), "null");
        assert_eq!(Node::from(json!([1])).kind(), NodeKind::Array);
        assert_eq!(Node::from(json!(true)).kind().to_string(), "boolean");
    }
}
