//! Scalar coercions: (shape category, scalar node) → literal text.
//!
//! Kotlin never widens an integer literal to `Float`/`Double` implicitly, and
//! has no literal spelling for infinities or NaN, hence the explicit
//! `.toFloat()` / `.toDouble()` suffixes and the named sentinels.

use crate::error::RenderErrorKind;
use crate::naming::{RuntimeType, Symbol, SymbolProvider};
use crate::node::Number;
use crate::schema::{Shape, ShapeCategory};
use crate::writer::kotlin_string;

/// Literal text plus the runtime symbol it needs imported, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub reference: Option<Symbol>,
}

impl Literal {
    fn bare(text: impl Into<String>) -> Self {
        Self { text: text.into(), reference: None }
    }

    fn runtime_call(symbols: &dyn SymbolProvider, ty: RuntimeType, args: &str) -> Self {
        let symbol = symbols.runtime(ty);
        Self { text: format!("{}({args})", symbol.name), reference: Some(symbol) }
    }
}

// ------------------------------- String ----------------------------------- //

pub fn string_literal(symbols: &dyn SymbolProvider, shape: &Shape, value: &str) -> Result<Literal, RenderErrorKind> {
    use ShapeCategory as C;
    let literal = match shape.category() {
        C::Float | C::Double => {
            let member = match value {
                "Infinity" => "POSITIVE_INFINITY",
                "-Infinity" => "NEGATIVE_INFINITY",
                "NaN" => "NaN",
                _ => {
                    return Err(RenderErrorKind::UnsupportedNumericLiteral {
                        shape: shape.id.clone(),
                        token: value.to_string(),
                    });
                }
            };
            Literal::bare(format!("{}.{member}", symbols.type_name(shape)))
        }
        C::BigInteger => Literal::runtime_call(symbols, RuntimeType::BigInteger, &kotlin_string(value)),
        C::BigDecimal => Literal::runtime_call(symbols, RuntimeType::BigDecimal, &kotlin_string(value)),
        C::Document => Literal::runtime_call(symbols, RuntimeType::Document, &kotlin_string(value)),
        _ => Literal::bare(kotlin_string(value)),
    };
    Ok(literal)
}

// ------------------------------- Number ----------------------------------- //

pub fn number_literal(symbols: &dyn SymbolProvider, shape: &Shape, number: &Number) -> Result<Literal, RenderErrorKind> {
    use ShapeCategory as C;
    let text = number.text.as_str();
    let literal = match shape.category() {
        // seconds since the epoch, possibly fractional
        C::Timestamp if number.floating => {
            let seconds = number.as_f64().ok_or_else(|| RenderErrorKind::InvalidNumber {
                shape: shape.id.clone(),
                text: text.to_string(),
            })?;
            let instant = symbols.runtime(RuntimeType::Instant);
            Literal {
                text: format!("{}.fromEpochMilliseconds({})", instant.name, epoch_millis(seconds)),
                reference: Some(instant),
            }
        }
        C::Timestamp => {
            let instant = symbols.runtime(RuntimeType::Instant);
            Literal {
                text: format!("{}.fromEpochSeconds({text}, 0)", instant.name),
                reference: Some(instant),
            }
        }
        C::Byte | C::Short | C::Integer | C::Long | C::IntEnum => Literal::bare(text),
        C::Float => Literal::bare(format!("{text}.toFloat()")),
        C::Double => Literal::bare(format!("{text}.toDouble()")),
        C::BigInteger => Literal::runtime_call(symbols, RuntimeType::BigInteger, &kotlin_string(text)),
        C::BigDecimal => Literal::runtime_call(symbols, RuntimeType::BigDecimal, &kotlin_string(text)),
        C::Document => {
            let suffix = if number.floating { "F" } else { "L" };
            Literal::runtime_call(symbols, RuntimeType::Document, &format!("{text}{suffix}"))
        }
        category => {
            return Err(RenderErrorKind::UnsupportedShapeForNumber { shape: shape.id.clone(), category });
        }
    };
    Ok(literal)
}

/// `round(seconds × 1000)`, ties to even.
pub fn epoch_millis(seconds: f64) -> i64 {
    (seconds * 1e3).round_ties_even() as i64
}

// ------------------------------- Boolean ---------------------------------- //

pub fn boolean_literal(symbols: &dyn SymbolProvider, shape: &Shape, value: bool) -> Result<Literal, RenderErrorKind> {
    let text = if value { "true" } else { "false" };
    match shape.category() {
        ShapeCategory::Boolean => Ok(Literal::bare(text)),
        ShapeCategory::Document => Ok(Literal::runtime_call(symbols, RuntimeType::Document, text)),
        category => Err(RenderErrorKind::UnsupportedShapeForBoolean { shape: shape.id.clone(), category }),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::KotlinSymbols;
    use crate::schema::{ShapeId, ShapeKind};

    fn shape(kind: ShapeKind) -> Shape {
        Shape::new(ShapeId::new("example", "Subject"), kind)
    }

    fn int(text: &str) -> Number {
        Number { text: text.into(), floating: false }
    }

    fn float(text: &str) -> Number {
        Number { text: text.into(), floating: true }
    }

    #[test]
    fn float_strings_accept_exactly_three_sentinels() {
        let symbols = KotlinSymbols::default();
        let double = shape(ShapeKind::Double);
        let float_shape = shape(ShapeKind::Float);

        assert_eq!(string_literal(&symbols, &double, "NaN").unwrap().text, "Double.NaN");
        assert_eq!(string_literal(&symbols, &double, "Infinity").unwrap().text, "Double.POSITIVE_INFINITY");
        assert_eq!(string_literal(&symbols, &float_shape, "-Infinity").unwrap().text, "Float.NEGATIVE_INFINITY");

        for token in ["nan", "inf", "+Infinity", "1.5", "", "INFINITY"] {
            let err = string_literal(&symbols, &double, token).unwrap_err();
            assert!(matches!(err, RenderErrorKind::UnsupportedNumericLiteral { .. }), "{token}");
        }
    }

    #[test]
    fn strings_wrap_big_numbers_and_documents() {
        let symbols = KotlinSymbols::default();
        let big = string_literal(&symbols, &shape(ShapeKind::BigInteger), "123456789012345678901").unwrap();
        assert_eq!(big.text, "BigInteger(\"123456789012345678901\")");
        assert_eq!(big.reference.unwrap().fully_qualified(), "aws.smithy.kotlin.runtime.content.BigInteger");

        let doc = string_literal(&symbols, &shape(ShapeKind::Document), "hi").unwrap();
        assert_eq!(doc.text, "Document(\"hi\")");

        let plain = string_literal(&symbols, &shape(ShapeKind::String), "a\"b").unwrap();
        assert_eq!(plain, Literal { text: "\"a\\\"b\"".into(), reference: None });
    }

    #[test]
    fn timestamps_split_on_the_floating_flag() {
        let symbols = KotlinSymbols::default();
        let ts = shape(ShapeKind::Timestamp);
        let millis = number_literal(&symbols, &ts, &float("1.5")).unwrap();
        assert_eq!(millis.text, "Instant.fromEpochMilliseconds(1500)");
        assert_eq!(millis.reference.unwrap().fully_qualified(), "aws.smithy.kotlin.runtime.time.Instant");

        let seconds = number_literal(&symbols, &ts, &int("1")).unwrap();
        assert_eq!(seconds.text, "Instant.fromEpochSeconds(1, 0)");
    }

    #[test]
    fn epoch_millis_recovers_seconds_within_a_millisecond() {
        for seconds in [0.0, 1.5, 1515531081.123, -12.0005, 0.0004, 1e9 + 0.9999] {
            let ms = epoch_millis(seconds);
            assert!((ms as f64 / 1e3 - seconds).abs() <= 1e-3, "{seconds} → {ms}");
        }
        assert_eq!(epoch_millis(0.5), 500);
        assert_eq!(epoch_millis(-1.25), -1250);
    }

    #[test]
    fn numbers_coerce_per_category() {
        let symbols = KotlinSymbols::default();
        let cases = [
            (ShapeKind::Byte, int("7"), "7"),
            (ShapeKind::Long, int("-9000000000"), "-9000000000"),
            (ShapeKind::Float, int("1"), "1.toFloat()"),
            (ShapeKind::Double, float("2.5"), "2.5.toDouble()"),
            (ShapeKind::BigDecimal, float("1.25"), "BigDecimal(\"1.25\")"),
            (ShapeKind::BigDecimal, float("1.50"), "BigDecimal(\"1.50\")"),
            (ShapeKind::BigInteger, int("340282366920938463463374607431768211456"), "BigInteger(\"340282366920938463463374607431768211456\")"),
            (ShapeKind::Long, int("9223372036854775807"), "9223372036854775807"),
            (ShapeKind::Document, int("3"), "Document(3L)"),
            (ShapeKind::Document, float("3.5"), "Document(3.5F)"),
        ];
        for (kind, number, expected) in cases {
            let literal = number_literal(&symbols, &shape(kind), &number).unwrap();
            assert_eq!(literal.text, expected);
        }
    }

    #[test]
    fn numbers_reject_string_like_shapes() {
        let symbols = KotlinSymbols::default();
        let err = number_literal(&symbols, &shape(ShapeKind::String), &int("1")).unwrap_err();
        assert!(matches!(err, RenderErrorKind::UnsupportedShapeForNumber { category: ShapeCategory::String, .. }));
    }

    #[test]
    fn booleans_only_fit_boolean_and_document() {
        let symbols = KotlinSymbols::default();
        assert_eq!(boolean_literal(&symbols, &shape(ShapeKind::Boolean), true).unwrap().text, "true");
        assert_eq!(boolean_literal(&symbols, &shape(ShapeKind::Document), false).unwrap().text, "Document(false)");
        let err = boolean_literal(&symbols, &shape(ShapeKind::Integer), true).unwrap_err();
        assert!(matches!(err, RenderErrorKind::UnsupportedShapeForBoolean { .. }));
    }
}
